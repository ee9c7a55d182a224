use chatrelay::conversation::{HistoryKey, HistoryScope, HistoryStore, MAX_PAIRS};
use chatrelay::core::models::{Role, Turn};

fn user_key(user_id: u64, channel_id: u64) -> HistoryKey {
    HistoryScope::PerUserChannel.key_for(user_id, channel_id)
}

#[tokio::test]
async fn test_unknown_key_returns_empty_history() {
    let store = HistoryStore::new();
    assert!(store.get(user_key(1, 2)).await.is_empty());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_append_stores_pair_in_order() {
    let store = HistoryStore::new();
    let key = user_key(1, 2);
    store
        .append(key, Turn::user("hello"), Turn::assistant("hi there"))
        .await;

    let history = store.get(key).await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role(), Role::User);
    assert_eq!(history[0].text(), "hello");
    assert_eq!(history[1].role(), Role::Assistant);
    assert_eq!(history[1].text(), "hi there");
}

#[tokio::test]
async fn test_history_truncated_to_most_recent_pairs() {
    let store = HistoryStore::new();
    let key = HistoryKey::Global;
    let total = MAX_PAIRS + 5;
    for i in 0..total {
        store
            .append(key, Turn::user(format!("q{i}")), Turn::assistant(format!("a{i}")))
            .await;
    }

    let history = store.get(key).await;
    assert_eq!(history.len(), 2 * MAX_PAIRS);

    let expected: Vec<String> = (total - MAX_PAIRS..total)
        .flat_map(|i| [format!("q{i}"), format!("a{i}")])
        .collect();
    let actual: Vec<String> = history.iter().map(|t| t.text().to_string()).collect();
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn test_per_user_channel_keys_are_independent() {
    let store = HistoryStore::new();
    store
        .append(user_key(1, 10), Turn::user("from one"), Turn::assistant("a"))
        .await;
    store
        .append(user_key(1, 11), Turn::user("other channel"), Turn::assistant("b"))
        .await;
    store
        .append(user_key(2, 10), Turn::user("from two"), Turn::assistant("c"))
        .await;

    assert_eq!(store.len().await, 3);
    assert_eq!(store.get(user_key(1, 10)).await[0].text(), "from one");
    assert_eq!(store.get(user_key(1, 11)).await[0].text(), "other channel");
    assert_eq!(store.get(user_key(2, 10)).await[0].text(), "from two");
}

#[tokio::test]
async fn test_global_scope_shares_one_history() {
    let scope = HistoryScope::Global;
    assert_eq!(scope.key_for(1, 10), scope.key_for(2, 20));

    let store = HistoryStore::new();
    store
        .append(scope.key_for(1, 10), Turn::user("first"), Turn::assistant("a"))
        .await;
    store
        .append(scope.key_for(2, 20), Turn::user("second"), Turn::assistant("b"))
        .await;

    assert_eq!(store.get(HistoryKey::Global).await.len(), 4);
}

#[tokio::test]
async fn test_max_keys_evicts_least_recently_active() {
    let store = HistoryStore::with_limits(MAX_PAIRS, Some(2));
    store.append(user_key(1, 1), Turn::user("one"), Turn::assistant("a")).await;
    store.append(user_key(2, 1), Turn::user("two"), Turn::assistant("b")).await;

    // Touch key 1 so key 2 becomes the oldest
    let _ = store.session(user_key(1, 1)).await;
    store.append(user_key(3, 1), Turn::user("three"), Turn::assistant("c")).await;

    assert_eq!(store.len().await, 2);
    assert!(store.get(user_key(2, 1)).await.is_empty());
    assert_eq!(store.get(user_key(1, 1)).await.len(), 2);
    assert_eq!(store.get(user_key(3, 1)).await.len(), 2);
}

#[tokio::test]
async fn test_opening_a_session_never_evicts() {
    let store = HistoryStore::with_limits(MAX_PAIRS, Some(1));
    store.append(user_key(1, 1), Turn::user("one"), Turn::assistant("a")).await;

    let _ = store.session(user_key(2, 1)).await;

    assert_eq!(store.get(user_key(1, 1)).await.len(), 2);
}

#[tokio::test]
async fn test_held_session_is_not_evicted() {
    let store = HistoryStore::with_limits(MAX_PAIRS, Some(1));
    let held = store.session(user_key(1, 1)).await;

    store.append(user_key(2, 1), Turn::user("two"), Turn::assistant("b")).await;
    assert_eq!(store.len().await, 2);

    held.lock()
        .await
        .append(Turn::user("one"), Turn::assistant("a"));
    drop(held);
    assert_eq!(store.get(user_key(1, 1)).await[0].text(), "one");

    store.append(user_key(3, 1), Turn::user("three"), Turn::assistant("c")).await;
    assert_eq!(store.len().await, 1);
    assert_eq!(store.get(user_key(3, 1)).await.len(), 2);
}

#[tokio::test]
async fn test_release_drops_only_empty_unused_slots() {
    let store = HistoryStore::new();
    let empty = user_key(1, 1);
    let written = user_key(2, 1);

    let session = store.session(empty).await;
    store.release(empty).await;
    assert_eq!(store.len().await, 1);
    drop(session);
    store.release(empty).await;

    store.append(written, Turn::user("q"), Turn::assistant("a")).await;
    store.release(written).await;

    assert_eq!(store.len().await, 1);
    assert_eq!(store.get(written).await.len(), 2);
}
