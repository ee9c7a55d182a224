//! Bounded, keyed conversation history.
//!
//! Each key owns an independent log of turns guarded by its own async mutex.
//! The dispatcher holds that mutex for a whole turn (read history, call the
//! LLM, append), so concurrent events for the same key are serialized while
//! different keys proceed in parallel. A slot is created on first lookup but
//! only counts against the key bound once a turn is written to it; a turn
//! that fails leaves every other key untouched. Nothing is persisted.

use std::collections::{HashMap, VecDeque};
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::core::models::Turn;

/// Maximum number of user/assistant pairs kept per key.
pub const MAX_PAIRS: usize = 8;

/// Identity of one independent conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryKey {
    Global,
    UserChannel { user_id: u64, channel_id: u64 },
}

/// Key derivation strategy: one history per (user, channel) or one for everybody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryScope {
    #[default]
    PerUserChannel,
    Global,
}

impl HistoryScope {
    #[must_use]
    pub fn key_for(self, user_id: u64, channel_id: u64) -> HistoryKey {
        match self {
            HistoryScope::PerUserChannel => HistoryKey::UserChannel {
                user_id,
                channel_id,
            },
            HistoryScope::Global => HistoryKey::Global,
        }
    }
}

impl FromStr for HistoryScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user_channel" | "per_user" => Ok(HistoryScope::PerUserChannel),
            "global" | "shared" => Ok(HistoryScope::Global),
            other => Err(format!("unknown history scope '{}'", other)),
        }
    }
}

/// Ordered turns for one key, never longer than `2 * max_pairs`.
#[derive(Debug)]
pub struct Conversation {
    turns: VecDeque<Turn>,
    max_pairs: usize,
}

impl Conversation {
    fn new(max_pairs: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(max_pairs * 2),
            max_pairs,
        }
    }

    #[must_use]
    pub fn turns(&self) -> Vec<Turn> {
        self.turns.iter().cloned().collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Appends one exchange, then drops the oldest turns beyond the limit.
    pub fn append(&mut self, user: Turn, assistant: Turn) {
        self.turns.push_back(user);
        self.turns.push_back(assistant);
        let limit = self.max_pairs * 2;
        while self.turns.len() > limit {
            self.turns.pop_front();
        }
    }
}

struct Slot {
    conversation: Arc<Mutex<Conversation>>,
    // logical clock tick of the last access
    last_active: u64,
}

/// Process-lifetime owner of every conversation history.
pub struct HistoryStore {
    slots: Mutex<HashMap<HistoryKey, Slot>>,
    clock: AtomicU64,
    max_pairs: usize,
    max_keys: Option<usize>,
}

impl HistoryStore {
    /// Store with the default pair limit and no bound on the number of keys.
    #[must_use]
    pub fn new() -> Self {
        Self::with_limits(MAX_PAIRS, None)
    }

    /// `max_keys` bounds the number of keys with history; see [`HistoryStore::commit`].
    #[must_use]
    pub fn with_limits(max_pairs: usize, max_keys: Option<usize>) -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            clock: AtomicU64::new(0),
            max_pairs,
            max_keys,
        }
    }

    /// Returns the conversation for `key`, creating it on first use.
    ///
    /// Creating a slot never evicts another key; capacity is enforced by
    /// [`HistoryStore::commit`] once the new slot actually holds a turn.
    pub async fn session(&self, key: HistoryKey) -> Arc<Mutex<Conversation>> {
        let mut slots = self.slots.lock().await;
        let now = self.clock.fetch_add(1, Ordering::Relaxed);

        let slot = slots.entry(key).or_insert_with(|| {
            debug!(?key, "Created conversation history");
            Slot {
                conversation: Arc::new(Mutex::new(Conversation::new(self.max_pairs))),
                last_active: now,
            }
        });
        slot.last_active = now;
        slot.conversation.clone()
    }

    /// Call after a turn was written to `key`. Evicts the least recently
    /// active idle keys while the store is over `max_keys`.
    ///
    /// `key` itself and any slot whose conversation is still held by a caller
    /// are never evicted.
    pub async fn commit(&self, key: HistoryKey) {
        let Some(max_keys) = self.max_keys else {
            return;
        };
        let mut slots = self.slots.lock().await;
        while slots.len() > max_keys {
            let oldest = slots
                .iter()
                .filter(|(k, slot)| **k != key && Arc::strong_count(&slot.conversation) == 1)
                .min_by_key(|(_, slot)| slot.last_active)
                .map(|(k, _)| *k);
            match oldest {
                Some(evicted) => {
                    slots.remove(&evicted);
                    info!(?evicted, "Evicted least recently active conversation");
                }
                None => break,
            }
        }
    }

    /// Call after a turn for `key` ended without writing. Drops the slot if
    /// it is still empty and nobody else holds it.
    pub async fn release(&self, key: HistoryKey) {
        let mut slots = self.slots.lock().await;
        let unused = slots.get(&key).is_some_and(|slot| {
            Arc::strong_count(&slot.conversation) == 1
                && slot
                    .conversation
                    .try_lock()
                    .is_ok_and(|conversation| conversation.is_empty())
        });
        if unused {
            slots.remove(&key);
            debug!(?key, "Released empty conversation history");
        }
    }

    /// Snapshot of the turns stored for `key`; empty for unknown keys.
    pub async fn get(&self, key: HistoryKey) -> Vec<Turn> {
        let conversation = {
            let slots = self.slots.lock().await;
            match slots.get(&key) {
                Some(slot) => slot.conversation.clone(),
                None => return Vec::new(),
            }
        };
        let guard = conversation.lock().await;
        guard.turns()
    }

    /// Appends one exchange to `key` and truncates to the newest pairs.
    pub async fn append(&self, key: HistoryKey, user: Turn, assistant: Turn) {
        let conversation = self.session(key).await;
        conversation.lock().await.append(user, assistant);
        drop(conversation);
        self.commit(key).await;
    }

    /// Number of keys with live history.
    pub async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.slots.lock().await.is_empty()
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}
