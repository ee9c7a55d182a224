use chatrelay::ai::prompt_builder::{
    NORMAL_SYSTEM_PROMPT, ResponseStyle, SIMPLE_SYSTEM_PROMPT, build_prompt, is_simple_question,
};
use chatrelay::core::models::Turn;

#[test]
fn test_is_simple_question_prefix() {
    assert!(is_simple_question("What is gravity"));
    assert!(is_simple_question(
        "  DEFINE the word entropy as it is used across physics, chemistry and information theory"
    ));
}

#[test]
fn test_is_simple_question_short_message() {
    assert!(is_simple_question("tell me a joke"));
    assert!(is_simple_question(""));
}

#[test]
fn test_is_simple_question_long_message() {
    assert!(!is_simple_question(
        "Explain the full historical and philosophical context of relativity theory in depth"
    ));
}

#[test]
fn test_style_selects_system_prompt() {
    assert_eq!(ResponseStyle::for_message("hi"), ResponseStyle::Simple);
    assert_eq!(ResponseStyle::Simple.system_prompt(), SIMPLE_SYSTEM_PROMPT);
    assert_eq!(ResponseStyle::Normal.system_prompt(), NORMAL_SYSTEM_PROMPT);
    assert!(SIMPLE_SYSTEM_PROMPT.contains("under 350 chars"));
}

#[test]
fn test_build_prompt_without_history() {
    let prompt = build_prompt(&[], "Hello", ResponseStyle::Normal);
    assert_eq!(prompt, format!("System: {NORMAL_SYSTEM_PROMPT}\nUser: Hello\n"));
}

#[test]
fn test_build_prompt_renders_history_in_order() {
    let history = vec![
        Turn::user("What is Rust?"),
        Turn::assistant("A systems language."),
    ];
    let prompt = build_prompt(&history, "Who made it?", ResponseStyle::Simple);

    let lines: Vec<&str> = prompt.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("System: You are a helpful assistant."));
    assert_eq!(lines[1], "User: What is Rust?");
    assert_eq!(lines[2], "Assistant: A systems language.");
    assert_eq!(lines[3], "User: Who made it?");
}

#[test]
fn test_build_prompt_windows_long_history() {
    let history: Vec<Turn> = (0..20)
        .flat_map(|i| [Turn::user(format!("q{i}")), Turn::assistant(format!("a{i}"))])
        .collect();
    let prompt = build_prompt(&history, "next", ResponseStyle::Normal);

    // system + 16 history turns + current turn
    assert_eq!(prompt.lines().count(), 18);
    assert!(!prompt.contains("User: q11\n"));
    assert!(prompt.contains("User: q12\n"));
    assert!(prompt.contains("Assistant: a19\n"));
}
