//! Flattens a conversation into the single text block the LLM accepts.

use crate::conversation::MAX_PAIRS;
use crate::core::models::{Role, Turn};

/// Instruction used when the question looks short or factual.
pub const SIMPLE_SYSTEM_PROMPT: &str = "You are a helpful assistant. Provide clear and complete answers. \
     For simple questions, respond in 2-3 sentences under 350 chars. \
     For others, use a natural length, not too short or overly long.";

/// Instruction used for everything else.
pub const NORMAL_SYSTEM_PROMPT: &str = "You are a helpful assistant. Provide clear and complete answers with a natural length, \
     not too short, but not overly long. Aim for a balanced, informative response.";

/// Openings that mark a message as a quick factual question.
pub const SIMPLE_QUESTION_PREFIXES: [&str; 6] = [
    "what is", "who is", "when is", "where is", "how many", "define",
];

/// Target response length for the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStyle {
    Simple,
    Normal,
}

impl ResponseStyle {
    #[must_use]
    pub fn for_message(content: &str) -> Self {
        if is_simple_question(content) {
            ResponseStyle::Simple
        } else {
            ResponseStyle::Normal
        }
    }

    #[must_use]
    pub fn system_prompt(self) -> &'static str {
        match self {
            ResponseStyle::Simple => SIMPLE_SYSTEM_PROMPT,
            ResponseStyle::Normal => NORMAL_SYSTEM_PROMPT,
        }
    }
}

/// Best-effort guess whether a message wants a short answer.
///
/// Fewer than ten words, or a lowercased opening from
/// [`SIMPLE_QUESTION_PREFIXES`], counts as simple. This is a heuristic and
/// misclassifies plenty of real questions.
#[must_use]
pub fn is_simple_question(content: &str) -> bool {
    let content = content.trim().to_lowercase();
    if content.split_whitespace().count() < 10 {
        return true;
    }
    SIMPLE_QUESTION_PREFIXES
        .iter()
        .any(|prefix| content.starts_with(prefix))
}

/// Renders the system line, the newest `2 * MAX_PAIRS` history turns and the
/// current user turn as `"<Role>: <text>"` lines.
#[must_use]
pub fn build_prompt(history: &[Turn], user_prompt: &str, style: ResponseStyle) -> String {
    let window_start = history.len().saturating_sub(MAX_PAIRS * 2);

    let mut combined = render_line(Role::System, style.system_prompt());
    for turn in &history[window_start..] {
        combined.push_str(&render_line(turn.role(), turn.text()));
    }
    combined.push_str(&render_line(Role::User, user_prompt));
    combined
}

fn render_line(role: Role, text: &str) -> String {
    format!("{}: {}\n", role.label(), text)
}
