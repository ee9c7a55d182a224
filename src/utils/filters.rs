use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::models::AttachmentKind;

static IMAGE_GENERATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(generate|create|draw)\s+.*\b(image|picture|art)\b")
        .expect("image generation pattern is valid")
});

const IMAGE_EXTENSIONS: [&str; 3] = [".jpg", ".jpeg", ".png"];

/// True for requests like "draw me a picture of a fox".
#[must_use]
pub fn is_image_generation_request(content: &str) -> bool {
    IMAGE_GENERATION_RE.is_match(content)
}

/// Classifies an attachment by its filename suffix, ignoring case.
#[must_use]
pub fn classify_attachment(filename: &str) -> AttachmentKind {
    let lower = filename.to_lowercase();
    if lower.ends_with(".pdf") {
        AttachmentKind::Pdf
    } else if IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        AttachmentKind::Image
    } else {
        AttachmentKind::Unsupported
    }
}

/// Removes `<@id>` and `<@!id>` mention tokens for `bot_user_id` and trims.
#[must_use]
pub fn strip_mention(content: &str, bot_user_id: u64) -> String {
    content
        .replace(&format!("<@{bot_user_id}>"), "")
        .replace(&format!("<@!{bot_user_id}>"), "")
        .trim()
        .to_string()
}
