use std::fmt;

/// Speaker of a single conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Label used when a turn is flattened into prompt text.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Role::System => "System",
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One role-tagged entry in a conversation history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    role: Role,
    text: String,
}

impl Turn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A file attached to an incoming chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub url: String,
    pub size: u64,
}

/// What the bot does with an attachment, decided from its filename alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Pdf,
    Image,
    Unsupported,
}

/// Platform-neutral view of a chat message, built by the platform adapter.
#[derive(Debug, Clone, Default)]
pub struct IncomingMessage {
    pub author_id: u64,
    pub author_is_bot: bool,
    pub channel_id: u64,
    pub content: String,
    /// The bot's own user id, needed to strip mention tokens.
    pub bot_user_id: u64,
    pub mentions_bot: bool,
    /// Set when the message replies to a message the bot wrote.
    pub replied_to_bot: bool,
    pub attachments: Vec<Attachment>,
}

/// How a single incoming event was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Author is a bot; nothing happens.
    Ignored,
    /// No trigger or empty prompt; dropped without a reply.
    Dropped,
    Replied { chunks: usize },
    ImageGenerationRefused,
    PdfFailed,
    LlmFailed,
}
