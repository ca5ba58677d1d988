use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// The author of a chat message. This domain has exactly two roles;
/// system prompts are not modeled at the memory layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single chat message. Serializes to `{"role": "user", "content": "..."}`,
/// the record shape stored in Redis and sent to providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Message {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Message {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_user(&self) -> bool {
        matches!(self.role, Role::User)
    }

    pub fn is_assistant(&self) -> bool {
        matches!(self.role, Role::Assistant)
    }
}

// ---------------------------------------------------------------------------
// Prompt / completion
// ---------------------------------------------------------------------------

/// An ordered message context handed to a chat model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPrompt {
    pub messages: Vec<Message>,
}

impl ChatPrompt {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// A one-element prompt containing only the given message.
    pub fn single(message: Message) -> Self {
        Self {
            messages: vec![message],
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// A completion returned by a chat model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub message: Message,
    pub usage: Option<TokenUsage>,
}

impl Completion {
    /// An assistant completion with no usage statistics.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            message: Message::assistant(content),
            usage: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Unified error type for Mnemo with variants covering all subsystems.
#[derive(Debug, Error)]
pub enum MnemoError {
    #[error("store error: {0}")]
    Store(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("provider error: {0}")]
    Provider(String),
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("config error: {0}")]
    Config(String),
}

// ---------------------------------------------------------------------------
// Core traits
// ---------------------------------------------------------------------------

/// Persistent storage for conversation message history, keyed by session ID.
///
/// Sessions come into existence implicitly on the first `append` for an
/// unseen ID and disappear either by explicit `clear` or by TTL expiry in
/// implementations that enforce one. Histories are append-only: no message
/// is ever edited, removed individually, or reordered.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Append a message to the session's history and refresh its TTL.
    async fn append(&self, session_id: &str, message: Message) -> Result<(), MnemoError>;

    /// Load the session's history oldest-first. With a `limit`, only the
    /// most recent `limit` messages are returned (a limit of 0 yields an
    /// empty vector). An unseen or expired session yields an empty vector,
    /// never an error. Reading does not refresh the TTL.
    async fn history(
        &self,
        session_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Message>, MnemoError>;

    /// Delete the session's entire history. Clearing an unseen or expired
    /// session is a no-op success.
    async fn clear(&self, session_id: &str) -> Result<(), MnemoError>;

    /// Number of messages currently stored for the session (0 when unseen).
    async fn message_count(&self, session_id: &str) -> Result<usize, MnemoError>;

    /// Whether the session currently has any stored messages.
    async fn exists(&self, session_id: &str) -> Result<bool, MnemoError> {
        Ok(self.message_count(session_id).await? > 0)
    }
}

/// The core trait for inference providers: one ordered prompt in, one
/// completion out. Cloud and local providers share this contract and are
/// interchangeable behind it.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn chat(&self, prompt: ChatPrompt) -> Result<Completion, MnemoError>;
}

impl std::fmt::Debug for dyn ChatModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn ChatModel")
    }
}
