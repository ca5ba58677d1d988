use serde::{Deserialize, Serialize};

/// Context-assembly policy for a turn. This is a property of the call, not of
/// the stored session: the store records full history in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    Stateless,
    Stateful,
}

impl ChatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatMode::Stateless => "stateless",
            ChatMode::Stateful => "stateful",
        }
    }
}

impl std::fmt::Display for ChatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inbound chat turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurnRequest {
    pub message: String,
    pub mode: ChatMode,
    /// Registry name of the provider to use.
    pub provider: String,
    /// Omitted on the first turn; the service generates one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// The completed turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurnResponse {
    pub response: String,
    pub mode: ChatMode,
    pub provider: String,
    pub session_id: String,
    /// Messages stored for the session after this turn.
    pub message_count: usize,
}

/// Acknowledgment for an explicit session clear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearSessionResponse {
    pub session_id: String,
    pub cleared: bool,
}
