use std::sync::Arc;

use mnemo_core::{ChatPrompt, Message, MnemoError, SessionStore};
use uuid::Uuid;

use crate::registry::ProviderRegistry;
use crate::wire::{ChatMode, ChatTurnRequest, ChatTurnResponse, ClearSessionResponse};

/// Policy knobs for [`ChatService`].
#[derive(Debug, Clone)]
pub struct ChatServiceConfig {
    /// Maximum message length in characters. Longer content is rejected with
    /// `InvalidInput` before any store write, never truncated.
    pub max_content_len: usize,
    /// When set, a stateless turn still runs inference if the store is
    /// unreachable (the append failure is logged and `message_count` reads 0).
    /// Stateful turns always surface store failures: their context cannot be
    /// assembled without the store, and fabricating history is not an option.
    pub degraded_stateless: bool,
}

impl Default for ChatServiceConfig {
    fn default() -> Self {
        Self {
            max_content_len: 2000,
            degraded_stateless: false,
        }
    }
}

/// Orchestrates one chat turn: validate, persist the user message, assemble
/// the mode-dependent context, call the selected provider, persist the reply.
pub struct ChatService {
    store: Arc<dyn SessionStore>,
    providers: ProviderRegistry,
    config: ChatServiceConfig,
}

impl ChatService {
    pub fn new(store: Arc<dyn SessionStore>, providers: ProviderRegistry) -> Self {
        Self::with_config(store, providers, ChatServiceConfig::default())
    }

    pub fn with_config(
        store: Arc<dyn SessionStore>,
        providers: ProviderRegistry,
        config: ChatServiceConfig,
    ) -> Self {
        Self {
            store,
            providers,
            config,
        }
    }

    /// Run one chat turn.
    ///
    /// The user message and the assistant reply are recorded in both modes;
    /// the mode only controls how much history reaches the provider. A
    /// missing `session_id` gets a freshly generated one, returned in the
    /// response so the caller can continue the conversation.
    pub async fn chat(&self, request: ChatTurnRequest) -> Result<ChatTurnResponse, MnemoError> {
        let session_id = request
            .session_id
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        self.validate(&session_id, &request.message)?;
        // Resolve the provider before touching the store, so an unknown name
        // cannot leave a half-recorded turn behind.
        let model = self.providers.get(&request.provider)?;

        let user_message = Message::user(request.message);
        let persisted = self
            .record(&session_id, user_message.clone(), request.mode)
            .await?;

        let prompt = match request.mode {
            ChatMode::Stateless => ChatPrompt::single(user_message),
            // The history already ends with the user message appended above.
            ChatMode::Stateful => ChatPrompt::new(self.store.history(&session_id, None).await?),
        };

        let completion = model.chat(prompt).await?;
        let response = completion.message.content().to_string();

        let message_count = if persisted {
            self.record(&session_id, completion.message, request.mode)
                .await?;
            match self.store.message_count(&session_id).await {
                Ok(count) => count,
                Err(e) if self.tolerates_store_failure(request.mode) => {
                    tracing::warn!(session_id = %session_id, error = %e, "message count unavailable");
                    0
                }
                Err(e) => return Err(e),
            }
        } else {
            0
        };

        tracing::info!(
            session_id = %session_id,
            mode = %request.mode,
            provider = %request.provider,
            message_count = message_count,
            "chat turn completed"
        );

        Ok(ChatTurnResponse {
            response,
            mode: request.mode,
            provider: request.provider,
            session_id,
            message_count,
        })
    }

    /// Delete a session's history. Clearing an unknown or already-expired
    /// session succeeds.
    pub async fn clear_session(
        &self,
        session_id: &str,
    ) -> Result<ClearSessionResponse, MnemoError> {
        self.store.clear(session_id).await?;
        tracing::info!(session_id = %session_id, "session cleared");
        Ok(ClearSessionResponse {
            session_id: session_id.to_string(),
            cleared: true,
        })
    }

    /// Read-through to the stored history, oldest first.
    pub async fn history(
        &self,
        session_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Message>, MnemoError> {
        self.store.history(session_id, limit).await
    }

    fn validate(&self, session_id: &str, content: &str) -> Result<(), MnemoError> {
        if session_id.trim().is_empty() {
            return Err(MnemoError::InvalidInput("session_id is empty".to_string()));
        }
        if content.trim().is_empty() {
            return Err(MnemoError::InvalidInput("message is empty".to_string()));
        }
        let len = content.chars().count();
        if len > self.config.max_content_len {
            return Err(MnemoError::InvalidInput(format!(
                "message length {len} exceeds maximum {}",
                self.config.max_content_len
            )));
        }
        Ok(())
    }

    fn tolerates_store_failure(&self, mode: ChatMode) -> bool {
        self.config.degraded_stateless && mode == ChatMode::Stateless
    }

    /// Append a message, honoring the degraded-stateless policy. Returns
    /// whether the message actually reached the store.
    async fn record(
        &self,
        session_id: &str,
        message: Message,
        mode: ChatMode,
    ) -> Result<bool, MnemoError> {
        match self.store.append(session_id, message).await {
            Ok(()) => Ok(true),
            Err(e) if self.tolerates_store_failure(mode) => {
                tracing::warn!(
                    session_id = %session_id,
                    error = %e,
                    "store unavailable, continuing stateless turn without persistence"
                );
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}
