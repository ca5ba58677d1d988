use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use mnemo_core::{Message, MnemoError, SessionStore};
use tokio::sync::RwLock;
use tokio::time::Instant;

struct Session {
    messages: Vec<Message>,
    last_append: Instant,
}

/// In-memory implementation of `SessionStore`, storing messages keyed by
/// session ID.
///
/// With a TTL configured via [`with_ttl`](InMemoryStore::with_ttl), a session
/// whose last append is older than the TTL is treated as absent. Expiry is
/// evaluated lazily at read time — there is no background sweeper — and every
/// append refreshes the deadline, matching Redis EXPIRE semantics. Under
/// `tokio::time::pause()` the clock can be advanced deterministically in
/// tests.
#[derive(Default, Clone)]
pub struct InMemoryStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Option<Duration>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable rolling expiry: sessions with no append for `ttl` read as empty.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    fn is_expired(&self, session: &Session) -> bool {
        match self.ttl {
            Some(ttl) => session.last_append.elapsed() >= ttl,
            None => false,
        }
    }
}

#[async_trait]
impl SessionStore for InMemoryStore {
    async fn append(&self, session_id: &str, message: Message) -> Result<(), MnemoError> {
        let mut sessions = self.sessions.write().await;
        let now = Instant::now();
        let session = sessions.entry(session_id.to_string()).or_insert(Session {
            messages: Vec::new(),
            last_append: now,
        });
        // An expired session that was never cleared starts over.
        if self.is_expired(session) {
            session.messages.clear();
        }
        session.messages.push(message);
        session.last_append = now;
        Ok(())
    }

    async fn history(
        &self,
        session_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Message>, MnemoError> {
        let sessions = self.sessions.read().await;
        let messages = match sessions.get(session_id) {
            Some(session) if !self.is_expired(session) => &session.messages,
            _ => return Ok(Vec::new()),
        };
        let start = match limit {
            Some(n) => messages.len().saturating_sub(n),
            None => 0,
        };
        Ok(messages[start..].to_vec())
    }

    async fn clear(&self, session_id: &str) -> Result<(), MnemoError> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id);
        Ok(())
    }

    async fn message_count(&self, session_id: &str) -> Result<usize, MnemoError> {
        let sessions = self.sessions.read().await;
        Ok(match sessions.get(session_id) {
            Some(session) if !self.is_expired(session) => session.messages.len(),
            _ => 0,
        })
    }
}
