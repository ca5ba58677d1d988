use async_trait::async_trait;
use mnemo_core::{Message, MnemoError, SessionStore};
use redis::AsyncCommands;

/// Configuration for [`RedisSessionStore`].
#[derive(Debug, Clone)]
pub struct RedisSessionStoreConfig {
    /// Key prefix for all session entries. Defaults to `"mnemo:session:"`.
    pub prefix: String,
    /// Rolling TTL in seconds, refreshed on every append. Defaults to 3600.
    pub ttl_seconds: u64,
}

impl Default for RedisSessionStoreConfig {
    fn default() -> Self {
        Self {
            prefix: "mnemo:session:".to_string(),
            ttl_seconds: 3600,
        }
    }
}

/// Redis-backed implementation of the [`SessionStore`](mnemo_core::SessionStore) trait.
///
/// Each session is a Redis list at `{prefix}{session_id}:messages` holding
/// JSON-serialized message records. RPUSH and EXPIRE are issued in one atomic
/// pipeline, so an append either lands with a fresh TTL or not at all; the
/// relative order of concurrent appends is whatever order Redis applies the
/// pushes in. Reads never touch the TTL.
pub struct RedisSessionStore {
    client: redis::Client,
    config: RedisSessionStoreConfig,
}

impl RedisSessionStore {
    /// Create a new `RedisSessionStore` with an existing Redis client and
    /// configuration.
    pub fn new(client: redis::Client, config: RedisSessionStoreConfig) -> Self {
        Self { client, config }
    }

    /// Create a new `RedisSessionStore` from a Redis URL with default
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn from_url(url: &str) -> Result<Self, MnemoError> {
        let client = redis::Client::open(url)
            .map_err(|e| MnemoError::Store(format!("failed to connect to Redis: {e}")))?;
        Ok(Self {
            client,
            config: RedisSessionStoreConfig::default(),
        })
    }

    /// Create a new `RedisSessionStore` from a Redis URL with custom
    /// configuration.
    pub fn from_url_with_config(
        url: &str,
        config: RedisSessionStoreConfig,
    ) -> Result<Self, MnemoError> {
        let client = redis::Client::open(url)
            .map_err(|e| MnemoError::Store(format!("failed to connect to Redis: {e}")))?;
        Ok(Self { client, config })
    }

    /// Build the Redis key for a session's message list.
    fn session_key(&self, session_id: &str) -> String {
        format!("{}{session_id}:messages", self.config.prefix)
    }

    async fn get_connection(&self) -> Result<redis::aio::MultiplexedConnection, MnemoError> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| MnemoError::Store(format!("Redis connection error: {e}")))
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn append(&self, session_id: &str, message: Message) -> Result<(), MnemoError> {
        let mut con = self.get_connection().await?;
        let key = self.session_key(session_id);

        let record = serde_json::to_string(&message)
            .map_err(|e| MnemoError::Store(format!("JSON serialize error: {e}")))?;

        // RPUSH + EXPIRE together, so a push can never land without its TTL.
        redis::pipe()
            .atomic()
            .rpush(&key, &record)
            .ignore()
            .expire(&key, self.config.ttl_seconds as i64)
            .ignore()
            .query_async::<()>(&mut con)
            .await
            .map_err(|e| MnemoError::Store(format!("Redis RPUSH error: {e}")))?;

        tracing::debug!(session_id = %session_id, role = %message.role(), "appended message");
        Ok(())
    }

    async fn history(
        &self,
        session_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Message>, MnemoError> {
        // Zero most-recent messages is an empty read; skip the round trip.
        if limit == Some(0) {
            return Ok(Vec::new());
        }

        let mut con = self.get_connection().await?;
        let key = self.session_key(session_id);

        let start = match limit {
            Some(n) => -(n as isize),
            None => 0,
        };
        let raw: Vec<String> = con
            .lrange(&key, start, -1)
            .await
            .map_err(|e| MnemoError::Store(format!("Redis LRANGE error: {e}")))?;

        raw.iter()
            .map(|record| {
                serde_json::from_str(record)
                    .map_err(|e| MnemoError::Store(format!("JSON deserialize error: {e}")))
            })
            .collect()
    }

    async fn clear(&self, session_id: &str) -> Result<(), MnemoError> {
        let mut con = self.get_connection().await?;
        let key = self.session_key(session_id);

        con.del::<_, ()>(&key)
            .await
            .map_err(|e| MnemoError::Store(format!("Redis DEL error: {e}")))?;

        tracing::debug!(session_id = %session_id, "cleared session");
        Ok(())
    }

    async fn message_count(&self, session_id: &str) -> Result<usize, MnemoError> {
        let mut con = self.get_connection().await?;
        let key = self.session_key(session_id);

        let len: usize = con
            .llen(&key)
            .await
            .map_err(|e| MnemoError::Store(format!("Redis LLEN error: {e}")))?;
        Ok(len)
    }

    async fn exists(&self, session_id: &str) -> Result<bool, MnemoError> {
        let mut con = self.get_connection().await?;
        let key = self.session_key(session_id);

        let exists: bool = con
            .exists(&key)
            .await
            .map_err(|e| MnemoError::Store(format!("Redis EXISTS error: {e}")))?;
        Ok(exists)
    }
}
