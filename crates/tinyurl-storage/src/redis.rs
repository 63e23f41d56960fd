use crate::error::{Result, StorageError};
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tinyurl_core::{ShortCode, ShortUrl, Store};
use tracing::{debug, trace, warn};

pub const DEFAULT_KEY_PREFIX: &str = "tinyurl:short:";

/// Redis implementation of [`Store`].
///
/// Records are stored as JSON under `{prefix}{code}`. Inserts use `SETNX`,
/// which makes insert-if-absent atomic on the server. Reads fall back to
/// the replica connection, when one is configured, if the primary read
/// fails.
#[derive(Clone)]
pub struct RedisStore {
    primary: MultiplexedConnection,
    replica: Option<MultiplexedConnection>,
    key_prefix: String,
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> StorageError {
    let message = format!("{operation}: {err}");
    if err.is_timeout() || message.to_ascii_lowercase().contains("timed out") {
        StorageError::Timeout(message)
    } else if err.is_io_error() {
        StorageError::Unavailable(message)
    } else {
        StorageError::Query(message)
    }
}

impl RedisStore {
    pub fn new(primary: MultiplexedConnection) -> Self {
        Self {
            primary,
            replica: None,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }

    /// Adds a read replica used when primary reads fail.
    pub fn with_replica(mut self, replica: MultiplexedConnection) -> Self {
        self.replica = Some(replica);
        self
    }

    /// Overrides the key prefix (default `tinyurl:short:`).
    pub fn with_key_prefix(mut self, key_prefix: impl Into<String>) -> Self {
        self.key_prefix = key_prefix.into();
        self
    }

    /// Connects to the primary and, optionally, a replica.
    pub async fn connect(primary_url: &str, replica_url: Option<&str>) -> Result<Self> {
        let primary = open_connection(primary_url).await?;
        let mut store = Self::new(primary);

        if let Some(replica_url) = replica_url {
            store = store.with_replica(open_connection(replica_url).await?);
        }

        Ok(store)
    }

    fn key(&self, code: &ShortCode) -> String {
        format!("{}{}", self.key_prefix, code.as_str())
    }

    async fn fetch(
        mut conn: MultiplexedConnection,
        key: &str,
        code: &ShortCode,
    ) -> Result<Option<ShortUrl>> {
        let cached = conn
            .get::<_, Option<String>>(key)
            .await
            .map_err(|e| map_redis_error("failed to read record", e))?;

        let Some(json) = cached else {
            trace!(code = %code, "no record in redis");
            return Ok(None);
        };

        serde_json::from_str::<ShortUrl>(&json)
            .map(Some)
            .map_err(|e| StorageError::InvalidData(format!("invalid record for key '{key}': {e}")))
    }
}

async fn open_connection(url: &str) -> Result<MultiplexedConnection> {
    let client = redis::Client::open(url)
        .map_err(|e| StorageError::Unavailable(format!("invalid redis url: {e}")))?;
    client
        .get_multiplexed_async_connection()
        .await
        .map_err(|e| map_redis_error("failed to connect", e))
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("key_prefix", &self.key_prefix)
            .field("has_replica", &self.replica.is_some())
            .finish()
    }
}

#[async_trait]
impl Store for RedisStore {
    type Error = StorageError;

    async fn insert(&self, code: &ShortCode, record: ShortUrl) -> Result<()> {
        let key = self.key(code);
        let json = serde_json::to_string(&record)
            .map_err(|e| StorageError::Serialization(format!("failed to serialize record: {e}")))?;

        let mut conn = self.primary.clone();
        let inserted = conn
            .set_nx::<_, _, bool>(&key, json)
            .await
            .map_err(|e| map_redis_error("failed to write record", e))?;

        if !inserted {
            return Err(StorageError::AlreadyExists(code.to_string()));
        }

        debug!(code = %code, "inserted short url");
        Ok(())
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<ShortUrl>> {
        let key = self.key(code);

        match Self::fetch(self.primary.clone(), &key, code).await {
            Ok(record) => Ok(record),
            Err(err) => match &self.replica {
                Some(replica) => {
                    warn!(code = %code, error = %err, "primary read failed, falling back to replica");
                    Self::fetch(replica.clone(), &key, code).await
                }
                None => Err(err),
            },
        }
    }

    fn is_already_exists(&self, err: &StorageError) -> bool {
        err.is_already_exists()
    }
}
