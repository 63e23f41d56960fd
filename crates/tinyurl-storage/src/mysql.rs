use crate::error::{Result, StorageError};
use async_trait::async_trait;
use sqlx::{MySqlPool, Row};
use tinyurl_core::{ShortCode, ShortUrl, Store};
use tracing::{debug, warn};

const SCHEMA: &str = include_str!("../ddl/mysql/short_urls.sql");

/// MySQL implementation of [`Store`].
///
/// Writes always go to the primary pool. Reads go to the primary and fall
/// back to the replica pool, when one is configured, if the primary read
/// fails. A primary that answers "no such row" is authoritative.
#[derive(Debug, Clone)]
pub struct MySqlStore {
    primary: MySqlPool,
    replica: Option<MySqlPool>,
}

impl MySqlStore {
    /// Creates a store from an existing primary pool.
    pub fn new(primary: MySqlPool) -> Self {
        Self {
            primary,
            replica: None,
        }
    }

    /// Adds a read replica used when primary reads fail.
    pub fn with_replica(mut self, replica: MySqlPool) -> Self {
        self.replica = Some(replica);
        self
    }

    /// Opens a primary pool and, optionally, a replica pool.
    pub async fn connect(primary_url: &str, replica_url: Option<&str>) -> Result<Self> {
        let primary = MySqlPool::connect(primary_url)
            .await
            .map_err(map_sqlx_error)?;
        let mut store = Self::new(primary);

        if let Some(replica_url) = replica_url {
            let replica = MySqlPool::connect(replica_url)
                .await
                .map_err(map_sqlx_error)?;
            store = store.with_replica(replica);
        }

        Ok(store)
    }

    /// Creates the `short_urls` table on the primary if it is missing.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(SCHEMA)
            .execute(&self.primary)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// The pool all writes and first reads go to.
    pub fn primary(&self) -> &MySqlPool {
        &self.primary
    }

    async fn fetch(pool: &MySqlPool, code: &ShortCode) -> Result<Option<ShortUrl>> {
        let row = sqlx::query(
            r#"
            SELECT short_code, original_url
            FROM short_urls
            WHERE short_code = ?
            LIMIT 1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let short: String = row.try_get("short_code").map_err(map_sqlx_error)?;
        let url: String = row.try_get("original_url").map_err(map_sqlx_error)?;

        Ok(Some(ShortUrl { url, short }))
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl Store for MySqlStore {
    type Error = StorageError;

    async fn insert(&self, code: &ShortCode, record: ShortUrl) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO short_urls (short_code, original_url)
            VALUES (?, ?)
            "#,
        )
        .bind(code.as_str())
        .bind(record.url)
        .execute(&self.primary)
        .await;

        match result {
            Ok(_) => {
                debug!(code = %code, "inserted short url");
                Ok(())
            }
            Err(err) if is_unique_violation(&err) => {
                Err(StorageError::AlreadyExists(code.to_string()))
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<ShortUrl>> {
        match Self::fetch(&self.primary, code).await {
            Ok(record) => Ok(record),
            Err(err) => match &self.replica {
                Some(replica) => {
                    warn!(code = %code, error = %err, "primary read failed, falling back to replica");
                    Self::fetch(replica, code).await
                }
                None => Err(err),
            },
        }
    }

    fn is_already_exists(&self, err: &StorageError) -> bool {
        err.is_already_exists()
    }
}
