use crate::record::ShortUrl;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use std::sync::Arc;

/// Key-value storage for [`ShortUrl`] records keyed by [`ShortCode`].
///
/// Implementations must make `insert` an atomic insert-if-absent: two
/// concurrent inserts of the same code can never both succeed, and a failed
/// insert leaves nothing behind.
#[async_trait]
pub trait Store: Send + Sync + 'static {
    /// Backend specific error. Use [`Store::is_already_exists`] to classify it.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Inserts a new record. Fails with an "already exists" error if the code is taken.
    async fn insert(&self, code: &ShortCode, record: ShortUrl) -> Result<(), Self::Error>;

    /// Retrieves the record for a given short code.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &ShortCode) -> Result<Option<ShortUrl>, Self::Error>;

    /// Returns `true` if `err` reports that the code was already taken.
    fn is_already_exists(&self, err: &Self::Error) -> bool;
}

#[async_trait]
impl<S: Store> Store for Arc<S> {
    type Error = S::Error;

    async fn insert(&self, code: &ShortCode, record: ShortUrl) -> Result<(), Self::Error> {
        self.as_ref().insert(code, record).await
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<ShortUrl>, Self::Error> {
        self.as_ref().get(code).await
    }

    fn is_already_exists(&self, err: &Self::Error) -> bool {
        self.as_ref().is_already_exists(err)
    }
}
