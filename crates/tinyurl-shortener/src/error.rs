use thiserror::Error;
use tinyurl_core::CoreError;

/// Errors returned by [`TinyUrl`](crate::TinyUrl).
///
/// `E` is the error type of the underlying store.
#[derive(Debug, Error)]
pub enum ShortenerError<E> {
    /// Every attempt collided with an existing code; carries the last store error.
    #[error("short code already exists after {attempts} attempts")]
    AlreadyExists {
        attempts: u32,
        #[source]
        source: E,
    },
    #[error("short url not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The generator produced a code that is not a valid short code.
    #[error("generator produced an invalid short code: {0}")]
    InvalidGeneratedCode(String),
    /// Any other store failure, returned as-is.
    #[error(transparent)]
    Store(E),
}

impl<E> From<CoreError> for ShortenerError<E> {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidShortCode(message) => Self::InvalidInput(message),
        }
    }
}
