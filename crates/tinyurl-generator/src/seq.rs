use crate::Generator;
use std::sync::atomic::{AtomicU64, Ordering};
use tinyurl_core::{CoreError, Result, ShortCode, MAX_LENGTH};

/// Width of the zero-padded counter.
pub const COUNTER_WIDTH: usize = 6;

/// Sequential short codes such as `tu000000`, `tu000001`, ...
///
/// Codes are unique within a single instance. When several processes share
/// one store, give each its own prefix (e.g. `a-`, `b-`). The prefix must
/// leave room for [`COUNTER_WIDTH`] digits within [`MAX_LENGTH`].
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl SeqGenerator {
    pub fn with_prefix(prefix: impl Into<String>) -> Result<Self> {
        Self::with_offset(prefix, 0)
    }

    /// Starts counting at `offset`, e.g. to resume after a restart.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Result<Self> {
        let prefix = prefix.into();
        validate_prefix(&prefix)?;
        Ok(Self {
            counter: AtomicU64::new(offset),
            prefix,
        })
    }
}

/// Checks that `prefix` plus a full counter still fits in a short code.
pub fn validate_prefix(prefix: &str) -> Result<()> {
    let max_prefix = MAX_LENGTH - COUNTER_WIDTH;
    if prefix.len() > max_prefix {
        return Err(CoreError::InvalidShortCode(format!(
            "generator prefix '{}' is {} bytes long, at most {} allowed",
            prefix,
            prefix.len(),
            max_prefix
        )));
    }
    Ok(())
}

impl Generator for SeqGenerator {
    type Output = ShortCode;

    fn generate(&self) -> ShortCode {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        ShortCode::new_unchecked(format!(
            "{}{:0width$}",
            self.prefix,
            count,
            width = COUNTER_WIDTH
        ))
    }
}
