use serde::{Deserialize, Serialize};

/// A shortened URL as it is stored and handed back to callers.
///
/// Records are written once and never updated. Inside a store `short` is
/// always the bare code; the shortener may return a copy whose `short`
/// carries the public base address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortUrl {
    /// The original URL that was shortened.
    pub url: String,
    /// The short code, or the full short URL when returned to a caller.
    pub short: String,
}

impl ShortUrl {
    pub fn new(url: impl Into<String>, short: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            short: short.into(),
        }
    }
}
