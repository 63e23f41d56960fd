use crate::error::ShortenerError;
use std::sync::Arc;
use tinyurl_core::{ShortCode, ShortUrl, Store};
use tinyurl_generator::Generator;
use tracing::{debug, warn};

/// Number of codes tried before a collision is reported to the caller.
pub const MAX_ATTEMPTS: u32 = 5;

/// Shortens URLs and resolves short codes back to them.
///
/// The service holds no state of its own besides the store and generator,
/// so clones share both and may be used from any number of tasks.
#[derive(Debug)]
pub struct TinyUrl<S, G> {
    base_url: Option<String>,
    store: Arc<S>,
    generator: Arc<G>,
}

impl<S, G> Clone for TinyUrl<S, G> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            store: Arc::clone(&self.store),
            generator: Arc::clone(&self.generator),
        }
    }
}

impl<S: Store, G: Generator> TinyUrl<S, G> {
    pub fn new(store: S, generator: G) -> Self {
        Self {
            base_url: None,
            store: Arc::new(store),
            generator: Arc::new(generator),
        }
    }

    /// Sets the public address short codes are published under,
    /// e.g. `http://localhost:8080`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        self.base_url = (!base_url.is_empty()).then_some(base_url);
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stores `url` under a freshly generated code.
    ///
    /// Collisions are retried with a new code up to [`MAX_ATTEMPTS`] times in
    /// total. Any other store error is returned immediately, and a generated
    /// code that fails [`ShortCode::parse`] is never stored.
    pub async fn shorten_url(&self, url: &str) -> Result<ShortUrl, ShortenerError<S::Error>> {
        let mut attempt = 0;

        loop {
            attempt += 1;
            let generated: ShortCode = self.generator.generate().into();
            let code = ShortCode::parse(generated.as_str()).map_err(|err| {
                warn!(code = %generated, error = %err, "generator produced an invalid short code");
                ShortenerError::InvalidGeneratedCode(err.to_string())
            })?;
            let record = ShortUrl::new(url, code.as_str());

            match self.store.insert(&code, record.clone()).await {
                Ok(()) => {
                    debug!(code = %code, attempt, "shortened url");
                    return Ok(self.publish(record, &code));
                }
                Err(err) if self.store.is_already_exists(&err) => {
                    if attempt >= MAX_ATTEMPTS {
                        warn!(code = %code, attempts = attempt, "short code collisions exhausted retries");
                        return Err(ShortenerError::AlreadyExists {
                            attempts: attempt,
                            source: err,
                        });
                    }
                    debug!(code = %code, attempt, "short code collision, retrying");
                }
                Err(err) => return Err(ShortenerError::Store(err)),
            }
        }
    }

    /// Resolves a short code, or a full short URL under the configured base
    /// address, to the original URL.
    pub async fn url(&self, short_url: &str) -> Result<String, ShortenerError<S::Error>> {
        let code = ShortCode::parse(self.strip_base_url(short_url))?;

        match self.store.get(&code).await.map_err(ShortenerError::Store)? {
            Some(record) => Ok(record.url),
            None => Err(ShortenerError::NotFound(code.into_string())),
        }
    }

    fn strip_base_url<'a>(&self, short_url: &'a str) -> &'a str {
        self.base_url
            .as_deref()
            .and_then(|base| short_url.strip_prefix(base))
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(short_url)
    }

    fn publish(&self, mut record: ShortUrl, code: &ShortCode) -> ShortUrl {
        if let Some(base) = &self.base_url {
            record.short = code.to_url(base);
        }
        record
    }
}
