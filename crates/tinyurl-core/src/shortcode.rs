use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Longest short code accepted from outside the service.
pub const MAX_LENGTH: usize = 21;

/// The key a [`ShortUrl`](crate::ShortUrl) is stored under.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortCode(String);

impl ShortCode {
    /// Parses a short code received from a caller.
    ///
    /// Valid codes are non-empty and at most [`MAX_LENGTH`] bytes long.
    pub fn parse(code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// such as a configured generator.
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Builds the externally resolvable short URL for this code.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    fn validate(code: &str) -> Result<()> {
        if code.is_empty() {
            return Err(CoreError::InvalidShortCode(
                "short code cannot be empty".to_string(),
            ));
        }

        if code.len() > MAX_LENGTH {
            return Err(CoreError::InvalidShortCode(format!(
                "invalid short code length {}, at most {} allowed",
                code.len(),
                MAX_LENGTH
            )));
        }

        Ok(())
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ShortCode {
    fn from(value: String) -> Self {
        Self::new_unchecked(value)
    }
}

impl From<&str> for ShortCode {
    fn from(value: &str) -> Self {
        Self::new_unchecked(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_codes() {
        assert!(ShortCode::parse("a").is_ok());
        assert!(ShortCode::parse("cnhc5bqvqc7lfkbg6d2g").is_ok());
        assert!(ShortCode::parse("a".repeat(MAX_LENGTH)).is_ok());
    }

    #[test]
    fn empty_code_is_rejected() {
        assert!(matches!(
            ShortCode::parse(""),
            Err(CoreError::InvalidShortCode(_))
        ));
    }

    #[test]
    fn too_long() {
        let err = ShortCode::parse("a".repeat(MAX_LENGTH + 1)).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidShortCode(
                "invalid short code length 22, at most 21 allowed".to_string()
            )
        );
    }

    #[test]
    fn to_url_joins_with_single_slash() {
        let code = ShortCode::new_unchecked("abc123");
        assert_eq!(code.to_url("http://localhost:8080"), "http://localhost:8080/abc123");
        assert_eq!(code.to_url("http://localhost:8080/"), "http://localhost:8080/abc123");
    }

    #[test]
    fn display_is_the_bare_code() {
        assert_eq!(ShortCode::from("xyz").to_string(), "xyz");
    }
}
