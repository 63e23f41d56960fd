//! URL shortener service.
//!
//! [`TinyUrl`] turns long URLs into short codes using a pluggable
//! [`Store`](tinyurl_core::Store) and [`Generator`](tinyurl_generator::Generator),
//! and resolves short codes back to the original URL.

pub mod error;
pub mod service;

pub use error::ShortenerError;
pub use service::{TinyUrl, MAX_ATTEMPTS};
