//! Storage backends implementing [`tinyurl_core::Store`].

pub mod error;
pub mod memory;
pub mod mysql;
pub mod redis;

pub use crate::error::{Result, StorageError};
pub use crate::memory::InMemoryStore;
pub use crate::mysql::MySqlStore;
pub use crate::redis::RedisStore;
pub use tinyurl_core::{ShortCode, ShortUrl, Store};
