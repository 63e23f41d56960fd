//! Disposable MySQL and Redis servers for integration tests.
//!
//! Every fixture owns its container; dropping the fixture removes it.

pub mod error;
pub mod mysql;
pub mod redis;

pub use error::{Result, TestInfraError};
