//! Core types and traits for the tinyurl shortener.
//!
//! This crate holds the pieces every other member agrees on: the stored
//! [`ShortUrl`] record, the [`ShortCode`] key and the [`Store`] contract
//! that storage backends implement.

pub mod error;
pub mod record;
pub mod shortcode;
pub mod store;

pub use error::{CoreError, Result};
pub use record::ShortUrl;
pub use shortcode::{ShortCode, MAX_LENGTH};
pub use store::Store;
