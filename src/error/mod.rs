//! Error handling for the chat client.
//!
//! - [`ChatError`] - everything a chat request can fail with, plus
//!   user-facing messages and log codes
//! - [`ChatResult`] - result alias used across the crate
//!
//! Transport errors ([`crate::traits::HttpError`]) live beside the
//! [`crate::traits::HttpClient`] trait and convert into `ChatError`.

mod chat;

pub use chat::{ChatError, UNAVAILABLE_MESSAGE};

/// Result type alias for chat operations.
pub type ChatResult<T> = Result<T, ChatError>;
