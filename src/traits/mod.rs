//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - Streaming HTTP POST
//! - [`DeltaDecoder`] - Incremental event-stream decoding

pub mod http;
pub mod sse;

pub use http::{ByteStream, Headers, HttpClient, HttpError};
pub use sse::DeltaDecoder;
