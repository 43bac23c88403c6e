//! Mock implementations for testing.
//!
//! Test doubles for the trait abstractions, usable without network access.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with scripted body chunks

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
