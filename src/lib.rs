//! expo-chat - streaming chat assistant client
//!
//! Decodes chat-completions event streams into text fragments and drives a
//! simple chat session on top of them. The library is also used by the
//! integration tests and benchmarks.

pub mod adapters;
pub mod chat;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod sse;
pub mod traits;
