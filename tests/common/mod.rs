//! Common test utilities for integration tests.
//!
//! This module provides event-stream fixtures and helpers for feeding
//! them to the decoder in arbitrary pieces.
//!
//! # Example
//!
//! ```ignore
//! use common::{data_line, decode_in_pieces};
//!
//! let stream = format!("{}data: [DONE]\n", data_line("hi"));
//! assert_eq!(decode_in_pieces(&stream, &[3]), "hi");
//! ```

pub mod mocks;

#[allow(unused_imports)]
pub use mocks::*;

use expo_chat::sse::StreamDecoder;

/// One `data: ` line carrying `content` as a delta.
pub fn data_line(content: &str) -> String {
    format!(
        "data: {}\n",
        serde_json::json!({"choices": [{"index": 0, "delta": {"content": content}}]})
    )
}

/// The sentinel line.
#[allow(dead_code)]
pub fn done_line() -> String {
    "data: [DONE]\n".to_string()
}

/// A full stream replying with `parts`, terminated by the sentinel.
#[allow(dead_code)]
pub fn reply_stream(parts: &[&str]) -> String {
    let mut stream = String::from(": connected\n\n");
    stream.push_str("data: {\"choices\":[{\"index\":0,\"delta\":{\"role\":\"assistant\"}}]}\n\n");
    for part in parts {
        stream.push_str(&data_line(part));
        stream.push('\n');
    }
    stream.push_str("data: {\"choices\":[{\"index\":0,\"delta\":{},\"finish_reason\":\"stop\"}]}\n\n");
    stream.push_str(&done_line());
    stream
}

/// Split `input` at the given char boundaries, feed every piece and flush.
///
/// Returns the concatenated fragments.
#[allow(dead_code)]
pub fn decode_in_pieces(input: &str, cuts: &[usize]) -> String {
    let mut decoder = StreamDecoder::new();
    let mut out = String::new();
    let mut start = 0;

    for &cut in cuts.iter().chain(std::iter::once(&input.len())) {
        for fragment in decoder.feed(&input[start..cut]) {
            out.push_str(fragment.as_str());
        }
        start = cut;
    }
    for fragment in decoder.flush() {
        out.push_str(fragment.as_str());
    }
    out
}

/// Char boundary offsets of `input`, excluding 0 and the end.
#[allow(dead_code)]
pub fn inner_boundaries(input: &str) -> Vec<usize> {
    input
        .char_indices()
        .map(|(i, _)| i)
        .filter(|&i| i > 0)
        .collect()
}
