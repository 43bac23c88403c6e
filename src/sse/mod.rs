//! Incremental event-stream decoder
//!
//! Decodes the newline-delimited stream returned by a chat-completions
//! endpoint into assistant text deltas:
//! - `data: <json>` - payload line; text is read from `choices[0].delta.content`
//! - `data: [DONE]` - terminator
//! - Lines starting with `:` - comments (ignored)
//! - Blank and unrecognized lines - ignored
//!
//! # Module structure
//! - `events` - Line, fragment and state types
//! - `parser` - Decoding logic (StreamDecoder, classify_line, extract_delta)
//! - `utf8` - Streaming bytes-to-text decoding

mod events;
mod parser;
mod utf8;

// Re-export public types
pub use events::{
    DecoderState, DeltaFragment, EventLine, PayloadOutcome, DATA_PREFIX, DONE_SENTINEL,
};
pub use parser::{classify_line, extract_delta, StreamDecoder};
pub use utf8::Utf8StreamDecoder;
