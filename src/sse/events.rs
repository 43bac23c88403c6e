//! Event-stream line and fragment types
//!
//! Contains the classified line type, the text fragment emitted per payload,
//! and the decoder's two-state lifecycle.

use std::fmt;

/// Literal prefix that marks a payload line.
pub const DATA_PREFIX: &str = "data: ";

/// Payload value that terminates the stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Represents a classified event-stream line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventLine<'a> {
    /// Keep-alive or annotation line (starts with ':')
    Comment,
    /// Empty after trimming
    Blank,
    /// Text after the `data: ` prefix, trimmed
    Payload(&'a str),
    /// Any other line (e.g. `event:` or `id:` fields); ignored
    Unrecognized,
}

/// Result of interpreting one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadOutcome {
    /// The `[DONE]` terminator
    Sentinel,
    /// Valid JSON carrying assistant text
    Delta(DeltaFragment),
    /// Valid JSON without usable content (role or finish-reason deltas)
    Empty,
    /// Not valid JSON; most likely cut at a chunk boundary
    Incomplete,
}

/// A piece of assistant-generated text taken from one payload line.
///
/// Always non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeltaFragment(String);

impl DeltaFragment {
    /// Wrap `text`, returning `None` when it is empty.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for DeltaFragment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeltaFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decoder lifecycle. No transition leaves `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecoderState {
    #[default]
    Streaming,
    Done,
}

impl DecoderState {
    pub fn is_done(self) -> bool {
        matches!(self, DecoderState::Done)
    }
}
