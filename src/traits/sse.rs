//! Delta decoder trait abstraction.
//!
//! Lets the chat client be driven by any incremental decoder, enabling
//! alternative framings and test doubles.

use crate::sse::{DeltaFragment, StreamDecoder};

/// Trait for incremental event-stream decoders.
///
/// The decoder is stateful: `feed` receives text chunks in arrival order,
/// `flush` is called once after the last chunk.
///
/// # Example
///
/// ```ignore
/// use expo_chat::traits::DeltaDecoder;
///
/// fn drain<D: DeltaDecoder>(decoder: &mut D, chunks: &[&str]) -> String {
///     let mut reply = String::new();
///     for chunk in chunks {
///         for fragment in decoder.feed(chunk) {
///             reply.push_str(fragment.as_str());
///         }
///         if decoder.is_done() {
///             return reply;
///         }
///     }
///     decoder.flush().iter().for_each(|f| reply.push_str(f.as_str()));
///     reply
/// }
/// ```
pub trait DeltaDecoder: Send {
    /// Feed a chunk of text, returning the fragments it completes.
    fn feed(&mut self, chunk: &str) -> Vec<DeltaFragment>;

    /// Decode whatever remains after the stream has ended.
    fn flush(&mut self) -> Vec<DeltaFragment>;

    /// Whether the terminal state has been reached.
    fn is_done(&self) -> bool;
}

impl DeltaDecoder for StreamDecoder {
    fn feed(&mut self, chunk: &str) -> Vec<DeltaFragment> {
        StreamDecoder::feed(self, chunk)
    }

    fn flush(&mut self) -> Vec<DeltaFragment> {
        StreamDecoder::flush(self)
    }

    fn is_done(&self) -> bool {
        StreamDecoder::is_done(self)
    }
}
