//! Event-stream decoding logic
//!
//! Contains the stateful `StreamDecoder` that buffers chunked text, splits
//! it into lines and emits delta fragments, plus the line classifier.

mod content;

use crate::sse::events::{DecoderState, DeltaFragment, EventLine, PayloadOutcome, DATA_PREFIX};

pub use content::extract_delta;

/// Classify a single line (without its trailing newline or carriage return).
pub fn classify_line(line: &str) -> EventLine<'_> {
    if line.starts_with(':') {
        return EventLine::Comment;
    }

    if line.trim().is_empty() {
        return EventLine::Blank;
    }

    match line.strip_prefix(DATA_PREFIX) {
        Some(rest) => EventLine::Payload(rest.trim()),
        None => EventLine::Unrecognized,
    }
}

/// Strip one trailing carriage return (CRLF framing).
fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

/// Classify and, for payload lines, interpret. `None` for ignored lines.
fn interpret_line(line: &str) -> Option<PayloadOutcome> {
    match classify_line(line) {
        EventLine::Payload(payload) => Some(extract_delta(payload)),
        EventLine::Comment | EventLine::Blank | EventLine::Unrecognized => None,
    }
}

/// Incremental decoder for a chat-completions event stream.
///
/// Feed it text chunks in arrival order; each call returns the fragments
/// completed by that chunk. One decoder serves exactly one response.
///
/// A `data:` line whose JSON does not parse is left at the front of the
/// buffer and retried on the next `feed`. Until it parses (or the optional
/// pending cap discards it) no later line is processed.
#[derive(Debug, Default)]
pub struct StreamDecoder {
    /// Text received but not yet consumed as complete lines
    buffer: String,
    state: DecoderState,
    /// Upper bound on buffered bytes while a deferred line is waiting
    max_pending_bytes: Option<usize>,
}

impl StreamDecoder {
    /// Create a new decoder in the `Streaming` state
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard a deferred line once the buffer grows past `limit` bytes
    /// instead of waiting for it indefinitely.
    pub fn with_max_pending_bytes(mut self, limit: usize) -> Self {
        self.max_pending_bytes = Some(limit);
        self
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state.is_done()
    }

    /// Number of bytes currently held in the buffer.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Text currently held in the buffer.
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    /// Append `chunk` and decode every complete line it finishes.
    ///
    /// Returns the fragments in arrival order. A no-op once `Done`.
    pub fn feed(&mut self, chunk: &str) -> Vec<DeltaFragment> {
        let mut fragments = Vec::new();
        if self.state.is_done() {
            return fragments;
        }

        self.buffer.push_str(chunk);

        while let Some(newline) = self.buffer.find('\n') {
            let outcome = interpret_line(strip_cr(&self.buffer[..newline]));

            match outcome {
                Some(PayloadOutcome::Sentinel) => {
                    tracing::debug!("Stream terminated by sentinel");
                    self.finish();
                    return fragments;
                }
                Some(PayloadOutcome::Delta(fragment)) => fragments.push(fragment),
                Some(PayloadOutcome::Incomplete) => {
                    if !self.pending_cap_exceeded() {
                        tracing::trace!("Deferring unparsable payload line ({} bytes)", newline);
                        return fragments;
                    }
                    tracing::warn!(
                        "Dropping payload line that never parsed ({} bytes buffered)",
                        self.buffer.len()
                    );
                }
                Some(PayloadOutcome::Empty) | None => {}
            }

            self.buffer.drain(..=newline);
        }

        fragments
    }

    /// Decode whatever is left once the underlying stream has ended.
    ///
    /// Unparsable lines are dropped, since nothing more will arrive. The
    /// decoder is `Done` afterwards.
    pub fn flush(&mut self) -> Vec<DeltaFragment> {
        let mut fragments = Vec::new();
        if self.state.is_done() {
            return fragments;
        }

        let remaining = std::mem::take(&mut self.buffer);
        self.finish();

        for raw in remaining.split('\n') {
            match interpret_line(strip_cr(raw)) {
                Some(PayloadOutcome::Sentinel) => break,
                Some(PayloadOutcome::Delta(fragment)) => fragments.push(fragment),
                Some(PayloadOutcome::Incomplete) => {
                    tracing::trace!("Discarding unparsable tail line ({} bytes)", raw.len());
                }
                Some(PayloadOutcome::Empty) | None => {}
            }
        }

        fragments
    }

    fn pending_cap_exceeded(&self) -> bool {
        self.max_pending_bytes
            .is_some_and(|limit| self.buffer.len() > limit)
    }

    fn finish(&mut self) {
        self.state = DecoderState::Done;
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(fragments: Vec<DeltaFragment>) -> Vec<String> {
        fragments.into_iter().map(DeltaFragment::into_string).collect()
    }

    fn data_line(content: &str) -> String {
        format!(
            "data: {}\n",
            serde_json::json!({"choices": [{"delta": {"content": content}}]})
        )
    }

    // Tests for classify_line

    #[test]
    fn test_classify_comment() {
        assert_eq!(classify_line(":ping"), EventLine::Comment);
        assert_eq!(classify_line(": keep-alive"), EventLine::Comment);
    }

    #[test]
    fn test_classify_blank() {
        assert_eq!(classify_line(""), EventLine::Blank);
        assert_eq!(classify_line("   \t"), EventLine::Blank);
    }

    #[test]
    fn test_classify_payload() {
        assert_eq!(
            classify_line("data: {\"x\":1}  "),
            EventLine::Payload("{\"x\":1}")
        );
        assert_eq!(classify_line("data: [DONE]"), EventLine::Payload("[DONE]"));
    }

    #[test]
    fn test_classify_requires_space_after_colon() {
        assert_eq!(classify_line("data:{\"x\":1}"), EventLine::Unrecognized);
    }

    #[test]
    fn test_classify_unrecognized() {
        assert_eq!(classify_line("event: message"), EventLine::Unrecognized);
        assert_eq!(classify_line("id: 7"), EventLine::Unrecognized);
        assert_eq!(classify_line(" data: {}"), EventLine::Unrecognized);
    }

    // Tests for StreamDecoder

    #[test]
    fn test_two_deltas_then_done() {
        let mut decoder = StreamDecoder::new();
        let input = format!("{}{}data: [DONE]\n", data_line("A"), data_line("B"));

        assert_eq!(texts(decoder.feed(&input)), vec!["A", "B"]);
        assert_eq!(decoder.state(), DecoderState::Done);
        assert_eq!(decoder.buffered_len(), 0);
    }

    #[test]
    fn test_role_only_payload_yields_nothing() {
        let mut decoder = StreamDecoder::new();
        let fragments = decoder.feed("data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n");
        assert!(fragments.is_empty());
        assert!(!decoder.is_done());
        assert_eq!(decoder.buffered_len(), 0);
    }

    #[test]
    fn test_json_split_mid_token() {
        let mut decoder = StreamDecoder::new();
        assert!(decoder.feed("data: {\"choices\":[{\"del").is_empty());
        assert_eq!(
            texts(decoder.feed("ta\":{\"content\":\"hi\"}}]}\n")),
            vec!["hi"]
        );
        assert_eq!(decoder.buffered_len(), 0);
    }

    #[test]
    fn test_partial_line_stays_buffered() {
        let mut decoder = StreamDecoder::new();
        assert!(decoder.feed("data: {\"choices\"").is_empty());
        assert_eq!(decoder.pending(), "data: {\"choices\"");
    }

    #[test]
    fn test_crlf_framing() {
        let mut decoder = StreamDecoder::new();
        let input = "data: {\"choices\":[{\"delta\":{\"content\":\"x\"}}]}\r\n:ping\r\n\r\ndata: [DONE]\r\n";
        assert_eq!(texts(decoder.feed(input)), vec!["x"]);
        assert!(decoder.is_done());
    }

    #[test]
    fn test_lines_after_sentinel_in_same_chunk_ignored() {
        let mut decoder = StreamDecoder::new();
        let input = format!("{}data: [DONE]\n{}", data_line("kept"), data_line("dropped"));
        assert_eq!(texts(decoder.feed(&input)), vec!["kept"]);
    }

    #[test]
    fn test_feed_after_done_is_noop() {
        let mut decoder = StreamDecoder::new();
        decoder.feed("data: [DONE]\n");
        assert!(decoder.feed(&data_line("late")).is_empty());
        assert!(decoder.flush().is_empty());
        assert_eq!(decoder.buffered_len(), 0);
    }

    #[test]
    fn test_empty_chunk() {
        let mut decoder = StreamDecoder::new();
        assert!(decoder.feed("").is_empty());
        assert!(!decoder.is_done());
    }

    #[test]
    fn test_comments_blank_and_unknown_lines_ignored() {
        let mut decoder = StreamDecoder::new();
        let input = format!(
            ":ping\n\nevent: message\n{}   \nretry: 100\n{}",
            data_line("a"),
            data_line("b")
        );
        assert_eq!(texts(decoder.feed(&input)), vec!["a", "b"]);
    }

    #[test]
    fn test_malformed_line_is_deferred_with_prefix() {
        let mut decoder = StreamDecoder::new();
        let bad = "data: {not json}\n";
        let input = format!("{}{}", bad, data_line("after"));

        assert!(decoder.feed(&input).is_empty());
        assert!(decoder.pending().starts_with(bad));
        assert_eq!(decoder.buffered_len(), input.len());
        assert!(!decoder.is_done());
    }

    #[test]
    fn test_deferred_line_keeps_original_line_ending() {
        let mut decoder = StreamDecoder::new();
        decoder.feed("data: {oops\r\n");
        assert_eq!(decoder.pending(), "data: {oops\r\n");
    }

    #[test]
    fn test_deferred_line_blocks_later_lines_until_flush() {
        let mut decoder = StreamDecoder::new();
        decoder.feed("data: {not json}\n");
        assert!(decoder.feed(&data_line("one")).is_empty());
        assert!(decoder.feed(&data_line("two")).is_empty());

        assert_eq!(texts(decoder.flush()), vec!["one", "two"]);
        assert!(decoder.is_done());
    }

    #[test]
    fn test_pending_cap_drops_stuck_line() {
        let mut decoder = StreamDecoder::new().with_max_pending_bytes(32);
        assert!(decoder.feed("data: {not json}\n").is_empty());

        // Buffer grows past the cap, so the stuck line is dropped
        let fragments = decoder.feed(&data_line("freed"));
        assert_eq!(texts(fragments), vec!["freed"]);
        assert_eq!(decoder.buffered_len(), 0);
    }

    #[test]
    fn test_pending_cap_not_reached_keeps_waiting() {
        let mut decoder = StreamDecoder::new().with_max_pending_bytes(4096);
        decoder.feed("data: {not json}\n");
        assert!(decoder.feed(&data_line("held")).is_empty());
    }

    #[test]
    fn test_flush_recovers_tail_without_newline() {
        let mut decoder = StreamDecoder::new();
        assert!(decoder
            .feed("data: {\"choices\":[{\"delta\":{\"content\":\"tail\"}}]}")
            .is_empty());
        assert_eq!(texts(decoder.flush()), vec!["tail"]);
        assert!(decoder.is_done());
    }

    #[test]
    fn test_flush_discards_truncated_tail() {
        let mut decoder = StreamDecoder::new();
        decoder.feed(&data_line("whole"));
        decoder.feed("data: {\"choices\":[{\"delta\":{\"con");
        assert!(decoder.flush().is_empty());
        assert!(decoder.is_done());
        assert_eq!(decoder.buffered_len(), 0);
    }

    #[test]
    fn test_flush_stops_at_sentinel() {
        let mut decoder = StreamDecoder::new();
        decoder.feed("data: {bad}\n");
        decoder.feed(&format!("{}data: [DONE]\n{}", data_line("x"), data_line("y")));
        assert_eq!(texts(decoder.flush()), vec!["x"]);
    }

    #[test]
    fn test_flush_empty_buffer() {
        let mut decoder = StreamDecoder::new();
        assert!(decoder.flush().is_empty());
        assert_eq!(decoder.state(), DecoderState::Done);
    }
}
