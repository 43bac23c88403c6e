//! Streaming UTF-8 decoding for network chunks
//!
//! Chunk boundaries are arbitrary, so a multi-byte character can arrive in
//! two reads. Incomplete trailing sequences are held back until the next
//! chunk; invalid bytes decode to U+FFFD.

/// Incremental bytes-to-text decoder.
#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    /// Bytes of an incomplete trailing sequence
    pending: Vec<u8>,
}

impl Utf8StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `bytes`, prefixed by any sequence held back from the last call.
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);

        let mut text = String::with_capacity(self.pending.len());
        let mut rest: &[u8] = &self.pending;

        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    text.push_str(valid);
                    rest = &[];
                    break;
                }
                Err(e) => {
                    let valid_up_to = e.valid_up_to();
                    text.push_str(&String::from_utf8_lossy(&rest[..valid_up_to]));
                    match e.error_len() {
                        Some(invalid_len) => {
                            text.push(char::REPLACEMENT_CHARACTER);
                            rest = &rest[valid_up_to + invalid_len..];
                        }
                        None => {
                            // Sequence cut by the chunk boundary
                            rest = &rest[valid_up_to..];
                            break;
                        }
                    }
                }
            }
        }

        let consumed = self.pending.len() - rest.len();
        self.pending.drain(..consumed);
        text
    }

    /// Number of held-back bytes.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Flush held-back bytes at end of stream.
    pub fn finish(&mut self) -> String {
        let text = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        text
    }
}
