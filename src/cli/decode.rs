//! `decode` command: replay a captured event stream through the decoder.
//!
//! The input is read in fixed-size chunks to mimic network reads, so chunk
//! boundaries land mid-line and mid-character just as they would live.

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::sse::{StreamDecoder, Utf8StreamDecoder};

/// Bytes per simulated read when `--chunk-size` is not given.
pub const DEFAULT_CHUNK_SIZE: usize = 64;

/// Summary of one decode run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeReport {
    pub bytes_read: usize,
    pub fragments: usize,
    /// Whether `[DONE]` ended the stream before the input did
    pub terminated_by_sentinel: bool,
}

/// Decode `reader` in `chunk_size` reads, writing fragments to `out` as
/// they are produced.
pub fn decode_reader<R, W>(mut reader: R, mut out: W, chunk_size: usize) -> io::Result<DecodeReport>
where
    R: Read,
    W: Write,
{
    let mut utf8 = Utf8StreamDecoder::new();
    let mut decoder = StreamDecoder::new();
    let mut report = DecodeReport::default();
    let mut buf = vec![0u8; chunk_size.max(1)];

    loop {
        let read = reader.read(&mut buf)?;
        if read == 0 {
            let tail = utf8.finish();
            let mut fragments = decoder.feed(&tail);
            fragments.extend(decoder.flush());
            for fragment in &fragments {
                out.write_all(fragment.as_str().as_bytes())?;
            }
            report.fragments += fragments.len();
            break;
        }

        report.bytes_read += read;
        let text = utf8.decode(&buf[..read]);
        for fragment in decoder.feed(&text) {
            out.write_all(fragment.as_str().as_bytes())?;
            out.flush()?;
            report.fragments += 1;
        }

        if decoder.is_done() {
            report.terminated_by_sentinel = true;
            break;
        }
    }

    out.flush()?;
    Ok(report)
}

/// Handle `expo-chat decode`.
pub fn handle_decode_command(path: Option<&Path>, chunk_size: usize) -> Result<()> {
    let stdout = io::stdout();
    let report = match path {
        Some(path) => {
            let file = File::open(path)
                .wrap_err_with(|| format!("failed to open {}", path.display()))?;
            decode_reader(file, stdout.lock(), chunk_size)?
        }
        None => decode_reader(io::stdin().lock(), stdout.lock(), chunk_size)?,
    };
    println!();

    tracing::info!(
        "Decoded {} fragments from {} bytes (sentinel: {})",
        report.fragments,
        report.bytes_read,
        report.terminated_by_sentinel
    );
    Ok(())
}
