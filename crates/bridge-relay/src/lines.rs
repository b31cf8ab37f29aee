//! Newline framing over a chunked byte stream.

use bytes::BytesMut;

/// Accumulates upstream chunks and yields complete lines.
///
/// A line split across chunks is held until its newline arrives. Once the
/// buffer is closed, a trailing line without a newline is yielded as well.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: BytesMut,
    closed: bool,
}

impl LineBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Mark end of input so the final partial line can be drained.
    pub fn close(&mut self) {
        self.closed = true;
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Next complete line without its terminator (`\n` or `\r\n`).
    pub fn next_line(&mut self) -> Option<String> {
        if let Some(end) = find_newline(&self.buf) {
            let line = self.buf.split_to(end);
            return Some(decode(&line[..end - 1]));
        }
        if self.closed && !self.buf.is_empty() {
            let rest = self.buf.split();
            return Some(decode(&rest));
        }
        None
    }
}

fn decode(line: &[u8]) -> String {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}

/// Position just past the next newline.
fn find_newline(buf: &BytesMut) -> Option<usize> {
    buf.iter().position(|&b| b == b'\n').map(|pos| pos + 1)
}
