//! Line-delimited frame codec.
//!
//! Wire format (one record per `\r\n`-terminated line):
//! ```text
//! Apaisant: 0.70312          ◀─ metadata lines, any number, any order
//! Stress: 0.29688
//! | 1.04, 0.24 0, -0.06 0 0  ◀─ delimiter line, closes the frame
//! ```
//!
//! The assembler accumulates decoded lines and yields a complete
//! [`FrameBuffer`] (delimiter line last) as soon as a line containing the
//! delimiter arrives.  The internal buffer is emptied every time a frame
//! is handed out or discarded, so nothing leaks into the next frame.

use log::trace;

use crate::config::SystemConfig;
use crate::error::FrameError;

/// One decoded, trimmed text line.
pub type RawLine = String;

/// Lines collected since the last delimiter, delimiter line last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameBuffer {
    lines: Vec<RawLine>,
}

impl FrameBuffer {
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<RawLine>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn lines(&self) -> &[RawLine] {
        &self.lines
    }

    /// The line that closed the frame.
    pub fn delimiter_line(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Validate a raw line as UTF-8 and strip terminators and padding.
pub fn decode_line(raw: &[u8]) -> Result<&str, FrameError> {
    core::str::from_utf8(raw)
        .map(str::trim)
        .map_err(|_| FrameError::Decode { len: raw.len() })
}

/// Streaming frame assembler.
pub struct FrameAssembler {
    delimiter: char,
    max_lines: usize,
    max_line_bytes: usize,
    buffer: Vec<RawLine>,
}

impl FrameAssembler {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            delimiter: config.delimiter,
            max_lines: config.max_frame_lines.max(1),
            max_line_bytes: config.max_line_bytes.max(1),
            buffer: Vec::with_capacity(8),
        }
    }

    /// Feed one raw line (terminator optional).
    ///
    /// Returns `Ok(Some(frame))` when the line completes a frame.  A line
    /// longer than `max_line_bytes` ([`FrameError::LineTooLong`]) or not
    /// valid text ([`FrameError::Decode`]) is rejected and leaves the
    /// pending frame untouched.
    pub fn feed(&mut self, raw: &[u8]) -> Result<Option<FrameBuffer>, FrameError> {
        if raw.len() > self.max_line_bytes {
            return Err(FrameError::LineTooLong {
                limit: self.max_line_bytes,
            });
        }
        let line = decode_line(raw)?;
        self.push(line)
    }

    /// Append an already-decoded line.
    ///
    /// When the buffer reaches `max_frame_lines` without a delimiter it is
    /// discarded and [`FrameError::TooLarge`] returned; the next line
    /// starts a fresh frame.
    pub fn push(&mut self, line: &str) -> Result<Option<FrameBuffer>, FrameError> {
        trace!("rx: {line}");
        self.buffer.push(line.to_owned());

        if line.contains(self.delimiter) {
            let lines = core::mem::take(&mut self.buffer);
            return Ok(Some(FrameBuffer { lines }));
        }

        if self.buffer.len() >= self.max_lines {
            let lines = self.buffer.len();
            self.buffer.clear();
            return Err(FrameError::TooLarge { lines });
        }

        Ok(None)
    }

    /// Lines waiting for a delimiter.
    pub fn pending_lines(&self) -> usize {
        self.buffer.len()
    }

    /// Drop any partial frame (e.g. after the source reconnects).
    pub fn reset(&mut self) {
        self.buffer.clear();
    }
}
