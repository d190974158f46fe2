//! `LineSource` over any buffered reader.
//!
//! Splits on `\n`; the `\r` of a `\r\n` pair stays on the line and is
//! stripped by the codec.  A serial device node, a capture file and
//! stdin all look the same from here.  Port enumeration, baud setup and
//! reset handshakes are done by whoever builds the reader.
//!
//! At most `max_line_bytes + 1` bytes of a line are buffered.  Anything
//! beyond is skipped up to the next `\n`, and the returned head is long
//! enough for the assembler to reject it as over-long.

use std::io::{BufRead, ErrorKind, Read};

use log::{debug, info, warn};

use crate::app::ports::LineSource;
use crate::error::StreamError;

pub struct ReaderSource<R> {
    reader: Option<R>,
    max_line_bytes: usize,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R, max_line_bytes: usize) -> Self {
        Self {
            reader: Some(reader),
            max_line_bytes,
        }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn next_line(&mut self) -> Result<Option<Vec<u8>>, StreamError> {
        let reader = self.reader.as_mut().ok_or(StreamError::Closed)?;
        let cap = self.max_line_bytes.saturating_add(1);
        let mut line = Vec::with_capacity(cap.min(64));
        loop {
            let room = cap.saturating_sub(line.len()) as u64;
            match reader.by_ref().take(room).read_until(b'\n', &mut line) {
                Ok(0) if line.is_empty() => {
                    debug!("ReaderSource: end of stream");
                    return Ok(None);
                }
                Ok(_) => break,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }

        if line.len() >= cap && line.last() != Some(&b'\n') {
            let skipped = reader.skip_until(b'\n')?;
            warn!("ReaderSource: skipped {} bytes of an over-long line", line.len() + skipped);
        }
        Ok(Some(line))
    }

    fn is_open(&self) -> bool {
        self.reader.is_some()
    }

    fn close(&mut self) {
        if self.reader.take().is_some() {
            info!("ReaderSource: closed");
        }
    }
}
