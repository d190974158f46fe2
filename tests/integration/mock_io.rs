//! Scripted adapters for integration tests.
//!
//! `ScriptedSource` replays a fixed list of lines and then ends the
//! stream (or fails with a chosen error); `RecordingSink` keeps every
//! event so tests can assert on the full history.

use std::collections::VecDeque;

use stressline::app::events::AppEvent;
use stressline::app::ports::{EventSink, LineSource};
use stressline::error::StreamError;

// ── ScriptedSource ────────────────────────────────────────────

pub struct ScriptedSource {
    lines: VecDeque<Vec<u8>>,
    /// Returned once the script runs out; `None` means end of stream.
    terminal: Option<StreamError>,
    open: bool,
    pub close_calls: usize,
}

#[allow(dead_code)]
impl ScriptedSource {
    /// Each line gets the device's `\r\n` terminator appended.
    pub fn new<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        Self {
            lines: lines
                .into_iter()
                .map(|l| {
                    let mut v = l.as_ref().to_vec();
                    v.extend_from_slice(b"\r\n");
                    v
                })
                .collect(),
            terminal: None,
            open: true,
            close_calls: 0,
        }
    }

    pub fn failing_with(mut self, error: StreamError) -> Self {
        self.terminal = Some(error);
        self
    }

    pub fn push_raw(&mut self, raw: &[u8]) {
        self.lines.push_back(raw.to_vec());
    }
}

impl LineSource for ScriptedSource {
    fn next_line(&mut self) -> Result<Option<Vec<u8>>, StreamError> {
        if !self.open {
            return Err(StreamError::Closed);
        }
        match self.lines.pop_front() {
            Some(line) => Ok(Some(line)),
            None => match self.terminal {
                Some(e) => Err(e),
                None => Ok(None),
            },
        }
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) {
        self.open = false;
        self.close_calls += 1;
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_applied(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::FrameApplied { .. }))
            .count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
