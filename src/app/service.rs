//! Acquisition service — the producer loop.
//!
//! [`AcquisitionService`] owns the frame assembler, parser and stress
//! model, and writes through a [`StressStore`].  The line source and the
//! event sink are injected at call sites, so the whole pipeline is
//! testable with scripted adapters.
//!
//! ```text
//!  LineSource ──▶ ┌───────────────────────────────┐ ──▶ StressStore
//!                 │      AcquisitionService        │
//!                 │ Assembler · Parser · Model     │ ──▶ EventSink
//!                 └───────────────────────────────┘
//! ```
//!
//! Data faults (undecodable lines, oversize frames, bad tokens) are
//! reported and skipped.  Stream faults end [`run`](AcquisitionService::run).

use log::{debug, info};

use crate::config::SystemConfig;
use crate::error::{FrameError, StreamError};
use crate::model::dynamics::{StressModel, UpdateReport};
use crate::telemetry::codec::{FrameAssembler, FrameBuffer};
use crate::telemetry::parser::FrameParser;

use super::events::AppEvent;
use super::ports::{EventSink, LineSource, StressStore};
use super::shutdown::Shutdown;

/// Running counters for observability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcquisitionStats {
    pub lines: u64,
    pub frames: u64,
    pub decode_errors: u64,
    pub oversize_frames: u64,
    pub oversize_lines: u64,
    pub skipped_tokens: u64,
}

pub struct AcquisitionService<W> {
    assembler: FrameAssembler,
    parser: FrameParser,
    model: StressModel,
    store: W,
    stats: AcquisitionStats,
}

impl<W: StressStore> AcquisitionService<W> {
    pub fn new(config: &SystemConfig, store: W) -> Self {
        Self {
            assembler: FrameAssembler::new(config),
            parser: FrameParser::new(config),
            model: StressModel::new(config),
            store,
            stats: AcquisitionStats::default(),
        }
    }

    /// Feed one raw line.  Returns the state update if it closed a frame.
    pub fn ingest(&mut self, raw: &[u8], sink: &mut impl EventSink) -> Option<UpdateReport> {
        self.stats.lines += 1;
        match self.assembler.feed(raw) {
            Ok(Some(frame)) => Some(self.apply_frame(&frame, sink)),
            Ok(None) => None,
            Err(e) => {
                match e {
                    FrameError::Decode { .. } => self.stats.decode_errors += 1,
                    FrameError::TooLarge { .. } => self.stats.oversize_frames += 1,
                    FrameError::LineTooLong { .. } => self.stats.oversize_lines += 1,
                }
                debug!("Acquisition: dropped input ({e})");
                sink.emit(&AppEvent::Rejected(e));
                None
            }
        }
    }

    /// Parse a completed frame and commit it as one atomic update.
    pub fn apply_frame(&mut self, buffer: &FrameBuffer, sink: &mut impl EventSink) -> UpdateReport {
        let outcome = self.parser.parse(buffer);
        if outcome.skipped_tokens > 0 {
            self.stats.skipped_tokens += u64::from(outcome.skipped_tokens);
            sink.emit(&AppEvent::TokensSkipped(outcome.skipped_tokens));
        }

        let frame = outcome.frame;
        let model = &self.model;
        let update = self.store.commit(|state| model.apply(state, &frame));
        self.stats.frames += 1;

        debug!(
            "Frame: calm={:?} stress={:?} accel={:?} | modifier={:.2} target={:.2} base={:.2}",
            frame.calm, frame.stress, frame.accel, update.modifier, update.target_stress, update.base_stress,
        );
        sink.emit(&AppEvent::FrameApplied { frame, update });
        update
    }

    /// Read lines until the stream ends, fails, or `shutdown` is raised.
    ///
    /// A stop request returns `Ok` with the final counters.  End of stream
    /// and read failures are returned as errors.  Either way the source is
    /// closed and `shutdown` is raised so the sampling loop stops too.
    pub fn run(
        &mut self,
        source: &mut impl LineSource,
        sink: &mut impl EventSink,
        shutdown: &Shutdown,
    ) -> Result<AcquisitionStats, StreamError> {
        info!("Acquisition started");
        sink.emit(&AppEvent::Started);

        let result = loop {
            if shutdown.is_requested() {
                sink.emit(&AppEvent::Stopped);
                break Ok(self.stats);
            }
            if !source.is_open() {
                break Err(StreamError::Closed);
            }
            match source.next_line() {
                Ok(Some(line)) => {
                    self.ingest(&line, sink);
                }
                Ok(None) => break Err(StreamError::Closed),
                Err(e) => break Err(e),
            }
        };

        if let Err(e) = result {
            info!("Acquisition ended: {e}");
            sink.emit(&AppEvent::StreamEnded(e));
        }
        source.close();
        shutdown.request();
        info!("Acquisition stats: {:?}", self.stats);
        result
    }

    pub fn stats(&self) -> AcquisitionStats {
        self.stats
    }

    pub fn store(&self) -> &W {
        &self.store
    }

    /// Lines waiting for a delimiter.
    pub fn pending_lines(&self) -> usize {
        self.assembler.pending_lines()
    }
}
