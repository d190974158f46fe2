//! Outbound acquisition events.
//!
//! The [`AcquisitionService`](super::service::AcquisitionService) emits
//! these through the [`EventSink`](super::ports::EventSink) port.

use crate::error::{FrameError, StreamError};
use crate::model::dynamics::UpdateReport;
use crate::telemetry::parser::ParsedFrame;

/// Structured events emitted by the acquisition loop.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The loop started reading from its source.
    Started,

    /// A complete frame was parsed and applied to the stress state.
    FrameApplied {
        frame: ParsedFrame,
        update: UpdateReport,
    },

    /// Malformed numeric tokens were skipped while parsing a frame.
    TokensSkipped(u32),

    /// A line or a partial frame was dropped.
    Rejected(FrameError),

    /// The source failed or reached end of stream.
    StreamEnded(StreamError),

    /// The loop stopped because shutdown was requested.
    Stopped,
}
