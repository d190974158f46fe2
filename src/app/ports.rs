//! Port traits — the boundary between the stress engine and the outside world.
//!
//! ```text
//!   LineSource ──▶ AcquisitionService ──▶ StressStore ─ ─ ▶ StressReader ──▶ Sampler
//!                          │
//!                          ▼
//!                      EventSink
//! ```

use crate::error::StreamError;
use crate::model::state::StressState;

// ───────────────────────────────────────────────────────────────
// Line source (driven adapter: byte stream → acquisition)
// ───────────────────────────────────────────────────────────────

/// A line-oriented byte stream, e.g. a serial link to the sensor board.
///
/// Opening, resetting and reconnecting the underlying transport belong to
/// the adapter; the acquisition loop never retries a failed source.
pub trait LineSource {
    /// Block until the next raw line (terminator optional) is available.
    ///
    /// `Ok(None)` signals end of stream.  Bytes are returned undecoded so
    /// that invalid text can be rejected per line.
    fn next_line(&mut self) -> Result<Option<Vec<u8>>, StreamError>;

    /// Whether the source can still produce lines.
    fn is_open(&self) -> bool;

    /// Release the underlying transport.  Idempotent.
    fn close(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Stress state hand-off
// ───────────────────────────────────────────────────────────────

/// Write side of the stress state.  One commit is one atomic update.
pub trait StressStore {
    fn commit<R>(&mut self, update: impl FnOnce(&mut StressState) -> R) -> R;
}

/// Read side of the stress state, polled once per display tick.
pub trait StressReader {
    /// Most recent completed `target_stress`.
    fn target_stress(&mut self) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Event sink (driven adapter: acquisition → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The acquisition loop emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
