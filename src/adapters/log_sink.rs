//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing acquisition events through the
//! `log` facade.  Per-frame detail goes to `debug`, data faults to `warn`.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::FrameApplied { frame, update } => {
                debug!(
                    "FRAME | calm={:?} stress={:?} accel={:?} | mod={:+.2}{} | \
                     target={:.2} base={:.2}{}",
                    frame.calm,
                    frame.stress,
                    frame.accel.map(|a| (a.x, a.y, a.z)),
                    update.modifier,
                    if update.significant { " (significant)" } else { "" },
                    update.target_stress,
                    update.base_stress,
                    if update.new_peak { " | new peak" } else { "" },
                );
            }
            AppEvent::TokensSkipped(n) => {
                debug!("PARSE | skipped {} malformed token(s)", n);
            }
            AppEvent::Rejected(e) => {
                warn!("DROP  | {}", e);
            }
            AppEvent::StreamEnded(e) => {
                info!("END   | {}", e);
            }
            AppEvent::Started => {
                info!("START | acquisition running");
            }
            AppEvent::Stopped => {
                info!("STOP  | shutdown requested");
            }
        }
    }
}
