//! Operator stop input.
//!
//! Blocks on a line-oriented reader (the terminal when telemetry comes
//! from a file or device path) and raises [`Shutdown`] on `q`/`quit` or
//! when the reader closes.  Other lines are ignored.

use std::io::BufRead;

use log::{info, warn};

use crate::app::shutdown::Shutdown;

/// Returns once shutdown has been requested.
pub fn watch<R: BufRead>(reader: R, shutdown: &Shutdown) {
    for line in reader.lines() {
        match line {
            Ok(cmd) if matches!(cmd.trim(), "q" | "quit") => {
                info!("Stop requested from input");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                warn!("Stop input failed: {e}");
                break;
            }
        }
        if shutdown.is_requested() {
            return;
        }
    }
    shutdown.request();
}
