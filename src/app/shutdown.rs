//! Cooperative shutdown shared by the acquisition and sampling loops.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Raised once by whichever loop finishes first; never lowered.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    requested: Arc<AtomicBool>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.requested.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}
