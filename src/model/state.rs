//! Stress state and the two ways of sharing it between loops.
//!
//! The acquisition loop is the only writer; the sampling loop only reads
//! `target_stress`.  Two hand-offs are provided, both implementing the
//! [`StressStore`] / [`StressReader`] ports:
//!
//! ```text
//!                   lock per update / per snapshot
//!  StressWriter ──▶ Mutex<RefCell<StressState>> ◀── StressView
//!
//!                   single-slot, latest value wins
//!  OwnedStress ───▶ Signal<StressState> ──────────▶ LatestStress
//! ```
//!
//! The critical section only ever wraps a closure over the state itself,
//! never I/O or sleeping.

use core::cell::RefCell;
use std::sync::Arc;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use crate::app::ports::{StressReader, StressStore};
use crate::config::SystemConfig;

/// The record exchanged between acquisition and sampling.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StressState {
    /// Authoritative, unsmoothed stress level.
    pub target_stress: f32,
    /// Ratcheted floor beneath which target stress cannot decay.
    pub base_stress: f32,
    /// High-water mark of `target_stress`.
    pub peak_stress: f32,
    /// Previous accelerometer z reading.
    pub last_z: Option<f32>,
    /// Frames applied so far.
    pub updates: u64,
}

impl StressState {
    pub const fn new() -> Self {
        Self {
            target_stress: 0.0,
            base_stress: 0.0,
            peak_stress: 0.0,
            last_z: None,
            updates: 0,
        }
    }

    /// Bounds, floor and non-negative base, as enforced after every update.
    pub fn is_consistent(&self, config: &SystemConfig) -> bool {
        (config.stress_min..=config.stress_max).contains(&self.target_stress)
            && self.target_stress >= self.base_stress
            && self.base_stress >= 0.0
    }
}

type StateCell = Mutex<CriticalSectionRawMutex, RefCell<StressState>>;

// ───────────────────────────────────────────────────────────────
// Locked shared handle
// ───────────────────────────────────────────────────────────────

/// Create the writer/reader pair around one shared state.
pub fn shared_stress() -> (StressWriter, StressView) {
    let cell = Arc::new(Mutex::new(RefCell::new(StressState::new())));
    (StressWriter { cell: cell.clone() }, StressView { cell })
}

/// Exclusive write side.  Deliberately not `Clone`.
pub struct StressWriter {
    cell: Arc<StateCell>,
}

impl StressWriter {
    pub fn snapshot(&self) -> StressState {
        self.cell.lock(|c| *c.borrow())
    }
}

impl StressStore for StressWriter {
    fn commit<R>(&mut self, update: impl FnOnce(&mut StressState) -> R) -> R {
        self.cell.lock(|c| update(&mut *c.borrow_mut()))
    }
}

/// Read side; clone one per consumer.
#[derive(Clone)]
pub struct StressView {
    cell: Arc<StateCell>,
}

impl StressView {
    /// Copy of the whole record, taken under the lock.
    pub fn snapshot(&self) -> StressState {
        self.cell.lock(|c| *c.borrow())
    }
}

impl StressReader for StressView {
    fn target_stress(&mut self) -> f32 {
        self.snapshot().target_stress
    }
}

// ───────────────────────────────────────────────────────────────
// Latest-value channel
// ───────────────────────────────────────────────────────────────

type StateSignal = Signal<CriticalSectionRawMutex, StressState>;

/// Create a publisher that owns the state and a reader that drains it.
pub fn latest_stress() -> (OwnedStress, LatestStress) {
    let signal = Arc::new(Signal::new());
    (
        OwnedStress {
            state: StressState::new(),
            signal: signal.clone(),
        },
        LatestStress {
            signal,
            last: StressState::new(),
        },
    )
}

/// Acquisition-owned state, published after every commit.
pub struct OwnedStress {
    state: StressState,
    signal: Arc<StateSignal>,
}

impl OwnedStress {
    pub fn state(&self) -> &StressState {
        &self.state
    }
}

impl StressStore for OwnedStress {
    fn commit<R>(&mut self, update: impl FnOnce(&mut StressState) -> R) -> R {
        let out = update(&mut self.state);
        // Overwrites any value the reader has not taken yet.
        self.signal.signal(self.state);
        out
    }
}

/// Reader side of the channel; keeps the last value between publishes.
pub struct LatestStress {
    signal: Arc<StateSignal>,
    last: StressState,
}

impl LatestStress {
    /// Drain the slot if a new value is pending, else return the last one.
    pub fn latest(&mut self) -> StressState {
        if let Some(state) = self.signal.try_take() {
            self.last = state;
        }
        self.last
    }
}

impl StressReader for LatestStress {
    fn target_stress(&mut self) -> f32 {
        self.latest().target_stress
    }
}
