//! Smoothing / oscillation sampler — the consumption side.
//!
//! Called once per display tick.  Each call pulls the latest
//! `target_stress`, moves a local smoothed value a fixed fraction of the
//! way towards it, and rides a sine of amplitude `|smoothed|` on top:
//!
//! ```text
//! stress += (target - stress) * damping
//! t      += 1 / tick_hz
//! value   = sin(2π · f · t) · |stress|
//! ```
//!
//! Nothing flows back into the shared state.  If acquisition stalls the
//! sampler simply keeps converging on the last value it saw.

use core::f32::consts::TAU;

use crate::app::ports::StressReader;
use crate::config::SystemConfig;

/// Value handed to the presentation layer for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayStress {
    /// Oscillating display value.
    pub value: f32,
    /// Smoothed stress (the oscillation amplitude).
    pub smoothed: f32,
}

pub struct Sampler<R> {
    reader: R,
    damping: f32,
    frequency: f32,
    tick_secs: f32,
    stress: f32,
    /// Phase time, kept within one oscillation period.
    time: f32,
}

impl<R: StressReader> Sampler<R> {
    pub fn new(reader: R, config: &SystemConfig) -> Self {
        Self {
            reader,
            damping: config.damping,
            frequency: config.oscillation_hz,
            tick_secs: config.tick_period_secs(),
            stress: 0.0,
            time: 0.0,
        }
    }

    /// Advance one tick.
    pub fn sample(&mut self) -> DisplayStress {
        let target = self.reader.target_stress();
        self.stress += (target - self.stress) * self.damping;

        self.time += self.tick_secs;
        if self.frequency > 0.0 {
            self.time = self.time.rem_euclid(1.0 / self.frequency);
        }

        DisplayStress {
            value: (self.time * self.frequency * TAU).sin() * self.stress.abs(),
            smoothed: self.stress,
        }
    }

    pub fn smoothed(&self) -> f32 {
        self.stress
    }
}
