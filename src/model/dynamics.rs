//! Stress dynamics — turns one parsed frame into one state update.
//!
//! Per frame, under a single commit:
//!
//! 1. accumulate a modifier from the affect scores and z-axis movement
//! 2. `target += modifier`
//! 3. on a new peak, raise the base by a fraction of the peak (capped)
//! 4. decay: mild if the frame was significant, steep if far above base,
//!    moderate otherwise
//! 5. floor at base, keep base non-negative, clamp to the stress bounds
//!
//! The base only ever ratchets up, so a past excursion permanently lifts
//! the level that quiet periods decay towards.

use crate::config::SystemConfig;
use crate::telemetry::parser::ParsedFrame;

use super::state::StressState;

/// Outcome of one update, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UpdateReport {
    pub modifier: f32,
    pub significant: bool,
    pub new_peak: bool,
    pub target_stress: f32,
    pub base_stress: f32,
}

/// Modifier and significance accumulated from one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Modifier {
    pub value: f32,
    pub significant: bool,
}

pub struct StressModel {
    strong_threshold: f32,
    strong_gain: f32,
    mild_threshold: f32,
    mild_gain: f32,
    movement_threshold: f32,
    movement_gain: f32,
    base_growth: f32,
    base_cap: f32,
    steep_margin: f32,
    decay_steep: f32,
    decay_idle: f32,
    decay_active: f32,
    min: f32,
    max: f32,
}

impl StressModel {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            strong_threshold: config.score_strong_threshold,
            strong_gain: config.score_strong_gain,
            mild_threshold: config.score_mild_threshold,
            mild_gain: config.score_mild_gain,
            movement_threshold: config.movement_threshold,
            movement_gain: config.movement_gain,
            base_growth: config.base_growth,
            base_cap: config.base_cap,
            steep_margin: config.steep_decay_margin,
            decay_steep: config.decay_steep,
            decay_idle: config.decay_idle,
            decay_active: config.decay_active,
            min: config.stress_min,
            max: config.stress_max,
        }
    }

    /// Score contribution, or `None` when below the mild threshold.
    fn score_term(&self, score: f32) -> Option<f32> {
        if score > self.strong_threshold {
            Some(score * self.strong_gain)
        } else if score > self.mild_threshold {
            Some(score * self.mild_gain)
        } else {
            None
        }
    }

    /// Step 1 only.  Does not touch the state.
    pub fn modifier(&self, frame: &ParsedFrame, last_z: Option<f32>) -> Modifier {
        let mut m = Modifier::default();

        if let Some(term) = frame.calm.and_then(|c| self.score_term(c)) {
            m.value -= term;
            m.significant = true;
        }
        if let Some(term) = frame.stress.and_then(|s| self.score_term(s)) {
            m.value += term;
            m.significant = true;
        }
        if let (Some(accel), Some(prev)) = (frame.accel, last_z) {
            let delta = (accel.z - prev).abs();
            if delta > self.movement_threshold {
                m.value += delta * self.movement_gain;
                m.significant = true;
            }
        }
        m
    }

    /// Apply one frame to the state.
    pub fn apply(&self, state: &mut StressState, frame: &ParsedFrame) -> UpdateReport {
        let m = self.modifier(frame, state.last_z);
        if let Some(accel) = frame.accel {
            state.last_z = Some(accel.z);
        }

        let mut target = state.target_stress + m.value;
        let mut base = state.base_stress;

        let new_peak = target > state.peak_stress;
        if new_peak {
            state.peak_stress = target;
            base = (base + state.peak_stress * self.base_growth).min(self.base_cap);
        }

        target *= if m.significant {
            self.decay_active
        } else if target > base + self.steep_margin {
            self.decay_steep
        } else {
            self.decay_idle
        };

        target = target.max(base);
        base = base.max(0.0);
        target = target.clamp(self.min, self.max);

        state.target_stress = target;
        state.base_stress = base;
        state.updates += 1;

        UpdateReport {
            modifier: m.value,
            significant: m.significant,
            new_peak,
            target_stress: target,
            base_stress: base,
        }
    }
}
