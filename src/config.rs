//! System configuration parameters
//!
//! All tunable parameters of the stress engine.  Defaults reproduce the
//! behaviour of the reference device firmware; any subset can be
//! overridden from a JSON document (missing keys keep their default).

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Metadata label as it appears before the `:` on a telemetry line.
pub type Label = heapless::String<16>;

fn label(text: &str) -> Label {
    let mut s = Label::new();
    let _ = s.push_str(text);
    s
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Framing ---
    /// Marker character that identifies the accelerometer line closing a frame
    pub delimiter: char,
    /// Label of the calming affect score
    pub calm_label: Label,
    /// Label of the stress affect score
    pub stress_label: Label,
    /// Lines buffered without a delimiter before the frame is discarded
    pub max_frame_lines: usize,
    /// Longest raw line accepted, terminator included
    pub max_line_bytes: usize,

    // --- Affect scores ---
    /// Score above which the strong gain applies
    pub score_strong_threshold: f32,
    /// Multiplier for strong scores
    pub score_strong_gain: f32,
    /// Score above which the mild gain applies
    pub score_mild_threshold: f32,
    /// Multiplier for mild scores
    pub score_mild_gain: f32,

    // --- Movement ---
    /// Minimum |Δz| counted as movement
    pub movement_threshold: f32,
    /// Multiplier applied to |Δz| above the threshold
    pub movement_gain: f32,

    // --- Peak / base ratchet ---
    /// Fraction of a new peak added to the base level
    pub base_growth: f32,
    /// Upper bound of the base level
    pub base_cap: f32,

    // --- Decay ---
    /// Distance above base beyond which the steep decay applies
    pub steep_decay_margin: f32,
    /// Decay factor for quiet frames far above base
    pub decay_steep: f32,
    /// Decay factor for other quiet frames
    pub decay_idle: f32,
    /// Decay factor for frames with a significant change
    pub decay_active: f32,

    // --- Bounds ---
    pub stress_min: f32,
    pub stress_max: f32,

    // --- Sampler ---
    /// Exponential smoothing factor per tick (higher converges faster)
    pub damping: f32,
    /// Oscillation cycles per second
    pub oscillation_hz: f32,
    /// Consumption loop rate
    pub tick_hz: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Framing
            delimiter: '|',
            calm_label: label("Apaisant"),
            stress_label: label("Stress"),
            max_frame_lines: 64,
            max_line_bytes: 512,

            // Affect scores
            score_strong_threshold: 0.5,
            score_strong_gain: 50.0,
            score_mild_threshold: 0.2,
            score_mild_gain: 20.0,

            // Movement
            movement_threshold: 0.1,
            movement_gain: 1.0,

            // Ratchet
            base_growth: 0.05,
            base_cap: 50.0,

            // Decay
            steep_decay_margin: 20.0,
            decay_steep: 0.15,
            decay_idle: 0.25,
            decay_active: 0.88,

            // Bounds
            stress_min: -100.0,
            stress_max: 100.0,

            // Sampler
            damping: 0.1,
            oscillation_hz: 1.0,
            tick_hz: 30, // display cadence
        }
    }
}

impl SystemConfig {
    /// Parse a JSON document and validate the result.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).map_err(|e| {
            warn!("config: {e}");
            Error::Config("malformed JSON")
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Seconds between two consumption ticks.
    pub fn tick_period_secs(&self) -> f32 {
        1.0 / self.tick_hz as f32
    }

    /// Reject values that would break the state invariants or stall a loop.
    pub fn validate(&self) -> Result<()> {
        let reals = [
            self.score_strong_threshold,
            self.score_strong_gain,
            self.score_mild_threshold,
            self.score_mild_gain,
            self.movement_threshold,
            self.movement_gain,
            self.base_growth,
            self.base_cap,
            self.steep_decay_margin,
            self.decay_steep,
            self.decay_idle,
            self.decay_active,
            self.stress_min,
            self.stress_max,
            self.damping,
            self.oscillation_hz,
        ];
        if reals.iter().any(|v| !v.is_finite()) {
            return Err(Error::Config("non-finite parameter"));
        }
        if self.calm_label.is_empty() || self.stress_label.is_empty() {
            return Err(Error::Config("empty score label"));
        }
        if self.max_frame_lines == 0 {
            return Err(Error::Config("max_frame_lines must be positive"));
        }
        if self.max_line_bytes == 0 {
            return Err(Error::Config("max_line_bytes must be positive"));
        }
        if self.score_mild_threshold > self.score_strong_threshold {
            return Err(Error::Config("mild threshold above strong threshold"));
        }
        if self.movement_threshold < 0.0 || self.movement_gain < 0.0 {
            return Err(Error::Config("negative movement parameter"));
        }
        if self.base_growth < 0.0 {
            return Err(Error::Config("negative base growth"));
        }
        let factors = [self.decay_steep, self.decay_idle, self.decay_active, self.damping];
        if factors.iter().any(|f| *f <= 0.0 || *f > 1.0) {
            return Err(Error::Config("decay and damping factors must lie in (0, 1]"));
        }
        if self.stress_min >= self.stress_max {
            return Err(Error::Config("stress bounds inverted"));
        }
        if self.base_cap < 0.0 || self.base_cap > self.stress_max {
            return Err(Error::Config("base cap outside [0, stress_max]"));
        }
        if self.oscillation_hz < 0.0 {
            return Err(Error::Config("negative oscillation frequency"));
        }
        if self.tick_hz == 0 {
            return Err(Error::Config("tick_hz must be positive"));
        }
        Ok(())
    }
}
