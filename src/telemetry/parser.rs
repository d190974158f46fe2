//! Frame parser — affect scores and accelerometer triple.
//!
//! Every field is optional.  A missing label, a malformed number or a
//! short accelerometer line all mean "no signal for this field this
//! frame"; none of them is an error.  Malformed numeric tokens are
//! counted in [`ParseOutcome::skipped_tokens`] so the acquisition loop
//! can report them.

use log::debug;

use super::codec::FrameBuffer;
use crate::config::{Label, SystemConfig};

/// Accelerometer reading (g).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Accel {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Fields recovered from one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParsedFrame {
    pub calm: Option<f32>,
    pub stress: Option<f32>,
    pub accel: Option<Accel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParseOutcome {
    pub frame: ParsedFrame,
    /// Numeric tokens that were present but unparseable.
    pub skipped_tokens: u32,
}

pub struct FrameParser {
    delimiter: char,
    calm_label: Label,
    stress_label: Label,
}

impl FrameParser {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            delimiter: config.delimiter,
            calm_label: config.calm_label.clone(),
            stress_label: config.stress_label.clone(),
        }
    }

    pub fn parse(&self, buffer: &FrameBuffer) -> ParseOutcome {
        let mut out = ParseOutcome::default();

        // Later occurrences of a label override earlier ones.
        for line in buffer.lines() {
            if let Some(v) = self.labelled_value(line, &self.calm_label, &mut out.skipped_tokens) {
                out.frame.calm = Some(v);
            }
            if let Some(v) = self.labelled_value(line, &self.stress_label, &mut out.skipped_tokens) {
                out.frame.stress = Some(v);
            }
        }

        if let Some(line) = buffer.delimiter_line() {
            let values = self.accel_values(line, &mut out.skipped_tokens);
            if let [x, y, z] = values[..] {
                out.frame.accel = Some(Accel { x, y, z });
            }
        }

        if out.skipped_tokens > 0 {
            debug!("parser: skipped {} malformed token(s)", out.skipped_tokens);
        }
        out
    }

    /// Value following `<label>:` on this line, if the label is present.
    fn labelled_value(&self, line: &str, label: &Label, skipped: &mut u32) -> Option<f32> {
        let label = label.as_str();
        let start = line
            .match_indices(label)
            .map(|(idx, _)| idx + label.len())
            .find(|&end| line[end..].starts_with(':'))?;

        let text = line[start + 1..].split(':').next().unwrap_or("").trim();
        let value = parse_number(text);
        if value.is_none() {
            *skipped += 1;
        }
        value
    }

    /// Leading numbers of the comma-separated fields, in order, first three kept.
    fn accel_values(&self, line: &str, skipped: &mut u32) -> heapless::Vec<f32, 3> {
        let mut values = heapless::Vec::new();
        for field in line.split(',') {
            if values.is_full() {
                break;
            }
            let token = field
                .split_whitespace()
                .map(|t| t.trim_matches(self.delimiter))
                .find(|t| !t.is_empty());

            match token.and_then(parse_number) {
                Some(v) => {
                    // Room checked above.
                    let _ = values.push(v);
                }
                None => *skipped += 1,
            }
        }
        values
    }
}

/// Finite floats only; `NaN` and `inf` count as malformed.
fn parse_number(token: &str) -> Option<f32> {
    token.parse::<f32>().ok().filter(|v| v.is_finite())
}
