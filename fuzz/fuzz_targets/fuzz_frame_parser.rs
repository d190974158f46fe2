//! Fuzz target: `FrameParser::parse` followed by one model update.
//!
//! Whatever the text, parsing must not panic, every recovered value must
//! be finite, and the resulting state must stay consistent.
//!
//! cargo fuzz run fuzz_frame_parser

#![no_main]

use libfuzzer_sys::fuzz_target;
use stressline::config::SystemConfig;
use stressline::model::dynamics::StressModel;
use stressline::model::state::StressState;
use stressline::telemetry::codec::FrameBuffer;
use stressline::telemetry::parser::FrameParser;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    let config = SystemConfig::default();
    let buffer = FrameBuffer::from_lines(text.lines().map(str::trim));
    let out = FrameParser::new(&config).parse(&buffer);

    let f = out.frame;
    assert!(f.calm.is_none_or(f32::is_finite));
    assert!(f.stress.is_none_or(f32::is_finite));

    let mut state = StressState::new();
    StressModel::new(&config).apply(&mut state, &f);
    assert!(state.is_consistent(&config));
});
