//! Fuzz target: `FrameAssembler::feed`
//!
//! Splits arbitrary bytes on `\n` and feeds each piece as one line.  The
//! assembler must never panic, never hand out a frame without its
//! delimiter line, and never hold more than `max_frame_lines` lines.
//!
//! cargo fuzz run fuzz_frame_assembler

#![no_main]

use libfuzzer_sys::fuzz_target;
use stressline::config::SystemConfig;
use stressline::telemetry::codec::FrameAssembler;

fuzz_target!(|data: &[u8]| {
    let config = SystemConfig {
        max_frame_lines: 8,
        ..SystemConfig::default()
    };
    let mut assembler = FrameAssembler::new(&config);

    for raw in data.split(|&b| b == b'\n') {
        if let Ok(Some(frame)) = assembler.feed(raw) {
            assert!(frame.len() <= 8);
            assert!(frame.delimiter_line().is_some_and(|l| l.contains('|')));
        }
        assert!(assembler.pending_lines() < 8);
    }

    assembler.reset();
    assert_eq!(assembler.pending_lines(), 0);
});
