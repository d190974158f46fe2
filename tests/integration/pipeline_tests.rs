//! End-to-end: scripted stream → acquisition → shared state → sampler.

use super::mock_io::{RecordingSink, ScriptedSource};

use stressline::adapters::line_reader::ReaderSource;
use stressline::app::events::AppEvent;
use stressline::app::ports::LineSource;
use stressline::app::service::AcquisitionService;
use stressline::app::shutdown::Shutdown;
use stressline::config::SystemConfig;
use stressline::error::{FrameError, StreamError};
use stressline::model::state::{latest_stress, shared_stress};
use stressline::sampler::Sampler;
use stressline::telemetry::parser::Accel;

#[test]
fn reference_frame_is_parsed_and_applied_once() {
    let (writer, view) = shared_stress();
    let mut svc = AcquisitionService::new(&SystemConfig::default(), writer);
    let mut source = ScriptedSource::new(["Apaisant: 0.7", "Stress: 0.1", "|1.0, 0.0 0, -0.05 0 0"]);
    let mut sink = RecordingSink::new();
    let shutdown = Shutdown::new();

    let result = svc.run(&mut source, &mut sink, &shutdown);
    assert_eq!(result, Err(StreamError::Closed));

    assert_eq!(sink.frames_applied(), 1);
    let Some(AppEvent::FrameApplied { frame, update }) =
        sink.events.iter().find(|e| matches!(e, AppEvent::FrameApplied { .. }))
    else {
        panic!("no frame applied");
    };
    assert_eq!(frame.calm, Some(0.7));
    assert_eq!(frame.stress, Some(0.1));
    assert_eq!(frame.accel, Some(Accel { x: 1.0, y: 0.0, z: -0.05 }));

    // Calm 0.7 → -35, significant; target floors at base 0.
    assert!((update.modifier + 35.0).abs() < 1e-4);
    assert!(update.significant);
    assert_eq!(view.snapshot().target_stress, 0.0);
    assert_eq!(view.snapshot().last_z, Some(-0.05));
    assert_eq!(svc.pending_lines(), 0);
}

#[test]
fn end_of_stream_closes_source_and_raises_shutdown() {
    let (writer, _view) = shared_stress();
    let mut svc = AcquisitionService::new(&SystemConfig::default(), writer);
    let mut source = ScriptedSource::new(["Stress: 0.9"]);
    let mut sink = RecordingSink::new();
    let shutdown = Shutdown::new();

    assert_eq!(svc.run(&mut source, &mut sink, &shutdown), Err(StreamError::Closed));
    assert!(shutdown.is_requested());
    assert!(!source.is_open());
    assert_eq!(source.close_calls, 1);
    assert_eq!(sink.events.first(), Some(&AppEvent::Started));
    assert_eq!(sink.events.last(), Some(&AppEvent::StreamEnded(StreamError::Closed)));
    // Partial frame never applied.
    assert_eq!(sink.frames_applied(), 0);
}

#[test]
fn read_failure_is_fatal_and_surfaced() {
    let (writer, view) = shared_stress();
    let mut svc = AcquisitionService::new(&SystemConfig::default(), writer);
    let mut source = ScriptedSource::new(["Stress: 0.6", "|0, 0, 0"])
        .failing_with(StreamError::Io(std::io::ErrorKind::TimedOut));
    let mut sink = RecordingSink::new();

    let result = svc.run(&mut source, &mut sink, &Shutdown::new());
    assert_eq!(result, Err(StreamError::Io(std::io::ErrorKind::TimedOut)));
    // The frame before the failure still landed.
    assert_eq!(view.snapshot().updates, 1);
}

#[test]
fn shutdown_request_stops_before_reading() {
    let (writer, view) = shared_stress();
    let mut svc = AcquisitionService::new(&SystemConfig::default(), writer);
    let mut source = ScriptedSource::new(["Stress: 0.6", "|0, 0, 0"]);
    let mut sink = RecordingSink::new();
    let shutdown = Shutdown::new();
    shutdown.request();

    let stats = svc.run(&mut source, &mut sink, &shutdown).unwrap();
    assert_eq!(stats.lines, 0);
    assert_eq!(view.snapshot().updates, 0);
    assert!(sink.events.contains(&AppEvent::Stopped));
    assert_eq!(source.close_calls, 1);
}

#[test]
fn data_faults_do_not_stop_the_stream() {
    let config = SystemConfig {
        max_frame_lines: 4,
        ..SystemConfig::default()
    };
    let (writer, view) = shared_stress();
    let mut svc = AcquisitionService::new(&config, writer);

    let mut source = ScriptedSource::new(["Stress: 0.6"]);
    source.push_raw(&[0x80, 0x81, b'\r', b'\n']);
    for line in ["noise", "noise", "noise", "noise", "Stress: 0.6", "|1.0, abc, -0.05 0 0"] {
        source.push_raw(format!("{line}\r\n").as_bytes());
    }
    let mut sink = RecordingSink::new();

    assert_eq!(svc.run(&mut source, &mut sink, &Shutdown::new()), Err(StreamError::Closed));

    let stats = svc.stats();
    assert_eq!(stats.decode_errors, 1);
    assert_eq!(stats.oversize_frames, 1);
    assert_eq!(stats.skipped_tokens, 1);
    assert_eq!(stats.frames, 1);
    assert!(sink.events.contains(&AppEvent::Rejected(FrameError::Decode { len: 4 })));
    assert!(sink.events.contains(&AppEvent::Rejected(FrameError::TooLarge { lines: 4 })));

    // Triple absent (two numbers), stress still applied.
    let state = view.snapshot();
    assert_eq!(state.last_z, None);
    assert!((state.target_stress - 26.4).abs() < 1e-4);
}

#[test]
fn runaway_line_is_rejected_and_the_stream_recovers() {
    let config = SystemConfig::default();
    let (writer, view) = shared_stress();
    let mut svc = AcquisitionService::new(&config, writer);

    let mut input = b"Stress: 0.6\r\n".to_vec();
    input.extend(std::iter::repeat_n(b'x', 8 * 1024 * 1024));
    input.extend_from_slice(b"\r\n|1, 2, 3\r\n");
    let mut source = ReaderSource::new(std::io::Cursor::new(input), config.max_line_bytes);
    let mut sink = RecordingSink::new();

    assert_eq!(svc.run(&mut source, &mut sink, &Shutdown::new()), Err(StreamError::Closed));

    assert!(sink.events.contains(&AppEvent::Rejected(FrameError::LineTooLong {
        limit: config.max_line_bytes
    })));
    let stats = svc.stats();
    assert_eq!(stats.oversize_lines, 1);
    assert_eq!(stats.lines, 3);
    assert_eq!(stats.frames, 1);
    // The score line before the runaway still belongs to the frame.
    assert!((view.snapshot().target_stress - 26.4).abs() < 1e-4);
    assert_eq!(view.snapshot().last_z, Some(3.0));
}

#[test]
fn movement_between_frames_adds_delta() {
    let (writer, view) = shared_stress();
    let mut svc = AcquisitionService::new(&SystemConfig::default(), writer);
    let mut sink = RecordingSink::new();

    svc.ingest(b"|0, 0, 0.0\r\n", &mut sink);
    let moved = svc.ingest(b"|0, 0, 0.25\r\n", &mut sink).unwrap();
    assert!((moved.modifier - 0.25).abs() < 1e-6);
    assert!(moved.significant);

    let still = svc.ingest(b"|0, 0, 0.3\r\n", &mut sink).unwrap();
    assert_eq!(still.modifier, 0.0);
    assert!(!still.significant);
    assert_eq!(view.snapshot().last_z, Some(0.3));
}

#[test]
fn sampler_tracks_shared_state() {
    let config = SystemConfig::default();
    let (writer, view) = shared_stress();
    let mut svc = AcquisitionService::new(&config, writer);
    let mut sink = RecordingSink::new();
    svc.ingest(b"Stress: 0.8", &mut sink);
    svc.ingest(b"|", &mut sink);
    let target = view.snapshot().target_stress;

    let mut sampler = Sampler::new(view, &config);
    for _ in 0..45 {
        sampler.sample();
    }
    assert!((sampler.smoothed() - target).abs() <= target * 0.01);
}

#[test]
fn latest_value_channel_feeds_the_sampler() {
    let config = SystemConfig::default();
    let (owned, latest) = latest_stress();
    let mut svc = AcquisitionService::new(&config, owned);
    let mut sink = RecordingSink::new();
    let mut sampler = Sampler::new(latest, &config);

    // Nothing published yet: the sampler sits at zero.
    assert_eq!(sampler.sample().smoothed, 0.0);

    svc.ingest(b"Stress: 0.8", &mut sink);
    svc.ingest(b"|", &mut sink);
    svc.ingest(b"Stress: 0.8", &mut sink);
    svc.ingest(b"|", &mut sink);
    let published = svc.store().state().target_stress;

    let first = sampler.sample();
    assert!((first.smoothed - published * config.damping).abs() < 1e-3);
    // Stale but stable once the slot is drained.
    let second = sampler.sample();
    assert!(second.smoothed > first.smoothed);
}
