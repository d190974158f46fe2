//! Stressline host — wires the engine to a byte stream and a display clock.
//!
//! ```text
//! ┌──────────────────────────────┐        ┌──────────────────────────────┐
//! │ acquisition thread           │        │ main thread (display clock)  │
//! │ ReaderSource ─▶ Acquisition  │──────▶ │ TickClock ─▶ Sampler ─▶ stdout│
//! │   Service ─▶ StressWriter    │ state  │   (StressView)               │
//! └──────────────────────────────┘        └──────────────────────────────┘
//!               └──────────── Shutdown (either side) ───────────┘
//! ```
//!
//! Usage: `stressline [PATH]` reads telemetry from `PATH` (a capture file
//! or an already-configured serial device node) or from stdin, and prints
//! one `uptime<TAB>smoothed<TAB>display` line per tick.  Set
//! `STRESSLINE_CONFIG` to a JSON file to override defaults.
//!
//! Both loops stop when the input ends.  With a `PATH`, typing `q` or
//! closing stdin stops them too.  Ctrl-C terminates the process without
//! the orderly shutdown.
#![deny(unused_must_use)]

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::thread;

use anyhow::{Context, Result, bail};
use log::{info, warn};

use stressline::adapters::clock::TickClock;
use stressline::adapters::line_reader::ReaderSource;
use stressline::adapters::log_sink::LogEventSink;
use stressline::adapters::stop_input;
use stressline::app::service::AcquisitionService;
use stressline::app::shutdown::Shutdown;
use stressline::config::SystemConfig;
use stressline::error::StreamError;
use stressline::model::state::shared_stress;
use stressline::sampler::Sampler;

const CONFIG_ENV: &str = "STRESSLINE_CONFIG";

fn load_config() -> Result<SystemConfig> {
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        info!("Config: defaults");
        return Ok(SystemConfig::default());
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading config {path}"))?;
    let config = SystemConfig::from_json(&text).with_context(|| format!("loading config {path}"))?;
    info!("Config loaded from {}", path);
    Ok(config)
}

/// Telemetry input, and whether stdin is left free for stop commands.
fn open_input() -> Result<(String, Box<dyn BufRead + Send>, bool)> {
    match std::env::args().nth(1) {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("opening {path}"))?;
            Ok((path, Box::new(BufReader::new(file)), true))
        }
        None => Ok(("stdin".to_owned(), Box::new(BufReader::new(io::stdin())), false)),
    }
}

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("stressline v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Config + input ─────────────────────────────────────
    let config = load_config()?;
    let (input_name, input, stdin_free) = open_input()?;
    info!("Reading telemetry from {}", input_name);

    // ── 3. Shared state + shutdown ────────────────────────────
    let (writer, view) = shared_stress();
    let shutdown = Shutdown::new();

    // ── 4. Acquisition loop ───────────────────────────────────
    let acquisition = {
        let config = config.clone();
        let shutdown = shutdown.clone();
        thread::Builder::new()
            .name("acquisition".into())
            .spawn(move || {
                let mut source = ReaderSource::new(input, config.max_line_bytes);
                let mut sink = LogEventSink::new();
                let mut service = AcquisitionService::new(&config, writer);
                service.run(&mut source, &mut sink, &shutdown)
            })
            .context("spawning acquisition thread")?
    };

    if stdin_free {
        let shutdown = shutdown.clone();
        thread::Builder::new()
            .name("stop-input".into())
            .spawn(move || stop_input::watch(io::stdin().lock(), &shutdown))
            .context("spawning stop-input thread")?;
    }

    // ── 5. Display loop ───────────────────────────────────────
    let mut sampler = Sampler::new(view, &config);
    let mut clock = TickClock::new(config.tick_hz);
    let mut out = io::stdout().lock();

    while !shutdown.is_requested() {
        clock.wait();
        let d = sampler.sample();
        if let Err(e) = writeln!(out, "{:.3}\t{:.3}\t{:.3}", clock.uptime_secs(), d.smoothed, d.value) {
            warn!("Display output failed: {e}");
            shutdown.request();
            break;
        }
    }
    let _ = out.flush();

    // The acquisition thread may still be blocked in a read; only join it
    // once it has observed the shutdown.
    if !acquisition.is_finished() {
        info!("Leaving acquisition thread blocked on input");
        return Ok(());
    }
    match acquisition.join() {
        Ok(Ok(stats)) => info!("Stopped after {} frames", stats.frames),
        Ok(Err(StreamError::Closed)) => info!("Input closed"),
        Ok(Err(e)) => bail!("acquisition failed: {e}"),
        Err(_) => bail!("acquisition thread panicked"),
    }
    Ok(())
}
