//! Stressline library.
//!
//! Turns a line-framed telemetry stream (affect scores plus an
//! accelerometer triple per frame) into a bounded, slowly evolving stress
//! level, and samples that level at a fixed display rate.
//!
//! ```text
//! bytes ─▶ telemetry::codec ─▶ telemetry::parser ─▶ model::dynamics
//!                                                        │
//!                                    model::state (shared, single writer)
//!                                                        │
//!                                         sampler ◀──────┘ (fixed tick)
//! ```

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod model;
pub mod sampler;
pub mod telemetry;
