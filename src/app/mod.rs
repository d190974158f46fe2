//! Application core — the acquisition pipeline, zero direct I/O.
//!
//! The byte stream, the event output and the shared state are reached
//! only through the **port traits** in [`ports`], so the whole pipeline
//! runs against scripted sources in tests.

pub mod events;
pub mod ports;
pub mod service;
pub mod shutdown;
