//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a subsystem against
//! scripted adapters.  No device or serial port is required.

mod mock_io;
mod pipeline_tests;
