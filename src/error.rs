//! Unified error types for the stress engine.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! acquisition loop's error handling uniform.  All variants are `Copy` so
//! they can be passed through events and counters without allocation.
//!
//! Two families with opposite recovery rules:
//!
//! - [`FrameError`]: malformed *data* on an open stream.  Always recovered
//!   locally (skip the line or discard the frame, keep reading).
//! - [`StreamError`]: the stream itself failed or ended.  Always fatal to
//!   the acquisition loop and returned to the caller.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the engine funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A line or frame was malformed and has been dropped.
    Frame(FrameError),
    /// The underlying byte stream failed or ended.
    Stream(StreamError),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Frame(e) => write!(f, "frame: {e}"),
            Self::Stream(e) => write!(f, "stream: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Frame errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// A raw line was not valid UTF-8.  The line is skipped.
    Decode { len: usize },
    /// No delimiter arrived within the line cap.  The buffer is discarded.
    TooLarge { lines: usize },
    /// A raw line exceeded the byte limit.  The line is skipped.
    LineTooLong { limit: usize },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode { len } => write!(f, "{len}-byte line is not valid text"),
            Self::TooLarge { lines } => write!(f, "no delimiter within {lines} lines"),
            Self::LineTooLong { limit } => write!(f, "line longer than {limit} bytes"),
        }
    }
}

impl std::error::Error for FrameError {}

impl From<FrameError> for Error {
    fn from(e: FrameError) -> Self {
        Self::Frame(e)
    }
}

// ---------------------------------------------------------------------------
// Stream errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamError {
    /// The source was closed before or during a read.
    Closed,
    /// The underlying reader returned an I/O error.
    Io(std::io::ErrorKind),
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "stream closed"),
            Self::Io(kind) => write!(f, "read failed: {kind}"),
        }
    }
}

impl std::error::Error for StreamError {}

impl From<StreamError> for Error {
    fn from(e: StreamError) -> Self {
        Self::Stream(e)
    }
}

impl From<std::io::Error> for StreamError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.kind())
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
