//! Telemetry ingestion: raw lines in, parsed frames out.
//!
//! ```text
//! ┌──────────────┐  bytes  ┌──────────────┐ FrameBuffer ┌──────────────┐
//! │  LineSource  │────────▶│ FrameAssembler│───────────▶│  FrameParser │──▶ ParsedFrame
//! │  (port)      │         │  (codec)      │            │  (parser)    │
//! └──────────────┘         └──────────────┘             └──────────────┘
//! ```

pub mod codec;
pub mod parser;
