//! # duplex-capture-core
//!
//! Platform-agnostic core of the duplex recorder.
//!
//! Captures two independently paced packet streams (system loopback and
//! microphone), normalizes their sample encodings to signed 16-bit PCM,
//! mixes them with clamping, smooths the merged signal, and persists the
//! result as a WAV file. Platform backends (Windows WASAPI) implement the
//! `PacketSource` trait and plug into the generic `DuplexRecorder`.
//!
//! ## Architecture
//!
//! ```text
//! duplex-capture-core (this crate)
//! ├── traits/       ← PacketSource, PacketRef
//! ├── models/       ← StreamFormat, CaptureError, CaptureConfig, CaptureStats, ...
//! ├── processing/   ← sample normalizer, mixer, smoother, WAV header generation
//! ├── session/      ← DuplexRecorder (packet drain loop), CancellationToken
//! └── storage/      ← WAV file writer, metadata sidecar
//! ```

pub mod models;
pub mod processing;
pub mod session;
pub mod storage;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::config::CaptureConfig;
pub use models::error::CaptureError;
pub use models::format::{PacketFlags, SampleEncoding, SampleLayout, StreamFormat, StreamKind};
pub use models::recording_result::{RecordingMetadata, RecordingResult};
pub use models::state::CaptureState;
pub use models::stats::CaptureStats;
pub use session::cancellation::CancellationToken;
pub use session::recorder::DuplexRecorder;
pub use traits::packet_source::{PacketRef, PacketSource};
