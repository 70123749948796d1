//! # duplex-capture-windows
//!
//! Windows WASAPI backend for duplex-recorder.
//!
//! Provides:
//! - `WasapiStream` — pull-model `PacketSource` over `IAudioCaptureClient`,
//!   opened against the default render endpoint (loopback) or the default
//!   capture endpoint (microphone)
//! - `ComSession` — COM apartment guard for the thread driving the session
//! - `console` — Ctrl+C handler wired to a `CancellationToken`
//!
//! ## Platform Requirements
//! - Windows 10 1703+ (build 15063) for reliable shared-mode loopback
//!
//! ## Usage
//! ```ignore
//! use duplex_capture_core::{CancellationToken, CaptureConfig, DuplexRecorder, StreamKind};
//! use duplex_capture_windows::{ComSession, WasapiStream};
//!
//! let _com = ComSession::initialize()?;
//! let loopback = WasapiStream::open_default(StreamKind::RenderLoopback)?;
//! let mic = WasapiStream::open_default(StreamKind::Capture)?;
//! let mut recorder = DuplexRecorder::new(loopback, mic, CaptureConfig::default())?;
//! ```

#[cfg(target_os = "windows")]
pub mod com;
#[cfg(target_os = "windows")]
pub mod console;
#[cfg(target_os = "windows")]
pub mod wasapi_stream;

#[cfg(target_os = "windows")]
pub use com::ComSession;
#[cfg(target_os = "windows")]
pub use wasapi_stream::WasapiStream;
