use thiserror::Error;

/// Errors that can occur during a capture session.
///
/// The setup variants (device, activation, negotiation, loopback) are
/// fatal: the session never starts and no file is produced. Conditions
/// that arise inside the drain loop (unsupported packet formats, stream
/// mismatch, zero-frame packets, transient source faults) are not errors;
/// they are logged and counted and never unwind the loop.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("device not available")]
    DeviceNotAvailable,

    #[error("device activation failed: {0}")]
    ActivationFailed(String),

    #[error("stream negotiation failed: {0}")]
    NegotiationFailed(String),

    #[error("loopback capture not supported: {0}")]
    LoopbackUnsupported(String),

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),

    #[error("storage error: {0}")]
    StorageError(String),

    #[error("unknown error: {0}")]
    Unknown(String),
}
