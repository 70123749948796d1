//! Console interrupt handling.
//!
//! The stop signal arrives on a system-spawned thread and only flips the
//! session's cancellation token; the drain loop finishes its current tick
//! before exiting, so packets acquired when the signal lands are still
//! appended.

use std::sync::OnceLock;

use windows::Win32::Foundation::BOOL;
use windows::Win32::System::Console::SetConsoleCtrlHandler;

use duplex_capture_core::{CancellationToken, CaptureError};

static STOP_TOKEN: OnceLock<CancellationToken> = OnceLock::new();

unsafe extern "system" fn ctrl_handler(_ctrl_type: u32) -> BOOL {
    if let Some(token) = STOP_TOKEN.get() {
        log::info!("stop signal received; finishing current tick");
        token.cancel();
        return BOOL::from(true);
    }
    BOOL::from(false)
}

/// Install a process-wide Ctrl+C handler that cancels `token`.
///
/// Can only be installed once per process.
pub fn install_stop_handler(token: CancellationToken) -> Result<(), CaptureError> {
    STOP_TOKEN
        .set(token)
        .map_err(|_| CaptureError::Unknown("stop handler already installed".into()))?;
    unsafe {
        SetConsoleCtrlHandler(Some(ctrl_handler), true)
            .map_err(|e| CaptureError::Unknown(format!("SetConsoleCtrlHandler failed: {}", e)))?;
    }
    Ok(())
}
