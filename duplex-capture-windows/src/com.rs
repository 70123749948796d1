//! COM apartment lifetime for the session thread.

use windows::Win32::System::Com::{CoInitializeEx, CoUninitialize, COINIT_MULTITHREADED};

use duplex_capture_core::CaptureError;

/// RAII guard for COM initialization on the current thread.
///
/// Every WASAPI interface used by this backend must be created and dropped
/// while the guard is alive.
pub struct ComSession;

impl ComSession {
    pub fn initialize() -> Result<Self, CaptureError> {
        unsafe {
            CoInitializeEx(None, COINIT_MULTITHREADED)
                .ok()
                .map_err(|e| CaptureError::Unknown(format!("CoInitializeEx failed: {}", e)))?;
        }
        Ok(Self)
    }
}

impl Drop for ComSession {
    fn drop(&mut self) {
        unsafe {
            CoUninitialize();
        }
    }
}
