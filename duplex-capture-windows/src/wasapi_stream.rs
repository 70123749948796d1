//! WASAPI packet source for the default render-loopback and capture
//! endpoints.
//!
//! The stream is negotiated once at open: the endpoint's mix format,
//! including `WAVEFORMATEXTENSIBLE` sub-type descriptors, is resolved
//! into a `StreamFormat`, and the shared-mode client is initialized with
//! it. Packets are then pulled through `GetNextPacketSize` / `GetBuffer` /
//! `ReleaseBuffer`, which map 1:1 onto the `PacketSource` contract.
//!
//! DRM-protected audio is silenced by the loopback path; such packets
//! arrive with the SILENT buffer flag set.

use std::slice;

use windows::core::GUID;
use windows::Win32::Media::Audio::*;
use windows::Win32::System::Com::*;

use duplex_capture_core::{
    CaptureError, PacketFlags, PacketRef, PacketSource, SampleEncoding, StreamFormat, StreamKind,
};

// Sub-type GUIDs carried by WAVEFORMATEXTENSIBLE descriptors.
const SUBTYPE_PCM: GUID = GUID::from_u128(0x00000001_0000_0010_8000_00aa00389b71);
const SUBTYPE_IEEE_FLOAT: GUID = GUID::from_u128(0x00000003_0000_0010_8000_00aa00389b71);

const WAVE_TAG_PCM: u16 = 1;
const WAVE_TAG_IEEE_FLOAT: u16 = 3;
const WAVE_TAG_EXTENSIBLE: u16 = 0xFFFE;

// Shared-mode buffer of 10 seconds, in 100-nanosecond units.
const BUFFER_DURATION_HNS: i64 = 10 * 10_000_000;

/// A WASAPI capture stream in shared mode.
///
/// For `StreamKind::RenderLoopback` the default render endpoint is opened
/// with `AUDCLNT_STREAMFLAGS_LOOPBACK`, mirroring everything played to it.
/// For `StreamKind::Capture` the default microphone endpoint is opened
/// directly.
pub struct WasapiStream {
    kind: StreamKind,
    format: StreamFormat,
    audio_client: IAudioClient,
    capture_client: IAudioCaptureClient,
    started: bool,
}

// SAFETY: the COM interfaces are only touched from the thread driving the
// drain loop; the struct is never shared between threads.
unsafe impl Send for WasapiStream {}

impl WasapiStream {
    /// Open the default endpoint for `kind` and negotiate its mix format.
    ///
    /// COM must be initialized on the calling thread (see `ComSession`).
    /// All failures here are setup failures: the session never starts.
    pub fn open_default(kind: StreamKind) -> Result<Self, CaptureError> {
        unsafe {
            let enumerator: IMMDeviceEnumerator =
                CoCreateInstance(&MMDeviceEnumerator, None, CLSCTX_ALL)
                    .map_err(|_| CaptureError::DeviceNotAvailable)?;

            let data_flow = match kind {
                StreamKind::RenderLoopback => eRender,
                StreamKind::Capture => eCapture,
            };
            let device = enumerator
                .GetDefaultAudioEndpoint(data_flow, eConsole)
                .map_err(|_| CaptureError::DeviceNotAvailable)?;

            let audio_client: IAudioClient = device
                .Activate(CLSCTX_ALL, None)
                .map_err(|e| CaptureError::ActivationFailed(format!("IMMDevice::Activate failed: {}", e)))?;

            let mix_format_ptr = audio_client
                .GetMixFormat()
                .map_err(|e| CaptureError::NegotiationFailed(format!("GetMixFormat failed: {}", e)))?;
            let format = parse_mix_format(mix_format_ptr);

            let stream_flags = match kind {
                StreamKind::RenderLoopback => {
                    AUDCLNT_STREAMFLAGS_LOOPBACK | AUDCLNT_STREAMFLAGS_NOPERSIST
                }
                StreamKind::Capture => AUDCLNT_STREAMFLAGS_NOPERSIST,
            };

            let init_result = audio_client.Initialize(
                AUDCLNT_SHAREMODE_SHARED,
                stream_flags,
                BUFFER_DURATION_HNS,
                0,
                mix_format_ptr,
                None,
            );
            CoTaskMemFree(Some(mix_format_ptr as *const _ as *const _));
            init_result.map_err(|e| match kind {
                StreamKind::RenderLoopback => CaptureError::LoopbackUnsupported(format!(
                    "IAudioClient::Initialize (loopback) failed: {}",
                    e
                )),
                StreamKind::Capture => {
                    CaptureError::NegotiationFailed(format!("IAudioClient::Initialize failed: {}", e))
                }
            })?;

            let capture_client: IAudioCaptureClient = audio_client
                .GetService()
                .map_err(|e| CaptureError::NegotiationFailed(format!("GetService failed: {}", e)))?;

            log::info!("{:?} endpoint negotiated: {}", kind, format);

            Ok(Self {
                kind,
                format,
                audio_client,
                capture_client,
                started: false,
            })
        }
    }
}

impl PacketSource for WasapiStream {
    fn format(&self) -> &StreamFormat {
        &self.format
    }

    fn start(&mut self) -> Result<(), CaptureError> {
        if self.started {
            return Ok(());
        }
        unsafe {
            self.audio_client
                .Start()
                .map_err(|e| CaptureError::Unknown(format!("IAudioClient::Start failed: {}", e)))?;
        }
        self.started = true;
        log::debug!("{:?} stream started", self.kind);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), CaptureError> {
        if !self.started {
            return Ok(());
        }
        self.started = false;
        unsafe {
            self.audio_client
                .Stop()
                .map_err(|e| CaptureError::Unknown(format!("IAudioClient::Stop failed: {}", e)))?;
        }
        Ok(())
    }

    fn pending_frames(&mut self) -> Result<u32, CaptureError> {
        unsafe {
            self.capture_client
                .GetNextPacketSize()
                .map_err(|e| CaptureError::Unknown(format!("GetNextPacketSize failed: {}", e)))
        }
    }

    fn acquire(&mut self) -> Result<PacketRef<'_>, CaptureError> {
        let mut buffer_ptr: *mut u8 = std::ptr::null_mut();
        let mut num_frames: u32 = 0;
        let mut flags: u32 = 0;

        unsafe {
            self.capture_client
                .GetBuffer(&mut buffer_ptr, &mut num_frames, &mut flags, None, None)
                .map_err(|e| CaptureError::Unknown(format!("GetBuffer failed: {}", e)))?;
        }

        let byte_len = num_frames as usize * self.format.block_align();
        let bytes = if buffer_ptr.is_null() || byte_len == 0 {
            &[][..]
        } else {
            // Borrowed view into the subsystem's ring slot; valid only
            // until the matching ReleaseBuffer.
            unsafe { slice::from_raw_parts(buffer_ptr, byte_len) }
        };

        Ok(PacketRef {
            bytes,
            frames: num_frames,
            flags: PacketFlags {
                silent: flags & (AUDCLNT_BUFFERFLAGS_SILENT.0 as u32) != 0,
                discontinuity: flags & (AUDCLNT_BUFFERFLAGS_DATA_DISCONTINUITY.0 as u32) != 0,
            },
        })
    }

    fn release(&mut self, frames: u32) -> Result<(), CaptureError> {
        unsafe {
            self.capture_client
                .ReleaseBuffer(frames)
                .map_err(|e| CaptureError::Unknown(format!("ReleaseBuffer failed: {}", e)))
        }
    }
}

impl Drop for WasapiStream {
    fn drop(&mut self) {
        if self.started {
            unsafe {
                let _ = self.audio_client.Stop();
            }
        }
    }
}

/// Resolve a `WAVEFORMATEX` (possibly extensible) into the core format
/// model.
///
/// Unrecognized tags and sub-types are preserved as `Unrecognized` so the
/// session can degrade those packets to silence instead of refusing to
/// start.
unsafe fn parse_mix_format(format_ptr: *const WAVEFORMATEX) -> StreamFormat {
    let wfx = &*format_ptr;
    let encoding = match wfx.wFormatTag {
        WAVE_TAG_PCM => SampleEncoding::IntPcm,
        WAVE_TAG_IEEE_FLOAT => SampleEncoding::FloatPcm,
        WAVE_TAG_EXTENSIBLE => {
            let wfext = &*(format_ptr as *const WAVEFORMATEXTENSIBLE);
            if wfext.SubFormat == SUBTYPE_PCM {
                SampleEncoding::IntPcm
            } else if wfext.SubFormat == SUBTYPE_IEEE_FLOAT {
                SampleEncoding::FloatPcm
            } else {
                SampleEncoding::Unrecognized
            }
        }
        _ => SampleEncoding::Unrecognized,
    };

    StreamFormat {
        encoding,
        bits_per_sample: wfx.wBitsPerSample,
        channels: wfx.nChannels,
        sample_rate: wfx.nSamplesPerSec,
    }
}
