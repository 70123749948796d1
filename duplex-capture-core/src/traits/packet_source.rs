use crate::models::error::CaptureError;
use crate::models::format::{PacketFlags, StreamFormat};

/// One delivery unit of audio frames, borrowed from the source's internal
/// ring buffer.
///
/// The view is only valid until the matching `release` call; it must never
/// be held across drain iterations, because the backing slot is reused by
/// the source. Anything that outlives the iteration is copied out by the
/// normalizer.
#[derive(Debug)]
pub struct PacketRef<'a> {
    /// Raw interleaved sample bytes, `frames * format.block_align()` long.
    pub bytes: &'a [u8],
    /// Frames in this packet. May legitimately be zero.
    pub frames: u32,
    pub flags: PacketFlags,
}

/// A negotiated, startable stream of audio packets.
///
/// Implemented by the WASAPI backend for the render-loopback and capture
/// endpoints, and by scripted in-memory sources in tests. The acquire /
/// release pairing mirrors the underlying subsystem's buffer contract:
/// every successful `acquire` must be followed by a `release` carrying the
/// acquired frame count before the next `acquire` on the same source.
pub trait PacketSource {
    /// The stream format, fixed at negotiation time.
    fn format(&self) -> &StreamFormat;

    fn start(&mut self) -> Result<(), CaptureError>;

    fn stop(&mut self) -> Result<(), CaptureError>;

    /// Frames in the next pending packet, or zero when none is queued.
    /// Never blocks.
    fn pending_frames(&mut self) -> Result<u32, CaptureError>;

    /// Borrow the next pending packet.
    fn acquire(&mut self) -> Result<PacketRef<'_>, CaptureError>;

    /// Hand the packet's slot back to the source.
    fn release(&mut self, frames: u32) -> Result<(), CaptureError>;
}
