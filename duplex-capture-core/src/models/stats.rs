/// Counters accumulated over one capture session.
///
/// Every non-fatal condition the drain loop recovers from lands here, so a
/// session summary can surface what the logs reported along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureStats {
    /// Outer drain ticks executed.
    pub ticks: u64,
    /// Packets drained from the loopback (output) source.
    pub output_packets: u64,
    /// Packets drained from the microphone (input) source.
    pub input_packets: u64,
    /// Packets that reported zero frames; treated as empty.
    pub zero_frame_packets: u64,
    /// Packets flagged silent by the subsystem; contributed zeros.
    pub silent_packets: u64,
    /// Packets flagged as following a capture gap.
    pub discontinuity_packets: u64,
    /// Packets degraded to silence because the stream layout is unsupported.
    pub unsupported_packets: u64,
    /// Ticks during which the two stream formats diverged while data flowed.
    pub mismatch_ticks: u64,
    /// Transient source failures recovered without ending the session.
    pub source_faults: u64,
    /// Samples appended to the accumulator.
    pub samples_appended: u64,
}
