use std::fmt;

/// Coarse sample encoding of a negotiated stream, after any extended
/// format descriptor has been resolved by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleEncoding {
    /// Integer PCM, either tagged directly or via the PCM sub-type.
    IntPcm,
    /// IEEE float PCM, either tagged directly or via the float sub-type.
    FloatPcm,
    /// A tag or sub-type the pipeline does not understand.
    Unrecognized,
}

/// Normalization dispatch tag, resolved once per stream at negotiation.
///
/// Packets are dispatched on this tag without re-inspecting the format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleLayout {
    Int16,
    Float32,
    Unsupported,
}

/// Which default endpoint a backend should open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    /// The default render endpoint, mirrored via loopback.
    RenderLoopback,
    /// The default capture endpoint (microphone).
    Capture,
}

/// Status bits delivered with an acquired packet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PacketFlags {
    /// The packet contains silence; its payload need not be read.
    pub silent: bool,
    /// The subsystem detected a gap before this packet.
    pub discontinuity: bool,
}

/// Negotiated wire format of one capture stream.
///
/// Discovered once at setup and immutable for the lifetime of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamFormat {
    pub encoding: SampleEncoding,
    pub bits_per_sample: u16,
    pub channels: u16,
    pub sample_rate: u32,
}

impl StreamFormat {
    /// Bytes per frame (all channels of one sample instant).
    pub fn block_align(&self) -> usize {
        self.channels as usize * self.bits_per_sample as usize / 8
    }

    /// Resolve the normalization path for this stream.
    pub fn sample_layout(&self) -> SampleLayout {
        match (self.encoding, self.bits_per_sample) {
            (SampleEncoding::IntPcm, 16) => SampleLayout::Int16,
            (SampleEncoding::FloatPcm, 32) => SampleLayout::Float32,
            _ => SampleLayout::Unsupported,
        }
    }

    /// Whether two streams can be combined sample-for-sample.
    ///
    /// Divergence is reported but does not stop a session; mixing is then
    /// best-effort.
    pub fn is_compatible_with(&self, other: &StreamFormat) -> bool {
        self.channels == other.channels && self.sample_rate == other.sample_rate
    }
}

impl fmt::Display for StreamFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoding = match self.encoding {
            SampleEncoding::IntPcm => "int-pcm",
            SampleEncoding::FloatPcm => "float-pcm",
            SampleEncoding::Unrecognized => "unrecognized",
        };
        write!(
            f,
            "{} {}-bit {}ch @ {} Hz",
            encoding, self.bits_per_sample, self.channels, self.sample_rate
        )
    }
}
