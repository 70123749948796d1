use std::thread;
use std::time::Instant;

use crate::models::config::CaptureConfig;
use crate::models::error::CaptureError;
use crate::models::format::{SampleLayout, StreamFormat};
use crate::models::recording_result::{RecordingMetadata, RecordingResult};
use crate::models::state::CaptureState;
use crate::models::stats::CaptureStats;
use crate::processing::{mixer, normalizer, smoother};
use crate::session::cancellation::CancellationToken;
use crate::storage::{metadata, wav_writer};
use crate::traits::packet_source::PacketSource;

/// Immutable per-stream facts, resolved once at session start.
struct StreamContext {
    format: StreamFormat,
    layout: SampleLayout,
    label: &'static str,
}

impl StreamContext {
    fn new(format: StreamFormat, label: &'static str) -> Self {
        let layout = format.sample_layout();
        Self { format, layout, label }
    }
}

/// What one source contributed to a single drain sub-iteration.
struct SliceBuffer {
    samples: Vec<i16>,
    frames: usize,
}

impl SliceBuffer {
    fn empty() -> Self {
        Self {
            samples: Vec::new(),
            frames: 0,
        }
    }
}

/// Orchestrates one capture session over two packet sources.
///
/// Data flow:
/// ```text
/// [Loopback source] ─ acquire / normalize / release ─┐
///                                                    ├─ mix ─→ [i16 accumulator]
/// [Mic source]      ─ acquire / normalize / release ─┘
///                                   (on stop) smooth → WAV file + metadata sidecar
/// ```
///
/// A single logical thread drives everything: the drain loop, the
/// accumulator, and the post-pass all run on the caller's thread, so the
/// accumulator needs no locking. The only cross-thread state is the
/// cancellation token.
pub struct DuplexRecorder<O: PacketSource, I: PacketSource> {
    output: O,
    input: I,
    config: CaptureConfig,
    state: CaptureState,
    stats: CaptureStats,
    pcm: Vec<i16>,
}

impl<O: PacketSource, I: PacketSource> DuplexRecorder<O, I> {
    pub fn new(output: O, input: I, config: CaptureConfig) -> Result<Self, CaptureError> {
        config.validate().map_err(CaptureError::ConfigurationFailed)?;
        Ok(Self {
            output,
            input,
            config,
            state: CaptureState::Idle,
            stats: CaptureStats::default(),
            pcm: Vec::new(),
        })
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn stats(&self) -> &CaptureStats {
        &self.stats
    }

    /// Run the session until `token` is cancelled, then smooth and persist.
    ///
    /// Setup failures abort before any capture state exists and no file is
    /// produced. Conditions inside the loop are logged and counted but
    /// never end the session.
    pub fn run(&mut self, token: &CancellationToken) -> Result<RecordingResult, CaptureError> {
        if !self.state.is_idle() {
            return Err(CaptureError::ConfigurationFailed(
                "a session can only run once".into(),
            ));
        }

        let out_ctx = StreamContext::new(self.output.format().clone(), "output");
        let in_ctx = StreamContext::new(self.input.format().clone(), "input");
        log::info!("output stream: {}", out_ctx.format);
        log::info!("input stream: {}", in_ctx.format);

        let mismatched = !out_ctx.format.is_compatible_with(&in_ctx.format);
        for ctx in [&out_ctx, &in_ctx] {
            if ctx.layout == SampleLayout::Unsupported {
                log::warn!(
                    "[{}] stream format {} has no normalization path; its packets will be silenced",
                    ctx.label,
                    ctx.format
                );
            }
        }

        if let Err(e) = self.output.start() {
            self.state = CaptureState::Failed;
            return Err(e);
        }
        if let Err(e) = self.input.start() {
            let _ = self.output.stop();
            self.state = CaptureState::Failed;
            return Err(e);
        }
        self.state = CaptureState::Capturing;
        let started = Instant::now();

        while !token.is_cancelled() {
            self.drain_tick(&out_ctx, &in_ctx, mismatched);
            thread::sleep(self.config.poll_interval);
        }

        let _ = self.output.stop();
        let _ = self.input.stop();
        let duration_secs = started.elapsed().as_secs_f64();
        log::info!(
            "capture stopped after {:.1}s: {} samples over {} ticks ({} output / {} input packets)",
            duration_secs,
            self.pcm.len(),
            self.stats.ticks,
            self.stats.output_packets,
            self.stats.input_packets
        );

        let smoothed = smoother::smooth(&self.pcm, self.config.smoothing_radius);

        let file_path = wav_writer::timestamped_wav_path(&self.config.output_directory);
        let persisted = wav_writer::write_wav(
            &file_path,
            &smoothed,
            out_ctx.format.sample_rate,
            out_ctx.format.channels,
        )
        .and_then(|_| wav_writer::sha256_file(&file_path));
        let checksum = match persisted {
            Ok(checksum) => checksum,
            Err(e) => {
                self.state = CaptureState::Failed;
                return Err(e);
            }
        };

        let recording_metadata = RecordingMetadata::new(
            duration_secs,
            &out_ctx.format,
            &in_ctx.format,
            smoothed.len(),
            &checksum,
        );
        if let Err(e) = metadata::write_metadata(&recording_metadata, &file_path) {
            // The recording itself is intact; only the sidecar is missing.
            log::warn!("failed to write metadata sidecar: {}", e);
        }

        self.state = CaptureState::Completed;
        log::info!("saved {}", file_path.display());

        Ok(RecordingResult {
            file_path,
            duration_secs,
            sample_count: smoothed.len(),
            checksum,
            metadata: recording_metadata,
        })
    }

    /// Drain every pending packet from both sources, mixing pair-by-pair.
    ///
    /// Both pending sizes are re-queried after every sub-iteration, so a
    /// source that queues multiple packets between ticks is fully drained
    /// before the loop sleeps. Each packet is acquired, normalized, and
    /// released within one sub-iteration; the ring slot is back with the
    /// source before the next acquire.
    fn drain_tick(&mut self, out_ctx: &StreamContext, in_ctx: &StreamContext, mismatched: bool) {
        self.stats.ticks += 1;
        let mut warned_mismatch = false;
        let mut out_faulted = false;
        let mut in_faulted = false;

        let mut out_pending = Self::poll_pending(&mut self.output, out_ctx, &mut self.stats);
        let mut in_pending = Self::poll_pending(&mut self.input, in_ctx, &mut self.stats);

        while (!out_faulted && out_pending != 0) || (!in_faulted && in_pending != 0) {
            let out_slice = if !out_faulted && out_pending != 0 {
                match Self::read_packet(&mut self.output, out_ctx, &mut self.stats) {
                    Some(slice) => {
                        self.stats.output_packets += 1;
                        slice
                    }
                    None => {
                        out_faulted = true;
                        SliceBuffer::empty()
                    }
                }
            } else {
                SliceBuffer::empty()
            };

            let in_slice = if !in_faulted && in_pending != 0 {
                match Self::read_packet(&mut self.input, in_ctx, &mut self.stats) {
                    Some(slice) => {
                        self.stats.input_packets += 1;
                        slice
                    }
                    None => {
                        in_faulted = true;
                        SliceBuffer::empty()
                    }
                }
            } else {
                SliceBuffer::empty()
            };

            if mismatched && !warned_mismatch && (out_slice.frames > 0 || in_slice.frames > 0) {
                log::warn!(
                    "stream format mismatch: output {} vs input {}; mixing is best-effort",
                    out_ctx.format,
                    in_ctx.format
                );
                self.stats.mismatch_ticks += 1;
                warned_mismatch = true;
            }

            let mixed = mixer::mix(
                &out_slice.samples,
                out_slice.frames,
                &in_slice.samples,
                in_slice.frames,
                out_ctx.format.channels,
            );
            debug_assert_eq!(mixed.len() % out_ctx.format.channels.max(1) as usize, 0);
            self.stats.samples_appended += mixed.len() as u64;
            self.pcm.extend_from_slice(&mixed);

            out_pending = if out_faulted {
                0
            } else {
                Self::poll_pending(&mut self.output, out_ctx, &mut self.stats)
            };
            in_pending = if in_faulted {
                0
            } else {
                Self::poll_pending(&mut self.input, in_ctx, &mut self.stats)
            };
        }
    }

    fn poll_pending<S: PacketSource>(source: &mut S, ctx: &StreamContext, stats: &mut CaptureStats) -> u32 {
        match source.pending_frames() {
            Ok(frames) => frames,
            Err(e) => {
                log::warn!("[{}] pending-size query failed: {}", ctx.label, e);
                stats.source_faults += 1;
                0
            }
        }
    }

    /// Acquire, normalize, and release one packet.
    ///
    /// Returns `None` on a source fault; the caller stops polling that
    /// source for the remainder of the tick.
    fn read_packet<S: PacketSource>(
        source: &mut S,
        ctx: &StreamContext,
        stats: &mut CaptureStats,
    ) -> Option<SliceBuffer> {
        let (samples, frames) = {
            let packet = match source.acquire() {
                Ok(packet) => packet,
                Err(e) => {
                    log::warn!("[{}] packet acquire failed: {}", ctx.label, e);
                    stats.source_faults += 1;
                    return None;
                }
            };

            let frames = packet.frames as usize;
            if frames == 0 {
                log::warn!("[{}] zero-frame packet delivered", ctx.label);
                stats.zero_frame_packets += 1;
            }
            if packet.flags.discontinuity {
                log::debug!("[{}] capture gap before this packet", ctx.label);
                stats.discontinuity_packets += 1;
            }

            let expected = frames * ctx.format.channels as usize;
            let samples = if packet.flags.silent {
                stats.silent_packets += 1;
                vec![0i16; expected]
            } else {
                if ctx.layout == SampleLayout::Unsupported && frames > 0 {
                    log::warn!("[{}] unsupported sample layout; packet silenced", ctx.label);
                    stats.unsupported_packets += 1;
                }
                normalizer::normalize(packet.bytes, frames, ctx.format.channels, ctx.layout)
            };
            (samples, frames)
        };

        if let Err(e) = source.release(frames as u32) {
            log::warn!("[{}] packet release failed: {}", ctx.label, e);
            stats.source_faults += 1;
        }
        Some(SliceBuffer { samples, frames })
    }
}
