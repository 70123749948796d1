use crate::models::format::SampleLayout;

/// Convert one raw packet into canonical signed 16-bit samples.
///
/// Pure function. Output length is exactly `frames * channels` regardless
/// of input: a short raw buffer is zero-filled at the tail, and an
/// unsupported layout produces silence of the expected length so the
/// session can continue (the caller surfaces the condition).
pub fn normalize(raw: &[u8], frames: usize, channels: u16, layout: SampleLayout) -> Vec<i16> {
    let expected = frames * channels as usize;
    match layout {
        SampleLayout::Int16 => {
            let mut samples: Vec<i16> = raw
                .chunks_exact(2)
                .take(expected)
                .map(|b| i16::from_le_bytes([b[0], b[1]]))
                .collect();
            samples.resize(expected, 0);
            samples
        }
        SampleLayout::Float32 => {
            let mut samples: Vec<i16> = raw
                .chunks_exact(4)
                .take(expected)
                .map(|b| scale_float_sample(f32::from_le_bytes([b[0], b[1], b[2], b[3]])))
                .collect();
            samples.resize(expected, 0);
            samples
        }
        SampleLayout::Unsupported => vec![0; expected],
    }
}

/// Scale a float sample into the 16-bit range: multiply by 32767, truncate
/// toward zero, clamp. The cast saturates on overflow and maps NaN to 0,
/// so the conversion is deterministic for any input.
fn scale_float_sample(sample: f32) -> i16 {
    let scaled = (sample * 32767.0) as i32;
    scaled.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int16_bytes(samples: &[i16]) -> Vec<u8> {
        samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }

    fn float_bytes(samples: &[f32]) -> Vec<u8> {
        samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }

    #[test]
    fn int16_input_passes_through_unchanged() {
        let samples = [0i16, 1, -1, i16::MAX, i16::MIN, 12345];
        let raw = int16_bytes(&samples);

        let normalized = normalize(&raw, 3, 2, SampleLayout::Int16);

        assert_eq!(normalized, samples);
    }

    #[test]
    fn float_scaling_follows_truncate_then_clamp() {
        // Sweep [-2, 2] in 1/8 steps, covering both clamp regions and ±1.0.
        for step in -16..=16 {
            let s = step as f32 / 8.0;
            let raw = float_bytes(&[s]);

            let normalized = normalize(&raw, 1, 1, SampleLayout::Float32);

            let expected = ((s * 32767.0) as i32).clamp(-32768, 32767) as i16;
            assert_eq!(normalized, [expected], "sample {}", s);
        }
    }

    #[test]
    fn float_full_scale_boundaries() {
        let raw = float_bytes(&[1.0, -1.0, 2.0, -2.0, 0.5]);

        let normalized = normalize(&raw, 5, 1, SampleLayout::Float32);

        assert_eq!(normalized, [32767, -32767, 32767, -32768, 16383]);
    }

    #[test]
    fn unsupported_layout_yields_silence_of_expected_length() {
        let raw = vec![0xFFu8; 64];

        let normalized = normalize(&raw, 4, 2, SampleLayout::Unsupported);

        assert_eq!(normalized, vec![0i16; 8]);
    }

    #[test]
    fn short_buffer_is_zero_filled() {
        let raw = int16_bytes(&[7, 8]);

        let normalized = normalize(&raw, 2, 2, SampleLayout::Int16);

        assert_eq!(normalized, [7, 8, 0, 0]);
    }

    #[test]
    fn output_length_is_frames_times_channels() {
        let raw = float_bytes(&[0.25; 12]);

        assert_eq!(normalize(&raw, 6, 2, SampleLayout::Float32).len(), 12);
        assert_eq!(normalize(&raw, 3, 2, SampleLayout::Float32).len(), 6);
        assert_eq!(normalize(&[], 0, 2, SampleLayout::Float32).len(), 0);
    }
}
