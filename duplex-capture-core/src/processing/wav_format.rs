//! WAV container byte layout.
//!
//! The recorder always persists integer PCM at 16 bits per sample, so the
//! header generator only takes the fields that vary. The sample count is
//! known before the file is opened (capture has already ended), so the
//! header is emitted once with its final sizes and never patched.

/// Size of the RIFF header preceding the sample payload.
pub const WAV_HEADER_SIZE: usize = 44;

/// Bit depth of the persisted payload.
pub const OUTPUT_BITS_PER_SAMPLE: u16 = 16;

/// Generate the 44-byte RIFF header for a 16-bit integer PCM file.
///
/// Layout (little-endian):
/// ```text
/// [0-3]    "RIFF"
/// [4-7]    chunk size = 36 + data_len
/// [8-11]   "WAVE"
/// [12-15]  "fmt "
/// [16-19]  16 (PCM format chunk size)
/// [20-21]  1 (integer PCM format code)
/// [22-23]  channels
/// [24-27]  sample_rate
/// [28-31]  byte rate = sample_rate * block align
/// [32-33]  block align = channels * 2
/// [34-35]  16 (bits per sample)
/// [36-39]  "data"
/// [40-43]  data_len
/// ```
pub fn generate_wav_header(sample_rate: u32, channels: u16, data_len: u32) -> [u8; WAV_HEADER_SIZE] {
    let block_align = channels * (OUTPUT_BITS_PER_SAMPLE / 8);
    let byte_rate = sample_rate * block_align as u32;
    let chunk_size = 36 + data_len;

    let mut header = [0u8; WAV_HEADER_SIZE];

    // RIFF chunk descriptor
    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&chunk_size.to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");

    // fmt sub-chunk
    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&16u32.to_le_bytes());
    header[20..22].copy_from_slice(&1u16.to_le_bytes());
    header[22..24].copy_from_slice(&channels.to_le_bytes());
    header[24..28].copy_from_slice(&sample_rate.to_le_bytes());
    header[28..32].copy_from_slice(&byte_rate.to_le_bytes());
    header[32..34].copy_from_slice(&block_align.to_le_bytes());
    header[34..36].copy_from_slice(&OUTPUT_BITS_PER_SAMPLE.to_le_bytes());

    // data sub-chunk
    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&data_len.to_le_bytes());

    header
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_44_bytes_with_riff_magic() {
        let header = generate_wav_header(48000, 2, 0);
        assert_eq!(header.len(), 44);
        assert_eq!(&header[0..4], b"RIFF");
        assert_eq!(&header[8..12], b"WAVE");
        assert_eq!(&header[12..16], b"fmt ");
        assert_eq!(&header[36..40], b"data");
    }

    #[test]
    fn header_declares_integer_pcm() {
        let header = generate_wav_header(48000, 2, 0);
        assert_eq!(u16::from_le_bytes([header[20], header[21]]), 1);
        assert_eq!(u32::from_le_bytes([header[16], header[17], header[18], header[19]]), 16);
        assert_eq!(u16::from_le_bytes([header[34], header[35]]), 16);
    }

    #[test]
    fn derived_fields_for_48khz_stereo() {
        let header = generate_wav_header(48000, 2, 1000);

        let chunk_size = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
        assert_eq!(chunk_size, 1036);

        let channels = u16::from_le_bytes([header[22], header[23]]);
        assert_eq!(channels, 2);

        let sample_rate = u32::from_le_bytes([header[24], header[25], header[26], header[27]]);
        assert_eq!(sample_rate, 48000);

        let byte_rate = u32::from_le_bytes([header[28], header[29], header[30], header[31]]);
        assert_eq!(byte_rate, 192000);

        let block_align = u16::from_le_bytes([header[32], header[33]]);
        assert_eq!(block_align, 4);

        let data_len = u32::from_le_bytes([header[40], header[41], header[42], header[43]]);
        assert_eq!(data_len, 1000);
    }

    #[test]
    fn mono_block_align() {
        let header = generate_wav_header(16000, 1, 0);
        let block_align = u16::from_le_bytes([header[32], header[33]]);
        assert_eq!(block_align, 2);
        let byte_rate = u32::from_le_bytes([header[28], header[29], header[30], header[31]]);
        assert_eq!(byte_rate, 32000);
    }
}
