use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::format::StreamFormat;

/// Result returned when a capture session completes successfully.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingResult {
    pub file_path: PathBuf,
    pub duration_secs: f64,
    pub sample_count: usize,
    pub checksum: String,
    pub metadata: RecordingMetadata,
}

/// Metadata stored in a JSON sidecar next to the recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingMetadata {
    pub id: String,
    pub created_at: String,
    pub duration_secs: f64,
    pub sample_rate: u32,
    pub channels: u16,
    pub sample_count: usize,
    pub checksum: String,
    pub output_format: String,
    pub input_format: String,
}

impl RecordingMetadata {
    pub fn new(
        duration_secs: f64,
        output_format: &StreamFormat,
        input_format: &StreamFormat,
        sample_count: usize,
        checksum: &str,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            duration_secs,
            sample_rate: output_format.sample_rate,
            channels: output_format.channels,
            sample_count,
            checksum: checksum.to_string(),
            output_format: output_format.to_string(),
            input_format: input_format.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::format::SampleEncoding;

    #[test]
    fn metadata_reflects_output_side_format() {
        let out = StreamFormat {
            encoding: SampleEncoding::FloatPcm,
            bits_per_sample: 32,
            channels: 2,
            sample_rate: 48000,
        };
        let inp = StreamFormat {
            encoding: SampleEncoding::IntPcm,
            bits_per_sample: 16,
            channels: 1,
            sample_rate: 16000,
        };

        let meta = RecordingMetadata::new(1.5, &out, &inp, 96000, "abc123");

        assert_eq!(meta.sample_rate, 48000);
        assert_eq!(meta.channels, 2);
        assert_eq!(meta.sample_count, 96000);
        assert_eq!(meta.checksum, "abc123");
        assert!(meta.output_format.contains("float-pcm"));
        assert!(meta.input_format.contains("int-pcm"));
        assert!(!meta.id.is_empty());
    }
}
