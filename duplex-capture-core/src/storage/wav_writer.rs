use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::models::error::CaptureError;
use crate::processing::wav_format;

/// Persist a finished recording as a 16-bit integer PCM WAV file.
///
/// Single pass, no seeking: header first, then the interleaved
/// little-endian sample payload. The parent directory is created if
/// absent.
pub fn write_wav(
    path: &Path,
    samples: &[i16],
    sample_rate: u32,
    channels: u16,
) -> Result<(), CaptureError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| CaptureError::StorageError(format!("failed to create directory: {}", e)))?;
    }

    let file = File::create(path)
        .map_err(|e| CaptureError::StorageError(format!("failed to create file: {}", e)))?;
    let mut out = BufWriter::new(file);

    let data_len = (samples.len() * 2) as u32;
    let header = wav_format::generate_wav_header(sample_rate, channels, data_len);
    out.write_all(&header)
        .map_err(|e| CaptureError::StorageError(format!("header write failed: {}", e)))?;

    let mut payload = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        payload.extend_from_slice(&sample.to_le_bytes());
    }
    out.write_all(&payload)
        .map_err(|e| CaptureError::StorageError(format!("payload write failed: {}", e)))?;

    out.flush()
        .map_err(|e| CaptureError::StorageError(format!("flush failed: {}", e)))
}

/// Timestamped output path under `dir`: `output_YYYY-MM-DD_HH-MM-SS.wav`.
pub fn timestamped_wav_path(dir: &Path) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
    dir.join(format!("output_{}.wav", stamp))
}

/// SHA-256 hex digest of a finished file.
pub fn sha256_file(path: &Path) -> Result<String, CaptureError> {
    let data = fs::read(path)
        .map_err(|e| CaptureError::StorageError(format!("failed to read file for checksum: {}", e)))?;
    let digest = Sha256::digest(&data);
    Ok(digest.iter().map(|b| format!("{:02x}", b)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("duplex_wav_test_{}_{}", name, uuid::Uuid::new_v4()))
    }

    #[test]
    fn writes_header_and_payload() {
        let path = temp_path("basic").join("take.wav");
        let samples = [0i16, 1000, -1000, i16::MAX];

        write_wav(&path, &samples, 48000, 2).unwrap();

        let data = fs::read(&path).unwrap();
        assert_eq!(data.len(), 44 + 8);
        assert_eq!(&data[0..4], b"RIFF");

        let data_len = u32::from_le_bytes([data[40], data[41], data[42], data[43]]);
        assert_eq!(data_len, 8);

        let first = i16::from_le_bytes([data[44], data[45]]);
        assert_eq!(first, 0);
        let second = i16::from_le_bytes([data[46], data[47]]);
        assert_eq!(second, 1000);
        let third = i16::from_le_bytes([data[48], data[49]]);
        assert_eq!(third, -1000);

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn creates_missing_directories() {
        let root = temp_path("nested");
        let path = root.join("a").join("b").join("take.wav");

        write_wav(&path, &[1, 2], 16000, 1).unwrap();

        assert!(path.exists());
        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn empty_recording_is_header_only() {
        let path = temp_path("empty").join("take.wav");

        write_wav(&path, &[], 48000, 2).unwrap();

        let data = fs::read(&path).unwrap();
        assert_eq!(data.len(), 44);
        let chunk_size = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
        assert_eq!(chunk_size, 36);

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn timestamped_path_shape() {
        let path = timestamped_wav_path(Path::new("audio"));
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("output_"));
        assert!(name.ends_with(".wav"));
        assert_eq!(path.parent().unwrap(), Path::new("audio"));
    }

    #[test]
    fn checksum_is_stable_hex() {
        let path = temp_path("sum").join("take.wav");
        write_wav(&path, &[42; 16], 48000, 2).unwrap();

        let first = sha256_file(&path).unwrap();
        let second = sha256_file(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
