use std::path::PathBuf;
use std::time::Duration;

/// Tunables for a capture session.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Directory where recordings are written (created if absent).
    pub output_directory: PathBuf,

    /// Sleep between drain ticks. Bounds both end-to-end latency and idle
    /// CPU use (default: 10 ms).
    pub poll_interval: Duration,

    /// Radius of the post-capture moving-average window (default: 8).
    /// 0 disables smoothing.
    pub smoothing_radius: usize,
}

impl CaptureConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.poll_interval.is_zero() {
            return Err("poll interval must be non-zero".into());
        }
        if self.poll_interval > Duration::from_secs(1) {
            return Err(format!(
                "poll interval {:?} would starve the capture buffers",
                self.poll_interval
            ));
        }
        Ok(())
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("audio"),
            poll_interval: Duration::from_millis(10),
            smoothing_radius: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(CaptureConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_poll_interval() {
        let config = CaptureConfig {
            poll_interval: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_excessive_poll_interval() {
        let config = CaptureConfig {
            poll_interval: Duration::from_secs(5),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn smoothing_can_be_disabled() {
        let config = CaptureConfig {
            smoothing_radius: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
