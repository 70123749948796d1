//! duplex-recorder: parameterless system-audio + microphone recorder.
//!
//! Records everything played to the default render endpoint (via WASAPI
//! loopback) mixed with the default microphone into a timestamped 16-bit
//! PCM WAV file under `audio/`. Stop with Ctrl+C; the recording and its
//! metadata sidecar are finalized on exit.

#[cfg(target_os = "windows")]
fn main() {
    use duplex_capture_core::{CancellationToken, CaptureConfig, DuplexRecorder, StreamKind};
    use duplex_capture_windows::{console, ComSession, WasapiStream};
    use log::{error, info};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let token = CancellationToken::new();
    if let Err(e) = console::install_stop_handler(token.clone()) {
        error!("failed to install Ctrl+C handler: {}", e);
        std::process::exit(1);
    }

    let _com = match ComSession::initialize() {
        Ok(guard) => guard,
        Err(e) => {
            error!("COM initialization failed: {}", e);
            std::process::exit(1);
        }
    };

    info!("checking for WASAPI loopback support");
    let loopback = match WasapiStream::open_default(StreamKind::RenderLoopback) {
        Ok(stream) => stream,
        Err(e) => {
            error!("failed to open system loopback stream: {}", e);
            std::process::exit(1);
        }
    };
    let mic = match WasapiStream::open_default(StreamKind::Capture) {
        Ok(stream) => stream,
        Err(e) => {
            error!("failed to open microphone stream: {}", e);
            std::process::exit(1);
        }
    };

    let mut recorder = match DuplexRecorder::new(loopback, mic, CaptureConfig::default()) {
        Ok(recorder) => recorder,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    info!("recording; press Ctrl+C to stop");
    match recorder.run(&token) {
        Ok(result) => {
            info!(
                "done: {} ({:.1}s, {} samples, sha256 {})",
                result.file_path.display(),
                result.duration_secs,
                result.sample_count,
                result.checksum
            );
        }
        Err(e) => {
            error!("recording failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(not(target_os = "windows"))]
fn main() {
    eprintln!("duplex-recorder captures via WASAPI and only runs on Windows");
    std::process::exit(1);
}
