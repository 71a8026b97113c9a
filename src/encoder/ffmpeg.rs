use super::command_builder::build_ffmpeg_args;
use super::profile::EncodeProfile;
use super::{EncodeStatus, TranscodeEngine};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Production engine backed by the ffmpeg binary on PATH.
#[derive(Debug, Default)]
pub struct FfmpegEngine;

impl TranscodeEngine for FfmpegEngine {
    fn encode(&self, input: &Path, output: &Path, profile: &EncodeProfile) -> EncodeStatus {
        let args = build_ffmpeg_args(input, output, profile);

        info!("Encoding: {} -> {}", input.display(), output.display());
        debug!("ffmpeg {}", args.join(" "));

        let result = Command::new("ffmpeg")
            .args(&args)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output();

        match result {
            Ok(out) if out.status.success() => EncodeStatus::Success,
            Ok(out) => {
                let stderr = String::from_utf8_lossy(&out.stderr);
                let last_lines: Vec<&str> = stderr.lines().rev().take(5).collect();
                let message = if last_lines.is_empty() {
                    format!("ffmpeg failed with status: {}", out.status)
                } else {
                    format!(
                        "ffmpeg failed: {}",
                        last_lines.into_iter().rev().collect::<Vec<_>>().join("\n")
                    )
                };
                EncodeStatus::Failed(message)
            }
            Err(e) => EncodeStatus::Failed(format!("Failed to start ffmpeg: {}", e)),
        }
    }
}
