pub mod command_builder;
pub mod ffmpeg;
pub mod profile;

pub use command_builder::build_ffmpeg_args;
pub use ffmpeg::FfmpegEngine;
pub use profile::EncodeProfile;

use std::path::Path;

/// Outcome of one engine invocation
#[derive(Debug)]
pub enum EncodeStatus {
    /// The engine wrote the output file and exited cleanly
    Success,
    /// The engine failed; the output file must not be consumed
    Failed(String),
}

/// Boundary to the external transcoding engine.
///
/// Implementations receive structured arguments and report plain
/// success/failure; callers never see the invocation mechanism.
pub trait TranscodeEngine: Send + Sync {
    fn encode(&self, input: &Path, output: &Path, profile: &EncodeProfile) -> EncodeStatus;
}
