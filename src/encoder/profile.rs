use std::path::{Path, PathBuf};

/// Fixed engine invocation profile: codecs, container and metadata
/// handling are configuration constants, never varied per file.
#[derive(Debug, Clone)]
pub struct EncodeProfile {
    pub video_codec: String,
    pub audio_codec: String,
    /// H.264 profile passed as `-profile:v`
    pub video_profile: String,
    /// H.264 level passed as `-level:v`
    pub video_level: String,
    /// Language tag applied to the remaining audio/video streams
    pub stream_language: String,
    /// Canonical container, used as the extension of every converted file
    pub container: String,
    /// Marker inserted before the container extension while a conversion
    /// is in flight
    pub work_suffix: String,
}

impl Default for EncodeProfile {
    fn default() -> Self {
        Self {
            video_codec: "h264".to_string(),
            audio_codec: "aac".to_string(),
            video_profile: "high".to_string(),
            video_level: "4.0".to_string(),
            stream_language: "eng".to_string(),
            container: "mp4".to_string(),
            work_suffix: "transcoding".to_string(),
        }
    }
}

impl EncodeProfile {
    /// Sibling path the engine writes to while the conversion is in flight.
    pub fn work_path(&self, input: &Path) -> PathBuf {
        self.sibling(input, &format!("{}.{}", self.work_suffix, self.container))
    }

    /// Path the converted file is installed at. Shares the input's stem but
    /// always carries the canonical container extension, so it may differ
    /// from the input path.
    pub fn final_path(&self, input: &Path) -> PathBuf {
        self.sibling(input, &self.container)
    }

    fn sibling(&self, input: &Path, extension: &str) -> PathBuf {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        let parent = input.parent().unwrap_or(Path::new("."));
        parent.join(format!("{}.{}", stem, extension))
    }
}
