use super::profile::EncodeProfile;
use std::path::Path;

/// Build the ffmpeg argument vector for one conversion.
///
/// Chapters, global metadata and subtitles are stripped; the remaining
/// audio/video streams are re-encoded with the profile's fixed codecs and
/// tagged with its language.
pub fn build_ffmpeg_args(input: &Path, output: &Path, profile: &EncodeProfile) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-nostdin".to_string(),
        "-i".to_string(),
        input.to_string_lossy().to_string(),
        "-map_chapters".to_string(),
        "-1".to_string(),
        "-map_metadata".to_string(),
        "-1".to_string(),
        "-metadata:s:a".to_string(),
        format!("language={}", profile.stream_language),
        "-metadata:s:v".to_string(),
        format!("language={}", profile.stream_language),
        "-sn".to_string(),
        "-profile:v".to_string(),
        profile.video_profile.clone(),
        "-level:v".to_string(),
        profile.video_level.clone(),
        "-acodec".to_string(),
        profile.audio_codec.clone(),
        "-vcodec".to_string(),
        profile.video_codec.clone(),
        output.to_string_lossy().to_string(),
    ]
}
