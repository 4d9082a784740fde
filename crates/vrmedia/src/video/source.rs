//! Video source descriptions and playback settings

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Video playback errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VideoError {
    /// Source reference is empty
    #[error("video source {0} is empty")]
    EmptySource(&'static str),

    /// Embedded clip handle does not reference a registered clip
    #[error("embedded clip handle is null")]
    NullClipHandle,

    /// Operation requires an active playback
    #[error("video player is not playing")]
    NotPlaying,

    /// Operation requires a paused playback
    #[error("video player is not paused")]
    NotPaused,
}

/// Handle to a video clip asset registered with the host engine
///
/// Zero is the null handle and never refers to a registered clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClipHandle(pub u64);

impl ClipHandle {
    /// Whether this handle refers to a registered clip
    pub fn is_valid(self) -> bool {
        self.0 != 0
    }
}

/// Where the video stream comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VideoSource {
    /// Stream from a URL
    Url(String),

    /// Play from a local file path
    File(PathBuf),

    /// Play a clip asset embedded with the host engine
    Clip(ClipHandle),
}

impl VideoSource {
    /// Check that the source actually references something playable
    ///
    /// An empty URL, an empty path, or a null clip handle is a configuration
    /// mistake surfaced before any scene objects are built.
    pub fn validate(&self) -> Result<(), VideoError> {
        match self {
            VideoSource::Url(url) if url.trim().is_empty() => {
                Err(VideoError::EmptySource("URL"))
            }
            VideoSource::File(path) if path.as_os_str().is_empty() => {
                Err(VideoError::EmptySource("path"))
            }
            VideoSource::Clip(handle) if !handle.is_valid() => {
                Err(VideoError::NullClipHandle)
            }
            _ => Ok(()),
        }
    }
}

impl Default for VideoSource {
    fn default() -> Self {
        VideoSource::Url(String::new())
    }
}

/// Caller-facing video configuration: source plus looping and mute flags
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VideoSettings {
    /// Where the stream comes from
    pub source: VideoSource,

    /// Whether the content should keep looping
    ///
    /// A looping stream never triggers the automatic end-of-stream stop; it
    /// is stopped explicitly by the caller.
    pub looping: bool,

    /// Whether the video sound is suppressed
    pub mute: bool,
}

impl VideoSettings {
    /// Settings for a stream fetched from a URL
    pub fn streamed(url: impl Into<String>) -> Self {
        Self {
            source: VideoSource::Url(url.into()),
            ..Default::default()
        }
    }

    /// Settings for a local video file
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: VideoSource::File(path.into()),
            ..Default::default()
        }
    }

    /// Settings for an embedded clip
    pub fn clip(handle: ClipHandle) -> Self {
        Self {
            source: VideoSource::Clip(handle),
            ..Default::default()
        }
    }

    /// Set the looping flag
    #[must_use]
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Set the mute flag
    #[must_use]
    pub fn muted(mut self, mute: bool) -> Self {
        self.mute = mute;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_url_is_invalid() {
        assert_eq!(
            VideoSource::Url("   ".to_string()).validate(),
            Err(VideoError::EmptySource("URL"))
        );
    }

    #[test]
    fn test_empty_path_is_invalid() {
        assert_eq!(
            VideoSource::File(PathBuf::new()).validate(),
            Err(VideoError::EmptySource("path"))
        );
    }

    #[test]
    fn test_null_clip_handle_is_invalid() {
        assert_eq!(
            VideoSource::Clip(ClipHandle(0)).validate(),
            Err(VideoError::NullClipHandle)
        );
        assert!(VideoSource::Clip(ClipHandle(7)).validate().is_ok());
    }

    #[test]
    fn test_builder_settings() {
        let settings = VideoSettings::streamed("https://example.com/pano.mp4")
            .looping(true)
            .muted(true);

        assert!(settings.looping);
        assert!(settings.mute);
        assert!(settings.source.validate().is_ok());
    }
}
