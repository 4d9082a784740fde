//! Video player component state
//!
//! Tracks what the host decoder should be doing for one scene object. The
//! component never touches frames or samples itself; the host reads this
//! state every frame and reports end-of-stream back through
//! [`VideoPlayer::reach_loop_point`].

use crate::scene::ObjectHandle;

use super::source::{VideoError, VideoSettings};

/// Playback pipeline state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Configured, decode not started
    Idle,
    /// Decoding and presenting frames
    Playing,
    /// Decode suspended, position held
    Paused,
    /// Decode shut down
    Stopped,
}

/// Where decoded audio goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioOutputMode {
    /// Route through the audio source component on the given object
    AudioSource(ObjectHandle),
    /// Discard audio entirely
    Mute,
}

/// Video playback component
///
/// Attached to the host object of the video sphere. Owns the configured
/// [`VideoSettings`], the pipeline state, audio routing, and the arming flag
/// for the single-shot end-of-stream notification.
#[derive(Debug, Clone)]
pub struct VideoPlayer {
    settings: VideoSettings,
    state: PlaybackState,
    audio_output: AudioOutputMode,
    loop_point_armed: bool,
}

impl VideoPlayer {
    /// Create a player component for a validated source
    pub fn new(settings: VideoSettings) -> Result<Self, VideoError> {
        settings.source.validate()?;
        Ok(Self {
            settings,
            state: PlaybackState::Idle,
            audio_output: AudioOutputMode::Mute,
            loop_point_armed: false,
        })
    }

    /// The configured settings
    pub fn settings(&self) -> &VideoSettings {
        &self.settings
    }

    /// Current pipeline state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether the content loops at end of stream
    pub fn is_looping(&self) -> bool {
        self.settings.looping
    }

    /// Where decoded audio is routed
    pub fn audio_output(&self) -> AudioOutputMode {
        self.audio_output
    }

    /// Set the audio routing target
    pub fn set_audio_output(&mut self, mode: AudioOutputMode) {
        self.audio_output = mode;
    }

    /// Start (or restart) decoding
    ///
    /// Arms the end-of-stream notification for this playback session.
    pub fn play(&mut self) {
        log::debug!("Video playback started (looping: {})", self.settings.looping);
        self.state = PlaybackState::Playing;
        self.loop_point_armed = true;
    }

    /// Resume decoding from a pause
    pub fn resume(&mut self) -> Result<(), VideoError> {
        if self.state != PlaybackState::Paused {
            return Err(VideoError::NotPaused);
        }
        log::debug!("Video playback resumed");
        self.state = PlaybackState::Playing;
        Ok(())
    }

    /// Suspend decoding, holding the current position
    pub fn pause(&mut self) -> Result<(), VideoError> {
        if self.state != PlaybackState::Playing {
            return Err(VideoError::NotPlaying);
        }
        log::debug!("Video playback paused");
        self.state = PlaybackState::Paused;
        Ok(())
    }

    /// Shut the pipeline down and disarm the end-of-stream notification
    pub fn stop(&mut self) {
        log::debug!("Video playback stopped");
        self.state = PlaybackState::Stopped;
        self.loop_point_armed = false;
    }

    /// Report that the stream reached its end
    ///
    /// Called by the host when the decoder hits the loop point. Returns
    /// `true` when the notification should fire session teardown: exactly
    /// once per non-looping playback, and never for looping content (which
    /// simply wraps and keeps playing). Late or duplicate reports after the
    /// first firing return `false`.
    pub fn reach_loop_point(&mut self) -> bool {
        if self.state != PlaybackState::Playing || !self.loop_point_armed {
            return false;
        }
        if self.settings.looping {
            // Stream wraps; the subscription stays armed but never fires.
            return false;
        }
        self.loop_point_armed = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn non_looping() -> VideoPlayer {
        VideoPlayer::new(VideoSettings::streamed("https://example.com/clip.mp4")).unwrap()
    }

    #[test]
    fn test_loop_point_fires_once_for_non_looping() {
        let mut player = non_looping();
        player.play();

        assert!(player.reach_loop_point(), "First report should fire");
        assert!(!player.reach_loop_point(), "Second report should be ignored");
    }

    #[test]
    fn test_loop_point_never_fires_for_looping() {
        let mut player = VideoPlayer::new(
            VideoSettings::streamed("https://example.com/clip.mp4").looping(true),
        )
        .unwrap();
        player.play();

        assert!(!player.reach_loop_point());
        assert!(!player.reach_loop_point());
    }

    #[test]
    fn test_loop_point_ignored_before_play_and_after_stop() {
        let mut player = non_looping();
        assert!(!player.reach_loop_point(), "Idle player should ignore reports");

        player.play();
        player.stop();
        assert!(!player.reach_loop_point(), "Stopped player should ignore reports");
    }

    #[test]
    fn test_pause_resume_cycle() {
        let mut player = non_looping();
        assert_eq!(player.pause(), Err(VideoError::NotPlaying));

        player.play();
        player.pause().unwrap();
        assert_eq!(player.state(), PlaybackState::Paused);

        player.resume().unwrap();
        assert_eq!(player.state(), PlaybackState::Playing);
        assert_eq!(player.resume(), Err(VideoError::NotPaused));
    }

    #[test]
    fn test_invalid_source_rejected_at_construction() {
        let result = VideoPlayer::new(VideoSettings::streamed(""));
        assert_eq!(result.unwrap_err(), VideoError::EmptySource("URL"));
    }
}
