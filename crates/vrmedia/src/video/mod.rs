//! Video playback component model
//!
//! Decode and presentation belong to the host engine's media subsystem; this
//! module models the *state* of playback: the configured source, looping and
//! mute flags, audio routing, and the single-shot end-of-stream notification
//! the immersive player uses to tear a session down.

pub mod source;
pub mod player;
pub mod audio;

pub use source::{ClipHandle, VideoError, VideoSettings, VideoSource};
pub use player::{AudioOutputMode, PlaybackState, VideoPlayer};
pub use audio::AudioSource;
