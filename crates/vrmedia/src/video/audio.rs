//! Audio output component
//!
//! The endpoint video audio is routed through. Mixing and device output are
//! the host's concern; the component carries the routing parameters.

/// Audio output component for a scene object
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSource {
    /// Linear output volume, `0.0..=1.0`
    pub volume: f32,

    /// Whether output is suppressed without changing the volume setting
    pub mute: bool,
}

impl AudioSource {
    /// Create an audio source at full volume
    pub fn new() -> Self {
        Self {
            volume: 1.0,
            mute: false,
        }
    }
}

impl Default for AudioSource {
    fn default() -> Self {
        Self::new()
    }
}
