//! Simulation time management
//!
//! The host engine drives real time; this module owns the *simulation* rate.
//! A time scale of zero freezes every time-scale-dependent behavior in the
//! scene while real-time systems (rendering, video decode) keep running.

/// Global time-scale multiplier for the simulation clock
///
/// The clock is owned by the [`SceneWorld`](crate::scene::SceneWorld) and
/// spans one playback session. Callers read the scale before suspending the
/// simulation and restore it afterwards; the immersive player does exactly
/// that around playback.
///
/// # Clamping
/// Negative and NaN inputs are invalid for a simulation rate and clamp to
/// `0.0`, matching host-engine behavior. Reads always return the clamped
/// value, so a saved memento restores exactly what was observed.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    time_scale: f32,
    scaled_total: f32,
}

impl SimulationClock {
    /// Create a clock running at the normal rate (scale 1.0)
    pub fn new() -> Self {
        Self {
            time_scale: 1.0,
            scaled_total: 0.0,
        }
    }

    /// Get the current time-scale multiplier
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Set the time-scale multiplier
    ///
    /// Negative and NaN values clamp to `0.0`.
    pub fn set_time_scale(&mut self, scale: f32) {
        let clamped = if scale.is_nan() || scale < 0.0 { 0.0 } else { scale };
        if (clamped - scale).abs() > f32::EPSILON || scale.is_nan() {
            log::warn!("Invalid time scale {} clamped to {}", scale, clamped);
        }
        log::trace!("Time scale updated: {} -> {}", self.time_scale, clamped);
        self.time_scale = clamped;
    }

    /// Scale a real-time delta into simulation time
    pub fn scaled(&self, delta: f32) -> f32 {
        delta * self.time_scale
    }

    /// Advance the clock by a real-time delta (seconds)
    ///
    /// Should be called once per frame by the host loop. Accumulates scaled
    /// time only; with a zero time scale the total stands still.
    pub fn advance(&mut self, delta: f32) {
        self.scaled_total += self.scaled(delta);
    }

    /// Total accumulated simulation time in seconds
    pub fn scaled_total(&self) -> f32 {
        self.scaled_total
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}
