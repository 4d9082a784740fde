//! Camera component
//!
//! Carries the draw-filtering and projection parameters the host renderer
//! consumes. Matrix generation stays in the host's rendering backend.

use crate::foundation::math::utils;
use crate::render::layers::LayerMask;

use super::world::SceneError;

/// Camera component for scene objects
#[derive(Debug, Clone)]
pub struct Camera {
    /// Whether this camera renders
    pub enabled: bool,

    /// Bitset selecting which render layers this camera draws
    pub culling_mask: LayerMask,

    /// Vertical field of view in radians
    pub fov: f32,

    /// Distance to the near clipping plane
    pub near_clip: f32,

    /// Distance to the far clipping plane
    pub far_clip: f32,
}

impl Camera {
    /// Create an enabled camera with the given mask and clip planes
    ///
    /// Clip planes must satisfy `0 < near < far`.
    pub fn new(culling_mask: LayerMask, near_clip: f32, far_clip: f32) -> Result<Self, SceneError> {
        if !(near_clip > 0.0 && far_clip > near_clip) {
            return Err(SceneError::InvalidClipPlanes {
                near: near_clip,
                far: far_clip,
            });
        }
        Ok(Self {
            enabled: true,
            culling_mask,
            fov: utils::deg_to_rad(60.0),
            near_clip,
            far_clip,
        })
    }

    /// Set the vertical field of view in degrees
    #[must_use]
    pub fn with_fov_degrees(mut self, fov_degrees: f32) -> Self {
        self.fov = utils::deg_to_rad(fov_degrees);
        self
    }
}

impl Default for Camera {
    /// An enabled camera drawing every layer with common clip planes
    fn default() -> Self {
        Self {
            enabled: true,
            culling_mask: LayerMask::everything(),
            fov: utils::deg_to_rad(60.0),
            near_clip: 0.1,
            far_clip: 1000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_plane_validation() {
        assert!(Camera::new(LayerMask::everything(), 1.0, 1000.0).is_ok());
        assert!(matches!(
            Camera::new(LayerMask::everything(), 0.0, 1000.0),
            Err(SceneError::InvalidClipPlanes { .. })
        ));
        assert!(matches!(
            Camera::new(LayerMask::everything(), 10.0, 5.0),
            Err(SceneError::InvalidClipPlanes { .. })
        ));
    }

    #[test]
    fn test_fov_degrees_conversion() {
        let camera = Camera::default().with_fov_degrees(90.0);
        assert!((camera.fov - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
