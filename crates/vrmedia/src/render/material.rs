//! Material system for scene object surfaces
//!
//! The immersive player only ever needs one material: an unlit surface
//! showing a 1×1 solid-color placeholder texture until the host's video
//! decoder starts publishing frames over it. The types here still follow the
//! usual material-type/params split so other surfaces can reuse them.

use crate::foundation::color::Color;
use image::{Rgba, RgbaImage};

/// 2D texture backed by CPU-side RGBA image data
///
/// The host renderer owns the GPU upload; this type only carries the pixel
/// data and its dimensions.
#[derive(Debug, Clone)]
pub struct Texture2D {
    image: RgbaImage,
}

impl Texture2D {
    /// Wrap an existing RGBA image
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Create a 1×1 texture of a single color
    ///
    /// This is the placeholder surface shown while a video stream
    /// initializes.
    pub fn solid(color: Color) -> Self {
        Self {
            image: RgbaImage::from_pixel(1, 1, Rgba(color.to_rgba8())),
        }
    }

    /// Texture width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Texture height in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Raw RGBA value of one pixel
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    /// Borrow the backing image
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

/// Unlit material parameters for simple shading
#[derive(Debug, Clone, PartialEq)]
pub struct UnlitMaterialParams {
    /// Material color, including alpha
    pub color: Color,
}

impl Default for UnlitMaterialParams {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
        }
    }
}

/// Enumeration of supported material types
#[derive(Debug, Clone)]
pub enum MaterialType {
    /// Unlit material for simple color/texture rendering
    ///
    /// The video sphere is always unlit: its surface is the light source of
    /// the scene, so shading it would only darken the footage.
    Unlit(UnlitMaterialParams),
}

/// Material resource: type, parameters, and texture binding
#[derive(Debug, Clone)]
pub struct Material {
    /// Material type and parameters
    pub material_type: MaterialType,
    /// Base color texture, if any
    pub base_color_texture: Option<Texture2D>,
    /// Optional name for debugging
    pub name: Option<String>,
}

impl Material {
    /// Create a new unlit material
    pub fn unlit(params: UnlitMaterialParams) -> Self {
        Self {
            material_type: MaterialType::Unlit(params),
            base_color_texture: None,
            name: None,
        }
    }

    /// Attach a base color texture
    #[must_use]
    pub fn with_base_color_texture(mut self, texture: Texture2D) -> Self {
        self.base_color_texture = Some(texture);
        self
    }

    /// Set the material name for debugging
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The material's debug name, if set
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_texture_is_single_pixel_of_color() {
        let color = Color::rgb(0.2, 0.4, 0.6);
        let texture = Texture2D::solid(color);

        assert_eq!(texture.width(), 1);
        assert_eq!(texture.height(), 1);
        assert_eq!(texture.pixel(0, 0), color.to_rgba8());
    }

    #[test]
    fn test_unlit_material_builder() {
        let material = Material::unlit(UnlitMaterialParams {
            color: Color::BLACK,
        })
        .with_base_color_texture(Texture2D::solid(Color::BLACK))
        .with_name("Placeholder");

        assert_eq!(material.name(), Some("Placeholder"));
        assert!(material.base_color_texture.is_some());
        let MaterialType::Unlit(params) = &material.material_type;
        assert_eq!(params.color, Color::BLACK);
    }
}
