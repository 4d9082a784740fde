//! Render layer system for camera draw filtering
//!
//! Every scene object belongs to exactly one of 32 render layers; every
//! camera carries a culling mask selecting which layers it draws. The
//! immersive player puts its video sphere on a dedicated layer and gives its
//! camera a mask covering only what should be visible inside the sphere.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error for render-layer indices outside the supported range
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("render layer index {0} out of range (0..=31)")]
pub struct InvalidLayer(pub u8);

/// Single render layer index (0..=31)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Layer(u8);

impl Layer {
    /// Highest valid layer index
    pub const MAX_INDEX: u8 = 31;

    /// Create a layer from an index
    ///
    /// # Panics
    /// Panics if `index` exceeds [`Layer::MAX_INDEX`]. Configuration files
    /// go through the fallible `TryFrom<u8>` conversion instead.
    pub fn new(index: u8) -> Self {
        assert!(
            index <= Self::MAX_INDEX,
            "render layer index {} out of range (0..=31)",
            index
        );
        Self(index)
    }

    /// The layer's numeric index
    pub fn index(self) -> u8 {
        self.0
    }
}

impl Default for Layer {
    fn default() -> Self {
        Self(0)
    }
}

impl TryFrom<u8> for Layer {
    type Error = InvalidLayer;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        if index <= Self::MAX_INDEX {
            Ok(Self(index))
        } else {
            Err(InvalidLayer(index))
        }
    }
}

impl From<Layer> for u8 {
    fn from(layer: Layer) -> Self {
        layer.0
    }
}

bitflags::bitflags! {
    /// Bitset selecting which render layers a camera will draw
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    pub struct LayerMask: u32 {
        /// Render layer 0 (general scene default)
        const LAYER_0 = 1 << 0;
        /// Render layer 1
        const LAYER_1 = 1 << 1;
        /// Render layer 2
        const LAYER_2 = 1 << 2;
        /// Render layer 3
        const LAYER_3 = 1 << 3;
        /// Render layer 4
        const LAYER_4 = 1 << 4;
        /// Render layer 5
        const LAYER_5 = 1 << 5;
        /// Render layer 6
        const LAYER_6 = 1 << 6;
        /// Render layer 7
        const LAYER_7 = 1 << 7;
        /// Render layer 8 (first user-defined layer)
        const LAYER_8 = 1 << 8;
        /// Render layer 9
        const LAYER_9 = 1 << 9;
        /// Render layer 10
        const LAYER_10 = 1 << 10;
        /// Render layer 11
        const LAYER_11 = 1 << 11;
        /// Render layer 12
        const LAYER_12 = 1 << 12;
        /// Render layer 13
        const LAYER_13 = 1 << 13;
        /// Render layer 14
        const LAYER_14 = 1 << 14;
        /// Render layer 15
        const LAYER_15 = 1 << 15;
        /// Render layer 16
        const LAYER_16 = 1 << 16;
        /// Render layer 17
        const LAYER_17 = 1 << 17;
        /// Render layer 18
        const LAYER_18 = 1 << 18;
        /// Render layer 19
        const LAYER_19 = 1 << 19;
        /// Render layer 20
        const LAYER_20 = 1 << 20;
        /// Render layer 21
        const LAYER_21 = 1 << 21;
        /// Render layer 22
        const LAYER_22 = 1 << 22;
        /// Render layer 23
        const LAYER_23 = 1 << 23;
        /// Render layer 24
        const LAYER_24 = 1 << 24;
        /// Render layer 25
        const LAYER_25 = 1 << 25;
        /// Render layer 26
        const LAYER_26 = 1 << 26;
        /// Render layer 27
        const LAYER_27 = 1 << 27;
        /// Render layer 28
        const LAYER_28 = 1 << 28;
        /// Render layer 29
        const LAYER_29 = 1 << 29;
        /// Render layer 30
        const LAYER_30 = 1 << 30;
        /// Render layer 31
        const LAYER_31 = 1 << 31;
    }
}

impl LayerMask {
    /// Mask covering every render layer
    pub fn everything() -> Self {
        Self::all()
    }

    /// Mask covering no render layers
    pub fn nothing() -> Self {
        Self::empty()
    }

    /// Mask containing exactly one layer
    pub fn of(layer: Layer) -> Self {
        Self::from_bits_truncate(1 << layer.index())
    }

    /// This mask with an additional layer
    #[must_use]
    pub fn with(self, layer: Layer) -> Self {
        self | Self::of(layer)
    }

    /// This mask with a layer removed
    #[must_use]
    pub fn without(self, layer: Layer) -> Self {
        self & !Self::of(layer)
    }

    /// Whether the mask includes the given layer
    pub fn contains_layer(self, layer: Layer) -> bool {
        self.intersects(Self::of(layer))
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::everything()
    }
}

impl From<Layer> for LayerMask {
    fn from(layer: Layer) -> Self {
        Self::of(layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_layer_mask() {
        let mask = LayerMask::of(Layer::new(8));
        assert_eq!(mask.bits(), 1 << 8);
        assert!(mask.contains_layer(Layer::new(8)));
        assert!(!mask.contains_layer(Layer::new(0)));
    }

    #[test]
    fn test_with_and_without() {
        let mask = LayerMask::nothing()
            .with(Layer::new(1))
            .with(Layer::new(5));
        assert!(mask.contains_layer(Layer::new(1)));
        assert!(mask.contains_layer(Layer::new(5)));

        let narrowed = mask.without(Layer::new(1));
        assert!(!narrowed.contains_layer(Layer::new(1)));
        assert!(narrowed.contains_layer(Layer::new(5)));
    }

    #[test]
    fn test_everything_contains_all_layers() {
        let mask = LayerMask::everything();
        for index in 0..=Layer::MAX_INDEX {
            assert!(
                mask.contains_layer(Layer::new(index)),
                "Layer {} missing from everything()",
                index
            );
        }
    }

    #[test]
    fn test_layer_index_validation() {
        assert!(Layer::try_from(31u8).is_ok());
        assert_eq!(Layer::try_from(32u8), Err(InvalidLayer(32)));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_layer_new_panics_out_of_range() {
        let _ = Layer::new(40);
    }
}
