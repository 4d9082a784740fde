//! # vrmedia
//!
//! An immersive 360° video player built on an explicit scene-world model.
//!
//! ## Features
//!
//! - **Sphere Projection**: equirectangular video mapped onto an
//!   inverted-normal sphere viewed from its center
//! - **Session Management**: camera save/restore and global time-scale
//!   suspension around playback
//! - **Explicit Context**: no global state; the caller owns the scene world
//!   for the lifetime of a playback session
//! - **Configurable**: serde-based configuration loadable from RON or TOML
//!
//! ## Quick Start
//!
//! ```rust
//! use vrmedia::prelude::*;
//!
//! fn main() -> Result<(), PlayerError> {
//!     let mut world = SceneWorld::new();
//!
//!     let config = Configuration {
//!         video: VideoSettings::streamed("https://example.com/panorama.mp4"),
//!         ..Configuration::default()
//!     };
//!
//!     let mut player = ImmersivePlayer::new(&mut world, config)?;
//!     player.play(&mut world)?;
//!     // ... host engine drives frames and eventually reports end of stream:
//!     player.notify_loop_point(&mut world)?;
//!     Ok(())
//! }
//! ```
//!
//! Video decoding, GPU rendering, and network streaming are the host
//! engine's responsibility. This crate owns the scene-side orchestration:
//! geometry, placeholder material, camera handover, and the playback
//! lifecycle.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod render;
pub mod scene;
pub mod video;
pub mod player;
pub mod config;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        foundation::{
            color::Color,
            math::{Transform, Vec3},
            time::SimulationClock,
        },
        render::{
            layers::{Layer, LayerMask},
            material::{Material, Texture2D, UnlitMaterialParams},
            mesh::Mesh,
        },
        scene::{Camera, ObjectHandle, SceneError, SceneWorld},
        video::{AudioSource, PlaybackState, VideoPlayer, VideoSettings, VideoSource},
        player::{Configuration, ImmersivePlayer, PlayerError, PlayerState},
        config::{Config, ConfigError},
    };
}
