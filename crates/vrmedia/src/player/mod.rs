//! Immersive player - configuration and playback lifecycle
//!
//! Orchestrates one immersive viewing session: builds the inverted-normal
//! video sphere with its interior camera, then manages the handover from the
//! scene's own cameras (and the simulation clock) to the immersive view and
//! back.
//!
//! Lifecycle: `new` (Constructed) → `play` (Playing) → `stop` (Stopped,
//! terminal). `pause`/`resume` suspend the decode pipeline without leaving
//! the Playing state, and `notify_loop_point` is the host's end-of-stream
//! entry point that auto-stops non-looping sessions exactly once.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::foundation::color::Color;
use crate::foundation::math::{Transform, Vec3};
use crate::render::layers::{Layer, LayerMask};
use crate::render::material::{Material, Texture2D, UnlitMaterialParams};
use crate::scene::{Camera, ObjectHandle, SceneError, SceneWorld};
use crate::video::{AudioOutputMode, AudioSource, VideoError, VideoPlayer, VideoSettings};

/// Uniform magnitude of the host sphere's local scale
///
/// The X component is negated: mirroring the sphere along one axis flips its
/// winding so the equirectangular frame reads correctly from the inside.
pub const HOST_SCALE: f32 = 100.0;

/// Near clip plane of the interior camera, in world units
const CAMERA_NEAR_CLIP: f32 = 1.0;

/// Far clip plane of the interior camera, generous enough to contain the
/// scaled sphere
const CAMERA_FAR_CLIP: f32 = 1000.0;

/// Player configuration, consumed once at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// World position of the video sphere and its interior camera
    pub position: Vec3,

    /// Color of the sphere surface while the stream initializes
    pub background_color: Color,

    /// Render layers the interior camera draws
    pub culling_mask: LayerMask,

    /// Render layer the video sphere belongs to
    pub player_layer: Layer,

    /// Video source and playback flags
    pub video: VideoSettings,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            background_color: Color::BLACK,
            culling_mask: LayerMask::everything(),
            player_layer: Layer::default(),
            video: VideoSettings::default(),
        }
    }
}

impl Config for Configuration {}

/// Player lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// Host and camera built, video not yet playing
    Constructed,
    /// Immersive view active: scene cameras disabled, clock frozen
    Playing,
    /// Terminal: host destroyed, scene state restored
    Stopped,
}

/// Errors surfaced by the player lifecycle
#[derive(Error, Debug)]
pub enum PlayerError {
    /// A playback session is already in flight
    #[error("playback session already in flight")]
    AlreadyPlaying,

    /// The operation requires an active playback session
    #[error("player is not playing")]
    NotPlaying,

    /// The player has been torn down
    #[error("player has already been stopped")]
    AlreadyStopped,

    /// The configured video source cannot be played
    #[error("invalid video source: {0}")]
    InvalidVideoSource(#[source] VideoError),

    /// Video pipeline error
    #[error(transparent)]
    Video(#[from] VideoError),

    /// Scene world error
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Immersive 360° video player
///
/// Owns the handles to the host sphere and its interior camera, plus the
/// state needed to hand the scene back exactly as it was: the enabled-flag
/// snapshot of every pre-existing camera and the time-scale memento.
///
/// All methods take the [`SceneWorld`] explicitly; the player holds no
/// references into it and no global state.
pub struct ImmersivePlayer {
    config: Configuration,
    host: ObjectHandle,
    camera: ObjectHandle,
    state: PlayerState,
    camera_snapshot: HashMap<ObjectHandle, bool>,
    time_scale_memento: Option<f32>,
}

impl ImmersivePlayer {
    /// Build the video sphere and its interior camera
    ///
    /// Allocates the host sphere on the configured layer, mirrored along X
    /// and scaled by [`HOST_SCALE`], at the configured position; strips the
    /// primitive's collision volume; attaches the video player (routing
    /// audio through a fresh audio source unless muted); inverts the sphere
    /// mesh so its interior faces render; assigns the solid-color unlit
    /// placeholder material; and parents a disabled camera at the sphere's
    /// local origin with the configured culling mask.
    ///
    /// Fails fast with [`PlayerError::InvalidVideoSource`] before touching
    /// the scene if the source reference is malformed or empty.
    pub fn new(world: &mut SceneWorld, config: Configuration) -> Result<Self, PlayerError> {
        let mut video = VideoPlayer::new(config.video.clone())
            .map_err(PlayerError::InvalidVideoSource)?;

        let host = world.create_sphere_primitive("VrMediaSurface");
        world.set_layer(host, config.player_layer)?;
        world.set_transform(
            host,
            Transform::from_position_scale(
                config.position,
                Vec3::new(-HOST_SCALE, HOST_SCALE, HOST_SCALE),
            ),
        )?;

        // The primitive's collision volume would interfere with scene
        // physics and serves no purpose on a video surface.
        world.remove_collider(host)?;

        if config.video.mute {
            video.set_audio_output(AudioOutputMode::Mute);
        } else {
            world.attach_audio_source(host, AudioSource::new())?;
            video.set_audio_output(AudioOutputMode::AudioSource(host));
        }
        world.attach_video_player(host, video)?;

        world.mesh_mut(host)?.invert_normals();

        let placeholder = Material::unlit(UnlitMaterialParams {
            color: config.background_color,
        })
        .with_base_color_texture(Texture2D::solid(config.background_color))
        .with_name("VrMediaPlaceholder");
        world.set_material(host, placeholder)?;

        // Interior camera at the sphere's local origin. Disabled until play:
        // the scene's own cameras keep rendering in the Constructed state.
        let camera = world.spawn("VrMediaCamera");
        world.set_parent(camera, host)?;
        let mut interior = Camera::new(config.culling_mask, CAMERA_NEAR_CLIP, CAMERA_FAR_CLIP)?;
        interior.enabled = false;
        world.attach_camera(camera, interior)?;

        log::info!(
            "Immersive player constructed on layer {} at {:?}",
            config.player_layer.index(),
            config.position
        );

        Ok(Self {
            config,
            host,
            camera,
            state: PlayerState::Constructed,
            camera_snapshot: HashMap::new(),
            time_scale_memento: None,
        })
    }

    /// The configuration this player was built from
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Handle of the host sphere object
    pub fn host(&self) -> ObjectHandle {
        self.host
    }

    /// Handle of the interior camera object
    pub fn camera(&self) -> ObjectHandle {
        self.camera
    }

    /// Current lifecycle state
    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Whether a playback session is in flight
    pub fn is_playing(&self) -> bool {
        self.state == PlayerState::Playing
    }

    /// Start the immersive session
    ///
    /// Snapshots the enabled flag of every camera currently in the scene and
    /// disables them, enables the interior camera, saves the global time
    /// scale and freezes it at zero, then starts video playback. The
    /// snapshot is rebuilt from scratch each session - flags from an earlier
    /// cycle can never leak in.
    pub fn play(&mut self, world: &mut SceneWorld) -> Result<(), PlayerError> {
        match self.state {
            PlayerState::Playing => return Err(PlayerError::AlreadyPlaying),
            PlayerState::Stopped => return Err(PlayerError::AlreadyStopped),
            PlayerState::Constructed => {}
        }

        self.camera_snapshot = world
            .cameras()
            .filter(|(handle, _)| *handle != self.camera)
            .map(|(handle, camera)| (handle, camera.enabled))
            .collect();

        let snapshotted: Vec<ObjectHandle> = self.camera_snapshot.keys().copied().collect();
        for handle in snapshotted {
            world.set_camera_enabled(handle, false)?;
        }
        world.set_camera_enabled(self.camera, true)?;

        let clock = world.clock_mut();
        self.time_scale_memento = Some(clock.time_scale());
        clock.set_time_scale(0.0);

        world.video_player_mut(self.host)?.play();

        self.state = PlayerState::Playing;
        log::info!(
            "Immersive playback started ({} scene cameras suspended)",
            self.camera_snapshot.len()
        );
        Ok(())
    }

    /// Suspend the decode pipeline without leaving the immersive view
    ///
    /// Cameras and time scale stay untouched; this is not a state
    /// transition.
    pub fn pause(&mut self, world: &mut SceneWorld) -> Result<(), PlayerError> {
        if self.state != PlayerState::Playing {
            return Err(PlayerError::NotPlaying);
        }
        world.video_player_mut(self.host)?.pause()?;
        Ok(())
    }

    /// Resume a paused decode pipeline
    pub fn resume(&mut self, world: &mut SceneWorld) -> Result<(), PlayerError> {
        if self.state != PlayerState::Playing {
            return Err(PlayerError::NotPlaying);
        }
        world.video_player_mut(self.host)?.resume()?;
        Ok(())
    }

    /// End the session and restore the scene
    ///
    /// Valid from `Playing` or `Constructed`. Restores every snapshotted
    /// camera to its pre-play enabled flag and clears the snapshot, restores
    /// the saved time scale, stops video playback (disarming the loop-point
    /// notification), and destroys the host object, which cascades to the
    /// interior camera and all attached components.
    pub fn stop(&mut self, world: &mut SceneWorld) -> Result<(), PlayerError> {
        match self.state {
            PlayerState::Stopped => return Err(PlayerError::AlreadyStopped),
            PlayerState::Constructed | PlayerState::Playing => {}
        }

        for (handle, enabled) in self.camera_snapshot.drain() {
            // A camera destroyed mid-session is skipped, not resurrected.
            if world.contains(handle) {
                world.set_camera_enabled(handle, enabled)?;
            }
        }

        if let Some(scale) = self.time_scale_memento.take() {
            world.clock_mut().set_time_scale(scale);
        }

        world.video_player_mut(self.host)?.stop();
        world.destroy(self.host)?;

        self.state = PlayerState::Stopped;
        log::info!("Immersive playback stopped, scene state restored");
        Ok(())
    }

    /// Host-engine callback: the video stream reached its end
    ///
    /// For a non-looping session this performs the stop transition exactly
    /// once and returns `true`. Looping sessions, duplicate reports, and
    /// reports arriving after teardown are ignored (`Ok(false)`) rather than
    /// treated as errors - the host owes no ordering guarantees for late
    /// callbacks.
    pub fn notify_loop_point(&mut self, world: &mut SceneWorld) -> Result<bool, PlayerError> {
        if self.state != PlayerState::Playing {
            log::debug!("Loop point notification ignored in state {:?}", self.state);
            return Ok(false);
        }

        let should_stop = world.video_player_mut(self.host)?.reach_loop_point();
        if should_stop {
            log::debug!("Non-looping stream finished, stopping session");
            self.stop(world)?;
        }
        Ok(should_stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::PlaybackState;

    fn test_configuration() -> Configuration {
        Configuration {
            position: Vec3::new(0.0, 1.6, 0.0),
            background_color: Color::rgb(0.1, 0.2, 0.3),
            culling_mask: LayerMask::of(Layer::new(8)),
            player_layer: Layer::new(8),
            video: VideoSettings::streamed("https://example.com/pano.mp4"),
        }
    }

    fn looping_configuration() -> Configuration {
        Configuration {
            video: VideoSettings::streamed("https://example.com/pano.mp4").looping(true),
            ..test_configuration()
        }
    }

    /// Spawn `flags.len()` cameras with the given enabled flags
    fn spawn_cameras(world: &mut SceneWorld, flags: &[bool]) -> Vec<ObjectHandle> {
        flags
            .iter()
            .enumerate()
            .map(|(i, &enabled)| {
                let handle = world.spawn(format!("Camera{}", i));
                let mut camera = Camera::default();
                camera.enabled = enabled;
                world.attach_camera(handle, camera).unwrap();
                handle
            })
            .collect()
    }

    #[test]
    fn test_construction_sets_layer_and_winding_flip_scale() {
        let mut world = SceneWorld::new();
        let player = ImmersivePlayer::new(&mut world, test_configuration()).unwrap();

        let host = world.get(player.host()).unwrap();
        assert_eq!(host.layer(), Layer::new(8), "Host should sit on the player layer");

        let scale = host.transform().scale;
        assert!(scale.x < 0.0, "X scale must be negative (winding flip)");
        assert!(scale.y > 0.0 && scale.z > 0.0, "Y/Z scale must be positive");
        assert_eq!(host.transform().position, Vec3::new(0.0, 1.6, 0.0));
    }

    #[test]
    fn test_construction_strips_collider_and_inverts_normals() {
        let mut world = SceneWorld::new();
        let player = ImmersivePlayer::new(&mut world, test_configuration()).unwrap();

        let host = world.get(player.host()).unwrap();
        assert!(host.collider().is_none(), "Collision volume should be removed");

        // Inverted sphere: normals point toward the center
        let mesh = host.mesh().unwrap();
        for vertex in &mesh.vertices {
            let dot = vertex.normal[0] * vertex.position[0]
                + vertex.normal[1] * vertex.position[1]
                + vertex.normal[2] * vertex.position[2];
            assert!(dot < 0.0, "Normals should point inward after construction");
        }
    }

    #[test]
    fn test_construction_builds_placeholder_material() {
        let mut world = SceneWorld::new();
        let config = test_configuration();
        let expected = config.background_color.to_rgba8();
        let player = ImmersivePlayer::new(&mut world, config).unwrap();

        let host = world.get(player.host()).unwrap();
        let texture = host.material().unwrap().base_color_texture.as_ref().unwrap();
        assert_eq!(texture.width(), 1);
        assert_eq!(texture.height(), 1);
        assert_eq!(texture.pixel(0, 0), expected);
    }

    #[test]
    fn test_construction_parents_disabled_interior_camera() {
        let mut world = SceneWorld::new();
        let player = ImmersivePlayer::new(&mut world, test_configuration()).unwrap();

        let camera_object = world.get(player.camera()).unwrap();
        assert_eq!(camera_object.parent(), Some(player.host()));
        assert_eq!(
            camera_object.transform().position,
            Vec3::zeros(),
            "Interior camera sits at the host's local origin"
        );

        let camera = camera_object.camera().unwrap();
        assert!(!camera.enabled, "Interior camera starts disabled");
        assert_eq!(camera.culling_mask, LayerMask::of(Layer::new(8)));
        assert_eq!(camera.near_clip, 1.0);
        assert_eq!(camera.far_clip, 1000.0);
    }

    #[test]
    fn test_audio_routing_respects_mute_flag() {
        let mut world = SceneWorld::new();
        let config = Configuration {
            video: VideoSettings::streamed("https://example.com/pano.mp4").muted(true),
            ..test_configuration()
        };
        let player = ImmersivePlayer::new(&mut world, config).unwrap();
        let host = world.get(player.host()).unwrap();
        assert!(host.audio_source().is_none(), "Muted player attaches no audio source");
        assert_eq!(
            host.video_player().unwrap().audio_output(),
            AudioOutputMode::Mute
        );

        let mut world = SceneWorld::new();
        let player = ImmersivePlayer::new(&mut world, test_configuration()).unwrap();
        let host = world.get(player.host()).unwrap();
        assert!(host.audio_source().is_some());
        assert_eq!(
            host.video_player().unwrap().audio_output(),
            AudioOutputMode::AudioSource(player.host())
        );
    }

    #[test]
    fn test_invalid_source_fails_before_scene_mutation() {
        let mut world = SceneWorld::new();
        let config = Configuration {
            video: VideoSettings::streamed(""),
            ..test_configuration()
        };

        let result = ImmersivePlayer::new(&mut world, config);
        assert!(matches!(result, Err(PlayerError::InvalidVideoSource(_))));
        assert_eq!(world.object_count(), 0, "Failed construction must not leak objects");
    }

    #[test]
    fn test_camera_flags_restored_after_play_stop() {
        for flags in [&[][..], &[true][..], &[true, false, true, false, true][..]] {
            let mut world = SceneWorld::new();
            let cameras = spawn_cameras(&mut world, flags);

            let mut player = ImmersivePlayer::new(&mut world, test_configuration()).unwrap();
            player.play(&mut world).unwrap();

            for &handle in &cameras {
                assert!(
                    !world.camera(handle).unwrap().enabled,
                    "All scene cameras should be disabled during playback"
                );
            }
            assert!(world.camera(player.camera()).unwrap().enabled);

            player.stop(&mut world).unwrap();

            for (&handle, &expected) in cameras.iter().zip(flags) {
                assert_eq!(
                    world.camera(handle).unwrap().enabled,
                    expected,
                    "Camera flag should be restored to its pre-play value"
                );
            }
        }
    }

    #[test]
    fn test_time_scale_restored_after_play_stop() {
        for scale in [1.0_f32, 0.25, 0.0, -2.0] {
            let mut world = SceneWorld::new();
            world.clock_mut().set_time_scale(scale);
            let observed = world.clock().time_scale();

            let mut player = ImmersivePlayer::new(&mut world, test_configuration()).unwrap();
            player.play(&mut world).unwrap();
            assert_eq!(world.clock().time_scale(), 0.0, "Playback should freeze the clock");

            player.stop(&mut world).unwrap();
            assert_eq!(
                world.clock().time_scale(),
                observed,
                "Stop should restore the observed (clamped) pre-play scale"
            );
        }
    }

    #[test]
    fn test_non_looping_loop_point_stops_exactly_once() {
        let mut world = SceneWorld::new();
        spawn_cameras(&mut world, &[true]);

        let mut player = ImmersivePlayer::new(&mut world, test_configuration()).unwrap();
        let host = player.host();
        player.play(&mut world).unwrap();

        assert!(player.notify_loop_point(&mut world).unwrap());
        assert_eq!(player.state(), PlayerState::Stopped);
        assert!(!world.contains(host), "Host should be destroyed on auto-stop");

        // Late duplicate from the host: ignored, not an error
        assert!(!player.notify_loop_point(&mut world).unwrap());
    }

    #[test]
    fn test_looping_loop_point_keeps_playing() {
        let mut world = SceneWorld::new();
        let mut player = ImmersivePlayer::new(&mut world, looping_configuration()).unwrap();
        player.play(&mut world).unwrap();

        assert!(!player.notify_loop_point(&mut world).unwrap());
        assert_eq!(player.state(), PlayerState::Playing);
        assert!(world.contains(player.host()));
    }

    #[test]
    fn test_play_twice_rejected_without_snapshot_corruption() {
        let mut world = SceneWorld::new();
        let cameras = spawn_cameras(&mut world, &[true, false]);

        let mut player = ImmersivePlayer::new(&mut world, test_configuration()).unwrap();
        player.play(&mut world).unwrap();
        assert!(matches!(
            player.play(&mut world),
            Err(PlayerError::AlreadyPlaying)
        ));

        // The original flags survive the rejected second play
        player.stop(&mut world).unwrap();
        assert!(world.camera(cameras[0]).unwrap().enabled);
        assert!(!world.camera(cameras[1]).unwrap().enabled);
    }

    #[test]
    fn test_stop_twice_rejected() {
        let mut world = SceneWorld::new();
        let mut player = ImmersivePlayer::new(&mut world, test_configuration()).unwrap();
        player.play(&mut world).unwrap();
        player.stop(&mut world).unwrap();

        assert!(matches!(
            player.stop(&mut world),
            Err(PlayerError::AlreadyStopped)
        ));
        assert!(matches!(
            player.play(&mut world),
            Err(PlayerError::AlreadyStopped)
        ));
    }

    #[test]
    fn test_stop_from_constructed_tears_down() {
        let mut world = SceneWorld::new();
        world.clock_mut().set_time_scale(0.5);

        let mut player = ImmersivePlayer::new(&mut world, test_configuration()).unwrap();
        let host = player.host();
        player.stop(&mut world).unwrap();

        assert!(!world.contains(host));
        assert_eq!(
            world.clock().time_scale(),
            0.5,
            "Clock untouched by a never-played session"
        );
    }

    #[test]
    fn test_pause_keeps_cameras_and_clock() {
        let mut world = SceneWorld::new();
        let cameras = spawn_cameras(&mut world, &[true]);

        let mut player = ImmersivePlayer::new(&mut world, test_configuration()).unwrap();
        player.play(&mut world).unwrap();
        player.pause(&mut world).unwrap();

        assert_eq!(player.state(), PlayerState::Playing, "Pause is not a state transition");
        assert_eq!(
            world.video_player(player.host()).unwrap().state(),
            PlaybackState::Paused
        );
        assert!(!world.camera(cameras[0]).unwrap().enabled);
        assert_eq!(world.clock().time_scale(), 0.0);

        player.resume(&mut world).unwrap();
        assert_eq!(
            world.video_player(player.host()).unwrap().state(),
            PlaybackState::Playing
        );
    }

    #[test]
    fn test_pause_requires_active_session() {
        let mut world = SceneWorld::new();
        let mut player = ImmersivePlayer::new(&mut world, test_configuration()).unwrap();
        assert!(matches!(
            player.pause(&mut world),
            Err(PlayerError::NotPlaying)
        ));
    }

    #[test]
    fn test_stop_destroys_interior_camera_with_host() {
        let mut world = SceneWorld::new();
        let mut player = ImmersivePlayer::new(&mut world, test_configuration()).unwrap();
        let camera = player.camera();
        player.play(&mut world).unwrap();
        player.stop(&mut world).unwrap();

        assert!(!world.contains(camera), "Cascade should take the interior camera");
        assert_eq!(
            world.cameras().count(),
            0,
            "Camera registry should no longer enumerate the interior camera"
        );
    }

    #[test]
    fn test_back_to_back_sessions_use_fresh_snapshots() {
        let mut world = SceneWorld::new();
        let cameras = spawn_cameras(&mut world, &[true, false]);

        let mut first = ImmersivePlayer::new(&mut world, test_configuration()).unwrap();
        first.play(&mut world).unwrap();
        first.stop(&mut world).unwrap();

        let mut second = ImmersivePlayer::new(&mut world, test_configuration()).unwrap();
        second.play(&mut world).unwrap();
        second.stop(&mut world).unwrap();

        assert!(world.camera(cameras[0]).unwrap().enabled);
        assert!(!world.camera(cameras[1]).unwrap().enabled);
    }
}
