//! Immersive 360° playback demo
//!
//! Builds a small scene with its own gameplay camera, then runs a full
//! immersive session against it: construct, play, deliver the host's
//! end-of-stream notification, and show that the scene comes back exactly
//! as it was. The host engine's decode/render loop is simulated by a few
//! clock ticks.

use vrmedia::prelude::*;

const CONFIG_PATH: &str = "panorama_app/config/panorama.ron";

fn main() -> Result<(), PlayerError> {
    vrmedia::foundation::logging::init();

    let mut world = SceneWorld::new();

    // A pre-existing scene: an active gameplay camera and a disabled
    // secondary one, both of which the player must hand back untouched.
    let main_camera = world.spawn("MainCamera");
    world.attach_camera(main_camera, Camera::default())?;

    let debug_camera = world.spawn("DebugCamera");
    let mut secondary = Camera::default();
    secondary.enabled = false;
    world.attach_camera(debug_camera, secondary)?;

    let config = load_configuration();
    let looping = config.video.looping;

    let mut player = ImmersivePlayer::new(&mut world, config)?;
    log::info!(
        "Constructed player (host {:?}, state {:?})",
        player.host(),
        player.state()
    );

    player.play(&mut world)?;
    log::info!(
        "Playing: time scale {}, main camera enabled: {}",
        world.clock().time_scale(),
        world.camera(main_camera).map(|c| c.enabled).unwrap_or(false)
    );

    // Stand in for the host's frame loop; the frozen clock accumulates
    // nothing while the immersive view is up.
    for _ in 0..3 {
        world.clock_mut().advance(1.0 / 60.0);
    }

    let auto_stopped = player.notify_loop_point(&mut world)?;
    log::info!("Loop point delivered, auto-stop: {}", auto_stopped);

    if looping {
        // A looping stream never stops itself; end the session explicitly.
        player.stop(&mut world)?;
    }

    log::info!(
        "Session over: state {:?}, time scale {}, main camera enabled: {}, objects left: {}",
        player.state(),
        world.clock().time_scale(),
        world.camera(main_camera).map(|c| c.enabled).unwrap_or(false),
        world.object_count()
    );

    Ok(())
}

/// Load the demo configuration, falling back to a built-in one
fn load_configuration() -> Configuration {
    match Configuration::load_from_file(CONFIG_PATH) {
        Ok(config) => {
            log::info!("Loaded configuration from {}", CONFIG_PATH);
            config
        }
        Err(err) => {
            log::warn!("Using built-in configuration ({})", err);
            Configuration {
                position: Vec3::new(0.0, 1.6, 0.0),
                background_color: Color::rgb(0.02, 0.02, 0.05),
                culling_mask: LayerMask::of(Layer::new(8)),
                player_layer: Layer::new(8),
                video: VideoSettings::streamed("https://example.com/sample-360-video.mp4")
                    .looping(true),
            }
        }
    }
}
