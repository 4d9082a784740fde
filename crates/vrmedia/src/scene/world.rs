//! Scene world - object registry, camera registry, and simulation clock

use thiserror::Error;

use crate::foundation::collections::HandleMap;
use crate::foundation::math::{Transform, Vec3};
use crate::foundation::time::SimulationClock;
use crate::render::layers::Layer;
use crate::render::material::{Material, UnlitMaterialParams};
use crate::render::mesh::Mesh;
use crate::video::{AudioSource, VideoPlayer};

use super::camera::Camera;
use super::object::{ObjectHandle, SceneObject, SphereCollider};

/// Radius of the unit-diameter sphere primitive in local units
pub const SPHERE_PRIMITIVE_RADIUS: f32 = 0.5;

/// Longitude divisions of the sphere primitive
const SPHERE_PRIMITIVE_SECTORS: u32 = 32;

/// Latitude divisions of the sphere primitive
const SPHERE_PRIMITIVE_STACKS: u32 = 16;

/// Errors surfaced by scene-world operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Handle refers to a destroyed or never-created object
    #[error("scene object not found (stale or destroyed handle)")]
    ObjectNotFound,

    /// Component slot is already occupied
    #[error("object already has a {0} component")]
    ComponentExists(&'static str),

    /// Component slot is empty
    #[error("object has no {0} component")]
    ComponentMissing(&'static str),

    /// Camera clip planes must satisfy 0 < near < far
    #[error("invalid camera clip planes: near {near}, far {far}")]
    InvalidClipPlanes {
        /// Rejected near plane distance
        near: f32,
        /// Rejected far plane distance
        far: f32,
    },

    /// Reparenting would make an object its own ancestor
    #[error("reparenting would create a cycle in the scene graph")]
    WouldCreateCycle,
}

/// The scene world: object registry, camera registry, and global clock
///
/// One `SceneWorld` is the explicit context for one playback session. The
/// caller owns it and passes it into the immersive player's lifecycle
/// methods; nothing in this crate holds global state.
///
/// Object creation follows a factory pattern: `spawn` and
/// [`create_sphere_primitive`](Self::create_sphere_primitive) return owned
/// handles, and components are attached through `attach_*` methods that
/// reject double attachment.
pub struct SceneWorld {
    objects: HandleMap<ObjectHandle, SceneObject>,
    clock: SimulationClock,
}

impl SceneWorld {
    /// Create an empty world with a clock running at the normal rate
    pub fn new() -> Self {
        Self {
            objects: HandleMap::with_key(),
            clock: SimulationClock::new(),
        }
    }

    // --- factory surface ---

    /// Create an empty object with an identity transform on layer 0
    pub fn spawn(&mut self, name: impl Into<String>) -> ObjectHandle {
        let object = SceneObject::new(name);
        log::debug!("Spawned scene object '{}'", object.name);
        self.objects.insert(object)
    }

    /// Create a unit-diameter sphere primitive
    ///
    /// Ships with the sphere mesh, a default unlit surface, and a sphere
    /// collision volume, like an engine primitive factory would produce.
    pub fn create_sphere_primitive(&mut self, name: impl Into<String>) -> ObjectHandle {
        let handle = self.spawn(name);
        let object = &mut self.objects[handle];
        object.mesh = Some(Mesh::uv_sphere(
            SPHERE_PRIMITIVE_RADIUS,
            SPHERE_PRIMITIVE_SECTORS,
            SPHERE_PRIMITIVE_STACKS,
        ));
        object.material = Some(Material::unlit(UnlitMaterialParams::default()));
        object.collider = Some(SphereCollider {
            radius: SPHERE_PRIMITIVE_RADIUS,
        });
        handle
    }

    /// Attach a camera component
    pub fn attach_camera(&mut self, handle: ObjectHandle, camera: Camera) -> Result<(), SceneError> {
        let object = self.get_mut(handle)?;
        if object.camera.is_some() {
            return Err(SceneError::ComponentExists("camera"));
        }
        object.camera = Some(camera);
        Ok(())
    }

    /// Attach a video player component
    pub fn attach_video_player(
        &mut self,
        handle: ObjectHandle,
        player: VideoPlayer,
    ) -> Result<(), SceneError> {
        let object = self.get_mut(handle)?;
        if object.video.is_some() {
            return Err(SceneError::ComponentExists("video player"));
        }
        object.video = Some(player);
        Ok(())
    }

    /// Attach an audio source component
    pub fn attach_audio_source(
        &mut self,
        handle: ObjectHandle,
        audio: AudioSource,
    ) -> Result<(), SceneError> {
        let object = self.get_mut(handle)?;
        if object.audio.is_some() {
            return Err(SceneError::ComponentExists("audio source"));
        }
        object.audio = Some(audio);
        Ok(())
    }

    // --- object service ---

    /// Whether the handle refers to a live object
    pub fn contains(&self, handle: ObjectHandle) -> bool {
        self.objects.contains_key(handle)
    }

    /// Number of live objects
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Borrow an object
    pub fn get(&self, handle: ObjectHandle) -> Result<&SceneObject, SceneError> {
        self.objects.get(handle).ok_or(SceneError::ObjectNotFound)
    }

    fn get_mut(&mut self, handle: ObjectHandle) -> Result<&mut SceneObject, SceneError> {
        self.objects.get_mut(handle).ok_or(SceneError::ObjectNotFound)
    }

    /// Set an object's transform
    pub fn set_transform(
        &mut self,
        handle: ObjectHandle,
        transform: Transform,
    ) -> Result<(), SceneError> {
        self.get_mut(handle)?.transform = transform;
        Ok(())
    }

    /// Set an object's position, keeping rotation and scale
    pub fn set_position(&mut self, handle: ObjectHandle, position: Vec3) -> Result<(), SceneError> {
        self.get_mut(handle)?.transform.position = position;
        Ok(())
    }

    /// Set the render layer an object belongs to
    pub fn set_layer(&mut self, handle: ObjectHandle, layer: Layer) -> Result<(), SceneError> {
        self.get_mut(handle)?.layer = layer;
        Ok(())
    }

    /// Parent a child object under another object
    ///
    /// The child's transform becomes local to the parent. Reparenting under
    /// the child's own subtree is rejected.
    pub fn set_parent(
        &mut self,
        child: ObjectHandle,
        parent: ObjectHandle,
    ) -> Result<(), SceneError> {
        if !self.objects.contains_key(child) || !self.objects.contains_key(parent) {
            return Err(SceneError::ObjectNotFound);
        }

        let mut cursor = Some(parent);
        while let Some(ancestor) = cursor {
            if ancestor == child {
                return Err(SceneError::WouldCreateCycle);
            }
            cursor = self.objects[ancestor].parent;
        }

        if let Some(old_parent) = self.objects[child].parent {
            if let Some(object) = self.objects.get_mut(old_parent) {
                object.children.retain(|&c| c != child);
            }
        }

        self.objects[child].parent = Some(parent);
        self.objects[parent].children.push(child);
        Ok(())
    }

    /// Remove an object's collision volume, if it has one
    ///
    /// Returns whether a collider was actually removed.
    pub fn remove_collider(&mut self, handle: ObjectHandle) -> Result<bool, SceneError> {
        Ok(self.get_mut(handle)?.collider.take().is_some())
    }

    /// Destroy an object and its entire subtree
    ///
    /// Children, grandchildren, and all attached components go with it. The
    /// handle (and every handle into the subtree) becomes stale.
    pub fn destroy(&mut self, handle: ObjectHandle) -> Result<(), SceneError> {
        if !self.objects.contains_key(handle) {
            return Err(SceneError::ObjectNotFound);
        }

        if let Some(parent) = self.objects[handle].parent {
            if let Some(object) = self.objects.get_mut(parent) {
                object.children.retain(|&c| c != handle);
            }
        }

        self.destroy_subtree(handle);
        Ok(())
    }

    fn destroy_subtree(&mut self, handle: ObjectHandle) {
        if let Some(object) = self.objects.remove(handle) {
            log::trace!("Destroyed scene object '{}'", object.name);
            for child in object.children {
                self.destroy_subtree(child);
            }
        }
    }

    // --- renderer surface ---

    /// Mutably borrow an object's mesh
    pub fn mesh_mut(&mut self, handle: ObjectHandle) -> Result<&mut Mesh, SceneError> {
        self.get_mut(handle)?
            .mesh
            .as_mut()
            .ok_or(SceneError::ComponentMissing("mesh"))
    }

    /// Replace an object's surface material
    pub fn set_material(
        &mut self,
        handle: ObjectHandle,
        material: Material,
    ) -> Result<(), SceneError> {
        self.get_mut(handle)?.material = Some(material);
        Ok(())
    }

    // --- camera registry ---

    /// Enumerate every object carrying a camera component
    ///
    /// Order is arbitrary. Includes disabled cameras; the enabled flag is on
    /// the component.
    pub fn cameras(&self) -> impl Iterator<Item = (ObjectHandle, &Camera)> + '_ {
        self.objects
            .iter()
            .filter_map(|(handle, object)| object.camera.as_ref().map(|camera| (handle, camera)))
    }

    /// Borrow an object's camera component
    pub fn camera(&self, handle: ObjectHandle) -> Result<&Camera, SceneError> {
        self.get(handle)?
            .camera
            .as_ref()
            .ok_or(SceneError::ComponentMissing("camera"))
    }

    /// Enable or disable an object's camera
    pub fn set_camera_enabled(
        &mut self,
        handle: ObjectHandle,
        enabled: bool,
    ) -> Result<(), SceneError> {
        let camera = self
            .get_mut(handle)?
            .camera
            .as_mut()
            .ok_or(SceneError::ComponentMissing("camera"))?;
        camera.enabled = enabled;
        Ok(())
    }

    // --- video / audio ---

    /// Borrow an object's video player component
    pub fn video_player(&self, handle: ObjectHandle) -> Result<&VideoPlayer, SceneError> {
        self.get(handle)?
            .video
            .as_ref()
            .ok_or(SceneError::ComponentMissing("video player"))
    }

    /// Mutably borrow an object's video player component
    pub fn video_player_mut(&mut self, handle: ObjectHandle) -> Result<&mut VideoPlayer, SceneError> {
        self.get_mut(handle)?
            .video
            .as_mut()
            .ok_or(SceneError::ComponentMissing("video player"))
    }

    /// Borrow an object's audio source component
    pub fn audio_source(&self, handle: ObjectHandle) -> Result<&AudioSource, SceneError> {
        self.get(handle)?
            .audio
            .as_ref()
            .ok_or(SceneError::ComponentMissing("audio source"))
    }

    // --- global clock ---

    /// Borrow the simulation clock
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Mutably borrow the simulation clock
    pub fn clock_mut(&mut self) -> &mut SimulationClock {
        &mut self.clock
    }
}

impl Default for SceneWorld {
    fn default() -> Self {
        Self::new()
    }
}
