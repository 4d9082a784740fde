//! Scene objects and their component slots

use crate::foundation::math::Transform;
use crate::render::layers::Layer;
use crate::render::material::Material;
use crate::render::mesh::Mesh;
use crate::video::{AudioSource, VideoPlayer};

use super::camera::Camera;

slotmap::new_key_type! {
    /// Generational handle to a scene object
    ///
    /// Stays valid across unrelated insertions and becomes stale (never
    /// aliased) once the object is destroyed.
    pub struct ObjectHandle;
}

/// Sphere collision volume
///
/// Primitive creation attaches one of these; the immersive player removes it
/// again because the video sphere must not participate in scene physics.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereCollider {
    /// Collision radius in local units
    pub radius: f32,
}

/// A named object in the scene
///
/// Carries a transform (local to its parent, if any), a render layer, and
/// optional component slots. Objects are created and mutated through the
/// [`SceneWorld`](super::SceneWorld) factory surface, which maintains the
/// parent/child links.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub(crate) name: String,
    pub(crate) transform: Transform,
    pub(crate) layer: Layer,
    pub(crate) parent: Option<ObjectHandle>,
    pub(crate) children: Vec<ObjectHandle>,
    pub(crate) mesh: Option<Mesh>,
    pub(crate) material: Option<Material>,
    pub(crate) collider: Option<SphereCollider>,
    pub(crate) camera: Option<Camera>,
    pub(crate) video: Option<VideoPlayer>,
    pub(crate) audio: Option<AudioSource>,
}

impl SceneObject {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            layer: Layer::default(),
            parent: None,
            children: Vec::new(),
            mesh: None,
            material: None,
            collider: None,
            camera: None,
            video: None,
            audio: None,
        }
    }

    /// Object name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Transform relative to the parent (world transform for root objects)
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Render layer this object belongs to
    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// Parent object, if any
    pub fn parent(&self) -> Option<ObjectHandle> {
        self.parent
    }

    /// Child objects
    pub fn children(&self) -> &[ObjectHandle] {
        &self.children
    }

    /// Attached mesh, if any
    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    /// Attached surface material, if any
    pub fn material(&self) -> Option<&Material> {
        self.material.as_ref()
    }

    /// Attached collision volume, if any
    pub fn collider(&self) -> Option<&SphereCollider> {
        self.collider.as_ref()
    }

    /// Attached camera component, if any
    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    /// Attached video player component, if any
    pub fn video_player(&self) -> Option<&VideoPlayer> {
        self.video.as_ref()
    }

    /// Attached audio source component, if any
    pub fn audio_source(&self) -> Option<&AudioSource> {
        self.audio.as_ref()
    }
}
