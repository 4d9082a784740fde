//! Scene world - objects, components, and the session context
//!
//! The scene world is the explicit, caller-owned replacement for engine-wide
//! global state: it holds the object registry, the camera registry, and the
//! global simulation clock. One world spans one playback session; passing it
//! into `play`/`stop` makes the lifetime of the shared state visible at the
//! call site instead of hiding it in module-level statics.

pub mod object;
pub mod camera;
pub mod world;

pub use object::{ObjectHandle, SceneObject, SphereCollider};
pub use camera::Camera;
pub use world::{SceneError, SceneWorld};
