//! Scene Model
//!
//! A minimal, explicit stand-in for the host editor's scene graph:
//! - [`SceneObject`]: named object with hierarchy, transform and a component
//! - [`Transform`]: local position, rotation and scale
//! - [`Mesh`]: editable mesh with vertex/face selection
//! - [`Light`]: point and area lights
//! - [`Material`]: surface material referenced by mesh slots
//! - [`Scene`]: object arena, shared animation tracks and selection state

pub mod node;
pub mod transform;
pub mod scene;
pub mod mesh;
pub mod light;
pub mod material;

pub use node::{ObjectKind, SceneObject};
pub use transform::Transform;
pub use scene::Scene;
pub use mesh::{BoundingBox, Face, Mesh};
pub use light::{Light, LightKind, LightShape};
pub use material::Material;

use slotmap::new_key_type;

new_key_type! {
    /// Handle to an object in a [`Scene`].
    pub struct ObjectKey;
    /// Handle to an animation track in a [`TrackStore`](crate::animation::TrackStore).
    pub struct TrackKey;
    pub struct MaterialKey;
}
