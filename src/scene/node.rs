use crate::scene::light::Light;
use crate::scene::mesh::Mesh;
use crate::scene::transform::Transform;
use crate::scene::{ObjectKey, TrackKey};

/// The data an object carries besides its transform.
#[derive(Debug, Clone)]
pub enum ObjectKind {
    Empty,
    Mesh(Mesh),
    Light(Light),
}

/// A scene object.
///
/// # Hierarchy
///
/// Objects form a tree through parent-child relationships:
/// - `parent`: Optional handle to the parent (None for root objects)
/// - `children`: List of child handles
///
/// # Animation
///
/// `animation` points at the object's keyframe track in the scene's
/// [`TrackStore`](crate::animation::TrackStore). Several objects may point
/// at the same track; writes go through
/// [`Scene::acquire_exclusive_track`](crate::scene::Scene::acquire_exclusive_track).
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,

    // === Core Hierarchy ===
    pub(crate) parent: Option<ObjectKey>,
    pub(crate) children: Vec<ObjectKey>,

    // === Core Spatial Data ===
    pub transform: Transform,

    // === Core State ===
    /// Static visibility, used when no visibility curve is keyed.
    pub visible: bool,

    pub kind: ObjectKind,

    pub(crate) animation: Option<TrackKey>,
}

impl SceneObject {
    #[must_use]
    pub fn new(name: &str, kind: ObjectKind) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            visible: true,
            kind,
            animation: None,
        }
    }

    #[must_use]
    pub fn empty(name: &str) -> Self {
        Self::new(name, ObjectKind::Empty)
    }

    #[must_use]
    pub fn mesh(name: &str, mesh: Mesh) -> Self {
        Self::new(name, ObjectKind::Mesh(mesh))
    }

    #[must_use]
    pub fn light(name: &str, light: Light) -> Self {
        Self::new(name, ObjectKind::Light(light))
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<ObjectKey> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[ObjectKey] {
        &self.children
    }

    /// Handle of the animation track bound to this object, if any.
    #[inline]
    #[must_use]
    pub fn animation(&self) -> Option<TrackKey> {
        self.animation
    }

    #[inline]
    #[must_use]
    pub fn is_light(&self) -> bool {
        matches!(self.kind, ObjectKind::Light(_))
    }

    #[must_use]
    pub fn as_mesh(&self) -> Option<&Mesh> {
        match &self.kind {
            ObjectKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn as_mesh_mut(&mut self) -> Option<&mut Mesh> {
        match &mut self.kind {
            ObjectKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_light(&self) -> Option<&Light> {
        match &self.kind {
            ObjectKind::Light(light) => Some(light),
            _ => None,
        }
    }
}
