use glam::{Affine3A, Quat, Vec3};
use slotmap::SlotMap;

use crate::animation::{AnimationTrack, Pose, TrackStore};
use crate::errors::{BuildupError, Result};
use crate::scene::material::Material;
use crate::scene::node::SceneObject;
use crate::scene::{MaterialKey, ObjectKey, TrackKey};

/// Scene graph
///
/// Pure data: the object arena with its hierarchy, the shared animation
/// tracks, the material pool and the editor selection (selected objects in
/// selection order plus one active object).
#[derive(Debug, Default)]
pub struct Scene {
    pub objects: SlotMap<ObjectKey, SceneObject>,
    pub root_objects: Vec<ObjectKey>,

    pub tracks: TrackStore,
    pub materials: SlotMap<MaterialKey, Material>,

    selection: Vec<ObjectKey>,
    active: Option<ObjectKey>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
            root_objects: Vec::new(),
            tracks: TrackStore::new(),
            materials: SlotMap::with_key(),
            selection: Vec::new(),
            active: None,
        }
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    /// Adds an object at the root of the scene.
    pub fn add_object(&mut self, object: SceneObject) -> ObjectKey {
        let key = self.objects.insert(object);
        self.root_objects.push(key);
        key
    }

    pub fn add_to_parent(&mut self, object: SceneObject, parent: ObjectKey) -> ObjectKey {
        let key = self.objects.insert(object);

        if let Some(p) = self.objects.get_mut(parent) {
            p.children.push(key);
        } else {
            log::warn!("Parent object not found, adding '{}' at the root", self.objects[key].name);
            self.root_objects.push(key);
            return key;
        }
        if let Some(c) = self.objects.get_mut(key) {
            c.parent = Some(parent);
        }

        key
    }

    /// Makes `child` a child of `parent`, keeping its local transform.
    pub fn attach(&mut self, child: ObjectKey, parent: ObjectKey) {
        if child == parent {
            log::warn!("Cannot attach an object to itself");
            return;
        }
        if !self.objects.contains_key(parent) {
            log::error!("Parent object not found during attach");
            return;
        }
        if self.is_ancestor(child, parent) {
            log::warn!("Cannot attach an object below its own descendant");
            return;
        }

        self.detach_from_parent(child);

        if let Some(p) = self.objects.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.objects.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    fn detach_from_parent(&mut self, key: ObjectKey) {
        let old_parent = self.objects.get(key).and_then(|o| o.parent);
        if let Some(p) = old_parent {
            if let Some(o) = self.objects.get_mut(p)
                && let Some(i) = o.children.iter().position(|&x| x == key)
            {
                o.children.remove(i);
            }
        } else if let Some(i) = self.root_objects.iter().position(|&x| x == key) {
            self.root_objects.remove(i);
        }
    }

    /// `true` if `ancestor` lies on the parent chain of `key` (or is `key`).
    #[must_use]
    pub fn is_ancestor(&self, ancestor: ObjectKey, key: ObjectKey) -> bool {
        let mut current = Some(key);
        while let Some(k) = current {
            if k == ancestor {
                return true;
            }
            current = self.objects.get(k).and_then(|o| o.parent);
        }
        false
    }

    /// Removes an object and its whole subtree, releasing their tracks.
    pub fn remove_object(&mut self, key: ObjectKey) {
        let children = if let Some(object) = self.objects.get(key) {
            object.children.clone()
        } else {
            return;
        };

        for child in children {
            self.remove_object(child);
        }

        self.detach_from_parent(key);
        self.release_track(key);
        self.selection.retain(|&k| k != key);
        if self.active == Some(key) {
            self.active = None;
        }

        self.objects.remove(key);
    }

    #[must_use]
    pub fn get(&self, key: ObjectKey) -> Option<&SceneObject> {
        self.objects.get(key)
    }

    pub fn get_mut(&mut self, key: ObjectKey) -> Option<&mut SceneObject> {
        self.objects.get_mut(key)
    }

    pub(crate) fn object(&self, key: ObjectKey) -> Result<&SceneObject> {
        self.objects.get(key).ok_or(BuildupError::ObjectNotFound)
    }

    pub(crate) fn object_mut(&mut self, key: ObjectKey) -> Result<&mut SceneObject> {
        self.objects.get_mut(key).ok_or(BuildupError::ObjectNotFound)
    }

    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<ObjectKey> {
        self.objects.iter().find(|(_, o)| o.name == name).map(|(k, _)| k)
    }

    /// Direct children of `key` that are lights.
    #[must_use]
    pub fn light_children(&self, key: ObjectKey) -> Vec<ObjectKey> {
        self.objects.get(key).map_or_else(Vec::new, |o| {
            o.children
                .iter()
                .copied()
                .filter(|&c| self.objects.get(c).is_some_and(SceneObject::is_light))
                .collect()
        })
    }

    // ========================================================================
    // World-space queries
    // ========================================================================

    /// World matrix of `key`, composed along its parent chain.
    #[must_use]
    pub fn world_matrix(&self, key: ObjectKey) -> Affine3A {
        let mut matrix = Affine3A::IDENTITY;
        let mut current = Some(key);
        while let Some(k) = current {
            let Some(object) = self.objects.get(k) else {
                break;
            };
            matrix = object.transform.local_matrix() * matrix;
            current = object.parent;
        }
        matrix
    }

    /// World rotation of `key`, ignoring scale.
    #[must_use]
    pub fn world_rotation(&self, key: ObjectKey) -> Quat {
        let mut rotation = Quat::IDENTITY;
        let mut current = Some(key);
        while let Some(k) = current {
            let Some(object) = self.objects.get(k) else {
                break;
            };
            rotation = object.transform.rotation * rotation;
            current = object.parent;
        }
        rotation.normalize()
    }

    /// World rotation of `key`'s parent, or `None` for root objects.
    #[must_use]
    pub fn parent_world_rotation(&self, key: ObjectKey) -> Option<Quat> {
        let parent = self.objects.get(key)?.parent?;
        Some(self.world_rotation(parent))
    }

    #[must_use]
    pub fn world_position(&self, key: ObjectKey) -> Vec3 {
        self.world_matrix(key).translation.into()
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Adds `key` to the selection (keeping selection order).
    pub fn select(&mut self, key: ObjectKey) {
        if self.objects.contains_key(key) && !self.selection.contains(&key) {
            self.selection.push(key);
        }
    }

    pub fn deselect_all(&mut self) {
        self.selection.clear();
    }

    /// Makes `key` the active object and selects it.
    pub fn set_active(&mut self, key: ObjectKey) {
        if self.objects.contains_key(key) {
            self.active = Some(key);
            self.select(key);
        }
    }

    #[must_use]
    pub fn active(&self) -> Option<ObjectKey> {
        self.active
    }

    #[must_use]
    pub fn selected(&self) -> &[ObjectKey] {
        &self.selection
    }

    // ========================================================================
    // Animation data
    // ========================================================================

    /// The track bound to `key`, if any.
    #[must_use]
    pub fn track(&self, key: ObjectKey) -> Option<&AnimationTrack> {
        let track_key = self.objects.get(key)?.animation?;
        self.tracks.get(track_key)
    }

    /// Returns a track `key` may write to without affecting other objects,
    /// creating one if the object has none and duplicating a shared one.
    pub fn acquire_exclusive_track(&mut self, key: ObjectKey) -> Result<TrackKey> {
        let object = self.objects.get(key).ok_or(BuildupError::ObjectNotFound)?;
        let current = object.animation;
        let name = format!("{}Action", object.name);

        let track_key = self.tracks.acquire_exclusive(current, &name);
        self.object_mut(key)?.animation = Some(track_key);
        Ok(track_key)
    }

    /// Binds `target` to the same track as `source`, as the host does when
    /// animation data is linked between objects.
    pub fn link_track(&mut self, source: ObjectKey, target: ObjectKey) -> Result<()> {
        let track_key = self.object(source)?.animation.ok_or(BuildupError::NoAnimationFound)?;
        if self.object(target)?.animation == Some(track_key) {
            return Ok(());
        }
        self.release_track(target);
        self.tracks.retain(track_key);
        self.object_mut(target)?.animation = Some(track_key);
        Ok(())
    }

    /// Unbinds the track of `key`. Returns `true` if the object had one.
    pub fn release_track(&mut self, key: ObjectKey) -> bool {
        let Some(track_key) = self.objects.get_mut(key).and_then(|o| o.animation.take()) else {
            return false;
        };
        self.tracks.release(track_key);
        true
    }

    /// Evaluates the animated state of `key` at `frame`.
    pub fn evaluate(&self, key: ObjectKey, frame: f32) -> Result<Pose> {
        let object = self.object(key)?;
        let base = Pose::from_transform(&object.transform, object.visible);
        Ok(match self.track(key) {
            Some(track) => track.evaluate(frame, base),
            None => base,
        })
    }

    // ========================================================================
    // Materials
    // ========================================================================

    #[must_use]
    pub fn find_material(&self, name: &str) -> Option<MaterialKey> {
        self.materials.iter().find(|(_, m)| m.name == name).map(|(k, _)| k)
    }

    /// Returns the material named `name`, creating it with `create` if the
    /// scene has none.
    pub fn ensure_material(&mut self, name: &str, create: impl FnOnce() -> Material) -> MaterialKey {
        match self.find_material(name) {
            Some(key) => key,
            None => self.materials.insert(create()),
        }
    }
}
