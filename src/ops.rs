//! Operators
//!
//! The user-invoked actions of the buildup tool. Each runs to completion
//! against a [`Scene`] and the per-object [`ConfigStore`] and returns a small
//! report, or a [`BuildupError`] without having written anything.
//!
//! - [`apply_animation`]: keyframes the configured effect onto the selection
//! - [`clear_animation`]: drops the selection's animation and settings
//! - [`add_light_from_vertices`]: fits a light to selected mesh vertices
//! - [`assign_mirror_material`]: puts a shared mirror material on selected faces

use glam::Vec3;

use crate::animation::{Channel, EffectKind, RestState, build_plan, propagate_visibility};
use crate::errors::{BuildupError, Result};
use crate::lighting::compute_light_spec;
use crate::scene::material::MIRROR_MATERIAL_NAME;
use crate::scene::{LightKind, Material, ObjectKey, Scene, SceneObject, Transform};
use crate::settings::{BuildupSettings, ConfigStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyReport {
    pub applied_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearReport {
    pub cleared_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MirrorReport {
    pub face_count: usize,
}

// ============================================================================
// Apply / Clear
// ============================================================================

/// Applies the active object's effect to every selected object.
///
/// The active object's settings are copied onto each selected object first,
/// so the whole selection animates with one configuration. Fails with
/// [`BuildupError::NotEnabled`] before touching anything if the active
/// object's effect is disabled.
pub fn apply_animation(scene: &mut Scene, configs: &mut ConfigStore) -> Result<ApplyReport> {
    let active = scene.active().ok_or(BuildupError::NoActiveObject)?;
    let settings = configs.settings_or_default(active);

    if !settings.enabled {
        let object = scene.object(active)?.name.clone();
        log::warn!("Animation not enabled for '{object}'");
        return Err(BuildupError::NotEnabled { object });
    }
    settings.parameters().validate()?;

    let targets = scene.selected().to_vec();
    for &key in &targets {
        configs.set(key, settings.clone());
    }

    let mut windows = Vec::with_capacity(targets.len());
    for &key in &targets {
        let window = apply_to_object(scene, key, &settings)?;
        configs.mark_applied(key);
        windows.push((key, window));
    }

    // Child lights are keyed after every selected object's own plan, so a
    // light selected together with its parent ends up on the parent's window
    // whatever the selection order.
    for (key, window) in windows {
        update_child_lights(scene, key, window, &targets)?;
    }

    log::info!("Animation applied to {} object(s)", targets.len());
    Ok(ApplyReport {
        applied_count: targets.len(),
    })
}

/// Writes the plan of one object onto its own track. Returns the plan's
/// `(start, end)` window, or `None` for [`EffectKind::None`].
fn apply_to_object(scene: &mut Scene, key: ObjectKey, settings: &BuildupSettings) -> Result<Option<(u32, u32)>> {
    let params = settings.parameters();
    let parent_rotation = scene.parent_world_rotation(key);
    let object = scene.object(key)?;
    let name = object.name.clone();
    let rest = RestState::capture(&object.transform);

    let plan = build_plan(settings.effect_type, &params, &rest, parent_rotation)?;

    let track_key = scene.acquire_exclusive_track(key)?;
    if let Some(track) = scene.tracks.get_mut(track_key) {
        let removed = track.remove_channels(&Channel::ALL);
        if removed > 0 {
            log::debug!("Removed {removed} existing curve(s) from '{name}'");
        }
        track.insert_all(&plan)?;
    }

    rest.restore(&mut scene.object_mut(key)?.transform);

    Ok((settings.effect_type != EffectKind::None).then(|| (plan.start_frame(), plan.end_frame())))
}

/// Re-keys the visibility of the lights parented to `key`.
///
/// With a reveal window the lights stay hidden until it ends. Without one
/// (`EffectKind::None`) any schedule left by an earlier reveal is removed.
fn update_child_lights(
    scene: &mut Scene,
    key: ObjectKey,
    window: Option<(u32, u32)>,
    targets: &[ObjectKey],
) -> Result<()> {
    let lights = scene.light_children(key);
    if lights.is_empty() {
        return Ok(());
    }
    let name = scene.object(key)?.name.clone();

    let Some((start, end)) = window else {
        for light in lights {
            // Selected lights already carry the keys of this apply.
            if targets.contains(&light) || scene.get(light).and_then(SceneObject::animation).is_none() {
                continue;
            }
            let light_track = scene.acquire_exclusive_track(light)?;
            if let Some(track) = scene.tracks.get_mut(light_track) {
                track.remove_channels(&[Channel::VisibleFlag]);
            }
        }
        log::debug!("Dropped reveal keys of child lights of '{name}'");
        return Ok(());
    };

    for (light, schedule) in propagate_visibility(&lights, start, end) {
        let light_track = scene.acquire_exclusive_track(light)?;
        if let Some(track) = scene.tracks.get_mut(light_track) {
            track.remove_channels(&[Channel::VisibleFlag]);
            track.insert_all(&schedule)?;
        }
    }
    log::debug!("Child lights of '{name}' hidden until frame {end}");

    Ok(())
}

/// Removes all animation from the selected objects and their child lights,
/// and resets their settings.
///
/// Settings are reset even when there was nothing to clear, in which case
/// [`BuildupError::NoAnimationFound`] is returned.
pub fn clear_animation(scene: &mut Scene, configs: &mut ConfigStore) -> Result<ClearReport> {
    if scene.active().is_none() {
        return Err(BuildupError::NoActiveObject);
    }

    let mut cleared_count = 0;
    for key in scene.selected().to_vec() {
        if scene.release_track(key) {
            cleared_count += 1;
        }
        for light in scene.light_children(key) {
            scene.release_track(light);
        }
        configs.reset(key);
    }

    if cleared_count == 0 {
        log::warn!("No animation data found");
        return Err(BuildupError::NoAnimationFound);
    }

    log::info!("Animation cleared from {cleared_count} object(s)");
    Ok(ClearReport { cleared_count })
}

// ============================================================================
// Mesh utilities
// ============================================================================

/// Creates a light of `kind` fitted to the selected vertices of the active
/// mesh and parents it to that mesh.
///
/// The light's world placement comes from [`compute_light_spec`]; its local
/// transform is solved against the mesh's world matrix so the placement
/// survives the parenting.
pub fn add_light_from_vertices(scene: &mut Scene, configs: &ConfigStore, kind: LightKind) -> Result<ObjectKey> {
    let active = scene.active().ok_or(BuildupError::NoActiveObject)?;
    let object = scene.object(active)?;
    let mesh = object.as_mesh().ok_or_else(|| BuildupError::NotAMesh {
        object: object.name.clone(),
    })?;

    let world = scene.world_matrix(active);
    let points: Vec<Vec3> = mesh.selected_positions().map(|p| world.transform_point3(p)).collect();
    if points.is_empty() {
        log::warn!("No vertices selected on '{}'", object.name);
        return Err(BuildupError::EmptySelection);
    }
    let normal = mesh.average_selected_normal(&world);

    let settings = configs.settings_or_default(active);
    let spec = compute_light_spec(
        &points,
        normal,
        kind,
        settings.light_color_temp,
        settings.light_intensity,
        settings.light_offset,
    )?;

    let suffix = match kind {
        LightKind::Point => "PointLight",
        LightKind::Area => "AreaLight",
    };
    let name = format!("{}_{suffix}", object.name);

    let mut transform = Transform::new();
    transform.apply_local_matrix(world.inverse() * spec.world_matrix());

    let light = SceneObject::light(&name, spec.to_light()).with_transform(transform);
    let key = scene.add_to_parent(light, active);

    log::info!("Created {kind:?} light '{name}' from {} vertices", points.len());
    Ok(key)
}

/// Assigns the scene's shared mirror material to the selected faces of the
/// active mesh, creating the material on first use.
pub fn assign_mirror_material(scene: &mut Scene) -> Result<MirrorReport> {
    let active = scene.active().ok_or(BuildupError::NoActiveObject)?;
    let object = scene.object(active)?;
    let mesh = object.as_mesh().ok_or_else(|| BuildupError::NotAMesh {
        object: object.name.clone(),
    })?;
    if mesh.selected_faces().next().is_none() {
        log::warn!("No faces selected on '{}'", object.name);
        return Err(BuildupError::EmptySelection);
    }

    let material = scene.ensure_material(MIRROR_MATERIAL_NAME, Material::mirror);

    let object = scene.object_mut(active)?;
    let name = object.name.clone();
    let Some(mesh) = object.as_mesh_mut() else {
        return Err(BuildupError::NotAMesh { object: name });
    };

    let slot = mesh.ensure_material_slot(material);
    let mut face_count = 0;
    for face in mesh.faces.iter_mut().filter(|f| f.selected) {
        face.material_index = slot;
        face_count += 1;
    }

    log::info!("Assigned '{MIRROR_MATERIAL_NAME}' to {face_count} face(s) of '{name}'");
    Ok(MirrorReport { face_count })
}
