//! Vertex-driven light placement
//!
//! [`compute_light_spec`] fits a light to a set of world-space points (the
//! selected vertices of a mesh): an area light covering their bounding box,
//! or a point light at their center whose soft-shadow radius matches their
//! spread. It is a pure geometry function and touches no scene state.

use glam::{Affine3A, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::errors::{BuildupError, Result};
use crate::scene::{BoundingBox, Light, LightKind, LightShape};

/// Smallest extent or radius a generated light may have.
pub const MIN_LIGHT_SIZE: f32 = 0.1;

/// Color temperature presets for generated lights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColorTemp {
    Warm,
    #[default]
    Neutral,
    Cool,
}

impl ColorTemp {
    /// Linear RGB of the preset.
    #[must_use]
    pub fn color(self) -> Vec3 {
        match self {
            Self::Warm => Vec3::new(1.0, 0.85, 0.7),
            Self::Neutral => Vec3::new(1.0, 1.0, 1.0),
            Self::Cool => Vec3::new(0.8, 0.9, 1.0),
        }
    }
}

/// World-space placement and parameters of a light to create.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSpec {
    pub kind: LightKind,
    pub position: Vec3,
    /// Identity for point lights.
    pub orientation: Quat,
    pub shape: LightShape,
    pub color: Vec3,
    pub intensity: f32,
}

impl LightSpec {
    /// The light component described by this spec.
    #[must_use]
    pub fn to_light(&self) -> Light {
        Light {
            color: self.color,
            intensity: self.intensity,
            shape: self.shape,
            cast_shadows: true,
        }
    }

    /// World matrix of the light object (unit scale).
    #[must_use]
    pub fn world_matrix(&self) -> Affine3A {
        Affine3A::from_rotation_translation(self.orientation, self.position)
    }
}

/// Fits a light of `kind` to `points`.
///
/// - Area: sized to the two largest bounding-box extents. With a normal the
///   light is pushed `offset` along it and turned so its local -Z (the
///   emission axis) points along the normal.
/// - Point: placed at the bounding-box center with a radius equal to the
///   mean distance from the center to the points.
///
/// Extents and radius never drop below [`MIN_LIGHT_SIZE`]. A zero or
/// non-finite normal counts as no normal.
pub fn compute_light_spec(
    points: &[Vec3],
    avg_normal: Option<Vec3>,
    kind: LightKind,
    color_temp: ColorTemp,
    intensity: f32,
    offset: f32,
) -> Result<LightSpec> {
    let bbox = BoundingBox::from_points(points.iter().copied()).ok_or(BuildupError::EmptySelection)?;
    let center = bbox.center();
    let size = bbox.size().max(Vec3::splat(MIN_LIGHT_SIZE));

    let normal = avg_normal
        .map(Vec3::normalize_or_zero)
        .filter(|n| *n != Vec3::ZERO);

    let (position, orientation, shape) = match kind {
        LightKind::Area => {
            let (width, height) = two_largest(size);
            match normal {
                Some(n) => (
                    center + n * offset,
                    Quat::from_rotation_arc(Vec3::NEG_Z, n),
                    LightShape::Area { width, height },
                ),
                None => (center, Quat::IDENTITY, LightShape::Area { width, height }),
            }
        }
        LightKind::Point => {
            let mean = points.iter().map(|p| p.distance(center)).sum::<f32>() / points.len() as f32;
            (
                center,
                Quat::IDENTITY,
                LightShape::Point {
                    radius: mean.max(MIN_LIGHT_SIZE),
                },
            )
        }
    };

    Ok(LightSpec {
        kind,
        position,
        orientation,
        shape,
        color: color_temp.color(),
        intensity,
    })
}

/// `(largest, second largest)` component of `size`.
fn two_largest(size: Vec3) -> (f32, f32) {
    let mut dims = size.to_array();
    dims.sort_by(|a, b| b.total_cmp(a));
    (dims[0], dims[1])
}
