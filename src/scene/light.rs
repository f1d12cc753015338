use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The kind of light the placement tool creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LightKind {
    Point,
    Area,
}

/// Shape parameters for each light kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightShape {
    /// Omnidirectional light; `radius` controls shadow softness.
    Point { radius: f32 },
    /// Rectangular emitter facing its local -Z axis.
    Area { width: f32, height: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Linear RGB.
    pub color: Vec3,
    /// Radiant power in watts.
    pub intensity: f32,
    pub shape: LightShape,
    pub cast_shadows: bool,
}

impl Light {
    #[must_use]
    pub fn new_point(color: Vec3, intensity: f32, radius: f32) -> Self {
        Self {
            color,
            intensity,
            shape: LightShape::Point { radius },
            cast_shadows: true,
        }
    }

    #[must_use]
    pub fn new_area(color: Vec3, intensity: f32, width: f32, height: f32) -> Self {
        Self {
            color,
            intensity,
            shape: LightShape::Area { width, height },
            cast_shadows: true,
        }
    }

    #[must_use]
    pub fn kind(&self) -> LightKind {
        match self.shape {
            LightShape::Point { .. } => LightKind::Point,
            LightShape::Area { .. } => LightKind::Area,
        }
    }
}
