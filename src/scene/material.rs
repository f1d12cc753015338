use glam::Vec3;

/// Name of the shared material created by the mirror tool.
pub const MIRROR_MATERIAL_NAME: &str = "Mirror";

/// A metallic-roughness surface material.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub base_color: Vec3,
    pub metallic: f32,
    pub roughness: f32,
}

impl Material {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            base_color: Vec3::splat(0.8),
            metallic: 0.0,
            roughness: 0.5,
        }
    }

    /// Fully metallic, perfectly smooth near-white surface.
    #[must_use]
    pub fn mirror() -> Self {
        Self {
            name: MIRROR_MATERIAL_NAME.to_string(),
            base_color: Vec3::splat(0.95),
            metallic: 1.0,
            roughness: 0.0,
        }
    }
}
