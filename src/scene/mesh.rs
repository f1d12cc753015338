use glam::{Affine3A, Vec3};
use smallvec::SmallVec;

use crate::scene::MaterialKey;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// Axis-aligned box enclosing `points`, or `None` for an empty set.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bbox = Self { min: first, max: first };
        for p in points {
            bbox.min = bbox.min.min(p);
            bbox.max = bbox.max.max(p);
        }
        Some(bbox)
    }

    #[must_use]
    pub fn center(&self) -> Vec3 { (self.min + self.max) * 0.5 }
    #[must_use]
    pub fn size(&self) -> Vec3 { self.max - self.min }
}

/// A polygon of the mesh. Indices refer to [`Mesh::positions`].
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub indices: SmallVec<[u32; 4]>,
    /// Index into [`Mesh::materials`].
    pub material_index: u32,
    pub selected: bool,
}

impl Face {
    #[must_use]
    pub fn new(indices: &[u32]) -> Self {
        Self {
            indices: SmallVec::from_slice(indices),
            material_index: 0,
            selected: false,
        }
    }
}

/// Editable polygon mesh with edit-mode selection state.
///
/// Positions are in object space; callers convert to world space with the
/// owning object's world matrix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    vertex_selection: Vec<bool>,
    pub faces: Vec<Face>,
    /// Material slots.
    pub materials: Vec<MaterialKey>,
}

impl Mesh {
    #[must_use]
    pub fn new(positions: Vec<Vec3>, faces: Vec<Face>) -> Self {
        let vertex_selection = vec![false; positions.len()];
        Self {
            positions,
            vertex_selection,
            faces,
            materials: Vec::new(),
        }
    }

    /// A single quad of edge `size` in the XY plane, facing +Z.
    #[must_use]
    pub fn plane(size: f32) -> Self {
        let h = size * 0.5;
        Self::new(
            vec![
                Vec3::new(-h, -h, 0.0),
                Vec3::new(h, -h, 0.0),
                Vec3::new(h, h, 0.0),
                Vec3::new(-h, h, 0.0),
            ],
            vec![Face::new(&[0, 1, 2, 3])],
        )
    }

    /// An axis-aligned cube of edge `size` centered on the origin, with
    /// outward-facing quads.
    #[must_use]
    pub fn cube(size: f32) -> Self {
        let h = size * 0.5;
        let positions = vec![
            Vec3::new(-h, -h, -h),
            Vec3::new(h, -h, -h),
            Vec3::new(h, h, -h),
            Vec3::new(-h, h, -h),
            Vec3::new(-h, -h, h),
            Vec3::new(h, -h, h),
            Vec3::new(h, h, h),
            Vec3::new(-h, h, h),
        ];
        let faces = vec![
            Face::new(&[0, 3, 2, 1]), // -Z
            Face::new(&[4, 5, 6, 7]), // +Z
            Face::new(&[0, 1, 5, 4]), // -Y
            Face::new(&[2, 3, 7, 6]), // +Y
            Face::new(&[0, 4, 7, 3]), // -X
            Face::new(&[1, 2, 6, 5]), // +X
        ];
        Self::new(positions, faces)
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn select_vertex(&mut self, index: usize) {
        if let Some(selected) = self.vertex_selection.get_mut(index) {
            *selected = true;
        }
    }

    /// Selects a face together with all of its vertices.
    pub fn select_face(&mut self, index: usize) {
        let Some(face) = self.faces.get_mut(index) else {
            return;
        };
        face.selected = true;
        for &i in &face.indices {
            if let Some(selected) = self.vertex_selection.get_mut(i as usize) {
                *selected = true;
            }
        }
    }

    pub fn select_all(&mut self) {
        self.vertex_selection.fill(true);
        for face in &mut self.faces {
            face.selected = true;
        }
    }

    pub fn deselect_all(&mut self) {
        self.vertex_selection.fill(false);
        for face in &mut self.faces {
            face.selected = false;
        }
    }

    #[must_use]
    pub fn is_vertex_selected(&self, index: usize) -> bool {
        self.vertex_selection.get(index).copied().unwrap_or(false)
    }

    /// Object-space positions of the selected vertices.
    pub fn selected_positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.positions
            .iter()
            .zip(&self.vertex_selection)
            .filter_map(|(p, &selected)| selected.then_some(*p))
    }

    pub fn selected_faces(&self) -> impl Iterator<Item = (usize, &Face)> {
        self.faces.iter().enumerate().filter(|(_, f)| f.selected)
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    /// Unit normal of a face in object space (Newell's method, so non-planar
    /// quads still get a stable normal). Degenerate faces yield `Vec3::ZERO`.
    #[must_use]
    pub fn face_normal(&self, face: &Face) -> Vec3 {
        let mut normal = Vec3::ZERO;
        let n = face.indices.len();
        for i in 0..n {
            let (Some(&a), Some(&b)) = (
                self.positions.get(face.indices[i] as usize),
                self.positions.get(face.indices[(i + 1) % n] as usize),
            ) else {
                continue;
            };
            normal.x += (a.y - b.y) * (a.z + b.z);
            normal.y += (a.z - b.z) * (a.x + b.x);
            normal.z += (a.x - b.x) * (a.y + b.y);
        }
        normal.normalize_or_zero()
    }

    /// Mean world-space normal of the selected faces, or `None` if no face is
    /// selected or the normals cancel out.
    #[must_use]
    pub fn average_selected_normal(&self, world: &Affine3A) -> Option<Vec3> {
        // Normals transform with the inverse transpose.
        let normal_matrix = world.matrix3.inverse().transpose();
        let sum: Vec3 = self
            .selected_faces()
            .map(|(_, face)| normal_matrix.mul_vec3(self.face_normal(face)).normalize_or_zero())
            .sum();
        let avg = sum.normalize_or_zero();
        (avg != Vec3::ZERO).then_some(avg)
    }

    /// Returns the slot index of `material`, appending a slot if needed.
    pub fn ensure_material_slot(&mut self, material: MaterialKey) -> u32 {
        if let Some(i) = self.materials.iter().position(|&m| m == material) {
            return i as u32;
        }
        self.materials.push(material);
        (self.materials.len() - 1) as u32
    }
}
