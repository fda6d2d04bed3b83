//! Minimal mesh container and the terrain grid generator

use crate::core::types::{Vec2, Vec3};

/// Indexed triangle mesh with optional normals and uvs.
///
/// Normals and uvs are either empty or parallel to `positions`; the
/// pipeline substitutes the up normal and zero uv for missing slots.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// A flat unit quad [0, 1]² at z = 0, subdivided `resolution` cells per
    /// side, with uv equal to xy. The terrain tile before displacement.
    pub fn grid(resolution: u32) -> Self {
        assert!(resolution > 0, "grid needs at least one cell");
        let verts_per_side = resolution + 1;
        let mut positions = Vec::with_capacity((verts_per_side * verts_per_side) as usize);
        let mut normals = Vec::with_capacity(positions.capacity());
        let mut uvs = Vec::with_capacity(positions.capacity());

        for y in 0..verts_per_side {
            for x in 0..verts_per_side {
                let u = x as f32 / resolution as f32;
                let v = y as f32 / resolution as f32;
                positions.push(Vec3::new(u, v, 0.0));
                normals.push(Vec3::Z);
                uvs.push(Vec2::new(u, v));
            }
        }

        let mut indices = Vec::with_capacity((resolution * resolution * 6) as usize);
        for y in 0..resolution {
            for x in 0..resolution {
                let i0 = y * verts_per_side + x;
                let i1 = i0 + 1;
                let i2 = i0 + verts_per_side;
                let i3 = i2 + 1;
                // Counter-clockwise winding as seen from +z.
                indices.extend_from_slice(&[i0, i1, i3, i0, i3, i2]);
            }
        }

        Self {
            positions,
            normals,
            uvs,
            indices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_counts() {
        let mesh = Mesh::grid(4);
        assert_eq!(mesh.vertex_count(), 25);
        assert_eq!(mesh.triangle_count(), 32);
        assert_eq!(mesh.normals.len(), mesh.vertex_count());
        assert_eq!(mesh.uvs.len(), mesh.vertex_count());
    }

    #[test]
    fn test_grid_spans_unit_square() {
        let mesh = Mesh::grid(8);
        for p in &mesh.positions {
            assert!((0.0..=1.0).contains(&p.x));
            assert!((0.0..=1.0).contains(&p.y));
            assert_eq!(p.z, 0.0);
        }
        assert_eq!(mesh.positions.first().unwrap().truncate(), Vec2::ZERO);
        assert_eq!(mesh.positions.last().unwrap().truncate(), Vec2::ONE);
    }

    #[test]
    fn test_grid_indices_in_bounds() {
        let mesh = Mesh::grid(3);
        let count = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count));
    }
}
