//! Vertex and mesh data
//!
//! Pure CPU-side data: nothing in here knows about a graphics API. Backends
//! receive [`MeshData`] once per shape and upload it however they like; the
//! byte views are provided for backends that copy straight into GPU buffers.

use crate::foundation::color::Color;
use crate::foundation::math::Vec3;

/// Primitive assembly mode for immediate-mode submission and meshes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Independent points
    Points,
    /// Independent line segments, two vertices each
    Lines,
    /// Connected line strip
    LineStrip,
    /// Connected triangle strip
    TriangleStrip,
    /// Independent triangles, three vertices each
    Triangles,
}

/// Vertex submitted by primitive jobs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimitiveVertex {
    /// Position in job space (world space unless the job carries a transform)
    pub position: Vec3,
    /// Vertex color
    pub color: Color,
}

impl PrimitiveVertex {
    /// Create a vertex
    pub const fn new(position: Vec3, color: Color) -> Self {
        Self { position, color }
    }
}

/// Static mesh geometry generated once per shape
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    /// Debug name
    pub name: String,
    /// Index topology, `Lines` or `Triangles`
    pub topology: Topology,
    /// Vertex positions
    pub positions: Vec<Vec3>,
    /// Per-vertex normals; empty for line meshes
    pub normals: Vec<Vec3>,
    /// Indices into `positions`
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Create a mesh whose indices are simply `0..positions.len()`
    pub fn sequential(name: impl Into<String>, topology: Topology, positions: Vec<Vec3>) -> Self {
        let count = u32::try_from(positions.len()).unwrap_or(u32::MAX);
        Self {
            name: name.into(),
            topology,
            positions,
            normals: Vec::new(),
            indices: (0..count).collect(),
        }
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of indices
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Compute flat per-face normals for a triangle list.
    ///
    /// Each vertex receives the normalized sum of the face normals it belongs
    /// to. Line meshes are left untouched.
    pub fn recalculate_normals(&mut self) {
        if self.topology != Topology::Triangles {
            return;
        }

        let mut normals = vec![Vec3::zeros(); self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let (Some(pa), Some(pb), Some(pc)) =
                (self.positions.get(a), self.positions.get(b), self.positions.get(c))
            else {
                continue;
            };

            let face = (pb - pa).cross(&(pc - pa));
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }

        for normal in &mut normals {
            if let Some(unit) = normal.try_normalize(f32::EPSILON) {
                *normal = unit;
            }
        }

        self.normals = normals;
    }

    /// Positions as raw bytes (tightly packed `[f32; 3]`)
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Indices as raw bytes
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_indices() {
        let mesh = MeshData::sequential(
            "segment",
            Topology::Lines,
            vec![Vec3::zeros(), Vec3::x()],
        );
        assert_eq!(mesh.indices, vec![0, 1]);
        assert_eq!(mesh.position_bytes().len(), 2 * 3 * 4);
        assert_eq!(mesh.index_bytes().len(), 2 * 4);
    }

    #[test]
    fn test_triangle_normals_follow_winding() {
        // Clockwise when viewed from +Y, so the cross product points down.
        let mut mesh = MeshData::sequential(
            "tri",
            Topology::Triangles,
            vec![Vec3::zeros(), Vec3::x(), Vec3::z()],
        );
        mesh.recalculate_normals();
        assert_eq!(mesh.normals.len(), 3);
        assert!((mesh.normals[0] - Vec3::new(0.0, -1.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_line_mesh_has_no_normals() {
        let mut mesh = MeshData::sequential("l", Topology::Lines, vec![Vec3::zeros(), Vec3::y()]);
        mesh.recalculate_normals();
        assert!(mesh.normals.is_empty());
    }
}
