//! Shape mesh generators
//!
//! Every generator produces a unit-sized mesh centered on the origin (half
//! extent 0.5, or radius 1 for discs) so that the drawing API only has to
//! supply a TRS matrix. Circles lie in the XZ plane and are parameterized as
//! `(cos θ, 0, -sin θ)`.
//!
//! Solid meshes are triangle lists with recalculated normals; wire meshes are
//! line lists.

use nalgebra::{Rotation3, Vector3};

use crate::foundation::math::{Vec3, TAU};
use crate::render::primitives::{MeshData, Topology};

/// Segments in a full circle of the round wire and solid shapes
pub const CIRCLE_SEGMENTS: u32 = 64;

/// Vertical edges drawn on the wire tube
pub const TUBE_SIDE_LINES: u32 = 8;

/// Half-circle arcs drawn on the wire hemisphere
pub const HEMISPHERE_ARCS: u32 = 4;

const HALF: f32 = 0.5;

/// Point on the unit circle in the XZ plane at segment `i` of `segments`
fn ring_point(i: u32, segments: u32) -> Vec3 {
    #[allow(clippy::cast_precision_loss)]
    let theta = TAU * i as f32 / segments as f32;
    Vec3::new(theta.cos(), 0.0, -theta.sin())
}

fn triangles(name: &str, positions: Vec<Vec3>) -> MeshData {
    let mut mesh = MeshData::sequential(name, Topology::Triangles, positions);
    mesh.recalculate_normals();
    mesh
}

fn lines(name: &str, positions: Vec<Vec3>) -> MeshData {
    MeshData::sequential(name, Topology::Lines, positions)
}

/// Solid unit cube, four vertices per face so every face has its own normal
pub fn cube() -> MeshData {
    // (normal, tangent u, tangent v) per face
    let faces = [
        (Vec3::x(), -Vec3::z(), Vec3::y()),
        (-Vec3::x(), Vec3::z(), Vec3::y()),
        (Vec3::y(), Vec3::x(), -Vec3::z()),
        (-Vec3::y(), Vec3::x(), Vec3::z()),
        (Vec3::z(), Vec3::x(), Vec3::y()),
        (-Vec3::z(), -Vec3::x(), Vec3::y()),
    ];

    let mut positions = Vec::with_capacity(24);
    let mut normals = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, u, v) in faces {
        let base = u32::try_from(positions.len()).unwrap_or(u32::MAX);
        let center = normal * HALF;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            positions.push(center + u * (su * HALF) + v * (sv * HALF));
            normals.push(normal);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    MeshData {
        name: "DebugOverlay-Cube".to_string(),
        topology: Topology::Triangles,
        positions,
        normals,
        indices,
    }
}

/// Solid UV sphere of radius 0.5
pub fn sphere() -> MeshData {
    const LONGITUDE: u32 = 24;
    const LATITUDE: u32 = 16;

    let mut positions = Vec::with_capacity(((LONGITUDE + 1) * (LATITUDE + 1)) as usize);
    let mut normals = Vec::with_capacity(positions.capacity());
    for lat in 0..=LATITUDE {
        #[allow(clippy::cast_precision_loss)]
        let phi = std::f32::consts::PI * lat as f32 / LATITUDE as f32;
        for lon in 0..=LONGITUDE {
            let ring = ring_point(lon, LONGITUDE);
            let normal = Vec3::new(ring.x * phi.sin(), phi.cos(), ring.z * phi.sin());
            positions.push(normal * HALF);
            normals.push(normal);
        }
    }

    let stride = LONGITUDE + 1;
    let mut indices = Vec::with_capacity((LONGITUDE * LATITUDE * 6) as usize);
    for lat in 0..LATITUDE {
        for lon in 0..LONGITUDE {
            let a = lat * stride + lon;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }

    MeshData {
        name: "DebugOverlay-Sphere".to_string(),
        topology: Topology::Triangles,
        positions,
        normals,
        indices,
    }
}

/// Wire cube: the twelve edges of the unit cube
pub fn wire_cube() -> MeshData {
    let s = HALF;
    let corner = |x: f32, y: f32, z: f32| Vec3::new(x * s, y * s, z * s);
    let mut positions = Vec::with_capacity(24);

    for y in [-1.0, 1.0] {
        positions.extend_from_slice(&[
            corner(-1.0, y, -1.0),
            corner(-1.0, y, 1.0),
            corner(-1.0, y, 1.0),
            corner(1.0, y, 1.0),
            corner(1.0, y, 1.0),
            corner(1.0, y, -1.0),
            corner(1.0, y, -1.0),
            corner(-1.0, y, -1.0),
        ]);
    }
    for (x, z) in [(1.0, 1.0), (1.0, -1.0), (-1.0, 1.0), (-1.0, -1.0)] {
        positions.push(corner(x, 1.0, z));
        positions.push(corner(x, -1.0, z));
    }

    lines("DebugOverlay-WireCube", positions)
}

/// Wire sphere: one great circle around each axis
pub fn wire_sphere() -> MeshData {
    let mut positions = Vec::with_capacity((CIRCLE_SEGMENTS * 6) as usize);
    for i in 0..CIRCLE_SEGMENTS {
        let p0 = ring_point(i, CIRCLE_SEGMENTS) * HALF;
        let p1 = ring_point(i + 1, CIRCLE_SEGMENTS) * HALF;

        // around x
        positions.push(Vec3::new(0.0, p0.x, p0.z));
        positions.push(Vec3::new(0.0, p1.x, p1.z));
        // around y
        positions.push(p0);
        positions.push(p1);
        // around z
        positions.push(Vec3::new(p0.x, p0.z, 0.0));
        positions.push(Vec3::new(p1.x, p1.z, 0.0));
    }

    lines("DebugOverlay-WireSphere", positions)
}

/// Solid disc of radius 1 in the XZ plane, drawn as a triangle fan
pub fn disc() -> MeshData {
    let mut positions = Vec::with_capacity((CIRCLE_SEGMENTS * 3) as usize);
    for i in 0..CIRCLE_SEGMENTS {
        positions.push(Vec3::zeros());
        positions.push(ring_point(i, CIRCLE_SEGMENTS));
        positions.push(ring_point(i + 1, CIRCLE_SEGMENTS));
    }

    triangles("DebugOverlay-Disc", positions)
}

/// Circle of radius 1 in the XZ plane
pub fn wire_disc() -> MeshData {
    let mut positions = Vec::with_capacity((CIRCLE_SEGMENTS * 2) as usize);
    for i in 0..CIRCLE_SEGMENTS {
        positions.push(ring_point(i, CIRCLE_SEGMENTS));
        positions.push(ring_point(i + 1, CIRCLE_SEGMENTS));
    }

    lines("DebugOverlay-WireDisc", positions)
}

/// Unit quad in the XY plane with a small arrow along +Z marking the normal
pub fn plane() -> MeshData {
    let s = HALF;
    let a = 0.01;
    let tip = Vec3::new(0.0, 0.0, 0.25);

    let positions = vec![
        Vec3::new(-s, -s, 0.0),
        Vec3::new(-s, s, 0.0),
        Vec3::new(s, s, 0.0),
        Vec3::new(s, s, 0.0),
        Vec3::new(s, -s, 0.0),
        Vec3::new(-s, -s, 0.0),
        // arrow
        Vec3::new(0.0, -a, 0.0),
        tip,
        Vec3::new(0.0, a, 0.0),
        Vec3::new(-a, 0.0, 0.0),
        tip,
        Vec3::new(a, 0.0, 0.0),
    ];

    triangles("DebugOverlay-Plane", positions)
}

/// Square-based pyramid with its apex at +Y
pub fn pyramid() -> MeshData {
    let s = HALF;
    let apex = Vec3::new(0.0, s, 0.0);
    let near_left = Vec3::new(-s, -s, -s);
    let near_right = Vec3::new(s, -s, -s);
    let far_left = Vec3::new(-s, -s, s);
    let far_right = Vec3::new(s, -s, s);

    let positions = vec![
        // base
        far_right, far_left, near_left,
        near_left, near_right, far_right,
        // sides
        near_left, apex, near_right,
        far_right, apex, far_left,
        far_left, apex, near_left,
        near_right, apex, far_right,
    ];

    triangles("DebugOverlay-Pyramid", positions)
}

/// Pyramid edges: base square plus four edges to the apex
pub fn wire_pyramid() -> MeshData {
    let s = HALF;
    let apex = Vec3::new(0.0, s, 0.0);
    let near_left = Vec3::new(-s, -s, -s);
    let near_right = Vec3::new(s, -s, -s);
    let far_left = Vec3::new(-s, -s, s);
    let far_right = Vec3::new(s, -s, s);

    let positions = vec![
        near_left, far_left,
        far_left, far_right,
        far_right, near_right,
        near_right, near_left,
        apex, near_left,
        apex, far_left,
        apex, near_right,
        apex, far_right,
    ];

    lines("DebugOverlay-WirePyramid", positions)
}

/// Open cylinder of diameter 1 and height 1 around the Y axis
pub fn tube() -> MeshData {
    let mut positions = Vec::with_capacity((CIRCLE_SEGMENTS * 6) as usize);
    for i in 0..CIRCLE_SEGMENTS {
        let p0 = ring_point(i, CIRCLE_SEGMENTS) * HALF;
        let p1 = ring_point(i + 1, CIRCLE_SEGMENTS) * HALF;
        let up = Vec3::new(0.0, HALF, 0.0);

        positions.extend_from_slice(&[p1 + up, p0 + up, p0 - up, p1 - up, p1 + up, p0 - up]);
    }

    triangles("DebugOverlay-Tube", positions)
}

/// Cylinder outline: top and bottom rings plus vertical side lines
pub fn wire_tube() -> MeshData {
    let up = Vec3::new(0.0, HALF, 0.0);
    let mut positions =
        Vec::with_capacity((CIRCLE_SEGMENTS * 4 + TUBE_SIDE_LINES * 2) as usize);

    for i in 0..CIRCLE_SEGMENTS {
        let p0 = ring_point(i, CIRCLE_SEGMENTS) * HALF;
        let p1 = ring_point(i + 1, CIRCLE_SEGMENTS) * HALF;
        positions.extend_from_slice(&[p0 - up, p1 - up, p0 + up, p1 + up]);
    }

    for i in 0..TUBE_SIDE_LINES {
        let p = ring_point(i, TUBE_SIDE_LINES) * HALF;
        positions.push(p - up);
        positions.push(p + up);
    }

    lines("DebugOverlay-WireTube", positions)
}

/// Upper hemisphere outline: equator ring plus half-circle arcs over the top
pub fn wire_hemisphere() -> MeshData {
    let half_segments = CIRCLE_SEGMENTS / 2;
    let mut positions =
        Vec::with_capacity((CIRCLE_SEGMENTS * 2 + HEMISPHERE_ARCS * half_segments * 2) as usize);

    for i in 0..CIRCLE_SEGMENTS {
        positions.push(ring_point(i, CIRCLE_SEGMENTS) * HALF);
        positions.push(ring_point(i + 1, CIRCLE_SEGMENTS) * HALF);
    }

    let forward = Vec3::z() * HALF;
    let step = TAU / CIRCLE_SEGMENTS as f32;
    for arc in 0..HEMISPHERE_ARCS {
        #[allow(clippy::cast_precision_loss)]
        let yaw = Rotation3::from_axis_angle(&Vector3::y_axis(), TAU * arc as f32 / HEMISPHERE_ARCS as f32);
        for i in 0..half_segments {
            #[allow(clippy::cast_precision_loss)]
            let theta = -std::f32::consts::PI + step * i as f32;
            let pitch0 = Rotation3::from_axis_angle(&Vector3::x_axis(), theta);
            let pitch1 = Rotation3::from_axis_angle(&Vector3::x_axis(), theta + step);
            positions.push(yaw * pitch0 * forward);
            positions.push(yaw * pitch1 * forward);
        }
    }

    lines("DebugOverlay-WireHemisphere", positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn max_extent(mesh: &MeshData) -> f32 {
        mesh.positions
            .iter()
            .flat_map(|p| [p.x.abs(), p.y.abs(), p.z.abs()])
            .fold(0.0, f32::max)
    }

    #[test]
    fn test_cube_layout() {
        let mesh = cube();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.index_count(), 36);
        assert_eq!(mesh.normals.len(), 24);
        assert_relative_eq!(max_extent(&mesh), 0.5);
    }

    #[test]
    fn test_cube_faces_wind_outward() {
        let mesh = cube();
        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let face = (mesh.positions[b] - mesh.positions[a]).cross(&(mesh.positions[c] - mesh.positions[a]));
            assert!(face.dot(&mesh.normals[a]) > 0.0);
        }
    }

    #[test]
    fn test_sphere_vertices_on_radius() {
        let mesh = sphere();
        for p in &mesh.positions {
            assert_relative_eq!(p.norm(), 0.5, epsilon = 1e-5);
        }
        assert!(mesh.indices.iter().all(|i| (*i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn test_wire_cube_has_twelve_edges() {
        let mesh = wire_cube();
        assert_eq!(mesh.topology, Topology::Lines);
        assert_eq!(mesh.vertex_count(), 24);
        for edge in mesh.positions.chunks_exact(2) {
            assert_relative_eq!((edge[1] - edge[0]).norm(), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_wire_sphere_three_rings() {
        let mesh = wire_sphere();
        assert_eq!(mesh.vertex_count(), (CIRCLE_SEGMENTS * 6) as usize);
        for p in &mesh.positions {
            assert_relative_eq!(p.norm(), 0.5, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_disc_is_closed_fan() {
        let mesh = disc();
        assert_eq!(mesh.vertex_count(), (CIRCLE_SEGMENTS * 3) as usize);
        let last = mesh.positions[mesh.vertex_count() - 1];
        assert_relative_eq!(last, Vec3::x(), epsilon = 1e-5);
        // Normals of a fan in the XZ plane are all vertical
        for n in &mesh.normals {
            assert_relative_eq!(n.y.abs(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_wire_disc_radius_one() {
        let mesh = wire_disc();
        for p in &mesh.positions {
            assert_relative_eq!(p.norm(), 1.0, epsilon = 1e-5);
            assert_relative_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn test_plane_arrow_points_along_z() {
        let mesh = plane();
        assert_eq!(mesh.vertex_count(), 12);
        let max_z = mesh.positions.iter().map(|p| p.z).fold(f32::MIN, f32::max);
        assert_relative_eq!(max_z, 0.25);
    }

    #[test]
    fn test_pyramid_apex_and_base() {
        let mesh = pyramid();
        assert_eq!(mesh.vertex_count(), 18);
        let top = mesh.positions.iter().map(|p| p.y).fold(f32::MIN, f32::max);
        assert_relative_eq!(top, 0.5);
        assert_eq!(wire_pyramid().vertex_count(), 16);
    }

    #[test]
    fn test_tube_and_wire_tube_counts() {
        assert_eq!(tube().vertex_count(), (CIRCLE_SEGMENTS * 6) as usize);
        assert_eq!(
            wire_tube().vertex_count(),
            (CIRCLE_SEGMENTS * 4 + TUBE_SIDE_LINES * 2) as usize
        );
    }

    #[test]
    fn test_wire_hemisphere_stays_above_equator() {
        let mesh = wire_hemisphere();
        for p in &mesh.positions {
            assert!(p.y >= -1e-5);
            assert_relative_eq!(p.norm(), 0.5, epsilon = 1e-5);
        }
    }
}
