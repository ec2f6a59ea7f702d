//! Drawing API
//!
//! Thin wrappers that turn one shape call into pool operations:
//!
//! - lines and poly-lines append to the persistent line batches
//! - rays, arcs, quads and axis gizmos build primitive jobs
//! - everything else instances a cached mesh through a mesh job
//!
//! Empty point lists produce no job at all.

use crate::draw::{DebugDraw, DrawOptions};
use crate::foundation::color::Color;
use crate::foundation::math::{column3, look_rotation, signed_angle_deg, trs, Mat4, Quat, Vec3};
use crate::render::primitives::Topology;
use crate::render::state::CullMode;
use crate::shapes::{MeshId, ShapeKind};

/// Segments in one arc
pub const ARC_SEGMENTS: u32 = 24;

/// Length a ray without an end is drawn with
pub const UNBOUNDED_RAY_LENGTH: f32 = 100_000.0;

/// Inner and outer radii closer than this draw a wire arc without an inner ring
const RADIUS_EPSILON: f32 = 0.001;

/// Ring sector in the local XZ plane of `rotation`.
///
/// Angles are in degrees, measured from `from` projected around the local
/// up axis. An inner radius of zero draws a pie slice, equal radii draw an
/// arc line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcShape {
    /// Center
    pub position: Vec3,
    /// Orientation; the arc lies in the local XZ plane
    pub rotation: Quat,
    /// Direction the angles are measured from
    pub from: Vec3,
    /// Start angle in degrees
    pub from_angle: f32,
    /// End angle in degrees
    pub to_angle: f32,
    /// Inner radius
    pub inner_radius: f32,
    /// Outer radius
    pub outer_radius: f32,
}

impl ArcShape {
    /// Pie slice of `angle` degrees starting at `from`
    pub fn new(position: Vec3, rotation: Quat, from: Vec3, angle: f32, radius: f32) -> Self {
        Self {
            position,
            rotation,
            from,
            from_angle: 0.0,
            to_angle: angle,
            inner_radius: radius,
            outer_radius: radius,
        }
    }

    /// Set start and end angles
    #[must_use]
    pub fn with_angles(mut self, from_angle: f32, to_angle: f32) -> Self {
        self.from_angle = from_angle;
        self.to_angle = to_angle;
        self
    }

    /// Set inner and outer radii
    #[must_use]
    pub fn with_radii(mut self, inner_radius: f32, outer_radius: f32) -> Self {
        self.inner_radius = inner_radius;
        self.outer_radius = outer_radius;
        self
    }

    /// Angles wrapped to one turn and ordered, radii clamped to zero and ordered
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.from_angle %= 360.0;
        self.to_angle %= 360.0;
        if self.from_angle > self.to_angle {
            std::mem::swap(&mut self.from_angle, &mut self.to_angle);
        }

        self.inner_radius = self.inner_radius.max(0.0);
        self.outer_radius = self.outer_radius.max(0.0);
        if self.inner_radius > self.outer_radius {
            std::mem::swap(&mut self.inner_radius, &mut self.outer_radius);
        }
        self
    }

    fn transform(&self) -> Mat4 {
        trs(&self.position, &self.rotation, &Vec3::repeat(1.0))
    }

    /// Start angle and per-segment step in radians
    fn sweep(&self, transform: &Mat4) -> (f32, f32) {
        let right = column3(transform, 0);
        let up = column3(transform, 1);
        let start = signed_angle_deg(&right, &self.from, &up).to_radians();

        let theta = start + self.from_angle.to_radians();
        let target = start + self.to_angle.to_radians();
        #[allow(clippy::cast_precision_loss)]
        let step = (target - theta) / ARC_SEGMENTS as f32;
        (theta, step)
    }
}

fn ring(theta: f32) -> Vec3 {
    Vec3::new(theta.cos(), 0.0, -theta.sin())
}

impl DebugDraw {
    /// Line from `start` to `end`
    pub fn line(&mut self, start: Vec3, end: Vec3, color: Color, options: DrawOptions) {
        self.line_batch(options.depth_test, CullMode::Off)
            .add_line(start, end, color, options.duration);
    }

    /// Independent segments: `[a0, b0, a1, b1, ...]`. A trailing odd point is ignored.
    pub fn lines(&mut self, segments: &[Vec3], color: Color, options: DrawOptions) {
        if segments.len() < 2 {
            return;
        }

        let mut batch = self.line_batch(options.depth_test, CullMode::Off);
        for pair in segments.chunks_exact(2) {
            batch.add_line(pair[0], pair[1], color, options.duration);
        }
    }

    /// Connected line through every point
    pub fn poly_line(&mut self, points: &[Vec3], color: Color, options: DrawOptions) {
        if points.len() < 2 {
            return;
        }

        let mut batch = self.line_batch(options.depth_test, CullMode::Off);
        for pair in points.windows(2) {
            batch.add_line(pair[0], pair[1], color, options.duration);
        }
    }

    /// Segment from `origin` to `origin + direction`
    pub fn ray(&mut self, origin: Vec3, direction: Vec3, color: Color, options: DrawOptions) {
        let mut job = self.allocate_primitive(
            Topology::Lines,
            options.duration,
            options.depth_test,
            CullMode::Off,
            true,
        );
        job.add_vertex(origin, color).add_vertex(origin + direction, color);
        job.submit();
    }

    /// Ray drawn far enough along `direction` to look infinite
    pub fn ray_unbounded(&mut self, origin: Vec3, direction: Vec3, color: Color, options: DrawOptions) {
        self.ray(origin, direction * UNBOUNDED_RAY_LENGTH, color, options);
    }

    /// Local axes of `transform` as red, green and blue unit lines
    pub fn matrix(&mut self, transform: &Mat4, options: DrawOptions) {
        let mut job = self.allocate_primitive(
            Topology::Lines,
            options.duration,
            options.depth_test,
            CullMode::Off,
            true,
        );
        job.set_transform(*transform).set_use_vertex_color(true);
        for (axis, color) in [
            (Vec3::x(), Color::AXIS_X),
            (Vec3::y(), Color::AXIS_Y),
            (Vec3::z(), Color::AXIS_Z),
        ] {
            job.add_vertex(Vec3::zeros(), color).add_vertex(axis, color);
        }
        job.submit();
    }

    /// Filled ring sector
    pub fn arc(&mut self, arc: &ArcShape, color: Color, options: DrawOptions) {
        let arc = arc.normalized();
        let transform = arc.transform();
        let (mut theta, step) = arc.sweep(&transform);

        let mut job = self.allocate_primitive(
            Topology::TriangleStrip,
            options.duration,
            options.depth_test,
            CullMode::Off,
            true,
        );
        job.set_transform(transform).set_use_vertex_color(true);
        for _ in 0..=ARC_SEGMENTS {
            let v = ring(theta);
            job.add_vertex(v * arc.inner_radius, color)
                .add_vertex(v * arc.outer_radius, color);
            theta += step;
        }
        job.submit();
    }

    /// Ring sector outline
    pub fn wire_arc(&mut self, arc: &ArcShape, color: Color, options: DrawOptions) {
        let arc = arc.normalized();
        let transform = arc.transform();
        let (mut theta, step) = arc.sweep(&transform);
        let has_inner_radius = (arc.inner_radius - arc.outer_radius).abs() - RADIUS_EPSILON > 0.0;

        let mut job = self.allocate_primitive(
            Topology::LineStrip,
            options.duration,
            options.depth_test,
            CullMode::Off,
            true,
        );
        job.set_transform(transform).set_use_vertex_color(true);

        if has_inner_radius {
            job.add_vertex(ring(theta) * arc.inner_radius, color);
        }

        for _ in 0..=ARC_SEGMENTS {
            job.add_vertex(ring(theta) * arc.outer_radius, color);
            theta += step;
        }

        if has_inner_radius {
            theta -= step;
            job.add_vertex(ring(theta) * arc.inner_radius, color);
            for _ in 0..=ARC_SEGMENTS {
                job.add_vertex(ring(theta) * arc.inner_radius, color);
                theta -= step;
            }
        }
        job.submit();
    }

    /// Unit square outline in the local XZ plane
    pub fn wire_quad(&mut self, position: Vec3, rotation: Quat, scale: Vec3, color: Color, options: DrawOptions) {
        let s = 0.5;
        let mut job = self.allocate_primitive(
            Topology::LineStrip,
            options.duration,
            options.depth_test,
            CullMode::Off,
            true,
        );
        job.set_transform(trs(&position, &rotation, &scale));
        for (x, z) in [(-s, -s), (-s, s), (s, s), (s, -s), (-s, -s)] {
            job.add_vertex(Vec3::new(x, 0.0, z), color);
        }
        job.submit();
    }

    /// Instance `mesh` with a shaded material
    pub fn mesh(&mut self, mesh: MeshId, transform: &Mat4, color: Color, options: DrawOptions) {
        let mut job = self.allocate_mesh(options.duration, options.depth_test, CullMode::Off, true);
        job.set_mesh(mesh).set_transform(*transform).set_color(color);
        job.submit();
    }

    fn shape(&mut self, kind: ShapeKind, transform: Mat4, color: Color, options: DrawOptions) {
        if !self.is_active() {
            return;
        }

        let mesh = self.shape_mesh(kind);
        let mut job = self.allocate_mesh(options.duration, options.depth_test, kind.cull_mode(), true);
        job.set_mesh(mesh).set_transform(transform).set_color(color);
        job.submit();
    }

    /// Solid box
    pub fn cube(&mut self, position: Vec3, rotation: Quat, scale: Vec3, color: Color, options: DrawOptions) {
        self.shape(ShapeKind::Cube, trs(&position, &rotation, &scale), color, options);
    }

    /// Box edges
    pub fn wire_cube(&mut self, position: Vec3, rotation: Quat, scale: Vec3, color: Color, options: DrawOptions) {
        self.shape(ShapeKind::WireCube, trs(&position, &rotation, &scale), color, options);
    }

    /// Solid ellipsoid; `scale` is the diameter per axis
    pub fn sphere(&mut self, position: Vec3, rotation: Quat, scale: Vec3, color: Color, options: DrawOptions) {
        self.shape(ShapeKind::Sphere, trs(&position, &rotation, &scale), color, options);
    }

    /// Ellipsoid outline: one ring around each local axis
    pub fn wire_sphere(&mut self, position: Vec3, rotation: Quat, scale: Vec3, color: Color, options: DrawOptions) {
        self.shape(ShapeKind::WireSphere, trs(&position, &rotation, &scale), color, options);
    }

    /// Filled circle in the local XZ plane
    pub fn disc(&mut self, position: Vec3, rotation: Quat, radius: f32, color: Color, options: DrawOptions) {
        self.shape(ShapeKind::Disc, trs(&position, &rotation, &Vec3::repeat(radius)), color, options);
    }

    /// Circle in the local XZ plane
    pub fn wire_disc(&mut self, position: Vec3, rotation: Quat, radius: f32, color: Color, options: DrawOptions) {
        self.shape(ShapeKind::WireDisc, trs(&position, &rotation, &Vec3::repeat(radius)), color, options);
    }

    /// Quad facing `normal`, with a short arrow marking the normal
    pub fn plane(&mut self, normal: Vec3, position: Vec3, scale: Vec3, color: Color, options: DrawOptions) {
        let rotation = look_rotation(&normal);
        self.shape(ShapeKind::Plane, trs(&position, &rotation, &scale), color, options);
    }

    /// Solid pyramid, apex along local +Y
    pub fn pyramid(&mut self, position: Vec3, rotation: Quat, scale: Vec3, color: Color, options: DrawOptions) {
        self.shape(ShapeKind::Pyramid, trs(&position, &rotation, &scale), color, options);
    }

    /// Pyramid edges
    pub fn wire_pyramid(&mut self, position: Vec3, rotation: Quat, scale: Vec3, color: Color, options: DrawOptions) {
        self.shape(ShapeKind::WirePyramid, trs(&position, &rotation, &scale), color, options);
    }

    /// Open cylinder along local Y
    pub fn tube(&mut self, position: Vec3, rotation: Quat, scale: Vec3, color: Color, options: DrawOptions) {
        self.shape(ShapeKind::Tube, trs(&position, &rotation, &scale), color, options);
    }

    /// Cylinder outline along local Y
    pub fn wire_tube(&mut self, position: Vec3, rotation: Quat, scale: Vec3, color: Color, options: DrawOptions) {
        self.shape(ShapeKind::WireTube, trs(&position, &rotation, &scale), color, options);
    }

    /// Upper hemisphere outline
    pub fn wire_hemisphere(&mut self, position: Vec3, rotation: Quat, scale: Vec3, color: Color, options: DrawOptions) {
        self.shape(ShapeKind::WireHemisphere, trs(&position, &rotation, &scale), color, options);
    }
}
