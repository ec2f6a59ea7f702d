//! Draw job types
//!
//! Jobs are plain values. The pool hands out a job, the caller fills it in,
//! and the job becomes visible to the render pass only once it is submitted
//! back to the pool. Line entries are the exception: they go straight into a
//! persistent per-state batch.

use crate::foundation::color::Color;
use crate::foundation::math::{Mat4, Vec3};
use crate::pool::buffer_pool::VertexBuffer;
use crate::render::primitives::{PrimitiveVertex, Topology};
use crate::render::state::{MaterialKey, RenderState};
use crate::shapes::MeshId;

/// Identity of a submitted job, unique per pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(pub u64);

/// Immediate-mode geometry job
#[derive(Debug)]
pub struct PrimitiveJob {
    pub(crate) id: JobId,
    pub(crate) topology: Topology,
    pub(crate) vertices: VertexBuffer,
    pub(crate) transform: Option<Mat4>,
    pub(crate) use_vertex_color: bool,
    pub(crate) material: MaterialKey,
    pub(crate) remaining: f32,
    pub(crate) drawn: bool,
}

impl PrimitiveJob {
    /// Append a vertex
    pub fn add_vertex(&mut self, position: Vec3, color: Color) {
        self.vertices.push(PrimitiveVertex::new(position, color));
    }

    /// Draw the vertices in the space of `transform`
    pub fn set_transform(&mut self, transform: Mat4) {
        self.transform = Some(transform);
    }

    /// Emit every vertex's own color instead of the first vertex's color for all
    pub fn set_use_vertex_color(&mut self, use_vertex_color: bool) {
        self.use_vertex_color = use_vertex_color;
    }

    /// Job identity
    pub fn id(&self) -> JobId {
        self.id
    }

    /// Primitive topology
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Vertices appended so far
    pub fn vertices(&self) -> &[PrimitiveVertex] {
        &self.vertices
    }

    /// Optional job transform
    pub fn transform(&self) -> Option<&Mat4> {
        self.transform.as_ref()
    }

    /// Whether per-vertex colors are emitted
    pub fn uses_vertex_color(&self) -> bool {
        self.use_vertex_color
    }

    /// Material slot the job is drawn with
    pub fn material_key(&self) -> MaterialKey {
        self.material
    }

    /// Remaining lifetime in seconds
    pub fn remaining_duration(&self) -> f32 {
        self.remaining
    }

    /// Whether a render pass has drawn the job at least once
    pub fn was_drawn(&self) -> bool {
        self.drawn
    }

    /// Whether the cleanup tick will remove the job.
    ///
    /// A job is never removed before its first render pass.
    pub fn is_expired(&self) -> bool {
        self.drawn && self.remaining <= 0.0
    }

    pub(crate) fn age(&mut self, delta: f32) {
        self.remaining -= delta;
        self.drawn = true;
    }
}

/// Cached-mesh instance job
#[derive(Debug, Clone)]
pub struct MeshJob {
    pub(crate) id: JobId,
    pub(crate) mesh: Option<MeshId>,
    pub(crate) transform: Mat4,
    pub(crate) color: Color,
    pub(crate) material: MaterialKey,
    pub(crate) remaining: f32,
    pub(crate) drawn: bool,
}

impl MeshJob {
    /// Mesh to draw; the job holds only a weak id into the mesh cache
    pub fn set_mesh(&mut self, mesh: MeshId) {
        self.mesh = Some(mesh);
    }

    /// Model matrix
    pub fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
    }

    /// Material tint
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Job identity
    pub fn id(&self) -> JobId {
        self.id
    }

    /// Mesh id, if one was set
    pub fn mesh(&self) -> Option<MeshId> {
        self.mesh
    }

    /// Model matrix
    pub fn transform(&self) -> &Mat4 {
        &self.transform
    }

    /// Material tint
    pub fn color(&self) -> Color {
        self.color
    }

    /// Material slot the job is drawn with
    pub fn material_key(&self) -> MaterialKey {
        self.material
    }

    /// Remaining lifetime in seconds
    pub fn remaining_duration(&self) -> f32 {
        self.remaining
    }

    /// Whether a render pass has drawn the job at least once
    pub fn was_drawn(&self) -> bool {
        self.drawn
    }

    /// Whether the cleanup tick will remove the job.
    ///
    /// A job is never removed before its first render pass.
    pub fn is_expired(&self) -> bool {
        self.drawn && self.remaining <= 0.0
    }

    pub(crate) fn age(&mut self, delta: f32) {
        self.remaining -= delta;
        self.drawn = true;
    }
}

/// One line in a persistent batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineEntry {
    /// Start point
    pub start: Vec3,
    /// End point
    pub end: Vec3,
    /// Line color
    pub color: Color,
    pub(crate) remaining: f32,
    pub(crate) drawn: bool,
}

impl LineEntry {
    /// Remaining lifetime in seconds
    pub fn remaining_duration(&self) -> f32 {
        self.remaining
    }

    /// Whether a render pass has drawn the entry at least once
    pub fn was_drawn(&self) -> bool {
        self.drawn
    }

    /// Whether the cleanup tick will remove the entry
    pub fn is_expired(&self) -> bool {
        self.drawn && self.remaining <= 0.0
    }

    pub(crate) fn age(&mut self, delta: f32) {
        self.remaining -= delta;
        self.drawn = true;
    }
}

/// Persistent line list for one render state
///
/// Batches exist for the lifetime of the pool; only their entries come and go.
#[derive(Debug)]
pub struct LineBatch {
    state: RenderState,
    pub(crate) lines: Vec<LineEntry>,
}

impl LineBatch {
    pub(crate) fn new(state: RenderState) -> Self {
        Self {
            state,
            lines: Vec::new(),
        }
    }

    /// Append a line, visible from the next render pass
    pub fn add_line(&mut self, start: Vec3, end: Vec3, color: Color, duration: f32) {
        self.lines.push(LineEntry {
            start,
            end,
            color,
            remaining: duration,
            drawn: false,
        });
    }

    /// Render state shared by every line in the batch
    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Line batches always draw with the colored material
    pub fn material_key(&self) -> MaterialKey {
        MaterialKey::colored(self.state)
    }

    /// Live entries
    pub fn lines(&self) -> &[LineEntry] {
        &self.lines
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the batch has no entries
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
