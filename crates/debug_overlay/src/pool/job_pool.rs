//! Job pool
//!
//! Owns the three job collections the render pass replays:
//!
//! - primitive jobs, in submission order
//! - mesh jobs, in submission order
//! - six persistent line batches, one per [`RenderState`]
//!
//! Removal only ever happens in [`JobPool::remove_dead_jobs`], which keeps the
//! relative order of surviving jobs.

use crate::core::config::OverlayConfig;
use crate::foundation::color::Color;
use crate::foundation::math::Mat4;
use crate::pool::buffer_pool::GeometryBufferPool;
use crate::pool::jobs::{JobId, LineBatch, MeshJob, PrimitiveJob};
use crate::render::primitives::Topology;
use crate::render::state::{CullMode, MaterialKey, RenderState, RENDER_STATE_COUNT};

/// Entries removed by one cleanup tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemovedJobs {
    /// Primitive jobs removed
    pub primitives: usize,
    /// Mesh jobs removed
    pub meshes: usize,
    /// Line entries removed
    pub lines: usize,
}

impl RemovedJobs {
    /// Total removed entries
    pub fn total(&self) -> usize {
        self.primitives + self.meshes + self.lines
    }
}

/// Live draw jobs and their pooled storage
#[derive(Debug)]
pub struct JobPool {
    pub(crate) primitive_jobs: Vec<PrimitiveJob>,
    pub(crate) mesh_jobs: Vec<MeshJob>,
    pub(crate) line_batches: [LineBatch; RENDER_STATE_COUNT],
    buffers: GeometryBufferPool,
    next_job_id: u64,
}

impl JobPool {
    /// Create an empty pool sized from `config`
    pub fn new(config: &OverlayConfig) -> Self {
        let cull_modes = CullMode::ALL.len();
        Self {
            primitive_jobs: Vec::with_capacity(config.primitive_job_capacity),
            mesh_jobs: Vec::with_capacity(config.mesh_job_capacity),
            line_batches: std::array::from_fn(|i| {
                LineBatch::new(RenderState::new(i >= cull_modes, CullMode::ALL[i % cull_modes]))
            }),
            buffers: GeometryBufferPool::new(config.vertex_buffer_capacity),
            next_job_id: 0,
        }
    }

    fn next_id(&mut self) -> JobId {
        self.next_job_id += 1;
        JobId(self.next_job_id)
    }

    /// Start a primitive job with a pooled vertex buffer.
    ///
    /// The job is not drawn until passed to [`JobPool::submit_primitive`];
    /// a job that is never submitted can be handed back with
    /// [`JobPool::discard_primitive`].
    pub fn allocate_primitive(
        &mut self,
        topology: Topology,
        duration: f32,
        depth_test: bool,
        cull_mode: CullMode,
        shaded: bool,
    ) -> PrimitiveJob {
        PrimitiveJob {
            id: self.next_id(),
            topology,
            vertices: self.buffers.acquire(),
            transform: None,
            use_vertex_color: false,
            material: MaterialKey::new(RenderState::new(depth_test, cull_mode), shaded),
            remaining: duration,
            drawn: false,
        }
    }

    /// Make a primitive job visible to the render pass
    pub fn submit_primitive(&mut self, job: PrimitiveJob) {
        self.primitive_jobs.push(job);
    }

    /// Return an unsubmitted job's buffer to the pool
    pub fn discard_primitive(&mut self, job: PrimitiveJob) {
        self.buffers.release(job.vertices);
    }

    /// Start a mesh job with an identity transform and white tint
    pub fn allocate_mesh(
        &mut self,
        duration: f32,
        depth_test: bool,
        cull_mode: CullMode,
        shaded: bool,
    ) -> MeshJob {
        MeshJob {
            id: self.next_id(),
            mesh: None,
            transform: Mat4::identity(),
            color: Color::WHITE,
            material: MaterialKey::new(RenderState::new(depth_test, cull_mode), shaded),
            remaining: duration,
            drawn: false,
        }
    }

    /// Make a mesh job visible to the render pass
    pub fn submit_mesh(&mut self, job: MeshJob) {
        self.mesh_jobs.push(job);
    }

    /// The persistent line batch for a render state; never allocates
    pub fn line_batch(&mut self, depth_test: bool, cull_mode: CullMode) -> &mut LineBatch {
        &mut self.line_batches[RenderState::new(depth_test, cull_mode).index()]
    }

    /// Submitted primitive jobs, in submission order
    pub fn primitive_jobs(&self) -> &[PrimitiveJob] {
        &self.primitive_jobs
    }

    /// Submitted mesh jobs, in submission order
    pub fn mesh_jobs(&self) -> &[MeshJob] {
        &self.mesh_jobs
    }

    /// All line batches, in render-state index order
    pub fn line_batches(&self) -> &[LineBatch] {
        &self.line_batches
    }

    /// Total line entries across every batch
    pub fn line_count(&self) -> usize {
        self.line_batches.iter().map(LineBatch::len).sum()
    }

    /// Total live entries across every collection
    pub fn live_count(&self) -> usize {
        self.primitive_jobs.len() + self.mesh_jobs.len() + self.line_count()
    }

    /// Vertex buffer pool
    pub fn buffers(&self) -> &GeometryBufferPool {
        &self.buffers
    }

    /// Remove every entry that has been drawn and whose remaining duration
    /// is `<= 0`. Entries no render pass has reached yet are kept, so work
    /// submitted before the cleanup tick is still drawn once.
    ///
    /// Survivors keep their order, identity and remaining duration. Buffers
    /// of removed primitive jobs go back to the buffer pool.
    pub fn remove_dead_jobs(&mut self) -> RemovedJobs {
        let mut removed = RemovedJobs::default();

        let buffers = &mut self.buffers;
        let before = self.primitive_jobs.len();
        self.primitive_jobs.retain_mut(|job| {
            if job.is_expired() {
                buffers.release(std::mem::take(&mut job.vertices));
                false
            } else {
                true
            }
        });
        removed.primitives = before - self.primitive_jobs.len();

        let before = self.mesh_jobs.len();
        self.mesh_jobs.retain(|job| !job.is_expired());
        removed.meshes = before - self.mesh_jobs.len();

        for batch in &mut self.line_batches {
            let before = batch.lines.len();
            batch.lines.retain(|line| !line.is_expired());
            removed.lines += before - batch.lines.len();
        }

        removed
    }

    /// Drop every job; primitive buffers return to the pool
    pub fn clear(&mut self) {
        for job in self.primitive_jobs.drain(..) {
            self.buffers.release(job.vertices);
        }
        self.mesh_jobs.clear();
        for batch in &mut self.line_batches {
            batch.lines.clear();
        }
    }

    /// Age every entry as one render pass would
    #[cfg(test)]
    pub(crate) fn age_all(&mut self, delta: f32) {
        self.primitive_jobs.iter_mut().for_each(|job| job.age(delta));
        self.mesh_jobs.iter_mut().for_each(|job| job.age(delta));
        for batch in &mut self.line_batches {
            batch.lines.iter_mut().for_each(|line| line.age(delta));
        }
    }

    /// Drop every job and every pooled buffer
    pub fn discard_all(&mut self) {
        self.clear();
        self.buffers.clear();
    }
}
