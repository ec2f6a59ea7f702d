//! Per-camera render pass
//!
//! Replays every live job through the backend, then ages it by the frame's
//! effective delta. Phases run in a fixed order:
//!
//! 1. mesh jobs
//! 2. primitive jobs
//! 3. line batches
//!
//! Each phase starts by resetting every material tint to white. Materials
//! are rebound only when they differ from the previously bound one; the
//! comparison is against the previous job only, jobs are never sorted.
//!
//! Jobs whose material is unusable, or whose mesh no longer exists, are
//! skipped but still aged so they expire on schedule. A backend error does
//! not stop the pass: the remaining jobs are drawn and aged and the first
//! error is returned.

use std::ops::AddAssign;

use crate::foundation::color::Color;
use crate::pool::{JobPool, LineBatch, MeshJob, PrimitiveJob};
use crate::render::api::{MaterialHandle, MeshHandle, OverlayBackend};
use crate::render::material::MaterialMatrix;
use crate::render::primitives::Topology;
use crate::render::{RenderError, RenderResult};
use crate::shapes::MeshCache;

/// Counters for one or more render passes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Cameras that were drawn into
    pub cameras: usize,
    /// Primitive ends plus mesh draws
    pub draw_calls: usize,
    /// Material binds issued
    pub material_binds: usize,
    /// Vertices submitted in immediate mode
    pub vertices: usize,
    /// Mesh jobs drawn
    pub mesh_jobs: usize,
    /// Primitive jobs drawn
    pub primitive_jobs: usize,
    /// Line entries drawn
    pub lines: usize,
    /// Jobs and line entries skipped because a resource was unavailable
    pub skipped: usize,
}

impl AddAssign for RenderStats {
    fn add_assign(&mut self, rhs: Self) {
        self.cameras += rhs.cameras;
        self.draw_calls += rhs.draw_calls;
        self.material_binds += rhs.material_binds;
        self.vertices += rhs.vertices;
        self.mesh_jobs += rhs.mesh_jobs;
        self.primitive_jobs += rhs.primitive_jobs;
        self.lines += rhs.lines;
        self.skipped += rhs.skipped;
    }
}

/// One render pass over a job pool
pub struct RenderPass<'a> {
    materials: &'a mut MaterialMatrix,
    meshes: &'a mut MeshCache,
    backend: &'a mut dyn OverlayBackend,
    delta: f32,
    stats: RenderStats,
    first_error: Option<RenderError>,
}

impl<'a> RenderPass<'a> {
    /// Prepare a pass that ages jobs by `delta` seconds
    pub fn new(
        materials: &'a mut MaterialMatrix,
        meshes: &'a mut MeshCache,
        backend: &'a mut dyn OverlayBackend,
        delta: f32,
    ) -> Self {
        Self {
            materials,
            meshes,
            backend,
            delta,
            stats: RenderStats::default(),
            first_error: None,
        }
    }

    /// Draw and age every live job in `pool`
    pub fn run(mut self, pool: &mut JobPool) -> RenderResult<RenderStats> {
        self.stats.cameras = 1;
        self.draw_mesh_jobs(&mut pool.mesh_jobs);
        self.draw_primitive_jobs(&mut pool.primitive_jobs);
        self.draw_lines(&mut pool.line_batches);

        match self.first_error {
            Some(error) => Err(error),
            None => Ok(self.stats),
        }
    }

    fn record(&mut self, result: RenderResult<()>) {
        if let Err(error) = result {
            log::error!("Overlay draw failed: {}", error);
            self.first_error.get_or_insert(error);
        }
    }

    fn bind(&mut self, material: MaterialHandle) -> RenderResult<()> {
        self.backend.set_pass(material)?;
        self.stats.material_binds += 1;
        Ok(())
    }

    fn draw_mesh_jobs(&mut self, jobs: &mut [MeshJob]) {
        self.materials.reset_colors(self.backend);
        let mut bound: Option<(MaterialHandle, Color)> = None;

        for job in jobs.iter_mut() {
            let material = self.materials.get_or_create(job.material, self.backend);
            let mesh = job.mesh.and_then(|id| self.meshes.gpu_handle(id, self.backend));

            match (material, mesh) {
                (Some(material), Some(mesh)) => {
                    let result = self.draw_mesh(job, material, mesh, &mut bound);
                    self.record(result);
                }
                _ => self.stats.skipped += 1,
            }

            job.age(self.delta);
        }
    }

    fn draw_mesh(
        &mut self,
        job: &MeshJob,
        material: MaterialHandle,
        mesh: MeshHandle,
        bound: &mut Option<(MaterialHandle, Color)>,
    ) -> RenderResult<()> {
        if *bound != Some((material, job.color)) {
            self.backend.set_material_color(material, job.color);
            self.bind(material)?;
            *bound = Some((material, job.color));
        }

        self.backend.draw_mesh_now(mesh, &job.transform)?;
        self.stats.draw_calls += 1;
        self.stats.mesh_jobs += 1;
        Ok(())
    }

    fn draw_primitive_jobs(&mut self, jobs: &mut [PrimitiveJob]) {
        self.materials.reset_colors(self.backend);
        let mut bound: Option<MaterialHandle> = None;

        self.backend.push_matrix();
        for job in jobs.iter_mut() {
            match self.materials.get_or_create(job.material, self.backend) {
                Some(material) => {
                    let result = self.draw_primitive(job, material, &mut bound);
                    self.record(result);
                }
                None => self.stats.skipped += 1,
            }

            job.age(self.delta);
        }
        self.backend.pop_matrix();
    }

    fn draw_primitive(
        &mut self,
        job: &PrimitiveJob,
        material: MaterialHandle,
        bound: &mut Option<MaterialHandle>,
    ) -> RenderResult<()> {
        if job.vertices.is_empty() {
            return Ok(());
        }

        if *bound != Some(material) {
            self.backend.set_material_color(material, Color::WHITE);
            self.bind(material)?;
            *bound = Some(material);
        }

        if let Some(transform) = &job.transform {
            self.backend.push_matrix();
            self.backend.mult_matrix(transform);
        }

        self.backend.begin(job.topology);
        for (n, vertex) in job.vertices.iter().enumerate() {
            if job.use_vertex_color || n == 0 {
                self.backend.color(vertex.color);
            }
            self.backend.vertex(&vertex.position);
        }
        let result = self.backend.end();

        if job.transform.is_some() {
            self.backend.pop_matrix();
        }

        result?;
        self.stats.draw_calls += 1;
        self.stats.primitive_jobs += 1;
        self.stats.vertices += job.vertices.len();
        Ok(())
    }

    fn draw_lines(&mut self, batches: &mut [LineBatch]) {
        self.materials.reset_colors(self.backend);

        self.backend.push_matrix();
        for batch in batches.iter_mut() {
            if batch.is_empty() {
                continue;
            }

            match self.materials.get_or_create(batch.material_key(), self.backend) {
                Some(material) => {
                    let result = self.draw_line_batch(batch, material);
                    self.record(result);
                }
                None => self.stats.skipped += batch.len(),
            }

            for line in &mut batch.lines {
                line.age(self.delta);
            }
        }
        self.backend.pop_matrix();
    }

    fn draw_line_batch(&mut self, batch: &LineBatch, material: MaterialHandle) -> RenderResult<()> {
        self.backend.set_material_color(material, Color::WHITE);
        self.bind(material)?;

        self.backend.begin(Topology::Lines);
        for line in batch.lines() {
            self.backend.color(line.color);
            self.backend.vertex(&line.start);
            self.backend.vertex(&line.end);
        }
        self.backend.end()?;

        self.stats.draw_calls += 1;
        self.stats.lines += batch.len();
        self.stats.vertices += batch.len() * 2;
        Ok(())
    }
}
