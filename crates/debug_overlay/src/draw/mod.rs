//! # Debug Draw Context
//!
//! [`DebugDraw`] is the object the host creates once and keeps for as long as
//! it wants debug geometry. It owns the job pool, the material matrix, the
//! shape mesh cache and the lifetime scheduler. The host drives it through
//! two hooks:
//!
//! ```text
//! every frame:
//!     draw.on_update(&timing)                       // cleanup tick, first thing in the frame
//!     ... game code calls draw.line(..), draw.cube(..), ...
//!     for each camera that renders:
//!         draw.on_camera_render(&view, &timing, &mut backend)?
//! at teardown:
//!     draw.shutdown(&mut backend)
//! ```
//!
//! Every drawing call is a no-op while the context is inactive: disabled at
//! runtime, compiled without the `enabled` feature, outside an active host
//! runtime state, or after [`DebugDraw::shutdown`]. Callers never need to
//! check that themselves.
//!
//! Creating a context does no GPU work. Materials are created and meshes are
//! uploaded by the first render pass that needs them.

mod shapes;

#[cfg(test)]
mod overlay_tests;

pub use shapes::{ArcShape, ARC_SEGMENTS, UNBOUNDED_RAY_LENGTH};

use crate::config::{Config, ConfigError};
use crate::core::config::OverlayConfig;
use crate::foundation::color::Color;
use crate::foundation::math::{Mat4, Vec3};
use crate::foundation::time::FrameTiming;
use crate::pool::{JobPool, LineBatch, MeshJob, PrimitiveJob, RemovedJobs};
use crate::render::api::OverlayBackend;
use crate::render::camera::CameraView;
use crate::render::material::MaterialMatrix;
use crate::render::pass::{RenderPass, RenderStats};
use crate::render::primitives::{MeshData, Topology};
use crate::render::state::CullMode;
use crate::render::RenderResult;
use crate::scheduler::LifetimeScheduler;
use crate::shapes::{MeshCache, MeshId, ShapeKind};

/// Whether drawing was compiled in (cargo feature `enabled`)
pub const IS_SUPPORTED: bool = cfg!(feature = "enabled");

/// Per-call drawing options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawOptions {
    /// Seconds the geometry stays visible; `0.0` draws for the current frame only
    pub duration: f32,
    /// Whether scene geometry occludes the overlay
    pub depth_test: bool,
}

impl DrawOptions {
    /// Current frame only, depth tested
    pub const FRAME: Self = Self {
        duration: 0.0,
        depth_test: true,
    };

    /// Default options
    pub const fn new() -> Self {
        Self::FRAME
    }

    /// Keep the geometry for `duration` seconds
    #[must_use]
    pub const fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    /// Enable or disable depth testing
    #[must_use]
    pub const fn with_depth_test(mut self, depth_test: bool) -> Self {
        self.depth_test = depth_test;
        self
    }

    /// Drawn on top of scene geometry
    #[must_use]
    pub const fn on_top(self) -> Self {
        self.with_depth_test(false)
    }
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// GPU resources released by [`DebugDraw::shutdown`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReleasedResources {
    /// Materials released
    pub materials: usize,
    /// Meshes released
    pub meshes: usize,
}

/// Primitive job under construction.
///
/// Inert when returned by an inactive context. Dropping the handle without
/// calling [`PrimitiveJobHandle::submit`] discards the job.
pub struct PrimitiveJobHandle<'a> {
    inner: Option<(PrimitiveJob, &'a mut JobPool)>,
}

impl<'a> PrimitiveJobHandle<'a> {
    fn inactive() -> Self {
        Self { inner: None }
    }

    /// Whether calls on this handle have any effect
    pub fn is_active(&self) -> bool {
        self.inner.is_some()
    }

    /// Append a vertex
    pub fn add_vertex(&mut self, position: Vec3, color: Color) -> &mut Self {
        if let Some((job, _)) = &mut self.inner {
            job.add_vertex(position, color);
        }
        self
    }

    /// Draw the vertices in the space of `transform`
    pub fn set_transform(&mut self, transform: Mat4) -> &mut Self {
        if let Some((job, _)) = &mut self.inner {
            job.set_transform(transform);
        }
        self
    }

    /// Emit each vertex's own color
    pub fn set_use_vertex_color(&mut self, use_vertex_color: bool) -> &mut Self {
        if let Some((job, _)) = &mut self.inner {
            job.set_use_vertex_color(use_vertex_color);
        }
        self
    }

    /// Make the job visible to the next render pass
    pub fn submit(mut self) {
        if let Some((job, pool)) = self.inner.take() {
            pool.submit_primitive(job);
        }
    }
}

impl Drop for PrimitiveJobHandle<'_> {
    fn drop(&mut self) {
        if let Some((job, pool)) = self.inner.take() {
            pool.discard_primitive(job);
        }
    }
}

/// Mesh job under construction; inert when returned by an inactive context
pub struct MeshJobHandle<'a> {
    inner: Option<(MeshJob, &'a mut JobPool)>,
}

impl<'a> MeshJobHandle<'a> {
    fn inactive() -> Self {
        Self { inner: None }
    }

    /// Whether calls on this handle have any effect
    pub fn is_active(&self) -> bool {
        self.inner.is_some()
    }

    /// Mesh to draw
    pub fn set_mesh(&mut self, mesh: MeshId) -> &mut Self {
        if let Some((job, _)) = &mut self.inner {
            job.set_mesh(mesh);
        }
        self
    }

    /// Model matrix
    pub fn set_transform(&mut self, transform: Mat4) -> &mut Self {
        if let Some((job, _)) = &mut self.inner {
            job.set_transform(transform);
        }
        self
    }

    /// Material tint
    pub fn set_color(&mut self, color: Color) -> &mut Self {
        if let Some((job, _)) = &mut self.inner {
            job.set_color(color);
        }
        self
    }

    /// Make the job visible to the next render pass
    pub fn submit(mut self) {
        if let Some((job, pool)) = self.inner.take() {
            pool.submit_mesh(job);
        }
    }
}

/// Persistent line batch; inert when returned by an inactive context
pub struct LineBatchHandle<'a> {
    batch: Option<&'a mut LineBatch>,
}

impl LineBatchHandle<'_> {
    /// Whether calls on this handle have any effect
    pub fn is_active(&self) -> bool {
        self.batch.is_some()
    }

    /// Append a line, visible from the next render pass
    pub fn add_line(&mut self, start: Vec3, end: Vec3, color: Color, duration: f32) -> &mut Self {
        if let Some(batch) = &mut self.batch {
            batch.add_line(start, end, color, duration);
        }
        self
    }

    /// Entries currently in the batch; zero for an inert handle
    pub fn len(&self) -> usize {
        self.batch.as_ref().map_or(0, |batch| batch.len())
    }

    /// Whether the batch is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Debug overlay context
pub struct DebugDraw {
    config: OverlayConfig,
    enabled: bool,
    runtime_active: bool,
    shut_down: bool,
    pool: JobPool,
    materials: MaterialMatrix,
    meshes: MeshCache,
    scheduler: LifetimeScheduler,
    frame_stats: RenderStats,
}

impl DebugDraw {
    /// Create a context from a configuration that must pass validation.
    /// No GPU resources are created here.
    pub fn try_new(config: OverlayConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Create a context. No GPU resources are created here.
    ///
    /// An invalid configuration is logged and used as given; see
    /// [`DebugDraw::try_new`] to reject it instead.
    pub fn new(config: OverlayConfig) -> Self {
        if let Err(e) = config.validate() {
            log::error!("Debug overlay created with an invalid configuration: {}", e);
        }
        if !IS_SUPPORTED {
            log::debug!("Debug overlay compiled without the `enabled` feature; drawing is a no-op");
        }

        Self {
            enabled: config.enabled,
            runtime_active: true,
            shut_down: false,
            pool: JobPool::new(&config),
            materials: MaterialMatrix::new(&config),
            meshes: MeshCache::new(),
            scheduler: LifetimeScheduler::new(),
            frame_stats: RenderStats::default(),
            config,
        }
    }

    /// Configuration the context was created with
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Set the global enable switch
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Global enable switch
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Tell the overlay whether the host is in a state where drawing calls
    /// should be recorded (for example, play mode in an editor)
    pub fn set_runtime_active(&mut self, active: bool) {
        self.runtime_active = active;
    }

    /// Whether drawing calls are recorded
    pub fn is_active(&self) -> bool {
        IS_SUPPORTED && self.enabled && self.runtime_active && !self.shut_down
    }

    fn renders(&self) -> bool {
        IS_SUPPORTED && self.enabled && !self.shut_down
    }

    /// Live jobs
    pub fn pool(&self) -> &JobPool {
        &self.pool
    }

    /// Material matrix
    pub fn materials(&self) -> &MaterialMatrix {
        &self.materials
    }

    /// Shape mesh cache
    pub fn meshes(&self) -> &MeshCache {
        &self.meshes
    }

    /// Counters accumulated over every camera of the current frame
    pub fn stats(&self) -> RenderStats {
        self.frame_stats
    }

    /// Id of a built-in shape mesh
    pub fn shape_mesh(&mut self, kind: ShapeKind) -> MeshId {
        self.meshes.shape(kind)
    }

    /// Register a custom mesh for [`DebugDraw::mesh`]
    pub fn insert_mesh(&mut self, data: MeshData) -> MeshId {
        self.meshes.insert(data)
    }

    /// Remove a custom mesh; jobs still referencing it are skipped
    pub fn remove_mesh(&mut self, mesh: MeshId, backend: &mut dyn OverlayBackend) -> bool {
        self.meshes.remove(mesh, backend)
    }

    /// Start a primitive job
    pub fn allocate_primitive(
        &mut self,
        topology: Topology,
        duration: f32,
        depth_test: bool,
        cull_mode: CullMode,
        shaded: bool,
    ) -> PrimitiveJobHandle<'_> {
        if !self.is_active() {
            return PrimitiveJobHandle::inactive();
        }

        let job = self
            .pool
            .allocate_primitive(topology, duration, depth_test, cull_mode, shaded);
        PrimitiveJobHandle {
            inner: Some((job, &mut self.pool)),
        }
    }

    /// Start a mesh job
    pub fn allocate_mesh(
        &mut self,
        duration: f32,
        depth_test: bool,
        cull_mode: CullMode,
        shaded: bool,
    ) -> MeshJobHandle<'_> {
        if !self.is_active() {
            return MeshJobHandle::inactive();
        }

        let job = self.pool.allocate_mesh(duration, depth_test, cull_mode, shaded);
        MeshJobHandle {
            inner: Some((job, &mut self.pool)),
        }
    }

    /// The persistent line batch for a render state
    pub fn line_batch(&mut self, depth_test: bool, cull_mode: CullMode) -> LineBatchHandle<'_> {
        if !self.is_active() {
            return LineBatchHandle { batch: None };
        }

        LineBatchHandle {
            batch: Some(self.pool.line_batch(depth_test, cull_mode)),
        }
    }

    /// Cleanup tick. Call once per frame before any camera renders.
    pub fn on_update(&mut self, timing: &FrameTiming) -> RemovedJobs {
        self.frame_stats = RenderStats::default();
        if self.shut_down {
            return RemovedJobs::default();
        }
        self.scheduler.cleanup(&mut self.pool, timing)
    }

    /// Render hook. Call once per camera after the scene has been drawn.
    ///
    /// Cameras other than the main game camera and scene views are ignored.
    /// Every drawn job ages by the frame's effective delta.
    pub fn on_camera_render(
        &mut self,
        camera: &CameraView,
        timing: &FrameTiming,
        backend: &mut dyn OverlayBackend,
    ) -> RenderResult<RenderStats> {
        if !self.renders() || !camera.shows_overlay() {
            return Ok(RenderStats::default());
        }

        let delta = self.scheduler.effective_delta(timing);
        let stats = RenderPass::new(&mut self.materials, &mut self.meshes, backend, delta)
            .run(&mut self.pool)?;

        self.frame_stats += stats;
        log::trace!(
            "Frame {} {:?}: {} draw calls, {} binds",
            timing.frame_index,
            camera.kind,
            stats.draw_calls,
            stats.material_binds
        );
        Ok(stats)
    }

    /// Render hook for several cameras in order.
    ///
    /// Every camera is drawn even if an earlier one fails; the first error is
    /// returned.
    pub fn render_cameras(
        &mut self,
        cameras: &[CameraView],
        timing: &FrameTiming,
        backend: &mut dyn OverlayBackend,
    ) -> RenderResult<RenderStats> {
        let mut total = RenderStats::default();
        let mut first_error = None;

        for camera in cameras {
            match self.on_camera_render(camera, timing, backend) {
                Ok(stats) => total += stats,
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(total),
        }
    }

    /// Release every material and mesh and drop all jobs.
    ///
    /// The context stays inactive afterwards; a second call releases nothing.
    pub fn shutdown(&mut self, backend: &mut dyn OverlayBackend) -> ReleasedResources {
        if self.shut_down {
            log::debug!("Debug overlay already shut down");
            return ReleasedResources::default();
        }

        let released = ReleasedResources {
            materials: self.materials.release_all(backend),
            meshes: self.meshes.release_all(backend),
        };
        self.pool.discard_all();
        self.scheduler.reset();
        self.shut_down = true;

        log::debug!(
            "Debug overlay shut down: released {} materials and {} meshes",
            released.materials,
            released.meshes
        );
        released
    }

    /// Whether [`DebugDraw::shutdown`] has run
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }
}

impl Default for DebugDraw {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}

impl Drop for DebugDraw {
    fn drop(&mut self) {
        if !self.shut_down && (self.materials.created_count() > 0 || self.meshes.uploaded_count() > 0) {
            log::warn!(
                "DebugDraw dropped without shutdown(); {} materials and {} meshes were not released",
                self.materials.created_count(),
                self.meshes.uploaded_count()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Quat;
    use crate::render::recording::RecordingBackend;

    #[test]
    fn test_draw_options_defaults() {
        let options = DrawOptions::default();
        assert_eq!(options.duration, 0.0);
        assert!(options.depth_test);
        assert!(!DrawOptions::new().on_top().depth_test);
        assert_eq!(DrawOptions::new().with_duration(2.0).duration, 2.0);
    }

    #[test]
    fn test_try_new_rejects_invalid_config() {
        let invalid = OverlayConfig::default().with_vertex_buffer_capacity(0);
        assert!(matches!(DebugDraw::try_new(invalid), Err(ConfigError::Invalid(_))));

        let draw = DebugDraw::try_new(OverlayConfig::default()).unwrap();
        assert!(draw.is_active());
    }

    #[test]
    fn test_inactive_handles_are_inert() {
        let mut draw = DebugDraw::default();
        draw.set_enabled(false);

        let mut job = draw.allocate_primitive(Topology::Lines, 0.0, true, CullMode::Off, false);
        assert!(!job.is_active());
        job.add_vertex(Vec3::zeros(), Color::RED);
        job.submit();

        let mut batch = draw.line_batch(true, CullMode::Off);
        assert!(!batch.is_active());
        batch.add_line(Vec3::zeros(), Vec3::x(), Color::RED, 0.0);

        let mesh = draw.allocate_mesh(0.0, true, CullMode::Off, true);
        assert!(!mesh.is_active());
        mesh.submit();

        assert_eq!(draw.pool().live_count(), 0);
    }

    #[test]
    fn test_runtime_inactive_blocks_submission() {
        let mut draw = DebugDraw::default();
        draw.set_runtime_active(false);
        assert!(!draw.is_active());
        draw.line(Vec3::zeros(), Vec3::x(), Color::RED, DrawOptions::new());
        assert_eq!(draw.pool().live_count(), 0);
    }

    #[test]
    fn test_dropped_handle_returns_buffer() {
        let mut draw = DebugDraw::default();
        {
            let mut job = draw.allocate_primitive(Topology::Lines, 0.0, true, CullMode::Off, false);
            job.add_vertex(Vec3::zeros(), Color::RED);
        }
        assert!(draw.pool().primitive_jobs().is_empty());
        assert_eq!(draw.pool().buffers().available(), 1);
    }

    #[test]
    fn test_handle_submit_makes_job_live() {
        let mut draw = DebugDraw::default();
        let mut job = draw.allocate_primitive(Topology::Lines, 0.0, true, CullMode::Off, false);
        job.add_vertex(Vec3::zeros(), Color::RED)
            .add_vertex(Vec3::x(), Color::RED);
        job.submit();

        let cube = draw.shape_mesh(ShapeKind::Cube);
        let mut mesh = draw.allocate_mesh(0.0, true, CullMode::Back, true);
        mesh.set_mesh(cube).set_color(Color::BLUE);
        mesh.submit();

        assert_eq!(draw.pool().primitive_jobs().len(), 1);
        assert_eq!(draw.pool().primitive_jobs()[0].vertices().len(), 2);
        assert_eq!(draw.pool().mesh_jobs()[0].color(), Color::BLUE);
    }

    #[test]
    fn test_context_creation_does_no_gpu_work() {
        let mut draw = DebugDraw::default();
        let mut backend = RecordingBackend::new();
        assert_eq!(draw.materials().created_count(), 0);
        draw.shutdown(&mut backend);
        assert_eq!(backend.materials_created(), 0);
        assert!(backend.commands().is_empty());
    }

    #[test]
    fn test_disabled_context_skips_render() {
        let mut draw = DebugDraw::default();
        let mut backend = RecordingBackend::new();
        draw.line(Vec3::zeros(), Vec3::x(), Color::RED, DrawOptions::new().with_duration(1.0));
        draw.set_enabled(false);

        let stats = draw
            .on_camera_render(&CameraView::main_game(), &FrameTiming::new(1, 0.1), &mut backend)
            .unwrap();
        assert_eq!(stats, RenderStats::default());
        assert!(backend.commands().is_empty());
        // Not drawn, so not aged
        assert_eq!(draw.pool().line_batches()[3].lines()[0].remaining_duration(), 1.0);
    }

    #[test]
    fn test_shutdown_releases_once_and_deactivates() {
        let mut draw = DebugDraw::default();
        let mut backend = RecordingBackend::new();
        draw.cube(Vec3::zeros(), Quat::identity(), Vec3::repeat(1.0), Color::RED, DrawOptions::new());
        draw.line(Vec3::zeros(), Vec3::x(), Color::RED, DrawOptions::new());
        draw.on_camera_render(&CameraView::main_game(), &FrameTiming::new(1, 0.016), &mut backend)
            .unwrap();

        let released = draw.shutdown(&mut backend);
        assert_eq!(released, ReleasedResources { materials: 2, meshes: 1 });
        assert_eq!(backend.live_materials(), 0);
        assert_eq!(backend.live_meshes(), 0);
        assert_eq!(draw.pool().live_count(), 0);

        assert_eq!(draw.shutdown(&mut backend), ReleasedResources::default());
        assert!(!draw.is_active());
        draw.line(Vec3::zeros(), Vec3::x(), Color::RED, DrawOptions::new());
        assert_eq!(draw.pool().live_count(), 0);
    }
}
