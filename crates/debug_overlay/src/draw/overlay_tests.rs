//! End-to-end frame tests: drawing calls, cleanup tick and camera renders
//! driven together through a [`RecordingBackend`].

use super::*;
use crate::foundation::math::Quat;
use crate::render::camera::CameraKind;
use crate::render::recording::RecordingBackend;
use crate::render::state::{RenderState, MATERIAL_SLOT_COUNT};

struct Frame {
    draw: DebugDraw,
    backend: RecordingBackend,
    index: u64,
}

impl Frame {
    fn new() -> Self {
        Self {
            draw: DebugDraw::default(),
            backend: RecordingBackend::new(),
            index: 0,
        }
    }

    /// Run one host frame: cleanup tick, then every camera in order
    fn step(&mut self, delta: f32, paused: bool, cameras: &[CameraView]) -> RenderStats {
        self.index += 1;
        let mut timing = FrameTiming::new(self.index, delta);
        if paused {
            timing = timing.paused();
        }

        self.draw.on_update(&timing);
        self.draw
            .render_cameras(cameras, &timing, &mut self.backend)
            .unwrap()
    }

    fn render(&mut self, delta: f32) -> RenderStats {
        self.step(delta, false, &[CameraView::main_game()])
    }
}

#[test]
fn test_timed_line_drawn_for_ceil_of_duration_over_delta() {
    let mut frame = Frame::new();
    frame
        .draw
        .line(Vec3::zeros(), Vec3::x(), Color::RED, DrawOptions::new().with_duration(0.5));

    let drawn: Vec<usize> = (0..6).map(|_| frame.render(0.125).lines).collect();
    assert_eq!(drawn, vec![1, 1, 1, 1, 0, 0]);
    assert_eq!(frame.draw.pool().line_count(), 0);
}

#[test]
fn test_frame_duration_drawn_by_every_camera_then_removed() {
    let mut frame = Frame::new();
    let cameras = [CameraView::main_game(), CameraView::scene_view()];

    frame.index += 1;
    let timing = FrameTiming::new(frame.index, 0.016);
    frame.draw.on_update(&timing);
    frame.draw.ray(Vec3::zeros(), Vec3::y(), Color::GREEN, DrawOptions::new());
    let stats = frame
        .draw
        .render_cameras(&cameras, &timing, &mut frame.backend)
        .unwrap();

    assert_eq!(stats.cameras, 2);
    assert_eq!(stats.primitive_jobs, 2);
    assert_eq!(frame.draw.pool().primitive_jobs().len(), 1);

    let next = frame.step(0.016, false, &cameras);
    assert_eq!(next.primitive_jobs, 0);
    assert!(frame.draw.pool().primitive_jobs().is_empty());
}

#[test]
fn test_every_shape_with_every_state_stays_within_material_slots() {
    let mut frame = Frame::new();
    let arc = ArcShape::new(Vec3::zeros(), Quat::identity(), Vec3::x(), 90.0, 1.0);

    for depth_test in [false, true] {
        let o = DrawOptions::new().with_depth_test(depth_test);
        let (p, r, s, c) = (Vec3::zeros(), Quat::identity(), Vec3::repeat(1.0), Color::CYAN);
        frame.draw.line(p, Vec3::x(), c, o);
        frame.draw.poly_line(&[p, Vec3::x(), Vec3::y()], c, o);
        frame.draw.ray(p, Vec3::x(), c, o);
        frame.draw.matrix(&Mat4::identity(), o);
        frame.draw.arc(&arc, c, o);
        frame.draw.wire_arc(&arc, c, o);
        frame.draw.wire_quad(p, r, s, c, o);
        frame.draw.cube(p, r, s, c, o);
        frame.draw.sphere(p, r, s, c, o);
        frame.draw.wire_sphere(p, r, s, c, o);
        frame.draw.disc(p, r, 1.0, c, o);
        frame.draw.plane(Vec3::y(), p, s, c, o);
        frame.draw.wire_hemisphere(p, r, s, c, o);
        for cull in CullMode::ALL {
            frame.draw.line_batch(depth_test, cull).add_line(p, Vec3::z(), c, 0.0);
            let mut job = frame.draw.allocate_primitive(Topology::Lines, 0.0, depth_test, cull, false);
            job.add_vertex(p, c).add_vertex(Vec3::z(), c);
            job.submit();
        }
    }

    frame.render(0.016);
    assert!(frame.draw.materials().created_count() <= MATERIAL_SLOT_COUNT);
    assert_eq!(frame.backend.materials_created(), frame.draw.materials().created_count());
}

#[test]
fn test_empty_point_lists_create_nothing() {
    let mut frame = Frame::new();
    frame.draw.lines(&[], Color::RED, DrawOptions::new());
    frame.draw.lines(&[Vec3::x()], Color::RED, DrawOptions::new());
    frame.draw.poly_line(&[], Color::RED, DrawOptions::new());
    frame.draw.poly_line(&[Vec3::x()], Color::RED, DrawOptions::new());

    assert_eq!(frame.draw.pool().live_count(), 0);
    let stats = frame.render(0.016);
    assert_eq!(stats.draw_calls, 0);
    assert_eq!(frame.backend.draw_calls(), 0);
}

#[test]
fn test_survivors_keep_submission_order() {
    let mut frame = Frame::new();
    for (length, duration) in [(1.0, 0.0), (2.0, 1.0), (3.0, 0.0), (4.0, 1.0), (5.0, 1.0)] {
        frame.draw.ray(
            Vec3::zeros(),
            Vec3::x() * length,
            Color::RED,
            DrawOptions::new().with_duration(duration),
        );
    }

    frame.render(0.016);
    frame.render(0.016);

    let ends: Vec<f32> = frame
        .draw
        .pool()
        .primitive_jobs()
        .iter()
        .map(|job| job.vertices()[1].position.x)
        .collect();
    assert_eq!(ends, vec![2.0, 4.0, 5.0]);
}

#[test]
fn test_pause_then_resume_does_not_expire_jobs() {
    let mut frame = Frame::new();
    frame
        .draw
        .cube(Vec3::zeros(), Quat::identity(), Vec3::repeat(1.0), Color::RED, DrawOptions::new().with_duration(0.05));

    frame.render(0.016);
    frame.step(0.016, true, &[CameraView::main_game()]);
    // The resume frame reports the whole pause as elapsed time
    let resumed = frame.step(30.0, false, &[CameraView::main_game()]);
    assert_eq!(resumed.mesh_jobs, 1);

    let remaining = frame.draw.pool().mesh_jobs()[0].remaining_duration();
    assert!((remaining - (0.05 - 0.032)).abs() < 1e-6);

    frame.render(0.016);
    frame.render(0.016);
    assert_eq!(frame.draw.pool().mesh_jobs().len(), 1);
    assert_eq!(frame.render(0.016).mesh_jobs, 0);
    assert!(frame.draw.pool().mesh_jobs().is_empty());
}

#[test]
fn test_line_batch_is_shared_per_state() {
    let mut frame = Frame::new();
    frame
        .draw
        .line_batch(true, CullMode::Off)
        .add_line(Vec3::zeros(), Vec3::x(), Color::RED, 0.0);
    let len = frame
        .draw
        .line_batch(true, CullMode::Off)
        .add_line(Vec3::zeros(), Vec3::y(), Color::RED, 0.0)
        .len();
    assert_eq!(len, 2);

    let index = RenderState::new(true, CullMode::Off).index();
    assert_eq!(frame.draw.pool().line_batches()[index].len(), 2);
    assert_eq!(frame.draw.pool().line_count(), 2);
}

#[test]
fn test_other_cameras_neither_draw_nor_age() {
    let mut frame = Frame::new();
    frame
        .draw
        .line(Vec3::zeros(), Vec3::x(), Color::RED, DrawOptions::new().with_duration(1.0));

    let cameras = [
        CameraView::secondary_game(),
        CameraView::of_kind(CameraKind::Preview),
        CameraView::of_kind(CameraKind::Reflection),
    ];
    let stats = frame.step(0.25, false, &cameras);

    assert_eq!(stats, RenderStats::default());
    assert!(frame.backend.commands().is_empty());
    let batch = &frame.draw.pool().line_batches()[RenderState::new(true, CullMode::Off).index()];
    assert_eq!(batch.lines()[0].remaining_duration(), 1.0);
}

#[test]
fn test_arc_vertex_counts_reach_backend() {
    let mut frame = Frame::new();
    let arc = ArcShape::new(Vec3::zeros(), Quat::identity(), Vec3::x(), 270.0, 1.0);
    frame.draw.arc(&arc.with_radii(0.0, 1.0), Color::BLUE, DrawOptions::new());
    frame.draw.wire_arc(&arc, Color::BLUE, DrawOptions::new());

    let stats = frame.render(0.016);
    assert_eq!(stats.primitive_jobs, 2);
    assert_eq!(stats.vertices, 50 + 25);
    assert_eq!(frame.backend.vertex_count(), 75);
    assert_eq!(frame.backend.matrix_depth(), 0);
}

#[test]
fn test_short_job_survives_pause_boundary() {
    let mut frame = Frame::new();
    frame.render(0.016);
    frame
        .draw
        .ray(Vec3::zeros(), Vec3::x(), Color::RED, DrawOptions::new().with_duration(0.016));

    // No camera renders while the host is paused
    frame.step(0.016, true, &[]);
    let resumed = frame.step(5.0, false, &[CameraView::main_game()]);

    assert_eq!(resumed.primitive_jobs, 1);
    assert_eq!(frame.draw.pool().primitive_jobs()[0].remaining_duration(), 0.016);
}

#[test]
fn test_frame_duration_submitted_before_tick_is_drawn_once() {
    let mut frame = Frame::new();
    let options = DrawOptions::new();
    frame.draw.ray(Vec3::zeros(), Vec3::y(), Color::GREEN, options);
    frame
        .draw
        .cube(Vec3::zeros(), Quat::identity(), Vec3::repeat(1.0), Color::RED, options);
    frame.draw.line(Vec3::zeros(), Vec3::x(), Color::RED, options);

    frame.index += 1;
    let timing = FrameTiming::new(frame.index, 0.016);
    let removed = frame.draw.on_update(&timing);
    assert_eq!(removed, RemovedJobs::default());

    let stats = frame
        .draw
        .on_camera_render(&CameraView::main_game(), &timing, &mut frame.backend)
        .unwrap();
    assert_eq!(stats.primitive_jobs, 1);
    assert_eq!(stats.mesh_jobs, 1);
    assert_eq!(stats.lines, 1);

    let next = frame.render(0.016);
    assert_eq!(next.draw_calls, 0);
    assert_eq!(frame.draw.pool().live_count(), 0);
}
