//! Headless debug overlay demo
//!
//! Simulates a short game session against the recording backend: a field of
//! drifting rocks is visualized with wire spheres and velocity rays, a few
//! long-lived markers are dropped along the way, and the host is paused for
//! a while halfway through. Per-frame counters are logged and a summary is
//! printed at the end.
//!
//! Usage: `overlay_demo [config.toml|config.ron]`

use debug_overlay::build_support;
use debug_overlay::foundation::logging;
use debug_overlay::prelude::*;
use rand::Rng;
use thiserror::Error;

const FRAME_COUNT: u64 = 240;
const FIXED_DELTA: f32 = 1.0 / 60.0;
const ROCK_COUNT: usize = 24;
const PAUSED_FRAMES: std::ops::Range<u64> = 100..130;

/// Demo failures
#[derive(Error, Debug)]
enum DemoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

struct Rock {
    position: Vec3,
    velocity: Vec3,
    radius: f32,
}

impl Rock {
    fn random(rng: &mut impl Rng) -> Self {
        Self {
            position: Vec3::new(rng.gen_range(-20.0..20.0), 0.0, rng.gen_range(-20.0..20.0)),
            velocity: Vec3::new(rng.gen_range(-3.0..3.0), 0.0, rng.gen_range(-3.0..3.0)),
            radius: rng.gen_range(0.5..2.5),
        }
    }

    fn update(&mut self, delta: f32) {
        self.position += self.velocity * delta;
        for axis in [0, 2] {
            if self.position[axis].abs() > 20.0 {
                self.velocity[axis] = -self.velocity[axis];
            }
        }
    }
}

struct Session {
    draw: DebugDraw,
    backend: RecordingBackend,
    rocks: Vec<Rock>,
    totals: RenderStats,
    peak_live_jobs: usize,
}

impl Session {
    fn new(config: OverlayConfig) -> Result<Self, DemoError> {
        let mut rng = rand::thread_rng();
        Ok(Self {
            draw: DebugDraw::try_new(config)?,
            backend: RecordingBackend::new(),
            rocks: (0..ROCK_COUNT).map(|_| Rock::random(&mut rng)).collect(),
            totals: RenderStats::default(),
            peak_live_jobs: 0,
        })
    }

    fn frame(&mut self, timing: &FrameTiming) -> Result<(), DemoError> {
        self.draw.on_update(timing);

        if !timing.paused {
            for rock in &mut self.rocks {
                rock.update(timing.unscaled_delta);
            }
        }
        self.submit(timing);

        let cameras = [CameraView::main_game(), CameraView::scene_view()];
        let stats = self.draw.render_cameras(&cameras, timing, &mut self.backend)?;
        self.totals += stats;
        self.peak_live_jobs = self.peak_live_jobs.max(self.draw.pool().live_count());

        log::debug!(
            "Frame {}{}: {} draw calls, {} binds, {} live jobs",
            timing.frame_index,
            if timing.paused { " (paused)" } else { "" },
            stats.draw_calls,
            stats.material_binds,
            self.draw.pool().live_count()
        );
        Ok(())
    }

    fn submit(&mut self, timing: &FrameTiming) {
        let frame = DrawOptions::new();
        for rock in &self.rocks {
            self.draw.wire_sphere(
                rock.position,
                Quat::identity(),
                Vec3::repeat(rock.radius * 2.0),
                Color::CYAN,
                frame,
            );
            self.draw.ray(rock.position, rock.velocity, Color::YELLOW, frame.on_top());
        }

        self.draw.matrix(&Mat4::identity(), frame.on_top());
        self.draw.wire_quad(Vec3::zeros(), Quat::identity(), Vec3::new(40.0, 1.0, 40.0), Color::WHITE, frame);

        // Drop a marker every second that stays for three seconds
        if timing.frame_index % 60 == 0 {
            let mut rng = rand::thread_rng();
            let position = Vec3::new(rng.gen_range(-20.0..20.0), 0.0, rng.gen_range(-20.0..20.0));
            let marker = frame.with_duration(3.0);
            self.draw.cube(position, Quat::identity(), Vec3::repeat(0.5), Color::RED, marker);
            self.draw.wire_disc(position, Quat::identity(), 1.5, Color::RED, marker);

            let arc = ArcShape::new(position, Quat::identity(), Vec3::x(), 120.0, 2.0).with_radii(1.5, 2.0);
            self.draw.arc(&arc, Color::GREEN, marker);
        }
    }
}

fn load_config() -> Result<OverlayConfig, DemoError> {
    match std::env::args().nth(1) {
        Some(path) => Ok(OverlayConfig::load_from_file(path)?),
        None => Ok(OverlayConfig::default()),
    }
}

fn run() -> Result<(), DemoError> {
    let config = load_config()?;
    logging::init_with_level(&config.log_level);
    log::info!("Starting debug overlay demo");

    let mut always_included = vec!["Standard".to_string()];
    build_support::sync_always_included_shaders(&mut always_included);
    log::info!("Always-included shaders: {:?}", always_included);

    let mut session = Session::new(config)?;
    for frame_index in 1..=FRAME_COUNT {
        let mut timing = FrameTiming::new(frame_index, FIXED_DELTA);
        if PAUSED_FRAMES.contains(&frame_index) {
            timing = timing.paused();
        } else if frame_index == PAUSED_FRAMES.end {
            // The host reports the whole pause as elapsed time on resume
            #[allow(clippy::cast_precision_loss)]
            let pause = (PAUSED_FRAMES.end - PAUSED_FRAMES.start) as f32 * FIXED_DELTA;
            timing = FrameTiming::new(frame_index, pause);
        }
        session.frame(&timing)?;
    }

    let released = session.draw.shutdown(&mut session.backend);
    let totals = session.totals;

    println!("Debug overlay demo: {} frames", FRAME_COUNT);
    println!("  camera passes:    {}", totals.cameras);
    println!("  draw calls:       {}", totals.draw_calls);
    println!("  material binds:   {}", totals.material_binds);
    println!("  vertices:         {}", totals.vertices);
    println!("  skipped:          {}", totals.skipped);
    println!("  peak live jobs:   {}", session.peak_live_jobs);
    println!(
        "  released:         {} materials, {} meshes",
        released.materials, released.meshes
    );
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Demo failed: {}", e);
        std::process::exit(1);
    }
}
