//! # Debug Overlay
//!
//! Transient debug geometry for game and editor cameras. Game code submits
//! lines, wire and solid shapes or custom meshes from anywhere in the frame;
//! the overlay keeps them for the requested duration, draws them into every
//! camera that shows the overlay and removes them once they expire.
//!
//! ## Features
//!
//! - **Job Pool**: primitive jobs, mesh jobs and persistent line batches with
//!   reusable vertex buffers
//! - **Render-State Batching**: at most twelve materials, created on demand
//!   and rebound only when the state changes
//! - **Lifetime Scheduling**: per-frame cleanup, per-camera aging and pause
//!   correction
//! - **Backend Agnostic**: all GPU work goes through [`OverlayBackend`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use debug_overlay::prelude::*;
//!
//! let mut draw = DebugDraw::new(OverlayConfig::default());
//! let mut backend = RecordingBackend::new();
//! let mut clock = FrameClock::new();
//!
//! for _ in 0..3 {
//!     let timing = clock.tick();
//!     draw.on_update(&timing);
//!
//!     draw.line(Vec3::zeros(), Vec3::x(), Color::RED, DrawOptions::new());
//!     draw.wire_cube(Vec3::zeros(), Quat::identity(), Vec3::repeat(1.0), Color::GREEN, DrawOptions::new().with_duration(2.0));
//!
//!     draw.on_camera_render(&CameraView::main_game(), &timing, &mut backend)?;
//! }
//!
//! draw.shutdown(&mut backend);
//! # Ok::<(), RenderError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Shared types
pub mod config;
pub mod core;
pub mod foundation;

// Overlay subsystems
pub mod build_support;
pub mod draw;
pub mod pool;
pub mod render;
pub mod scheduler;
pub mod shapes;

pub use crate::core::config::OverlayConfig;
pub use draw::{ArcShape, DebugDraw, DrawOptions, ReleasedResources, IS_SUPPORTED};
pub use render::{CameraView, OverlayBackend, RecordingBackend, RenderError, RenderResult, RenderStats};

/// Common imports for overlay users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        core::config::OverlayConfig,
        draw::{ArcShape, DebugDraw, DrawOptions},
        foundation::{
            color::Color,
            math::{Mat4, Quat, Vec3},
            time::{FrameClock, FrameTiming},
        },
        render::{
            CameraKind, CameraView, CullMode, MeshData, OverlayBackend, RecordingBackend, RenderError,
            RenderResult, RenderStats, Topology,
        },
        shapes::{MeshId, ShapeKind},
    };
}
