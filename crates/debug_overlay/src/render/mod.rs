//! # Overlay Rendering
//!
//! Everything between the job pool and the host's graphics API.
//!
//! ## Architecture
//!
//! - **Backend** ([`api::OverlayBackend`]): host-implemented immediate-mode
//!   interface; the overlay never touches a graphics API directly
//! - **Render states** ([`state`]): the closed set of six depth/cull states
//!   and the twelve material slots keyed by them
//! - **Materials** ([`material::MaterialMatrix`]): lazily created, one per slot
//! - **Render pass** ([`pass`]): replays every live job once per qualifying
//!   camera and ages it by the effective frame delta
//! - **Recording backend** ([`recording::RecordingBackend`]): headless backend
//!   used by tests and the demo
//!
//! All rendering happens on the host's main thread inside its per-camera
//! post-render callback.

pub mod api;
pub mod camera;
pub mod material;
pub mod pass;
pub mod primitives;
pub mod recording;
pub mod state;

pub use api::{MaterialHandle, MeshHandle, OverlayBackend, ShaderHandle};
pub use camera::{CameraKind, CameraView};
pub use material::{MaterialMatrix, MaterialSlot};
pub use pass::RenderStats;
pub use primitives::{MeshData, PrimitiveVertex, Topology};
pub use recording::{BackendCommand, RecordingBackend};
pub use state::{CullMode, MaterialKey, RenderState};

use thiserror::Error;

/// Overlay rendering errors
///
/// Backend implementations map their native failures onto these variants;
/// the overlay itself only logs them or hands them back to the host.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The backend could not be brought up
    #[error("Renderer initialization failed: {0}")]
    InitializationFailed(String),

    /// A draw call failed while the pass was running
    #[error("Rendering failed: {0}")]
    RenderingFailed(String),

    /// A material or mesh could not be created
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),

    /// Backend-specific error
    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Result type for overlay rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
