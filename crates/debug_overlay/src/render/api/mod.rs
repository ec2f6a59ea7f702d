//! Backend-facing API of the overlay renderer

pub mod render_backend;

pub use render_backend::{
    BackendResult, BlendFactor, DepthCompare, MaterialDesc, MaterialHandle, MeshHandle,
    OverlayBackend, ShaderHandle,
};
