//! Backend abstraction trait for overlay rendering
//!
//! The overlay never talks to a graphics API directly. Hosts implement
//! [`OverlayBackend`] on top of whatever immediate-mode or command-buffer
//! facility they have; the overlay only needs shader lookup, material
//! creation with a handful of fixed-function settings, a matrix stack,
//! immediate-mode vertex submission and single-mesh draws.

use crate::foundation::color::Color;
use crate::foundation::math::{Mat4, Vec3};
use crate::render::primitives::{MeshData, Topology};
use crate::render::state::CullMode;
use crate::render::RenderError;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Handle to a shader resolved by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u64);

/// Handle to a material resource stored in the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub u64);

/// Handle to an uploaded mesh stored in the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// Blend factors used by overlay materials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    /// Source alpha
    SrcAlpha,
    /// One minus source alpha
    OneMinusSrcAlpha,
}

/// Depth comparison applied when drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthCompare {
    /// Depth test disabled, always passes
    Always,
    /// Standard less-or-equal test
    LessEqual,
}

/// Fixed-function description of an overlay material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialDesc {
    /// Shader the material is built on
    pub shader: ShaderHandle,
    /// Initial tint
    pub color: Color,
    /// Source blend factor
    pub src_blend: BlendFactor,
    /// Destination blend factor
    pub dst_blend: BlendFactor,
    /// Face culling
    pub cull_mode: CullMode,
    /// Whether depth is written
    pub depth_write: bool,
    /// Depth comparison
    pub depth_compare: DepthCompare,
}

impl MaterialDesc {
    /// Alpha-blended, depth-write-off description used by every overlay material
    pub const fn overlay(shader: ShaderHandle, cull_mode: CullMode, depth_test: bool) -> Self {
        Self {
            shader,
            color: Color::WHITE,
            src_blend: BlendFactor::SrcAlpha,
            dst_blend: BlendFactor::OneMinusSrcAlpha,
            cull_mode,
            depth_write: false,
            depth_compare: if depth_test {
                DepthCompare::LessEqual
            } else {
                DepthCompare::Always
            },
        }
    }
}

/// Rendering backend the overlay draws through
///
/// All calls happen on the thread that drives the host's frame callbacks.
pub trait OverlayBackend {
    /// Look up a shader by name
    fn find_shader(&mut self, name: &str) -> Option<ShaderHandle>;

    /// Create a material
    fn create_material(&mut self, desc: &MaterialDesc) -> BackendResult<MaterialHandle>;

    /// Release a material created by [`OverlayBackend::create_material`]
    fn release_material(&mut self, material: MaterialHandle);

    /// Set a material's tint color
    fn set_material_color(&mut self, material: MaterialHandle, color: Color);

    /// Activate a material for subsequent draws
    fn set_pass(&mut self, material: MaterialHandle) -> BackendResult<()>;

    /// Push the current model matrix
    fn push_matrix(&mut self);

    /// Multiply the current model matrix by `matrix`
    fn mult_matrix(&mut self, matrix: &Mat4);

    /// Pop the model matrix
    fn pop_matrix(&mut self);

    /// Begin immediate-mode primitive submission
    fn begin(&mut self, topology: Topology);

    /// Set the color for subsequent vertices
    fn color(&mut self, color: Color);

    /// Submit one vertex
    fn vertex(&mut self, position: &Vec3);

    /// Finish the primitive started by [`OverlayBackend::begin`]
    fn end(&mut self) -> BackendResult<()>;

    /// Upload a mesh
    fn create_mesh(&mut self, mesh: &MeshData) -> BackendResult<MeshHandle>;

    /// Release an uploaded mesh
    fn release_mesh(&mut self, mesh: MeshHandle);

    /// Draw a mesh immediately with the active material
    fn draw_mesh_now(&mut self, mesh: MeshHandle, matrix: &Mat4) -> BackendResult<()>;
}
