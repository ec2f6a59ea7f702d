//! # Shapes
//!
//! Static meshes behind the mesh-based drawing calls. Each [`ShapeKind`] is
//! generated once per [`MeshCache`] and reused by every job that draws it.

pub mod generators;
pub mod mesh_cache;

pub use mesh_cache::{MeshCache, MeshId};

use crate::render::primitives::MeshData;
use crate::render::state::CullMode;

/// Built-in overlay shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Solid cube
    Cube,
    /// Cube edges
    WireCube,
    /// Solid sphere
    Sphere,
    /// Three great circles
    WireSphere,
    /// Solid disc
    Disc,
    /// Circle
    WireDisc,
    /// Quad with a normal arrow
    Plane,
    /// Solid pyramid
    Pyramid,
    /// Pyramid edges
    WirePyramid,
    /// Open cylinder
    Tube,
    /// Cylinder outline
    WireTube,
    /// Upper hemisphere outline
    WireHemisphere,
}

impl ShapeKind {
    /// Every built-in shape
    pub const ALL: [Self; 12] = [
        Self::Cube,
        Self::WireCube,
        Self::Sphere,
        Self::WireSphere,
        Self::Disc,
        Self::WireDisc,
        Self::Plane,
        Self::Pyramid,
        Self::WirePyramid,
        Self::Tube,
        Self::WireTube,
        Self::WireHemisphere,
    ];

    /// Build the mesh data for this shape
    pub fn generate(self) -> MeshData {
        match self {
            Self::Cube => generators::cube(),
            Self::WireCube => generators::wire_cube(),
            Self::Sphere => generators::sphere(),
            Self::WireSphere => generators::wire_sphere(),
            Self::Disc => generators::disc(),
            Self::WireDisc => generators::wire_disc(),
            Self::Plane => generators::plane(),
            Self::Pyramid => generators::pyramid(),
            Self::WirePyramid => generators::wire_pyramid(),
            Self::Tube => generators::tube(),
            Self::WireTube => generators::wire_tube(),
            Self::WireHemisphere => generators::wire_hemisphere(),
        }
    }

    /// Cull mode the shape is drawn with
    pub const fn cull_mode(self) -> CullMode {
        match self {
            Self::Cube | Self::Sphere | Self::Pyramid | Self::WireHemisphere => CullMode::Back,
            _ => CullMode::Off,
        }
    }
}
