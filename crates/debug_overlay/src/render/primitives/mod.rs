//! Rendering primitives shared by the job pool, the shape generators and backends

pub mod mesh;

pub use mesh::{MeshData, PrimitiveVertex, Topology};
