//! # Job Pool
//!
//! Storage for submitted debug geometry: the job types, the pool that owns
//! live jobs and the vertex buffer free list primitive jobs draw from.

pub mod buffer_pool;
pub mod job_pool;
pub mod jobs;

pub use buffer_pool::{GeometryBufferPool, VertexBuffer};
pub use job_pool::{JobPool, RemovedJobs};
pub use jobs::{JobId, LineBatch, LineEntry, MeshJob, PrimitiveJob};
