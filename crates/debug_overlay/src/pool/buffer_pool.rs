//! Geometry buffer pool
//!
//! Free list of vertex buffers for primitive jobs. A buffer is owned by
//! exactly one job from `acquire` until the cleanup tick hands it back with
//! `release`, so steady-state drawing does not allocate.

use crate::render::primitives::PrimitiveVertex;

/// Vertex storage owned by one primitive job
pub type VertexBuffer = Vec<PrimitiveVertex>;

/// Free list of reusable vertex buffers
#[derive(Debug)]
pub struct GeometryBufferPool {
    free: Vec<VertexBuffer>,
    buffer_capacity: usize,
    allocated: usize,
}

impl GeometryBufferPool {
    /// Create an empty pool; new buffers start with `buffer_capacity` slots
    pub fn new(buffer_capacity: usize) -> Self {
        Self {
            free: Vec::new(),
            buffer_capacity,
            allocated: 0,
        }
    }

    /// Take an empty buffer, recycling one when available
    pub fn acquire(&mut self) -> VertexBuffer {
        match self.free.pop() {
            Some(buffer) => buffer,
            None => {
                self.allocated += 1;
                Vec::with_capacity(self.buffer_capacity)
            }
        }
    }

    /// Return a buffer to the pool
    pub fn release(&mut self, mut buffer: VertexBuffer) {
        buffer.clear();
        self.free.push(buffer);
    }

    /// Buffers waiting for reuse
    pub fn available(&self) -> usize {
        self.free.len()
    }

    /// Buffers ever allocated by this pool
    pub fn allocated(&self) -> usize {
        self.allocated
    }

    /// Drop every pooled buffer
    pub fn clear(&mut self) {
        self.free.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::color::Color;
    use crate::foundation::math::Vec3;

    #[test]
    fn test_acquire_allocates_when_empty() {
        let mut pool = GeometryBufferPool::new(32);
        let buffer = pool.acquire();
        assert!(buffer.is_empty());
        assert!(buffer.capacity() >= 32);
        assert_eq!(pool.allocated(), 1);
    }

    #[test]
    fn test_released_buffer_is_recycled_empty() {
        let mut pool = GeometryBufferPool::new(4);
        let mut buffer = pool.acquire();
        for _ in 0..100 {
            buffer.push(PrimitiveVertex::new(Vec3::zeros(), Color::RED));
        }
        let grown_capacity = buffer.capacity();
        pool.release(buffer);
        assert_eq!(pool.available(), 1);

        let recycled = pool.acquire();
        assert!(recycled.is_empty());
        assert_eq!(recycled.capacity(), grown_capacity);
        assert_eq!(pool.allocated(), 1);
        assert_eq!(pool.available(), 0);
    }

    #[test]
    fn test_simultaneous_acquires_are_distinct() {
        let mut pool = GeometryBufferPool::new(8);
        let mut a = pool.acquire();
        let b = pool.acquire();
        a.push(PrimitiveVertex::new(Vec3::x(), Color::WHITE));
        assert!(b.is_empty());
        assert_eq!(pool.allocated(), 2);
    }
}
