//! Frame timing supplied by the host to the overlay hooks

use std::time::Instant;

/// Timing snapshot for one host frame.
///
/// The same snapshot is handed to the cleanup tick and to every camera render
/// event of that frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTiming {
    /// Monotonic frame counter
    pub frame_index: u64,
    /// Unscaled wall-clock time since the previous frame, in seconds
    pub unscaled_delta: f32,
    /// Whether the host is paused during this frame
    pub paused: bool,
}

impl FrameTiming {
    /// Create a running (unpaused) frame snapshot
    pub const fn new(frame_index: u64, unscaled_delta: f32) -> Self {
        Self {
            frame_index,
            unscaled_delta,
            paused: false,
        }
    }

    /// Same snapshot flagged as paused
    #[must_use]
    pub const fn paused(mut self) -> Self {
        self.paused = true;
        self
    }
}

/// Wall-clock frame timer producing [`FrameTiming`] snapshots
pub struct FrameClock {
    last_frame: Instant,
    frame_index: u64,
    paused: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a new clock starting at frame 0
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            frame_index: 0,
            paused: false,
        }
    }

    /// Mark the host as paused or running for subsequent ticks
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Whether the host is currently paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advance the clock (call once per frame)
    pub fn tick(&mut self) -> FrameTiming {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_index += 1;

        FrameTiming {
            frame_index: self.frame_index,
            unscaled_delta: elapsed.as_secs_f32(),
            paused: self.paused,
        }
    }

    /// Current frame count
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }
}
