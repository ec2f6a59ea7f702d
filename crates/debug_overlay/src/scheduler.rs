//! # Lifetime Scheduler
//!
//! Drives the two per-frame hooks of the overlay:
//!
//! 1. **Cleanup tick** ([`LifetimeScheduler::cleanup`]): runs once per frame,
//!    before any camera renders, and removes every job whose remaining
//!    duration reached zero after at least one render pass.
//! 2. **Render hook**: runs once per camera render event. Jobs are aged there,
//!    by [`LifetimeScheduler::effective_delta`], so a job drawn by three
//!    cameras in one frame ages three times.
//!
//! A duration of `0.0` therefore means "every camera of the current frame",
//! not "exactly one draw".
//!
//! ## Pause correction
//!
//! The first unpaused frame after a paused one reports the whole pause as
//! its elapsed time. The effective delta of that single frame is forced to
//! zero so that the pause does not expire every live job at once.

use crate::foundation::time::FrameTiming;
use crate::pool::{JobPool, RemovedJobs};

/// Per-frame lifetime bookkeeping
#[derive(Debug, Default)]
pub struct LifetimeScheduler {
    pause_frame: Option<u64>,
    last_cleanup_frame: Option<u64>,
}

impl LifetimeScheduler {
    /// Create a scheduler that has not seen a pause yet
    pub fn new() -> Self {
        Self::default()
    }

    fn observe(&mut self, timing: &FrameTiming) {
        if timing.paused {
            self.pause_frame = Some(timing.frame_index);
        }
    }

    /// Whether `timing` is the first running frame after a paused one
    pub fn is_resume_frame(&self, timing: &FrameTiming) -> bool {
        !timing.paused
            && self
                .pause_frame
                .is_some_and(|paused| paused.checked_add(1) == Some(timing.frame_index))
    }

    /// Elapsed time to age jobs by during a render event of this frame
    pub fn effective_delta(&mut self, timing: &FrameTiming) -> f32 {
        self.observe(timing);
        if self.is_resume_frame(timing) {
            0.0
        } else {
            timing.unscaled_delta
        }
    }

    /// Cleanup tick: remove every expired job from `pool`
    pub fn cleanup(&mut self, pool: &mut JobPool, timing: &FrameTiming) -> RemovedJobs {
        self.observe(timing);
        if self.last_cleanup_frame == Some(timing.frame_index) {
            log::warn!("Cleanup tick ran twice in frame {}", timing.frame_index);
        }
        self.last_cleanup_frame = Some(timing.frame_index);

        let removed = pool.remove_dead_jobs();
        if removed.total() > 0 {
            log::trace!(
                "Frame {}: removed {} primitive jobs, {} mesh jobs, {} lines",
                timing.frame_index,
                removed.primitives,
                removed.meshes,
                removed.lines
            );
        }
        removed
    }

    /// Forget pause history
    pub fn reset(&mut self) {
        self.pause_frame = None;
        self.last_cleanup_frame = None;
    }
}
