//! Pointer motion tracking for throw estimation

use std::collections::VecDeque;

use glam::Vec2;

use crate::consts::POINTER_WINDOW;

/// Sliding window of recent pointer positions, oldest first.
///
/// The derived throw velocity is the average displacement per sample over
/// the whole window - a coarse average rather than an instantaneous
/// derivative, which smooths out jitter in the raw pointer trajectory.
#[derive(Debug, Clone, Default)]
pub struct MotionTracker {
    window: VecDeque<Vec2>,
}

impl MotionTracker {
    pub fn new() -> Self {
        Self {
            window: VecDeque::with_capacity(POINTER_WINDOW + 1),
        }
    }

    /// Append a pointer sample, evicting the oldest once the window is full.
    pub fn record(&mut self, pos: Vec2) {
        self.window.push_back(pos);
        if self.window.len() > POINTER_WINDOW {
            self.window.pop_front();
        }
    }

    /// Average velocity over the window, in pixels per frame.
    ///
    /// Returns zero until the window holds a full `POINTER_WINDOW` samples,
    /// then `(newest - oldest) / len`.
    pub fn estimate_velocity(&self) -> Vec2 {
        if self.window.len() < POINTER_WINDOW {
            return Vec2::ZERO;
        }
        // Non-empty here, so front/back always exist
        let first = self.window.front().copied().unwrap_or(Vec2::ZERO);
        let last = self.window.back().copied().unwrap_or(Vec2::ZERO);
        (last - first) / self.window.len() as f32
    }

    pub fn clear(&mut self) {
        self.window.clear();
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}
