//! Bounded angle history
//!
//! Rolling buffer of recent angle samples. Oldest samples drop off once
//! capacity is reached; the mean over the window smooths detection noise.

use std::collections::VecDeque;

/// Rolling buffer of angle samples with a fixed capacity
#[derive(Clone, Debug)]
pub struct AngleBuffer {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl AngleBuffer {
    /// Create a buffer holding at most `capacity` samples
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a sample, evicting the oldest once full
    pub fn push(&mut self, angle: f32) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(angle);
    }

    /// Arithmetic mean over the stored samples
    pub fn mean(&self) -> Option<f32> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.samples.iter().sum::<f32>() / self.samples.len() as f32)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all samples
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
