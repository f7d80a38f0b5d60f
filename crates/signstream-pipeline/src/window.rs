//! Bounded sliding window over per-frame feature vectors.
//!
//! The window holds the most recent N vectors in strict FIFO order and is
//! the classifier's input once full. It is owned by the pipeline
//! controller and mutated only from the main loop.

use std::collections::VecDeque;

use signstream_models::{FeatureVector, PushPolicy};

/// Fixed-capacity FIFO of the most recent feature vectors.
#[derive(Debug)]
pub struct SlidingWindow {
    frames: VecDeque<FeatureVector>,
    capacity: usize,
    policy: PushPolicy,
}

impl SlidingWindow {
    pub fn new(capacity: usize, policy: PushPolicy) -> Self {
        Self {
            frames: VecDeque::with_capacity(capacity),
            capacity,
            policy,
        }
    }

    /// Offer a vector to the window; returns whether it was admitted.
    ///
    /// Under `PushPolicy::DetectionOnly` a blank vector is skipped. When
    /// the window is at capacity the single oldest element is evicted.
    pub fn push(&mut self, vector: FeatureVector) -> bool {
        if self.policy == PushPolicy::DetectionOnly && !vector.has_detection() {
            return false;
        }
        if self.frames.len() == self.capacity {
            self.frames.pop_front();
        }
        self.frames.push_back(vector);
        true
    }

    /// Whether the window holds exactly its capacity of frames.
    pub fn is_full(&self) -> bool {
        self.frames.len() == self.capacity
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The window contents oldest-first, ready to hand to the classifier.
    pub fn snapshot(&self) -> Vec<FeatureVector> {
        self.frames.iter().cloned().collect()
    }
}
