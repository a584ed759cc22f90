//! Change detection on a polled value
//!
//! The tick polls a value every step; the detector reports only the step on which
//! it changed, so a condition that holds for many ticks fires once.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDetector<T> {
    last: T,
}

impl<T: Copy + PartialEq> EdgeDetector<T> {
    pub fn new(initial: T) -> Self {
        Self { last: initial }
    }

    /// Record `current`; returns `(previous, current)` if it differs from the last value seen
    pub fn observe(&mut self, current: T) -> Option<(T, T)> {
        let previous = std::mem::replace(&mut self.last, current);
        (previous != current).then_some((previous, current))
    }

    pub fn last(&self) -> T {
        self.last
    }
}
