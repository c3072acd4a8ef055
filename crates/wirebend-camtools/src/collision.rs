//! Collision counting against the machine envelope
//!
//! The walk calls [`CollisionDetector::check`] at four checkpoints per
//! interior vertex. Each call that finds any point of the remaining wire
//! strictly inside the envelope adds one to the count, so the total is a
//! severity score for ranking orientations rather than a tally of distinct
//! physical collisions.

use crate::frame::LocalFrame;
use wirebend_core::{MachineEnvelope, Point3};

#[derive(Debug, Clone)]
pub struct CollisionDetector {
    envelope: MachineEnvelope,
    count: usize,
}

impl CollisionDetector {
    pub fn new(envelope: MachineEnvelope) -> Self {
        Self { envelope, count: 0 }
    }

    /// Test `points[start..]` as seen from `frame`; counts at most once per call
    pub fn check(&mut self, points: &[Point3], start: usize, frame: &LocalFrame) -> bool {
        let hit = points
            .iter()
            .skip(start)
            .any(|p| self.envelope.contains(&frame.apply(p)));
        if hit {
            self.count += 1;
        }
        hit
    }

    pub fn count(&self) -> usize {
        self.count
    }
}
