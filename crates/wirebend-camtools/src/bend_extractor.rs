//! Bend extraction
//!
//! Walks a mounted centerline vertex by vertex. At each interior vertex the
//! local frame is anchored on the vertex, twisted about the feed axis until
//! the next vertex lies in the bend plane, then bent about the Z axis until
//! the next vertex lies on the feed axis. The twist and bend angles are the
//! machine moves for that vertex.
//!
//! Feed lengths are the segment lengths corrected for the wire each
//! neighbouring bend wraps around the die: with `h(θ)` half the arc of a
//! bend, segment `j` gets `+h(A[j]) - h(A[j+1])`, the first segment gets
//! the die radius added and the last has it removed. The corrections
//! telescope, so the lengths sum to the centerline length.
//!
//! The walk runs from the first imported point, but the machine feeds from
//! the other end, so all sequences are reversed before they are returned.

use crate::collision::CollisionDetector;
use crate::frame::{rotation_about_bend, rotation_about_feed, LocalFrame};
use tracing::debug;
use wirebend_core::{distance, GeometryError, MachineProfile, Point3, MIN_SEGMENT_LENGTH};

/// Coordinates below this are treated as zero when picking the twist.
const AXIS_EPSILON: f64 = 1e-12;

/// Bend sequences in feed order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Feed lengths (mm)
    pub lengths: Vec<f64>,
    /// Twists (degrees)
    pub rotations: Vec<f64>,
    /// Bend angles (degrees)
    pub angles: Vec<f64>,
    /// Collision checkpoints that found the wire inside the envelope
    pub collision_count: usize,
}

/// Twist (radians) about the feed axis that puts `q` into the XY plane
pub fn twist_angle(q: &Point3) -> f64 {
    if q.x.abs() < AXIS_EPSILON {
        if q.z.abs() < AXIS_EPSILON {
            0.0
        } else {
            std::f64::consts::FRAC_PI_2
        }
    } else {
        (q.z / q.x).atan()
    }
}

/// Signed bend (radians) about Z that puts `q` onto the feed axis
pub fn bend_angle(q: &Point3) -> f64 {
    q.x.atan2(q.y)
}

#[derive(Debug, Clone)]
pub struct BendExtractor {
    machine: MachineProfile,
    wire_diameter_mm: f64,
}

impl BendExtractor {
    pub fn new(machine: MachineProfile, wire_diameter_mm: f64) -> Self {
        Self {
            machine,
            wire_diameter_mm,
        }
    }

    fn half_arc_deg(&self, angle_deg: f64) -> f64 {
        self.machine
            .half_arc_length(angle_deg.to_radians(), self.wire_diameter_mm)
    }

    /// Extract bend sequences from a mounted centerline
    pub fn extract(&self, points: &[Point3]) -> Result<Extraction, GeometryError> {
        let n = points.len();
        if n < 2 {
            return Err(GeometryError::TooFewPoints {
                required: 2,
                actual: n,
            });
        }
        if let Some(index) = points
            .windows(2)
            .position(|w| distance(&w[0], &w[1]) <= MIN_SEGMENT_LENGTH)
        {
            return Err(GeometryError::DegenerateSegment { index });
        }

        let segments = n - 1;
        let mut angles = vec![0.0; segments];
        let mut rotations = vec![0.0; segments];
        let mut detector = CollisionDetector::new(self.machine.envelope);
        let mut frame = LocalFrame::identity();

        for i in 1..n - 1 {
            detector.check(points, i, &frame);

            frame.anchor_at(&points[i]);
            detector.check(points, i + 1, &frame);

            let twist = twist_angle(&frame.apply(&points[i + 1]));
            frame.rotate(&rotation_about_feed(twist));
            rotations[i - 1] = twist.to_degrees();
            detector.check(points, i + 1, &frame);

            let bend = bend_angle(&frame.apply(&points[i + 1]));
            frame.rotate(&rotation_about_bend(bend));
            angles[i] = bend.to_degrees();
            detector.check(points, i + 1, &frame);

            debug!(
                "Vertex {}: twist {:.3} deg, bend {:.3} deg",
                i,
                rotations[i - 1],
                angles[i]
            );
        }

        let die = self.machine.die_radius_mm;
        let mut lengths: Vec<f64> = (0..segments)
            .map(|j| {
                let mut length = distance(&points[j], &points[j + 1]);
                length += self.half_arc_deg(angles[j]);
                if let Some(next) = angles.get(j + 1) {
                    length -= self.half_arc_deg(*next);
                }
                length
            })
            .collect();
        lengths[0] += die;
        lengths[segments - 1] -= die;

        lengths.reverse();
        rotations.reverse();
        angles.reverse();

        Ok(Extraction {
            lengths,
            rotations,
            angles,
            collision_count: detector.count(),
        })
    }
}
