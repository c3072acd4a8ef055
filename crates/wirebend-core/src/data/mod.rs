//! Data models for wire geometry and machine configuration
//!
//! This module provides:
//! - Points and polylines describing a wire centerline (millimeters)
//! - Turn-angle helpers used by preprocessing and distance filtering
//! - The axis-aligned collision envelope of the bending machine
//! - Tooling constants of the bend head
//! - Wire materials with their calibration tables

pub mod materials;
pub mod materials_static;

use crate::error::GeometryError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 3D coordinate in millimeters
pub type Point3 = nalgebra::Point3<f64>;

/// 3D direction or offset in millimeters
pub type Vector3 = nalgebra::Vector3<f64>;

/// Segments shorter than this are treated as zero-length.
pub const MIN_SEGMENT_LENGTH: f64 = 1e-9;

/// Euclidean distance between two points
pub fn distance(a: &Point3, b: &Point3) -> f64 {
    (b - a).norm()
}

/// Unsigned angle (radians) between the incoming direction `corner - prev`
/// and the outgoing direction `next - corner`.
///
/// Computed as `atan2(|u × v|, u · v)`, which stays accurate for nearly
/// collinear segments where `acos` loses precision. Returns 0 for a straight
/// continuation and π for a full reversal.
pub fn turn_angle(prev: &Point3, corner: &Point3, next: &Point3) -> f64 {
    let incoming = corner - prev;
    let outgoing = next - corner;
    incoming.cross(&outgoing).norm().atan2(incoming.dot(&outgoing))
}

/// Ordered wire centerline with at least two points and no zero-length segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Point3>,
}

impl Polyline {
    /// Validate and wrap a point sequence
    pub fn new(points: Vec<Point3>) -> Result<Self, GeometryError> {
        if points.len() < 2 {
            return Err(GeometryError::TooFewPoints {
                required: 2,
                actual: points.len(),
            });
        }
        if let Some(index) = points
            .windows(2)
            .position(|w| distance(&w[0], &w[1]) <= MIN_SEGMENT_LENGTH)
        {
            return Err(GeometryError::DegenerateSegment { index });
        }
        Ok(Self { points })
    }

    /// Points in order
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Consume the polyline and return its points
    pub fn into_points(self) -> Vec<Point3> {
        self.points
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a validated polyline
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of segments (vertex count minus one)
    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Total centerline length
    pub fn length(&self) -> f64 {
        path_length(&self.points)
    }

    /// Same points in reverse order
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }
}

/// Sum of segment lengths of a point sequence
pub fn path_length(points: &[Point3]) -> f64 {
    points.windows(2).map(|w| distance(&w[0], &w[1])).sum()
}

/// Forbidden axis-aligned box in machine coordinates
///
/// A point collides only when it lies strictly inside all three ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MachineEnvelope {
    /// X range (min, max)
    pub x: (f64, f64),
    /// Y range (min, max)
    pub y: (f64, f64),
    /// Z range (min, max)
    pub z: (f64, f64),
}

impl MachineEnvelope {
    /// Create an envelope from three axis ranges
    pub fn new(x: (f64, f64), y: (f64, f64), z: (f64, f64)) -> Self {
        Self { x, y, z }
    }

    /// An envelope with no interior; nothing ever collides with it
    pub fn empty() -> Self {
        Self {
            x: (0.0, 0.0),
            y: (0.0, 0.0),
            z: (0.0, 0.0),
        }
    }

    /// Whether the point lies strictly inside the box
    pub fn contains(&self, point: &Point3) -> bool {
        let inside = |(min, max): (f64, f64), v: f64| min < v && v < max;
        inside(self.x, point.x) && inside(self.y, point.y) && inside(self.z, point.z)
    }

    /// Whether every range has `min <= max`
    pub fn is_valid(&self) -> bool {
        self.x.0 <= self.x.1 && self.y.0 <= self.y.1 && self.z.0 <= self.z.1
    }
}

impl Default for MachineEnvelope {
    fn default() -> Self {
        Self {
            x: (-150.0, 150.0),
            y: (-1000.0, -5.0),
            z: (-100.0, -5.0),
        }
    }
}

impl fmt::Display for MachineEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X({:.1}..{:.1}) Y({:.1}..{:.1}) Z({:.1}..{:.1})",
            self.x.0, self.x.1, self.y.0, self.y.1, self.z.0, self.z.1
        )
    }
}

/// Fixed tooling geometry of the bend head
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MachineProfile {
    /// Radius of the bend die the wire wraps around (mm)
    pub die_radius_mm: f64,
    /// Diameter of the bend pin (mm)
    pub bend_pin_diameter_mm: f64,
    /// Lateral offset of the wire tangent from the die (mm)
    pub tooling_offset_mm: f64,
    /// Pin axis travel used to park or duck the pin (mm)
    pub duck_offset_mm: f64,
    /// Pin positions above this need the auxiliary setup macro (mm)
    pub macro_pin_threshold_mm: f64,
    /// Forbidden region around the machine
    pub envelope: MachineEnvelope,
}

impl MachineProfile {
    /// Wire consumed by a bend of `angle_rad` around the die
    pub fn arc_length(&self, angle_rad: f64, wire_diameter_mm: f64) -> f64 {
        angle_rad.abs() * (self.die_radius_mm + wire_diameter_mm / 2.0)
    }

    /// Half of [`arc_length`](Self::arc_length); each side of a bend absorbs this much
    pub fn half_arc_length(&self, angle_rad: f64, wire_diameter_mm: f64) -> f64 {
        0.5 * self.arc_length(angle_rad, wire_diameter_mm)
    }
}

impl Default for MachineProfile {
    fn default() -> Self {
        Self {
            die_radius_mm: 2.5,
            bend_pin_diameter_mm: 6.0,
            tooling_offset_mm: 0.8,
            duck_offset_mm: 30.0,
            macro_pin_threshold_mm: 12.1,
            envelope: MachineEnvelope::default(),
        }
    }
}
