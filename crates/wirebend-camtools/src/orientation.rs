//! Orientation variants
//!
//! A part can be fed from either end and mounted either way up, giving four
//! variants of the same centerline. Each variant is mounted into the machine
//! frame the same way: vertex 0 at the origin, the first segment along +Y
//! (the feed axis) and vertex 2 in the XY plane on the +X side. Rotated
//! variants are then turned half a revolution about the feed axis.

use crate::frame::{rotation_about_bend, rotation_about_feed, rotation_about_x};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use wirebend_core::{Point3, Polyline};

/// One of the four mountings of a part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// As imported
    Identity,
    /// Turned 180 degrees about the feed axis
    Rotated,
    /// Fed from the other end
    Reversed,
    /// Fed from the other end and turned 180 degrees
    ReversedRotated,
}

impl Orientation {
    /// All variants in evaluation order
    pub const ALL: [Orientation; 4] = [
        Orientation::Identity,
        Orientation::Rotated,
        Orientation::Reversed,
        Orientation::ReversedRotated,
    ];

    /// Zero-based position in [`Orientation::ALL`]
    pub fn index(self) -> usize {
        match self {
            Self::Identity => 0,
            Self::Rotated => 1,
            Self::Reversed => 2,
            Self::ReversedRotated => 3,
        }
    }

    /// One-based number as shown to users
    pub fn number(self) -> usize {
        self.index() + 1
    }

    /// Variant for a one-based number
    pub fn from_number(n: usize) -> Option<Self> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn is_reversed(self) -> bool {
        matches!(self, Self::Reversed | Self::ReversedRotated)
    }

    pub fn is_rotated(self) -> bool {
        matches!(self, Self::Rotated | Self::ReversedRotated)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bend Orientation {}", self.number())
    }
}

/// Builds the point order of each variant
pub struct OrientationGenerator;

impl OrientationGenerator {
    /// Point sequences for all four variants, in [`Orientation::ALL`] order
    ///
    /// The sequences are in feed order but not yet mounted; mounting happens
    /// after distance filtering because filtering may move vertex 2.
    pub fn generate(polyline: &Polyline) -> Vec<(Orientation, Vec<Point3>)> {
        Orientation::ALL
            .iter()
            .map(|&o| (o, Self::point_order(polyline.points(), o)))
            .collect()
    }

    /// Points of one variant in feed order
    pub fn point_order(points: &[Point3], orientation: Orientation) -> Vec<Point3> {
        let mut out = points.to_vec();
        if orientation.is_reversed() {
            out.reverse();
        }
        out
    }
}

/// Mount a point sequence into the machine frame for the given variant
pub fn mount(points: &[Point3], orientation: Orientation) -> Vec<Point3> {
    let mut out = canonicalize(points);
    if orientation.is_rotated() {
        rotate_half_turn(&mut out);
    }
    out
}

/// Rigidly move the points so the part starts on the feed axis
pub fn canonicalize(points: &[Point3]) -> Vec<Point3> {
    let Some(start) = points.first() else {
        return Vec::new();
    };
    let mut out: Vec<Point3> = points.iter().map(|p| Point3::from(p - start)).collect();

    if let Some(p1) = out.get(1).copied() {
        let rz = rotation_about_bend(p1.x.atan2(p1.y));
        out.iter_mut().for_each(|p| *p = rz * *p);
        let p1 = out[1];
        let rx = rotation_about_x(-p1.z.atan2(p1.y));
        out.iter_mut().for_each(|p| *p = rx * *p);
    }
    if let Some(p2) = out.get(2).copied() {
        let ry = rotation_about_feed(p2.z.atan2(p2.x));
        out.iter_mut().for_each(|p| *p = ry * *p);
    }
    out
}

/// Turn points half a revolution about the feed axis
pub fn rotate_half_turn(points: &mut [Point3]) {
    let r = rotation_about_feed(PI);
    points.iter_mut().for_each(|p| *p = r * *p);
}
