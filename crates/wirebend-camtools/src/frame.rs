//! Local frame for the bend walk
//!
//! The walk re-anchors and re-rotates the wire at every vertex. Instead of
//! rewriting the remaining points each time, the accumulated rigid transform
//! is kept here and applied to a point only when it is inspected.
//!
//! A point `p` in part coordinates maps to `R · (p - origin)` in the
//! current local frame.

use nalgebra::{Rotation3, Vector3 as NVector3};
use wirebend_core::{Point3, Vector3};

/// Right-handed rotation about the feed (Y) axis
pub fn rotation_about_feed(angle_rad: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&NVector3::y_axis(), angle_rad)
}

/// Right-handed rotation about the bend (Z) axis
pub fn rotation_about_bend(angle_rad: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&NVector3::z_axis(), angle_rad)
}

/// Right-handed rotation about the X axis
pub fn rotation_about_x(angle_rad: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&NVector3::x_axis(), angle_rad)
}

/// Accumulated rigid transform from part coordinates into the walk frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    origin: Point3,
    rotation: Rotation3<f64>,
}

impl LocalFrame {
    pub fn identity() -> Self {
        Self {
            origin: Point3::origin(),
            rotation: Rotation3::identity(),
        }
    }

    /// Move the local origin onto part point `p`, keeping the orientation
    pub fn anchor_at(&mut self, p: &Point3) {
        self.origin = *p;
    }

    /// Apply `m` after the current rotation
    pub fn rotate(&mut self, m: &Rotation3<f64>) {
        self.rotation = m * self.rotation;
    }

    /// Express a part point in the local frame
    pub fn apply(&self, p: &Point3) -> Point3 {
        let offset: Vector3 = p - self.origin;
        Point3::from(self.rotation * offset)
    }

    /// Express many part points in the local frame
    pub fn apply_all(&self, points: &[Point3]) -> Vec<Point3> {
        points.iter().map(|p| self.apply(p)).collect()
    }

    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    pub fn rotation(&self) -> &Rotation3<f64> {
        &self.rotation
    }
}

impl Default for LocalFrame {
    fn default() -> Self {
        Self::identity()
    }
}
