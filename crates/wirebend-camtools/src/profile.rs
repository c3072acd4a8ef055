//! Wire profiles and bend records
//!
//! A [`WireProfile`] is one orientation of a part after planning: its
//! mounted centerline, the parallel `L`/`R`/`A`/`MA` sequences in machine
//! feed order and the counters collected on the way.

use crate::compensation::CompensationModel;
use crate::orientation::Orientation;
use serde::{Deserialize, Serialize};
use wirebend_core::{BendParameters, Point3};

/// One row of the bend table, rounded for display and export
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BendRecord {
    /// Wire to feed before the bend (mm)
    pub length_mm: f64,
    /// Twist about the feed axis during the feed (degrees)
    pub rotation_deg: f64,
    /// Desired bend angle (degrees)
    pub angle_deg: f64,
    /// Compensated motor angle (degrees)
    pub motor_angle_deg: f64,
}

/// Header of the exported bend table
pub const BEND_TABLE_HEADER: &str = "length_mm,rotation_deg,angle_deg,motor_angle_deg";

fn round3(v: f64) -> f64 {
    let r = (v * 1000.0).round() / 1000.0;
    // Avoid printing -0
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

/// One planned orientation of a part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireProfile {
    pub orientation: Orientation,
    /// Centerline in machine coordinates after distance filtering
    pub points: Vec<Point3>,
    /// Feed lengths (mm), feed order
    pub lengths: Vec<f64>,
    /// Twists (degrees), feed order
    pub rotations: Vec<f64>,
    /// Desired bend angles (degrees), feed order
    pub angles: Vec<f64>,
    /// Motor angles (degrees); empty until compensated
    pub motor_angles: Vec<f64>,
    pub collision_count: usize,
    pub deleted_vertex_count: usize,
    /// Distance the final point was extended during filtering (mm)
    pub tail_extension_mm: Option<f64>,
    pub pin_position_mm: f64,
    pub wire_diameter_mm: f64,
}

impl WireProfile {
    /// Empty profile for a mounted centerline
    pub fn new(orientation: Orientation, points: Vec<Point3>, params: &BendParameters) -> Self {
        Self {
            orientation,
            points,
            lengths: Vec::new(),
            rotations: Vec::new(),
            angles: Vec::new(),
            motor_angles: Vec::new(),
            collision_count: 0,
            deleted_vertex_count: 0,
            tail_extension_mm: None,
            pin_position_mm: params.pin_mm(),
            wire_diameter_mm: params.wire_diameter_mm,
        }
    }

    /// Number of bend records
    pub fn bend_count(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_compensated(&self) -> bool {
        !self.angles.is_empty() && self.motor_angles.len() == self.angles.len()
    }

    /// Total wire fed (mm)
    pub fn total_feed(&self) -> f64 {
        self.lengths.iter().sum()
    }

    /// Fill `motor_angles` from the desired angles
    pub fn apply_compensation(&mut self, model: &CompensationModel) {
        self.motor_angles = self.angles.iter().map(|&a| model.motor_angle(a)).collect();
    }

    /// Bend table rounded to three decimals
    ///
    /// Motor angles read as 0 before compensation.
    pub fn records(&self) -> Vec<BendRecord> {
        (0..self.bend_count())
            .map(|i| BendRecord {
                length_mm: round3(self.lengths[i]),
                rotation_deg: round3(self.rotations[i]),
                angle_deg: round3(self.angles[i]),
                motor_angle_deg: round3(self.motor_angles.get(i).copied().unwrap_or(0.0)),
            })
            .collect()
    }

    /// Bend table as CSV text with a header row
    pub fn to_table_csv(&self) -> String {
        let mut out = String::new();
        out.push_str(BEND_TABLE_HEADER);
        out.push('\n');
        for r in self.records() {
            out.push_str(&format!(
                "{},{},{},{}\n",
                r.length_mm, r.rotation_deg, r.angle_deg, r.motor_angle_deg
            ));
        }
        out
    }

    /// One-line summary for logs and listings
    pub fn summary(&self) -> String {
        format!(
            "{}: {} bends, {} collisions, {} deleted vertices",
            self.orientation,
            self.bend_count(),
            self.collision_count,
            self.deleted_vertex_count
        )
    }
}
