//! Segment preprocessing
//!
//! Cleans a raw point sequence before planning:
//! 1. consecutive duplicate points are dropped,
//! 2. the sequence is split where the sampling distance jumps,
//! 3. sampled segments are flipped while flipping strictly shortens the
//!    joined path,
//! 4. runs of nearly collinear points are collapsed to their end points.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use wirebend_core::{distance, turn_angle, GeometryError, Point3, Polyline, MIN_SEGMENT_LENGTH};

/// Upper bound on reorder sweeps; each productive sweep strictly shortens the path.
const MAX_REORDER_SWEEPS: usize = 1000;

/// Minimum gain for a segment flip to count as an improvement (mm)
const REORDER_EPSILON: f64 = 1e-9;

/// Fewest points a segment needs before it may be flipped
///
/// A two-point segment is a single long step of a sparse part, not a run of
/// samples exported in the wrong direction.
pub const MIN_FLIPPABLE_POINTS: usize = 3;

/// Preprocessing switches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreprocessOptions {
    /// Split into segments and reorder them
    pub segment_reordering: bool,
    /// Collapse near-collinear runs
    pub straight_filtering: bool,
    /// Turn angle below which a vertex counts as straight (degrees)
    pub straight_angle_threshold_deg: f64,
    /// A segment longer than this multiple of its predecessor starts a new segment
    pub segment_break_ratio: f64,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            segment_reordering: true,
            straight_filtering: true,
            straight_angle_threshold_deg: 0.5,
            segment_break_ratio: 1.05,
        }
    }
}

/// Cleans and reorders imported points
#[derive(Debug, Clone, Default)]
pub struct SegmentPreprocessor {
    options: PreprocessOptions,
}

impl SegmentPreprocessor {
    pub fn new(options: PreprocessOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PreprocessOptions {
        &self.options
    }

    /// Run all enabled steps and return a validated polyline
    pub fn process(&self, points: &[Point3]) -> Result<Polyline, GeometryError> {
        let mut cleaned = dedupe(points);
        let raw_count = points.len();

        if self.options.segment_reordering {
            let mut segments = split_segments(&cleaned, self.options.segment_break_ratio);
            let flips = reorder_segments(&mut segments);
            if flips > 0 {
                warn!(
                    "Reversed {} of {} sampled segments to shorten the path",
                    flips,
                    segments.len()
                );
            } else {
                debug!("Split into {} segments, none flipped", segments.len());
            }
            cleaned = dedupe(&segments.concat());
        }

        if self.options.straight_filtering {
            cleaned = filter_straight(
                &cleaned,
                self.options.straight_angle_threshold_deg.to_radians(),
            );
        }

        debug!("Preprocessed {} points down to {}", raw_count, cleaned.len());
        Polyline::new(cleaned)
    }
}

/// Drop points that coincide with their predecessor
pub fn dedupe(points: &[Point3]) -> Vec<Point3> {
    let mut out: Vec<Point3> = Vec::with_capacity(points.len());
    for p in points {
        match out.last() {
            Some(last) if distance(last, p) <= MIN_SEGMENT_LENGTH => {}
            _ => out.push(*p),
        }
    }
    out
}

/// Split where a point-to-point distance exceeds `ratio` times the previous one
///
/// The point after the long jump opens the next segment.
pub fn split_segments(points: &[Point3], ratio: f64) -> Vec<Vec<Point3>> {
    let mut segments: Vec<Vec<Point3>> = Vec::new();
    let Some(first) = points.first() else {
        return segments;
    };

    let mut current = vec![*first];
    let mut previous_step: Option<f64> = None;
    for w in points.windows(2) {
        let step = distance(&w[0], &w[1]);
        let is_break = previous_step.is_some_and(|prev| step > ratio * prev);
        if is_break {
            segments.push(std::mem::take(&mut current));
            previous_step = None;
        } else {
            previous_step = Some(step);
        }
        current.push(w[1]);
    }
    segments.push(current);
    segments
}

/// Flip segments while a flip strictly shortens the joined path
///
/// Segments shorter than [`MIN_FLIPPABLE_POINTS`] are never flipped.
/// Returns the number of flips performed.
pub fn reorder_segments(segments: &mut [Vec<Point3>]) -> usize {
    let mut flips = 0;
    for _ in 0..MAX_REORDER_SWEEPS {
        let mut improved = false;
        for j in 0..segments.len() {
            let gain = flip_gain(segments, j);
            if gain > REORDER_EPSILON {
                segments[j].reverse();
                flips += 1;
                improved = true;
            }
        }
        if !improved {
            break;
        }
    }
    flips
}

/// Reduction of the joint lengths around segment `j` if it were reversed
fn flip_gain(segments: &[Vec<Point3>], j: usize) -> f64 {
    if segments[j].len() < MIN_FLIPPABLE_POINTS {
        return 0.0;
    }
    let (Some(head), Some(tail)) = (segments[j].first(), segments[j].last()) else {
        return 0.0;
    };
    let before = j
        .checked_sub(1)
        .and_then(|i| segments[i].last());
    let after = segments.get(j + 1).and_then(|s| s.first());

    let joint = |a: Option<&Point3>, b: &Point3| a.map_or(0.0, |a| distance(a, b));
    let current = joint(before, head) + joint(after, tail);
    let flipped = joint(before, tail) + joint(after, head);
    current - flipped
}

/// Remove interior points whose turn angle is below `threshold_rad`
pub fn filter_straight(points: &[Point3], threshold_rad: f64) -> Vec<Point3> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let mut out = Vec::with_capacity(points.len());
    out.push(points[0]);
    for w in points.windows(3) {
        if turn_angle(&w[0], &w[1], &w[2]) >= threshold_rad {
            out.push(w[1]);
        }
    }
    out.push(points[points.len() - 1]);
    out
}
