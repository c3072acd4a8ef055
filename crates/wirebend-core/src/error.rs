//! Error handling for WireBend
//!
//! Provides error types for all layers of the bend planner:
//! - Geometry errors (degenerate polylines, unsolvable tooling geometry)
//! - Import errors (point-cloud files)
//! - Calibration errors (spring-back tables and fits)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised when a polyline cannot be turned into bend records, either because
/// it is too small, contains a zero-length segment, or because the tooling
/// geometry has no acceptable solution for a bend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Fewer points than a bendable wire needs
    #[error("Polyline needs at least {required} points, got {actual}")]
    TooFewPoints {
        /// Minimum number of points.
        required: usize,
        /// Number of points supplied.
        actual: usize,
    },

    /// Two consecutive points coincide, so no direction can be derived
    #[error("Zero-length segment between points {index} and {}", .index + 1)]
    DegenerateSegment {
        /// Index of the first point of the segment.
        index: usize,
    },

    /// The pin-contact equations have no root within tolerance
    #[error("Tooling geometry unsolvable for a {angle_deg:.3} degree bend (residual {residual:e})")]
    Unsolvable {
        /// Bend angle in degrees.
        angle_deg: f64,
        /// Largest absolute residual of the two target equations.
        residual: f64,
    },
}

/// Import error type
///
/// Represents errors while reading a point-cloud file.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    /// A row did not contain exactly three comma-separated fields
    #[error("Line {line_number}: expected 3 fields, found {fields}")]
    MalformedRow {
        /// 1-based line number.
        line_number: usize,
        /// Number of fields found.
        fields: usize,
    },

    /// A field could not be parsed as a number
    #[error("Line {line_number}: '{value}' is not a number")]
    InvalidNumber {
        /// 1-based line number.
        line_number: usize,
        /// The offending text.
        value: String,
    },

    /// The file contained no usable points
    #[error("No points found in {source_name}")]
    NoPoints {
        /// File name or description of the source.
        source_name: String,
    },

    /// The file could not be read
    #[error("Failed to read {path}: {reason}")]
    Io {
        /// Path of the file.
        path: String,
        /// Underlying reason.
        reason: String,
    },
}

/// Calibration error type
///
/// Represents errors while loading a spring-back calibration table or
/// fitting the compensation curve. These are fatal for a bend calculation
/// because motor angles cannot be derived without them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// The material is not known to the library
    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    /// The calibration file is missing or unreadable
    #[error("Calibration file {path} unavailable: {reason}")]
    MissingFile {
        /// Path of the calibration file.
        path: String,
        /// Underlying reason.
        reason: String,
    },

    /// A row of the calibration table is malformed
    #[error("Calibration row {line_number} invalid: {reason}")]
    InvalidRow {
        /// 1-based line number.
        line_number: usize,
        /// Why the row was rejected.
        reason: String,
    },

    /// Too few samples for the polynomial degree
    #[error("Calibration needs at least {required} samples, got {actual}")]
    InsufficientData {
        /// Minimum number of samples.
        required: usize,
        /// Number of samples supplied.
        actual: usize,
    },

    /// The least-squares system could not be solved
    #[error("Calibration fit failed: {0}")]
    SingularFit(String),
}
