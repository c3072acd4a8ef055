//! Error types for the bend planner crate.
//!
//! This module provides structured error types for planning runs and
//! parameter validation. File errors stay in their own types
//! (`ImportError`, `CalibrationError`) and are reported by the caller.

use thiserror::Error;
use wirebend_core::GeometryError;

/// Errors that can occur during bend planning.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// Every orientation variant failed
    #[error("No orientation could be planned: {0}")]
    NoViableOrientation(String),

    /// The requested orientation index does not exist.
    #[error("Orientation {0} out of range (1-4)")]
    OrientationOutOfRange(usize),

    /// A geometry operation failed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),
}

/// Errors related to bend parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A parameter value is out of the valid range.
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },
}

/// Result type alias for planner operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;
