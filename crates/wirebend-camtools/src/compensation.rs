//! Spring-back compensation
//!
//! Wire springs back after a bend, so the motor has to overshoot. Each
//! material has a measured table of desired angle against the motor angle
//! that produced it. A cubic least-squares fit of that table gives the motor
//! angle for any desired angle magnitude; the sign of the bend is applied
//! afterwards.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use wirebend_core::CalibrationError;

/// Polynomial degree of the fit
pub const FIT_DEGREE: usize = 3;

/// Bends at or below this magnitude (degrees) are not compensated.
pub const MIN_COMPENSATED_ANGLE_DEG: f64 = 0.05;

/// Column order of a calibration file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationLayout {
    /// `desired,motor`
    #[default]
    DesiredThenMotor,
    /// `motor,desired`
    MotorThenDesired,
}

/// One measured pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSample {
    pub desired_deg: f64,
    pub motor_deg: f64,
}

/// Parse calibration text into samples
///
/// A first row that does not parse is taken as a header. Blank lines are
/// ignored; any other bad row is an error.
pub fn parse_calibration(
    text: &str,
    layout: CalibrationLayout,
) -> Result<Vec<CalibrationSample>, CalibrationError> {
    let mut samples = Vec::new();
    let mut first_row = true;

    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let is_first = std::mem::replace(&mut first_row, false);

        let fields: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        let parsed: Option<Vec<f64>> = fields
            .iter()
            .map(|f| f.parse::<f64>().ok().filter(|v| v.is_finite()))
            .collect();

        let values = match parsed {
            Some(values) if values.len() == 2 => values,
            None if is_first => continue,
            _ => {
                return Err(CalibrationError::InvalidRow {
                    line_number: idx + 1,
                    reason: format!("expected two numbers, got '{}'", trimmed),
                })
            }
        };

        let (desired_deg, motor_deg) = match layout {
            CalibrationLayout::DesiredThenMotor => (values[0], values[1]),
            CalibrationLayout::MotorThenDesired => (values[1], values[0]),
        };
        samples.push(CalibrationSample {
            desired_deg,
            motor_deg,
        });
    }

    Ok(samples)
}

/// Fitted motor-angle curve, coefficients highest power first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensationModel {
    coefficients: Vec<f64>,
}

impl CompensationModel {
    /// Wrap precomputed coefficients (highest power first)
    pub fn from_coefficients(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    /// A model that commands exactly the desired angle
    pub fn identity() -> Self {
        Self {
            coefficients: vec![0.0, 0.0, 1.0, 0.0],
        }
    }

    /// Cubic least-squares fit through the samples
    pub fn fit(samples: &[CalibrationSample]) -> Result<Self, CalibrationError> {
        let required = FIT_DEGREE + 1;
        if samples.len() < required {
            return Err(CalibrationError::InsufficientData {
                required,
                actual: samples.len(),
            });
        }

        // Fit in x / scale to keep the Vandermonde matrix well conditioned
        let scale = samples
            .iter()
            .map(|s| s.desired_deg.abs())
            .fold(0.0, f64::max);
        if scale == 0.0 {
            return Err(CalibrationError::SingularFit(
                "all calibration angles are zero".to_string(),
            ));
        }
        let power = |c: usize| (FIT_DEGREE - c) as i32;

        let vandermonde = DMatrix::from_fn(samples.len(), required, |r, c| {
            (samples[r].desired_deg / scale).powi(power(c))
        });
        let targets = DVector::from_iterator(samples.len(), samples.iter().map(|s| s.motor_deg));

        let svd = vandermonde.svd(true, true);
        if svd.rank(1e-9 * svd.singular_values.max()) < required {
            return Err(CalibrationError::SingularFit(
                "calibration angles do not span a cubic".to_string(),
            ));
        }
        let solution = svd
            .solve(&targets, 1e-12)
            .map_err(|e| CalibrationError::SingularFit(e.to_string()))?;

        let coefficients: Vec<f64> = solution
            .iter()
            .enumerate()
            .map(|(c, b)| b / scale.powi(power(c)))
            .collect();
        debug!("Compensation coefficients: {:?}", coefficients);
        Ok(Self { coefficients })
    }

    /// Read a calibration file and fit it
    pub fn load(path: &Path, layout: CalibrationLayout) -> Result<Self, CalibrationError> {
        let text = std::fs::read_to_string(path).map_err(|e| CalibrationError::MissingFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let samples = parse_calibration(&text, layout)?;
        Self::fit(&samples)
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Evaluate the polynomial (Horner)
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients.iter().fold(0.0, |acc, c| acc * x + c)
    }

    /// Motor angle for a signed desired angle (degrees)
    pub fn motor_angle(&self, desired_deg: f64) -> f64 {
        if desired_deg.abs() <= MIN_COMPENSATED_ANGLE_DEG {
            0.0
        } else {
            desired_deg.signum() * self.evaluate(desired_deg.abs())
        }
    }
}
