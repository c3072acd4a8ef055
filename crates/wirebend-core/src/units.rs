//! Unit conversion utilities
//!
//! Handles conversion between Metric (mm) and Imperial (inch) systems for
//! wire diameters and lengths. Supports decimal and fractional inch parsing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (mm)
    #[default]
    Metric,
    /// Imperial system (inches)
    Imperial,
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "mm" => Ok(Self::Metric),
            "imperial" | "inch" | "in" => Ok(Self::Imperial),
            _ => Err(format!("Unknown measurement system: {}", s)),
        }
    }
}

/// Format length value for display
///
/// * `value_mm` - Value in millimeters
/// * `system` - Target measurement system
pub fn format_length(value_mm: f64, system: MeasurementSystem) -> String {
    match system {
        MeasurementSystem::Metric => format!("{:.3}", value_mm),
        MeasurementSystem::Imperial => format!("{:.3}", value_mm / MM_PER_INCH),
    }
}

/// Parse length string to millimeters
///
/// * `input` - String to parse
/// * `system` - Assumed measurement system
pub fn parse_length(input: &str, system: MeasurementSystem) -> Result<f64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0.0);
    }

    match system {
        MeasurementSystem::Metric => input.parse::<f64>().map_err(|e| e.to_string()),
        MeasurementSystem::Imperial => {
            if input.contains('/') {
                let mut total_inches = 0.0;
                let mut negative = false;
                for (i, part) in input.split_whitespace().enumerate() {
                    let part = if i == 0 {
                        if let Some(rest) = part.strip_prefix('-') {
                            negative = true;
                            rest
                        } else {
                            part
                        }
                    } else {
                        part
                    };
                    if part.contains('/') {
                        let frac_parts: Vec<&str> = part.split('/').collect();
                        if frac_parts.len() != 2 {
                            return Err("Invalid fraction format".to_string());
                        }
                        let num = frac_parts[0]
                            .parse::<f64>()
                            .map_err(|_| "Invalid numerator")?;
                        let den = frac_parts[1]
                            .parse::<f64>()
                            .map_err(|_| "Invalid denominator")?;
                        if den == 0.0 {
                            return Err("Division by zero".to_string());
                        }
                        total_inches += num / den;
                    } else {
                        total_inches += part.parse::<f64>().map_err(|_| "Invalid number part")?;
                    }
                }
                let sign = if negative { -1.0 } else { 1.0 };
                Ok(sign * total_inches * MM_PER_INCH)
            } else {
                let inches = input.parse::<f64>().map_err(|e| e.to_string())?;
                Ok(inches * MM_PER_INCH)
            }
        }
    }
}

/// Parse a length with an optional unit suffix ("mm", "in" or `"`)
///
/// Values without a suffix are millimeters.
pub fn parse_length_with_unit(input: &str) -> Result<f64, String> {
    let trimmed = input.trim();
    if let Some(value) = trimmed
        .strip_suffix("in")
        .or_else(|| trimmed.strip_suffix('"'))
    {
        parse_length(value, MeasurementSystem::Imperial)
    } else {
        let value = trimmed.strip_suffix("mm").unwrap_or(trimmed);
        parse_length(value, MeasurementSystem::Metric)
    }
}

/// Get the unit label for the given system ("mm" or "in")
pub fn get_unit_label(system: MeasurementSystem) -> &'static str {
    match system {
        MeasurementSystem::Metric => "mm",
        MeasurementSystem::Imperial => "in",
    }
}
