//! Configuration management for WireBend
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats; the default file lives in the platform config
//! directory.
//!
//! Configuration is organized into logical sections:
//! - Machine (die and pin tooling, pin ducking, collision envelope)
//! - Preprocessing (segment reordering, straight-vertex filtering)
//! - Compensation (calibration table location and column order)
//! - Output (annotation, comment column, which orientations to write)

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use wirebend_camtools::{CalibrationLayout, PreprocessOptions};
use wirebend_core::{MachineEnvelope, MachineProfile};

/// File name of the default configuration
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Machine collision envelope as `[min, max]` pairs (mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeSettings {
    pub x: [f64; 2],
    pub y: [f64; 2],
    pub z: [f64; 2],
}

impl Default for EnvelopeSettings {
    fn default() -> Self {
        MachineEnvelope::default().into()
    }
}

impl From<MachineEnvelope> for EnvelopeSettings {
    fn from(e: MachineEnvelope) -> Self {
        Self {
            x: [e.x.0, e.x.1],
            y: [e.y.0, e.y.1],
            z: [e.z.0, e.z.1],
        }
    }
}

impl From<EnvelopeSettings> for MachineEnvelope {
    fn from(e: EnvelopeSettings) -> Self {
        MachineEnvelope::new((e.x[0], e.x[1]), (e.y[0], e.y[1]), (e.z[0], e.z[1]))
    }
}

/// Bender tooling settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineSettings {
    /// Bend die radius in mm
    pub die_radius_mm: f64,
    /// Bend pin diameter in mm
    pub bend_pin_diameter_mm: f64,
    /// Offset of the wire tangent from the die axis in mm
    pub tooling_offset_mm: f64,
    /// Z travel used to park and duck the pin
    pub duck_offset_mm: f64,
    /// Pin positions above this need the setup macro (mm)
    pub macro_pin_threshold_mm: f64,
    /// Collision envelope in the walk frame
    pub envelope: EnvelopeSettings,
}

impl Default for MachineSettings {
    fn default() -> Self {
        MachineProfile::default().into()
    }
}

impl From<MachineProfile> for MachineSettings {
    fn from(m: MachineProfile) -> Self {
        Self {
            die_radius_mm: m.die_radius_mm,
            bend_pin_diameter_mm: m.bend_pin_diameter_mm,
            tooling_offset_mm: m.tooling_offset_mm,
            duck_offset_mm: m.duck_offset_mm,
            macro_pin_threshold_mm: m.macro_pin_threshold_mm,
            envelope: m.envelope.into(),
        }
    }
}

impl MachineSettings {
    /// Machine profile used by the planner
    pub fn profile(&self) -> MachineProfile {
        MachineProfile {
            die_radius_mm: self.die_radius_mm,
            bend_pin_diameter_mm: self.bend_pin_diameter_mm,
            tooling_offset_mm: self.tooling_offset_mm,
            duck_offset_mm: self.duck_offset_mm,
            macro_pin_threshold_mm: self.macro_pin_threshold_mm,
            envelope: self.envelope.into(),
        }
    }
}

/// Point preprocessing switches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessingSettings {
    pub segment_reordering: bool,
    pub straight_filtering: bool,
    /// Turn angle below which a vertex is dropped (degrees)
    pub straight_angle_threshold_deg: f64,
    /// Step growth that starts a new segment
    pub segment_break_ratio: f64,
}

impl Default for PreprocessingSettings {
    fn default() -> Self {
        let o = PreprocessOptions::default();
        Self {
            segment_reordering: o.segment_reordering,
            straight_filtering: o.straight_filtering,
            straight_angle_threshold_deg: o.straight_angle_threshold_deg,
            segment_break_ratio: o.segment_break_ratio,
        }
    }
}

impl PreprocessingSettings {
    pub fn options(&self) -> PreprocessOptions {
        PreprocessOptions {
            segment_reordering: self.segment_reordering,
            straight_filtering: self.straight_filtering,
            straight_angle_threshold_deg: self.straight_angle_threshold_deg,
            segment_break_ratio: self.segment_break_ratio,
        }
    }
}

/// Calibration table settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompensationSettings {
    /// Directory holding the material calibration tables
    pub materials_dir: PathBuf,
    /// Column order of the calibration tables
    pub layout: CalibrationLayout,
}

impl Default for CompensationSettings {
    fn default() -> Self {
        Self {
            materials_dir: PathBuf::from("Materials"),
            layout: CalibrationLayout::default(),
        }
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Append comments to the instruction stream
    pub annotate: bool,
    /// Column comments start at when annotating
    pub comment_column: usize,
    /// Write only the selected orientation instead of all four
    pub best_orientation_only: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            annotate: false,
            comment_column: 20,
            best_orientation_only: true,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub machine: MachineSettings,
    pub preprocessing: PreprocessingSettings,
    pub compensation: CompensationSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> ConfigResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

fn positive(key: &str, value: f64) -> ConfigResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange {
            key: key.to_string(),
            value: value.to_string(),
            expected: "must be > 0".to_string(),
        })
    }
}

fn range(key: &str, r: [f64; 2]) -> ConfigResult<()> {
    if r[0] < r[1] {
        Ok(())
    } else {
        Err(ConfigError::EmptyRange {
            key: key.to_string(),
            min: r[0],
            max: r[1],
        })
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location (`<config dir>/wirebend/config.toml`)
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("wirebend").join(CONFIG_FILE_NAME))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no config directory on this platform".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::LoadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the file at `path`, or the default file if it exists, or defaults
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Ok(default) if default.exists() => Self::load_from_file(&default),
            _ => Ok(Self::default()),
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|e| SettingsError::SaveError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let m = &self.machine;
        positive("machine.die_radius_mm", m.die_radius_mm)?;
        positive("machine.bend_pin_diameter_mm", m.bend_pin_diameter_mm)?;
        positive("machine.duck_offset_mm", m.duck_offset_mm)?;
        positive("machine.macro_pin_threshold_mm", m.macro_pin_threshold_mm)?;
        if !(m.tooling_offset_mm >= 0.0) {
            return Err(ConfigError::ValueOutOfRange {
                key: "machine.tooling_offset_mm".to_string(),
                value: m.tooling_offset_mm.to_string(),
                expected: "must be >= 0".to_string(),
            });
        }
        range("machine.envelope.x", m.envelope.x)?;
        range("machine.envelope.y", m.envelope.y)?;
        range("machine.envelope.z", m.envelope.z)?;

        let p = &self.preprocessing;
        if !(p.segment_break_ratio > 1.0) {
            return Err(ConfigError::ValueOutOfRange {
                key: "preprocessing.segment_break_ratio".to_string(),
                value: p.segment_break_ratio.to_string(),
                expected: "must be > 1".to_string(),
            });
        }
        let threshold = p.straight_angle_threshold_deg;
        if !(threshold > 0.0 && threshold < 45.0) {
            return Err(ConfigError::ValueOutOfRange {
                key: "preprocessing.straight_angle_threshold_deg".to_string(),
                value: threshold.to_string(),
                expected: "must be between 0 and 45 degrees".to_string(),
            });
        }

        Ok(())
    }
}
