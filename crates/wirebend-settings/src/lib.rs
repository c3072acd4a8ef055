//! WireBend Settings Crate
//!
//! Handles planner configuration: machine tooling, preprocessing switches,
//! calibration table location and output options.

pub mod config;
pub mod error;

pub use config::{
    CompensationSettings, Config, EnvelopeSettings, MachineSettings, OutputSettings,
    PreprocessingSettings, CONFIG_FILE_NAME,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
