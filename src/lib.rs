//! # WireBend
//!
//! Bend-path planner for CNC wire benders. Takes a 3D wire centerline as a
//! point list and produces the feed, twist and bend moves that form it,
//! compensated for spring-back and ready to run on the machine.
//!
//! ## Architecture
//!
//! WireBend is organized as a workspace with multiple crates:
//!
//! 1. **wirebend-core** - Geometry types, wire materials, units, errors
//! 2. **wirebend-camtools** - Import, preprocessing, orientation search,
//!    minimum bend distances, bend extraction, compensation, G-code
//! 3. **wirebend-settings** - TOML/JSON configuration
//! 4. **wirebend** - Command-line binary that ties the crates together

pub mod app;

pub use wirebend_core::{
    init_standard_library, BendParameters, CalibrationError, GeometryError, ImportError,
    MachineEnvelope, MachineProfile, MaterialId, MaterialLibrary, PinPosition, Point3, Polyline,
    WireAlloy, WireMaterial,
};

pub use wirebend_camtools::{
    BendPlan, BendPlanner, BendRecord, CalibrationLayout, CamToolError, CompensationModel,
    GCodeEmitter, GCodeProgram, ImportMode, Orientation, PointCloudImporter, PreprocessOptions,
    WireProfile,
};

pub use wirebend_settings::{Config, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, leaving stdout to the instruction stream
/// - RUST_LOG environment variable support
/// - `default_level` for everything RUST_LOG does not mention
pub fn init_logging(default_level: tracing::Level, format: LogFormat) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(default_level.into());

    match format {
        LogFormat::Text => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(true);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    Ok(())
}
