//! # WireBend CAM Tools
//!
//! Turns a 3D wire centerline into the feed/twist/bend program of a CNC wire
//! bender.
//!
//! ## Pipeline
//!
//! - **Import**: `x,y,z` point files ([`import`])
//! - **Preprocessing**: duplicate removal, segment reordering and straight
//!   vertex filtering ([`preprocess`])
//! - **Orientations**: the four ways a part can be fed and mounted
//!   ([`orientation`])
//! - **Minimum bend distance**: drops vertices the bend pin cannot reach
//!   ([`min_bend`])
//! - **Bend extraction**: walks the centerline in a moving frame and records
//!   feed, twist and bend per vertex ([`bend_extractor`], [`frame`],
//!   [`collision`])
//! - **Compensation**: spring-back correction fitted from calibration tables
//!   ([`compensation`])
//! - **G-code**: bender instruction stream ([`gcode`])
//!
//! [`planner::BendPlanner`] runs the whole pipeline and picks the variant
//! with the fewest machine collisions.

pub mod bend_extractor;
pub mod collision;
pub mod compensation;
pub mod error;
pub mod frame;
pub mod gcode;
pub mod import;
pub mod min_bend;
pub mod orientation;
pub mod planner;
pub mod preprocess;
pub mod profile;

// Re-export commonly used items
pub use bend_extractor::{BendExtractor, Extraction};
pub use collision::CollisionDetector;
pub use compensation::{CalibrationLayout, CalibrationSample, CompensationModel};
pub use error::{CamToolError, CamToolResult, ParameterError, ParameterResult};
pub use frame::LocalFrame;
pub use gcode::{GCodeEmitter, GCodeProgram, Instruction, PinSide};
pub use import::{ImportMode, ImportReport, PointCloudImporter};
pub use min_bend::{FilterOutcome, MinBendDistanceSolver, NewtonConfig, PinContact};
pub use orientation::{Orientation, OrientationGenerator};
pub use planner::{evaluate_orientation, BendPlan, BendPlanner, SkippedVariant};
pub use preprocess::{PreprocessOptions, SegmentPreprocessor};
pub use profile::{BendRecord, WireProfile, BEND_TABLE_HEADER};
