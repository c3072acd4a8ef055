//! # WireBend Core
//!
//! Core types and utilities for WireBend.
//! Provides the geometry primitives, machine description, wire materials
//! and error types shared by the planner and the settings layer.

pub mod data;
pub mod error;
pub mod units;

pub use data::{
    distance, path_length, turn_angle, MachineEnvelope, MachineProfile, Point3, Polyline,
    Vector3, MIN_SEGMENT_LENGTH,
};

pub use data::materials::{
    init_standard_library, BendParameters, MaterialId, MaterialLibrary, PinPosition, WireAlloy,
    WireMaterial,
};

pub use error::{CalibrationError, GeometryError, ImportError};
