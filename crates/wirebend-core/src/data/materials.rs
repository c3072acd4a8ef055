//! Wire materials module
//!
//! This module provides:
//! - Wire alloy families
//! - Bend pin positions of the bend head
//! - Wire material definitions with their calibration files
//! - Material library management
//! - Typed bend parameters handed to the planner

use crate::error::CalibrationError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::warn;

/// Pin positions below this value cannot bend thick wire.
pub const SMALL_PIN_LIMIT_MM: f64 = 12.1;

/// Wires thicker than this need a larger pin position.
pub const THICK_WIRE_LIMIT_MM: f64 = 2.6;

/// Wire alloy families for organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum WireAlloy {
    /// High-carbon steel (1085)
    CarbonSteel,
    /// Zinc-coated steel
    GalvanizedSteel,
    /// Low-carbon steel
    MildSteel,
    /// Tempered spring steel
    SpringSteel,
    /// Anything else
    Other,
}

impl std::fmt::Display for WireAlloy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CarbonSteel => write!(f, "Carbon Steel"),
            Self::GalvanizedSteel => write!(f, "Galvanized Steel"),
            Self::MildSteel => write!(f, "Mild Steel"),
            Self::SpringSteel => write!(f, "Spring Steel"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// Distance of the bend pin from the die center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PinPosition {
    /// 12 mm position
    Pin12,
    /// 16.5 mm position
    Pin16_5,
    /// 27.5 mm position
    Pin27_5,
    /// Any other positive position in millimeters
    Custom(f64),
}

impl PinPosition {
    /// Pin distance in millimeters
    pub fn mm(&self) -> f64 {
        match self {
            Self::Pin12 => 12.0,
            Self::Pin16_5 => 16.5,
            Self::Pin27_5 => 27.5,
            Self::Custom(mm) => *mm,
        }
    }

    /// Map a millimeter value onto a standard position when it matches one
    pub fn from_mm(mm: f64) -> Self {
        const EPS: f64 = 1e-6;
        if (mm - 12.0).abs() < EPS {
            Self::Pin12
        } else if (mm - 16.5).abs() < EPS {
            Self::Pin16_5
        } else if (mm - 27.5).abs() < EPS {
            Self::Pin27_5
        } else {
            Self::Custom(mm)
        }
    }
}

impl std::fmt::Display for PinPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} mm", self.mm())
    }
}

impl FromStr for PinPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s
            .trim()
            .trim_end_matches("Pin")
            .trim_end_matches("pin")
            .trim()
            .trim_end_matches("mm")
            .trim();
        let mm: f64 = trimmed
            .parse()
            .map_err(|_| format!("Invalid pin position: {s}"))?;
        if !mm.is_finite() || mm <= 0.0 {
            return Err(format!("Pin position must be positive: {s}"));
        }
        Ok(Self::from_mm(mm))
    }
}

/// Material identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub String);

impl std::fmt::Display for MaterialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Complete wire material definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMaterial {
    /// Unique material identifier
    pub id: MaterialId,
    /// Display name
    pub name: String,
    /// Alloy family
    pub alloy: WireAlloy,
    /// Wire diameter in millimeters
    pub wire_diameter_mm: f64,
    /// Pin position this wire is bent with
    pub pin_position: PinPosition,
    /// Spring-back calibration table, relative to the materials directory
    pub calibration_file: PathBuf,
    /// Whether this is a user-defined custom material
    pub custom: bool,
    /// Notes and tips
    pub notes: String,
}

impl WireMaterial {
    /// Create a new material
    pub fn new(
        id: MaterialId,
        name: String,
        alloy: WireAlloy,
        wire_diameter_mm: f64,
        pin_position: PinPosition,
        calibration_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            id,
            name,
            alloy,
            wire_diameter_mm,
            pin_position,
            calibration_file: calibration_file.into(),
            custom: false,
            notes: String::new(),
        }
    }

    /// Calibration file resolved against a materials directory
    pub fn calibration_path(&self, materials_dir: &Path) -> PathBuf {
        if self.calibration_file.is_absolute() {
            self.calibration_file.clone()
        } else {
            materials_dir.join(&self.calibration_file)
        }
    }

    /// Bend parameters for this material
    pub fn bend_parameters(&self) -> BendParameters {
        BendParameters::new(
            Some(self.id.clone()),
            self.wire_diameter_mm,
            self.pin_position,
            self.calibration_file.clone(),
        )
    }
}

/// Materials library - manages collection of wire materials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialLibrary {
    materials: HashMap<MaterialId, WireMaterial>,
}

impl MaterialLibrary {
    /// Create a new empty library
    pub fn new() -> Self {
        Self {
            materials: HashMap::new(),
        }
    }

    /// Add a material to the library
    pub fn add_material(&mut self, material: WireMaterial) {
        self.materials.insert(material.id.clone(), material);
    }

    /// Get a material by ID
    pub fn get_material(&self, id: &MaterialId) -> Option<&WireMaterial> {
        self.materials.get(id)
    }

    /// Get a material by ID or fail with a calibration error
    pub fn require(&self, id: &MaterialId) -> Result<&WireMaterial, CalibrationError> {
        self.materials
            .get(id)
            .ok_or_else(|| CalibrationError::UnknownMaterial(id.to_string()))
    }

    /// All materials sorted by diameter, then name
    pub fn get_all_materials(&self) -> Vec<&WireMaterial> {
        let mut all: Vec<&WireMaterial> = self.materials.values().collect();
        all.sort_by(|a, b| {
            a.wire_diameter_mm
                .total_cmp(&b.wire_diameter_mm)
                .then_with(|| a.name.cmp(&b.name))
        });
        all
    }

    /// All materials of one alloy family
    pub fn get_materials_by_alloy(&self, alloy: WireAlloy) -> Vec<&WireMaterial> {
        self.materials
            .values()
            .filter(|m| m.alloy == alloy)
            .collect()
    }

    /// Search materials by name (partial match, case-insensitive)
    pub fn search_by_name(&self, query: &str) -> Vec<&WireMaterial> {
        let query_lower = query.to_lowercase();
        self.materials
            .values()
            .filter(|m| m.name.to_lowercase().contains(&query_lower))
            .collect()
    }

    /// Get the number of materials in the library
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Check if library is empty
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Add custom materials from a JSON array, returning how many were added
    ///
    /// Entries are marked custom and replace presets with the same ID.
    pub fn merge_json(&mut self, json: &str) -> Result<usize, serde_json::Error> {
        let materials: Vec<WireMaterial> = serde_json::from_str(json)?;
        let count = materials.len();
        for mut m in materials {
            m.custom = true;
            self.add_material(m);
        }
        Ok(count)
    }
}

impl Default for MaterialLibrary {
    fn default() -> Self {
        Self::new()
    }
}

/// Typed configuration of a bend run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BendParameters {
    /// Material the parameters came from, if any
    pub material: Option<MaterialId>,
    /// Wire diameter in millimeters
    pub wire_diameter_mm: f64,
    /// Effective pin position
    pub pin_position: PinPosition,
    /// Spring-back calibration table
    pub calibration_file: PathBuf,
    /// Set when the requested pin was replaced by the pin guard
    pub pin_overridden: bool,
}

impl BendParameters {
    /// Build parameters, replacing a small pin for thick wire with the 16.5 mm pin
    pub fn new(
        material: Option<MaterialId>,
        wire_diameter_mm: f64,
        pin_position: PinPosition,
        calibration_file: impl Into<PathBuf>,
    ) -> Self {
        let mut pin = pin_position;
        let mut pin_overridden = false;
        if pin.mm() < SMALL_PIN_LIMIT_MM && wire_diameter_mm > THICK_WIRE_LIMIT_MM {
            warn!(
                "Pin position {} is too small for {:.3} mm wire, using {}",
                pin,
                wire_diameter_mm,
                PinPosition::Pin16_5
            );
            pin = PinPosition::Pin16_5;
            pin_overridden = true;
        }
        Self {
            material,
            wire_diameter_mm,
            pin_position: pin,
            calibration_file: calibration_file.into(),
            pin_overridden,
        }
    }

    /// Pin position in millimeters
    pub fn pin_mm(&self) -> f64 {
        self.pin_position.mm()
    }
}

/// Initialize the standard library with the built-in wire presets
pub fn init_standard_library() -> MaterialLibrary {
    let mut library = MaterialLibrary::new();
    for m in crate::data::materials_static::load_preset_materials() {
        library.add_material(m);
    }
    library
}
