//! Bend planning pipeline
//!
//! points → preprocessing → four orientation variants → (per variant)
//! distance filtering → mounting → bend extraction → compensation →
//! selection of the variant with the fewest collisions.
//!
//! The variants share no state, so they are evaluated in parallel.

use crate::bend_extractor::BendExtractor;
use crate::compensation::CompensationModel;
use crate::error::{CamToolError, CamToolResult, ParameterError, ParameterResult};
use crate::gcode::{GCodeEmitter, GCodeProgram};
use crate::min_bend::MinBendDistanceSolver;
use crate::orientation::{mount, Orientation, OrientationGenerator};
use crate::preprocess::{PreprocessOptions, SegmentPreprocessor};
use crate::profile::{BendRecord, WireProfile};
use rayon::prelude::*;
use tracing::{info, warn};
use wirebend_core::{BendParameters, GeometryError, MachineProfile, Point3};

/// Largest wire the bend head accepts (mm)
pub const MAX_WIRE_DIAMETER_MM: f64 = 10.0;
/// Largest pin position on the bend head (mm)
pub const MAX_PIN_POSITION_MM: f64 = 100.0;

/// Plan one orientation of an already preprocessed centerline
///
/// `points` must be in the variant's feed order (reversed for reversed
/// variants). Pure function of its inputs.
pub fn evaluate_orientation(
    points: &[Point3],
    orientation: Orientation,
    machine: &MachineProfile,
    params: &BendParameters,
) -> Result<WireProfile, GeometryError> {
    let mut filtered = points.to_vec();
    let outcome = MinBendDistanceSolver::new(*machine, params).filter(&mut filtered)?;

    let mounted = mount(&filtered, orientation);
    let extraction = BendExtractor::new(*machine, params.wire_diameter_mm).extract(&mounted)?;

    let mut profile = WireProfile::new(orientation, mounted, params);
    profile.lengths = extraction.lengths;
    profile.rotations = extraction.rotations;
    profile.angles = extraction.angles;
    profile.collision_count = extraction.collision_count;
    profile.deleted_vertex_count = outcome.deleted_vertices;
    profile.tail_extension_mm = outcome.tail_extension_mm;
    Ok(profile)
}

/// A variant that could not be planned
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedVariant {
    pub orientation: Orientation,
    pub error: GeometryError,
}

/// Result of a planning run
#[derive(Debug, Clone)]
pub struct BendPlan {
    profiles: Vec<WireProfile>,
    skipped: Vec<SkippedVariant>,
    best: usize,
    selected: usize,
    emitter: GCodeEmitter,
    params: BendParameters,
}

impl BendPlan {
    /// All successfully planned variants in evaluation order
    pub fn profiles(&self) -> &[WireProfile] {
        &self.profiles
    }

    pub fn skipped(&self) -> &[SkippedVariant] {
        &self.skipped
    }

    pub fn parameters(&self) -> &BendParameters {
        &self.params
    }

    /// Variant with the fewest collisions
    pub fn best(&self) -> &WireProfile {
        &self.profiles[self.best]
    }

    pub fn selected(&self) -> &WireProfile {
        &self.profiles[self.selected]
    }

    /// Select a specific variant
    pub fn select(&mut self, orientation: Orientation) -> CamToolResult<&WireProfile> {
        let index = self
            .profiles
            .iter()
            .position(|p| p.orientation == orientation)
            .ok_or_else(|| {
                CamToolError::NoViableOrientation(format!("{} was skipped", orientation))
            })?;
        self.selected = index;
        Ok(&self.profiles[index])
    }

    /// Select the variant with a one-based number
    pub fn select_number(&mut self, number: usize) -> CamToolResult<&WireProfile> {
        let orientation =
            Orientation::from_number(number).ok_or(CamToolError::OrientationOutOfRange(number))?;
        self.select(orientation)
    }

    /// Cycle to the next planned variant
    pub fn select_next(&mut self) -> &WireProfile {
        self.selected = (self.selected + 1) % self.profiles.len();
        &self.profiles[self.selected]
    }

    /// Bend table of the selected variant
    pub fn records(&self) -> Vec<BendRecord> {
        self.selected().records()
    }

    /// Instruction stream of the selected variant
    pub fn program(&self) -> GCodeProgram {
        self.program_for(self.selected())
    }

    /// Instruction stream of any planned variant
    pub fn program_for(&self, profile: &WireProfile) -> GCodeProgram {
        self.emitter.emit(profile)
    }
}

/// Runs the planning pipeline
#[derive(Debug, Clone)]
pub struct BendPlanner {
    machine: MachineProfile,
    preprocessor: SegmentPreprocessor,
}

impl BendPlanner {
    pub fn new(machine: MachineProfile, preprocess: PreprocessOptions) -> Self {
        Self {
            machine,
            preprocessor: SegmentPreprocessor::new(preprocess),
        }
    }

    pub fn machine(&self) -> &MachineProfile {
        &self.machine
    }

    /// Check bend parameters before a run
    pub fn validate(&self, params: &BendParameters) -> ParameterResult<()> {
        if self.machine.die_radius_mm <= 0.0 {
            return Err(ParameterError::InvalidValue {
                name: "die_radius_mm".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        let d = params.wire_diameter_mm;
        if !(d > 0.0 && d <= MAX_WIRE_DIAMETER_MM) {
            return Err(ParameterError::OutOfRange {
                name: "wire_diameter_mm".to_string(),
                value: d,
                min: 0.0,
                max: MAX_WIRE_DIAMETER_MM,
            });
        }
        let pin = params.pin_mm();
        if !(pin > 0.0 && pin <= MAX_PIN_POSITION_MM) {
            return Err(ParameterError::OutOfRange {
                name: "pin_position_mm".to_string(),
                value: pin,
                min: 0.0,
                max: MAX_PIN_POSITION_MM,
            });
        }
        if pin <= self.machine.bend_pin_diameter_mm / 2.0 {
            return Err(ParameterError::InvalidValue {
                name: "pin_position_mm".to_string(),
                reason: format!(
                    "{pin} mm leaves no room for a {} mm bend pin",
                    self.machine.bend_pin_diameter_mm
                ),
            });
        }
        Ok(())
    }

    /// Plan all four orientations and select the best one
    pub fn plan(
        &self,
        points: &[Point3],
        params: &BendParameters,
        model: &CompensationModel,
    ) -> CamToolResult<BendPlan> {
        self.validate(params)?;
        let polyline = self.preprocessor.process(points)?;
        info!(
            "Planning {} points ({:.2} mm of wire)",
            polyline.len(),
            polyline.length()
        );

        let results: Vec<(Orientation, Result<WireProfile, GeometryError>)> =
            OrientationGenerator::generate(&polyline)
                .into_par_iter()
                .map(|(orientation, ordered)| {
                    let result =
                        evaluate_orientation(&ordered, orientation, &self.machine, params);
                    (orientation, result)
                })
                .collect();

        let mut profiles = Vec::with_capacity(results.len());
        let mut skipped = Vec::new();
        for (orientation, result) in results {
            match result {
                Ok(mut profile) => {
                    profile.apply_compensation(model);
                    info!("{}", profile.summary());
                    profiles.push(profile);
                }
                Err(error) => {
                    warn!("Skipping {}: {}", orientation, error);
                    skipped.push(SkippedVariant { orientation, error });
                }
            }
        }

        let best = profiles
            .iter()
            .enumerate()
            .min_by_key(|(_, p)| p.collision_count)
            .map(|(i, _)| i)
            .ok_or_else(|| {
                let reasons: Vec<String> = skipped.iter().map(|s| s.error.to_string()).collect();
                CamToolError::NoViableOrientation(reasons.join("; "))
            })?;
        info!("Selected {}", profiles[best].orientation);

        Ok(BendPlan {
            profiles,
            skipped,
            best,
            selected: best,
            emitter: GCodeEmitter::new(&self.machine),
            params: params.clone(),
        })
    }
}

impl Default for BendPlanner {
    fn default() -> Self {
        Self::new(MachineProfile::default(), PreprocessOptions::default())
    }
}
