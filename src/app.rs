//! Command implementations behind the CLI
//!
//! Kept out of `main.rs` so they can be driven from tests.

use anyhow::{bail, Context};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use wirebend_camtools::{
    BendPlan, BendPlanner, CompensationModel, GCodeProgram, ImportMode, PointCloudImporter,
};
use wirebend_core::units::{format_length, get_unit_label, MeasurementSystem};
use wirebend_core::{
    init_standard_library, BendParameters, MaterialId, MaterialLibrary, PinPosition, WireAlloy,
    WireMaterial,
};
use wirebend_settings::{Config, OutputSettings};

/// Custom materials stored next to the calibration tables
pub const CUSTOM_MATERIALS_FILE: &str = "materials.json";

/// Inputs of one `plan` run
#[derive(Debug, Clone, Default)]
pub struct PlanRequest {
    pub points: PathBuf,
    pub material: Option<String>,
    pub diameter_mm: Option<f64>,
    pub pin: Option<PinPosition>,
    pub calibration: Option<PathBuf>,
    /// One-based orientation to output instead of the best one
    pub orientation: Option<usize>,
    pub strict: bool,
    /// Emit motor angles equal to the bend angles when no table is given
    pub uncompensated: bool,
}

/// Result of a `plan` run
#[derive(Debug, Clone)]
pub struct PlanOutput {
    pub plan: BendPlan,
    /// Instruction stream as configured by the output settings
    pub program: String,
    /// Bend table of the selected orientation
    pub table: String,
}

/// Presets plus any custom materials found in `materials_dir`
pub fn load_library(materials_dir: &Path) -> anyhow::Result<MaterialLibrary> {
    let mut library = init_standard_library();
    let custom = materials_dir.join(CUSTOM_MATERIALS_FILE);
    if custom.exists() {
        let json = std::fs::read_to_string(&custom)
            .with_context(|| format!("Failed to read {}", custom.display()))?;
        let added = library
            .merge_json(&json)
            .with_context(|| format!("Invalid custom materials in {}", custom.display()))?;
        info!("Loaded {} custom materials", added);
    }
    Ok(library)
}

/// Bend parameters and compensation model for a request
///
/// A material supplies diameter, pin and calibration table; `--diameter`,
/// `--pin` and `--calibration` override it. A run without a calibration
/// table is refused unless `uncompensated` is set.
pub fn resolve_parameters(
    request: &PlanRequest,
    config: &Config,
    library: &MaterialLibrary,
) -> anyhow::Result<(BendParameters, CompensationModel)> {
    let materials_dir = &config.compensation.materials_dir;

    let (material, diameter, pin, calibration) = match &request.material {
        Some(id) => {
            let m = library.require(&MaterialId(id.clone()))?;
            (
                Some(m.id.clone()),
                request.diameter_mm.unwrap_or(m.wire_diameter_mm),
                request.pin.unwrap_or(m.pin_position),
                Some(
                    request
                        .calibration
                        .clone()
                        .unwrap_or_else(|| m.calibration_path(materials_dir)),
                ),
            )
        }
        None => {
            let (Some(diameter), Some(pin)) = (request.diameter_mm, request.pin) else {
                bail!("Either --material or both --diameter and --pin are required");
            };
            (None, diameter, pin, request.calibration.clone())
        }
    };

    let params = BendParameters::new(
        material,
        diameter,
        pin,
        calibration.clone().unwrap_or_default(),
    );

    let model = match calibration {
        Some(path) => CompensationModel::load(&path, config.compensation.layout)
            .with_context(|| format!("Failed to load calibration table {}", path.display()))?,
        None if request.uncompensated => {
            warn!("Uncompensated run, motor angles equal bend angles");
            CompensationModel::identity()
        }
        None => bail!(
            "No calibration table for this wire; pass --calibration or --uncompensated"
        ),
    };

    Ok((params, model))
}

/// Instruction stream text for a plan
///
/// Writes the selected orientation, or every planned orientation one after
/// another when `best_orientation_only` is off.
pub fn render_program(plan: &BendPlan, output: &OutputSettings) -> String {
    let render = |program: GCodeProgram| {
        if output.annotate {
            program.to_annotated(output.comment_column)
        } else {
            program.to_text()
        }
    };

    if output.best_orientation_only {
        return render(plan.program());
    }

    let mut out = String::new();
    for profile in plan.profiles() {
        out.push_str(&format!("; {}\n", profile.summary()));
        out.push_str(&render(plan.program_for(profile)));
    }
    out
}

/// Import, plan and render one part
pub fn run_plan(request: &PlanRequest, config: &Config) -> anyhow::Result<PlanOutput> {
    let library = load_library(&config.compensation.materials_dir)?;
    let (params, model) = resolve_parameters(request, config, &library)?;

    let mode = if request.strict {
        ImportMode::Strict
    } else {
        ImportMode::Lenient
    };
    let report = PointCloudImporter::new(mode)
        .import_file(&request.points)
        .with_context(|| format!("Failed to import {}", request.points.display()))?;
    if report.skipped_rows() > 0 {
        warn!("Skipped {} malformed rows", report.skipped_rows());
    }

    let planner = BendPlanner::new(config.machine.profile(), config.preprocessing.options());
    let mut plan = planner.plan(&report.points, &params, &model)?;
    if let Some(number) = request.orientation {
        plan.select_number(number)?;
    }

    let selected = plan.selected();
    info!(
        "{} selected: {} collisions, {} vertices deleted",
        selected.orientation, selected.collision_count, selected.deleted_vertex_count
    );
    if let Some(extension) = selected.tail_extension_mm {
        warn!("Final segment extended by {:.3} mm", extension);
    }
    if params.pin_overridden {
        warn!("Pin position replaced by {}", params.pin_position);
    }

    let program = render_program(&plan, &config.output);
    let table = plan.selected().to_table_csv();
    Ok(PlanOutput {
        plan,
        program,
        table,
    })
}

/// Narrows the `materials` listing
#[derive(Debug, Clone, Default)]
pub struct MaterialFilter {
    /// Case-insensitive part of the material name
    pub name: Option<String>,
    pub alloy: Option<WireAlloy>,
}

/// Materials matching `filter`, sorted by diameter, then name
pub fn select_materials<'a>(
    library: &'a MaterialLibrary,
    filter: &MaterialFilter,
) -> Vec<&'a WireMaterial> {
    let mut selected = match filter.alloy {
        Some(alloy) => library.get_materials_by_alloy(alloy),
        None => library.get_all_materials(),
    };
    if let Some(query) = &filter.name {
        let matches = library.search_by_name(query);
        selected.retain(|m| matches.iter().any(|hit| hit.id == m.id));
    }
    selected.sort_by(|a, b| {
        a.wire_diameter_mm
            .total_cmp(&b.wire_diameter_mm)
            .then_with(|| a.name.cmp(&b.name))
    });
    selected
}

/// One line per material for the `materials` command
pub fn material_listing(materials: &[&WireMaterial], units: MeasurementSystem) -> String {
    let mut out = String::new();
    for m in materials {
        out.push_str(&format!(
            "{:<20} {:<28} {:>7} {:<2}  {:>7}  {}\n",
            m.id.to_string(),
            m.name,
            format_length(m.wire_diameter_mm, units),
            get_unit_label(units),
            m.pin_position.to_string(),
            m.calibration_file.display()
        ));
    }
    out
}
