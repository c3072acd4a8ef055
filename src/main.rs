use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;
use wirebend::app::{self, MaterialFilter, PlanRequest};
use wirebend::{init_logging, Config, LogFormat, PinPosition, WireAlloy, BUILD_DATE, VERSION};
use wirebend_core::units::{parse_length_with_unit, MeasurementSystem};

#[derive(Parser)]
#[command(name = "wirebend")]
#[command(about = "Bend-path planner for CNC wire benders")]
#[command(version)]
struct Cli {
    /// Configuration file (.toml or .json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format on stderr
    #[arg(long, value_enum, default_value = "text", global = true)]
    log_format: LogFormatArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a wire part from an x,y,z point file
    Plan {
        /// Point file, one x,y,z triple per line
        points: PathBuf,

        /// Material preset or custom material ID
        #[arg(short, long)]
        material: Option<String>,

        /// Wire diameter (mm, or inches with an "in" suffix, e.g. 1/8in)
        #[arg(short, long, value_parser = parse_length_with_unit)]
        diameter: Option<f64>,

        /// Pin position in mm (12, 16.5, 27.5 or any positive value)
        #[arg(short, long)]
        pin: Option<PinPosition>,

        /// Spring-back calibration table
        #[arg(long)]
        calibration: Option<PathBuf>,

        /// Plan without a calibration table; motor angles equal bend angles
        #[arg(long, conflicts_with = "calibration")]
        uncompensated: bool,

        /// Output this orientation (1-4) instead of the best one
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=4))]
        orientation: Option<u8>,

        /// Append comments to every instruction
        #[arg(short, long)]
        annotate: bool,

        /// Abort on the first malformed point row
        #[arg(long)]
        strict: bool,

        /// Instruction stream output file (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Bend table output file (CSV)
        #[arg(long)]
        table: Option<PathBuf>,
    },

    /// List available wire materials
    Materials {
        /// Only materials whose name contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Only materials of this alloy family
        #[arg(long, value_enum)]
        alloy: Option<AlloyArg>,

        /// Units for wire diameters (mm or in)
        #[arg(short, long, default_value = "mm")]
        units: MeasurementSystem,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum AlloyArg {
    CarbonSteel,
    GalvanizedSteel,
    MildSteel,
    SpringSteel,
    Other,
}

impl From<AlloyArg> for WireAlloy {
    fn from(arg: AlloyArg) -> Self {
        match arg {
            AlloyArg::CarbonSteel => WireAlloy::CarbonSteel,
            AlloyArg::GalvanizedSteel => WireAlloy::GalvanizedSteel,
            AlloyArg::MildSteel => WireAlloy::MildSteel,
            AlloyArg::SpringSteel => WireAlloy::SpringSteel,
            AlloyArg::Other => WireAlloy::Other,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

fn write_or_print(path: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    init_logging(level, cli.log_format.into())?;
    tracing::debug!("wirebend {} (built {})", VERSION, BUILD_DATE);

    let mut config = Config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Plan {
            points,
            material,
            diameter,
            pin,
            calibration,
            uncompensated,
            orientation,
            annotate,
            strict,
            output,
            table,
        } => {
            config.output.annotate |= annotate;
            if orientation.is_some() {
                config.output.best_orientation_only = true;
            }
            let request = PlanRequest {
                points,
                material,
                diameter_mm: diameter,
                pin,
                calibration,
                orientation: orientation.map(usize::from),
                strict,
                uncompensated,
            };
            let result = app::run_plan(&request, &config)?;

            write_or_print(output.as_deref(), &result.program)?;
            if let Some(table) = table {
                write_or_print(Some(&table), &result.table)?;
            }
        }
        Commands::Materials {
            search,
            alloy,
            units,
        } => {
            let library = app::load_library(&config.compensation.materials_dir)?;
            let filter = MaterialFilter {
                name: search,
                alloy: alloy.map(WireAlloy::from),
            };
            let materials = app::select_materials(&library, &filter);
            print!("{}", app::material_listing(&materials, units));
        }
    }

    Ok(())
}
