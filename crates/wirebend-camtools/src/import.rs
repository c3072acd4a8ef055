//! Point-cloud import
//!
//! Reads wire centerlines stored as one `x,y,z` triple per line. Blank lines
//! are ignored. In lenient mode a malformed row is skipped and reported; in
//! strict mode the first malformed row aborts the import.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};
use wirebend_core::{ImportError, Point3};

/// How malformed rows are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// Skip bad rows with a warning
    #[default]
    Lenient,
    /// Abort on the first bad row
    Strict,
}

/// Points read from a file together with the rows that were skipped
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub points: Vec<Point3>,
    pub warnings: Vec<ImportError>,
}

impl ImportReport {
    /// Number of rows skipped in lenient mode
    pub fn skipped_rows(&self) -> usize {
        self.warnings.len()
    }
}

/// Parser for `x,y,z` point files
#[derive(Debug, Clone, Copy, Default)]
pub struct PointCloudImporter {
    mode: ImportMode,
}

impl PointCloudImporter {
    pub fn new(mode: ImportMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ImportMode {
        self.mode
    }

    /// Read and parse a point file
    pub fn import_file(&self, path: &Path) -> Result<ImportReport, ImportError> {
        let text = std::fs::read_to_string(path).map_err(|e| ImportError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.parse_str(&text, &name)
    }

    /// Parse point text; `source_name` is used in error messages
    pub fn parse_str(&self, text: &str, source_name: &str) -> Result<ImportReport, ImportError> {
        let mut report = ImportReport::default();

        for (idx, line) in text.lines().enumerate() {
            let line_number = idx + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match parse_row(trimmed, line_number) {
                Ok(point) => report.points.push(point),
                Err(err) => match self.mode {
                    ImportMode::Strict => return Err(err),
                    ImportMode::Lenient => {
                        warn!("Skipping row in {}: {}", source_name, err);
                        report.warnings.push(err);
                    }
                },
            }
        }

        if report.points.is_empty() {
            return Err(ImportError::NoPoints {
                source_name: source_name.to_string(),
            });
        }

        debug!(
            "Imported {} points from {} ({} rows skipped)",
            report.points.len(),
            source_name,
            report.skipped_rows()
        );
        Ok(report)
    }
}

fn parse_row(line: &str, line_number: usize) -> Result<Point3, ImportError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 3 {
        return Err(ImportError::MalformedRow {
            line_number,
            fields: fields.len(),
        });
    }

    let mut coords = [0.0f64; 3];
    for (slot, field) in coords.iter_mut().zip(&fields) {
        *slot = field
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ImportError::InvalidNumber {
                line_number,
                value: field.to_string(),
            })?;
    }
    Ok(Point3::new(coords[0], coords[1], coords[2]))
}
