//! Point and calibration files on disk

use std::fs;
use tempfile::tempdir;
use wirebend_camtools::{CalibrationLayout, CompensationModel, ImportMode, PointCloudImporter};
use wirebend_core::{CalibrationError, ImportError, Point3};

#[test]
fn test_import_point_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hook.csv");
    fs::write(&path, "0,0,0\n10,0,0\n\n10,10,0\n").unwrap();

    let report = PointCloudImporter::new(ImportMode::Strict)
        .import_file(&path)
        .unwrap();
    assert_eq!(report.points.len(), 3);
    assert_eq!(report.points[2], Point3::new(10.0, 10.0, 0.0));
}

#[test]
fn test_import_missing_file() {
    let dir = tempdir().unwrap();
    let err = PointCloudImporter::default()
        .import_file(&dir.path().join("missing.csv"))
        .unwrap_err();
    assert!(matches!(err, ImportError::Io { .. }));
}

#[test]
fn test_load_calibration_table() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Mild Steel - 3mm.csv");
    let mut text = String::from("motor,desired\n");
    for i in 1..=8 {
        let desired = i as f64 * 20.0;
        text.push_str(&format!("{},{}\n", 1.05 * desired + 4.0, desired));
    }
    fs::write(&path, text).unwrap();

    let model = CompensationModel::load(&path, CalibrationLayout::MotorThenDesired).unwrap();
    assert!((model.motor_angle(90.0) - 98.5).abs() < 1e-6);
    assert!((model.motor_angle(-90.0) + 98.5).abs() < 1e-6);
}

#[test]
fn test_missing_calibration_file() {
    let dir = tempdir().unwrap();
    let err = CompensationModel::load(&dir.path().join("nope.csv"), CalibrationLayout::default())
        .unwrap_err();
    assert!(matches!(err, CalibrationError::MissingFile { .. }));
}
