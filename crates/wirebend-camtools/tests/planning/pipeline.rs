//! End-to-end planning runs

use wirebend_camtools::{
    BendPlan, BendPlanner, CamToolError, CompensationModel, Orientation, PreprocessOptions,
};
use wirebend_core::{
    path_length, BendParameters, MachineEnvelope, MachineProfile, PinPosition, Point3,
};

fn params() -> BendParameters {
    BendParameters::new(None, 1.0, PinPosition::Pin16_5, "test.csv")
}

fn zigzag() -> Vec<Point3> {
    vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.0, 40.0, 0.0),
        Point3::new(30.0, 40.0, 0.0),
        Point3::new(30.0, 40.0, 35.0),
        Point3::new(30.0, 80.0, 35.0),
    ]
}

#[test]
fn test_close_vertex_removed_in_every_variant() {
    let points = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(20.0, 0.0, 0.0),
        Point3::new(20.0, 3.0, 0.0),
        Point3::new(20.0, 3.0, 20.0),
    ];
    let plan = BendPlanner::default()
        .plan(&points, &params(), &CompensationModel::identity())
        .unwrap();
    assert_eq!(plan.profiles().len(), 4);
    for profile in plan.profiles() {
        assert_eq!(profile.deleted_vertex_count, 1);
        assert_eq!(profile.bend_count(), 2);
    }
}

#[test]
fn test_planning_is_deterministic() {
    let planner = BendPlanner::default();
    let a = planner
        .plan(&zigzag(), &params(), &CompensationModel::identity())
        .unwrap();
    let b = planner
        .plan(&zigzag(), &params(), &CompensationModel::identity())
        .unwrap();
    assert_eq!(a.selected().orientation, b.selected().orientation);
    assert_eq!(a.program().to_text(), b.program().to_text());
    assert_eq!(a.records(), b.records());
}

/// Planar L: 40 mm along the feed axis, then a 30 mm leg
///
/// Mounted, the variants put the leg at +X (1), -X (2) and, fed from the
/// other end, a 40 mm leg at +X (3) and -X (4).
fn l_part() -> Vec<Point3> {
    vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.0, 40.0, 0.0),
        Point3::new(30.0, 40.0, 0.0),
    ]
}

fn planner_with_envelope(envelope: MachineEnvelope) -> BendPlanner {
    let machine = MachineProfile {
        envelope,
        ..MachineProfile::default()
    };
    BendPlanner::new(machine, PreprocessOptions::default())
}

fn collision_counts(plan: &BendPlan) -> Vec<usize> {
    plan.profiles().iter().map(|p| p.collision_count).collect()
}

#[test]
fn test_best_has_fewest_collisions() {
    // Catches every variant except the -X side beyond 35 mm
    let envelope = MachineEnvelope::new((-35.0, 45.0), (-1.0, 35.0), (-1.0, 1.0));
    let plan = planner_with_envelope(envelope)
        .plan(&l_part(), &params(), &CompensationModel::identity())
        .unwrap();

    assert_eq!(collision_counts(&plan), vec![3, 3, 3, 1]);
    assert_eq!(plan.best().orientation, Orientation::ReversedRotated);
    assert_eq!(plan.selected().orientation, Orientation::ReversedRotated);
}

#[test]
fn test_first_variant_wins_a_tie() {
    // Only the unturned 30 mm leg reaches the box
    let envelope = MachineEnvelope::new((20.0, 35.0), (35.0, 45.0), (-1.0, 1.0));
    let plan = planner_with_envelope(envelope)
        .plan(&l_part(), &params(), &CompensationModel::identity())
        .unwrap();

    assert_eq!(collision_counts(&plan), vec![1, 0, 0, 0]);
    assert_eq!(plan.best().orientation, Orientation::Rotated);
}

#[test]
fn test_sparse_part_keeps_its_corners() {
    let points = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(40.0, 0.0, 0.0),
        Point3::new(-20.0, 60.0, 0.0),
        Point3::new(-20.0, 60.0, 50.0),
    ];
    let input_length = path_length(&points);
    let plan = BendPlanner::default()
        .plan(&points, &params(), &CompensationModel::identity())
        .unwrap();

    let identity = plan
        .profiles()
        .iter()
        .find(|p| p.orientation == Orientation::Identity)
        .unwrap();
    assert_eq!(identity.deleted_vertex_count, 0);
    assert_eq!(identity.bend_count(), 3);
    assert!(identity
        .angles
        .iter()
        .any(|a| (a.abs() - 135.0).abs() < 1e-6));
    let total: f64 = identity.lengths.iter().sum();
    assert!((total - input_length).abs() < 1e-6);
}

#[test]
fn test_every_profile_is_compensated() {
    let model = CompensationModel::from_coefficients(vec![0.0, 0.0, 1.1, 2.0]);
    let plan = BendPlanner::default()
        .plan(&zigzag(), &params(), &model)
        .unwrap();
    for profile in plan.profiles() {
        assert!(profile.is_compensated());
        for (a, ma) in profile.angles.iter().zip(&profile.motor_angles) {
            if a.abs() > 0.05 {
                assert!((ma.abs() - (1.1 * a.abs() + 2.0)).abs() < 1e-9);
                assert_eq!(ma.signum(), a.signum());
            } else {
                assert_eq!(*ma, 0.0);
            }
        }
    }
}

#[test]
fn test_select_next_cycles() {
    let mut plan = BendPlanner::default()
        .plan(&zigzag(), &params(), &CompensationModel::identity())
        .unwrap();
    let start = plan.selected().orientation;
    let mut seen = vec![start];
    for _ in 0..3 {
        seen.push(plan.select_next().orientation);
    }
    assert_eq!(plan.select_next().orientation, start);
    seen.sort_by_key(|o| o.index());
    assert_eq!(seen, Orientation::ALL.to_vec());
}

#[test]
fn test_explicit_selection() {
    let mut plan = BendPlanner::default()
        .plan(&zigzag(), &params(), &CompensationModel::identity())
        .unwrap();
    let profile = plan.select_number(3).unwrap();
    assert_eq!(profile.orientation, Orientation::Reversed);
    assert_eq!(plan.selected().orientation, Orientation::Reversed);
    assert!(matches!(
        plan.select_number(5),
        Err(CamToolError::OrientationOutOfRange(5))
    ));
}

#[test]
fn test_unreachable_die_fails_every_variant() {
    let machine = MachineProfile {
        die_radius_mm: 200.0,
        ..MachineProfile::default()
    };
    let points = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(50.0, 0.0, 0.0),
        Point3::new(50.0, 50.0, 0.0),
    ];
    let err = BendPlanner::new(machine, PreprocessOptions::default())
        .plan(&points, &params(), &CompensationModel::identity())
        .unwrap_err();
    assert!(matches!(err, CamToolError::NoViableOrientation(_)));
}

#[test]
fn test_single_point_is_rejected() {
    let err = BendPlanner::default()
        .plan(
            &[Point3::origin()],
            &params(),
            &CompensationModel::identity(),
        )
        .unwrap_err();
    assert!(matches!(err, CamToolError::Geometry(_)));
}
