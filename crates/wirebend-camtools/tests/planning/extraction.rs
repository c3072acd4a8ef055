//! Bend extraction on mounted centerlines

use proptest::prelude::*;
use wirebend_camtools::orientation::{mount, Orientation};
use wirebend_camtools::BendExtractor;
use wirebend_core::{MachineEnvelope, MachineProfile, Point3, Polyline};

fn open_machine() -> MachineProfile {
    MachineProfile {
        envelope: MachineEnvelope::empty(),
        ..MachineProfile::default()
    }
}

#[test]
fn test_right_angle_records() {
    let points = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(10.0, 0.0, 0.0),
        Point3::new(10.0, 10.0, 0.0),
    ];
    let mounted = mount(&points, Orientation::Identity);
    let e = BendExtractor::new(open_machine(), 1.0)
        .extract(&mounted)
        .unwrap();

    // h(90°) = 0.5 * π/2 * (2.5 + 0.5)
    let h = 0.75 * std::f64::consts::PI;
    assert_eq!(e.lengths.len(), 2);
    assert!((e.lengths[0] - (10.0 - 2.5 + h)).abs() < 1e-9);
    assert!((e.lengths[1] - (10.0 + 2.5 - h)).abs() < 1e-9);
    assert!((e.lengths[0] - 9.856).abs() < 1e-3);
    assert!((e.lengths[1] - 10.144).abs() < 1e-3);
    assert!((e.angles[0] - 90.0).abs() < 1e-9);
    assert_eq!(e.angles[1], 0.0);
    assert!(e.rotations.iter().all(|r| r.abs() < 1e-9));
    assert_eq!(e.collision_count, 0);
}

#[test]
fn test_empty_envelope_never_collides() {
    let points = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.0, 30.0, 0.0),
        Point3::new(-30.0, 30.0, 0.0),
        Point3::new(-30.0, 0.0, 0.0),
        Point3::new(-30.0, 0.0, -40.0),
    ];
    let e = BendExtractor::new(open_machine(), 2.0)
        .extract(&mount(&points, Orientation::Identity))
        .unwrap();
    assert_eq!(e.collision_count, 0);
}

#[test]
fn test_part_swinging_into_envelope_collides() {
    // A long return leg folds back behind the die
    let points = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.0, 20.0, 0.0),
        Point3::new(20.0, 20.0, 0.0),
        Point3::new(20.0, -200.0, 0.0),
        Point3::new(20.0, -200.0, -60.0),
    ];
    let e = BendExtractor::new(MachineProfile::default(), 1.0)
        .extract(&mount(&points, Orientation::Identity))
        .unwrap();
    assert!(e.collision_count > 0);
}

proptest! {
    #[test]
    fn feed_lengths_sum_to_centerline_length(
        coords in prop::collection::vec((-40.0f64..40.0, -40.0f64..40.0, -40.0f64..40.0), 2..10),
        diameter in 0.5f64..3.2,
    ) {
        let points: Vec<Point3> = coords.iter().map(|&(x, y, z)| Point3::new(x, y, z)).collect();
        prop_assume!(points.windows(2).all(|w| (w[1] - w[0]).norm() > 1e-3));
        let line = Polyline::new(points).unwrap();

        let mounted = mount(line.points(), Orientation::Identity);
        let e = BendExtractor::new(open_machine(), diameter).extract(&mounted).unwrap();
        let total: f64 = e.lengths.iter().sum();
        prop_assert!((total - line.length()).abs() < 1e-6);
        prop_assert_eq!(e.lengths.len(), line.segment_count());
        prop_assert_eq!(e.angles.last().copied(), Some(0.0));
    }
}
