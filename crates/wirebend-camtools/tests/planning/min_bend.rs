//! Minimum bend distance and vertex filtering

use proptest::prelude::*;
use wirebend_camtools::MinBendDistanceSolver;
use wirebend_core::{BendParameters, MachineProfile, PinPosition, Point3};

fn solver(diameter: f64, pin: PinPosition) -> MinBendDistanceSolver {
    let params = BendParameters::new(None, diameter, pin, "test.csv");
    MinBendDistanceSolver::new(MachineProfile::default(), &params)
}

#[test]
fn test_close_vertex_is_deleted() {
    let s = solver(1.0, PinPosition::Pin16_5);
    let mut points = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(20.0, 0.0, 0.0),
        Point3::new(20.0, 3.0, 0.0),
        Point3::new(20.0, 3.0, 20.0),
    ];
    let outcome = s.filter(&mut points).unwrap();
    assert_eq!(outcome.deleted_vertices, 1);
    assert_eq!(outcome.tail_extension_mm, None);
    assert_eq!(
        points,
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(20.0, 0.0, 0.0),
            Point3::new(20.0, 3.0, 20.0),
        ]
    );
}

#[test]
fn test_right_angle_minimum_for_large_pin() {
    // Contact at (7.3, -sqrt(16.5² - 7.3²)), tangent point (4.3, -3)
    let s = solver(1.0, PinPosition::Pin16_5);
    let minimum = s.minimum_distance(std::f64::consts::FRAC_PI_2).unwrap();
    assert!((minimum - 16.88).abs() < 0.01, "{minimum}");
}

#[test]
fn test_spaced_vertices_survive() {
    let s = solver(1.0, PinPosition::Pin12);
    let mut points = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(40.0, 0.0, 0.0),
        Point3::new(40.0, 40.0, 0.0),
        Point3::new(0.0, 40.0, 0.0),
    ];
    let before = points.clone();
    let outcome = s.filter(&mut points).unwrap();
    assert_eq!(outcome.deleted_vertices, 0);
    assert_eq!(points, before);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn contact_satisfies_both_equations(
        angle_deg in 5.0f64..175.0,
        diameter in 0.5f64..3.2,
        pin in prop::sample::select(vec![PinPosition::Pin12, PinPosition::Pin16_5, PinPosition::Pin27_5]),
    ) {
        let s = solver(diameter, pin);
        let contact = s.solve_contact(angle_deg.to_radians()).unwrap();
        prop_assert!(contact.residual < 1e-6);
        prop_assert!((contact.line.signed_distance(&contact.point).abs() - 3.0).abs() < 1e-6);
        prop_assert!((contact.point.coords.norm() - pin.mm()).abs() < 1e-6);
    }
}
