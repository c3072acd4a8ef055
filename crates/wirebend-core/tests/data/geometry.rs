use proptest::prelude::*;
use wirebend_core::{GeometryError, MachineEnvelope, MachineProfile, Point3, Polyline};

#[test]
fn test_polyline_needs_two_points() {
    assert!(matches!(
        Polyline::new(vec![]),
        Err(GeometryError::TooFewPoints { actual: 0, .. })
    ));
}

#[test]
fn test_default_machine_matches_tooling() {
    let machine = MachineProfile::default();
    assert_eq!(machine.die_radius_mm, 2.5);
    assert_eq!(machine.bend_pin_diameter_mm, 6.0);
    assert_eq!(machine.envelope, MachineEnvelope::default());
    assert!(machine.envelope.is_valid());
}

#[test]
fn test_envelope_display() {
    let envelope = MachineEnvelope::new((-1.0, 1.0), (-2.0, 2.0), (-3.0, 3.0));
    assert_eq!(
        envelope.to_string(),
        "X(-1.0..1.0) Y(-2.0..2.0) Z(-3.0..3.0)"
    );
}

proptest! {
    #[test]
    fn reversing_preserves_length(
        coords in prop::collection::vec((-50.0f64..50.0, -50.0f64..50.0, -50.0f64..50.0), 2..12)
    ) {
        let points: Vec<Point3> = coords.iter().map(|&(x, y, z)| Point3::new(x, y, z)).collect();
        if let Ok(line) = Polyline::new(points) {
            prop_assert!((line.length() - line.reversed().length()).abs() < 1e-9);
            prop_assert_eq!(line.reversed().reversed(), line);
        }
    }
}
