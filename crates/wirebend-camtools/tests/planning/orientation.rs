//! Orientation variants and canonical mounting

use proptest::prelude::*;
use wirebend_camtools::orientation::{canonicalize, mount, rotate_half_turn};
use wirebend_camtools::{Orientation, OrientationGenerator};
use wirebend_core::{Point3, Polyline};

fn l_shape() -> Polyline {
    Polyline::new(vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(10.0, 0.0, 0.0),
        Point3::new(10.0, 10.0, 0.0),
    ])
    .unwrap()
}

#[test]
fn test_generates_four_variants_in_order() {
    let variants = OrientationGenerator::generate(&l_shape());
    let order: Vec<Orientation> = variants.iter().map(|(o, _)| *o).collect();
    assert_eq!(order, Orientation::ALL.to_vec());
    assert_eq!(variants[0].1, variants[1].1);
    assert_eq!(variants[2].1[0], Point3::new(10.0, 10.0, 0.0));
}

#[test]
fn test_display_numbers_from_one() {
    assert_eq!(Orientation::Identity.to_string(), "Bend Orientation 1");
    assert_eq!(Orientation::ReversedRotated.to_string(), "Bend Orientation 4");
}

#[test]
fn test_mounted_first_segment_on_feed_axis() {
    for (o, points) in OrientationGenerator::generate(&l_shape()) {
        let mounted = mount(&points, o);
        assert!(mounted[0].coords.norm() < 1e-12);
        assert!(mounted[1].x.abs() < 1e-9 && mounted[1].z.abs() < 1e-9);
        assert!((mounted[1].y - 10.0).abs() < 1e-9);
    }
}

proptest! {
    #[test]
    fn reverse_and_half_turn_close(
        coords in prop::collection::vec((-50.0f64..50.0, -50.0f64..50.0, -50.0f64..50.0), 3..10)
    ) {
        let points: Vec<Point3> = coords.iter().map(|&(x, y, z)| Point3::new(x, y, z)).collect();
        prop_assume!(points.windows(2).all(|w| (w[1] - w[0]).norm() > 1e-3));
        let mounted = canonicalize(&points);

        // reverse, half turn, reverse, half turn
        let mut cycled = mounted.clone();
        cycled.reverse();
        rotate_half_turn(&mut cycled);
        cycled.reverse();
        rotate_half_turn(&mut cycled);

        prop_assert_eq!(cycled.len(), mounted.len());
        for (a, b) in cycled.iter().zip(&mounted) {
            prop_assert!((a - b).norm() < 1e-9);
        }
    }
}
