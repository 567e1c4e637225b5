use std::sync::Arc;

use nalgebra::Point3;

use crate::auxiliary::center::{Center, MAX_ORBIT_THRESHOLD};
use crate::group::{AbelianPointGroup, AbelianPointGroupKind};

#[test]
fn test_center_from_group_origin() {
    let d2h = Arc::new(AbelianPointGroup::new(AbelianPointGroupKind::D2h));
    let center = Center::from_group(d2h, Point3::origin(), 1e-6);
    assert_eq!(center.ndegen(), 1);
    assert_eq!(center.images(), &[0; 8]);
    assert_eq!(center.center_after_op(7), Some(0));
    assert_eq!(center.center_after_op(8), None);
}

#[test]
fn test_center_from_group_c2v_pair() {
    let c2v = Arc::new(AbelianPointGroup::new(AbelianPointGroupKind::C2v));
    let center = Center::from_group(c2v, Point3::new(0.0, 1.43, -1.1), 1e-6);
    assert_eq!(center.ndegen(), 2);
    assert_eq!(center.position(), &Point3::new(0.0, 1.43, -1.1));
    assert_eq!(center.orbit()[1], Point3::new(0.0, -1.43, -1.1));
    // E, C2(z), σ(xz), σ(yz)
    assert_eq!(center.images(), &[0, 1, 1, 0]);
}

#[test]
fn test_center_from_group_d2h_general_position() {
    let d2h = Arc::new(AbelianPointGroup::new(AbelianPointGroupKind::D2h));
    let center = Center::from_group(d2h, Point3::new(0.5, -0.25, 1.0), 1e-6);
    assert_eq!(center.ndegen(), 8);
    let mut images = center.images().to_vec();
    images.sort_unstable();
    assert_eq!(images, (0..8).collect::<Vec<_>>());

    let on_axis = Center::from_group(
        Arc::clone(center.group()),
        Point3::new(0.0, 0.0, 0.9),
        1e-6,
    );
    assert_eq!(on_axis.ndegen(), 2);
    assert_eq!(on_axis.images(), &[0, 0, 1, 1, 1, 1, 0, 0]);
}

#[test]
fn test_center_from_group_threshold() {
    let cs = Arc::new(AbelianPointGroup::new(AbelianPointGroupKind::Cs));
    let near_plane = Center::from_group(Arc::clone(&cs), Point3::new(1.0, 0.0, 1e-9), 1e-6);
    assert_eq!(near_plane.ndegen(), 1);
    let off_plane = Center::from_group(cs, Point3::new(1.0, 0.0, 1e-3), 1e-6);
    assert_eq!(off_plane.ndegen(), 2);
}

#[test]
fn test_center_from_group_largest_threshold_keeps_distinct_images() {
    let _ = env_logger::builder().is_test(true).try_init();
    let c2v = Arc::new(AbelianPointGroup::new(AbelianPointGroupKind::C2v));
    // The mirror images lie 4e-3 apart, which the largest admissible threshold still separates.
    let center = Center::from_group(c2v, Point3::new(2e-3, 0.0, 1.0), MAX_ORBIT_THRESHOLD);
    assert_eq!(center.ndegen(), 2);
    assert_eq!(center.images(), &[0, 1, 0, 1]);
}

#[test]
fn test_center_new() {
    let c2 = Arc::new(AbelianPointGroup::new(AbelianPointGroupKind::C2));
    let center = Center::new(
        Arc::clone(&c2),
        vec![Point3::new(1.0, 0.0, 0.0), Point3::new(-1.0, 0.0, 0.0)],
        vec![0, 1],
    )
    .unwrap();
    assert_eq!(center.ndegen(), 2);
    assert_eq!(center.center_after_op(1), Some(1));
    assert!(center.to_string().contains("2 image(s) in C2"));

    assert!(Center::new(c2, vec![], vec![0, 0]).is_err());
}
