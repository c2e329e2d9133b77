use std::f64::consts::PI;
use approx::assert_abs_diff_eq;
use crate::models::{minkowski_support, Collider, ConvexShape, Quaternion, SupportMap};
use crate::errors::CollisionError;

#[test]
fn test_sphere_support_point() {
    let sphere = ConvexShape::new_sphere(2.0).unwrap();

    let support = sphere.support_point((0.0, 0.0, -5.0));
    assert_abs_diff_eq!(support.0, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(support.1, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(support.2, -2.0, epsilon = 1e-12);
}

#[test]
fn test_capsule_support_point() {
    let capsule = ConvexShape::new_capsule(1.0, 0.5).unwrap();

    // Straight up reaches the top of the upper cap
    let top = capsule.support_point((0.0, 1.0, 0.0));
    assert_abs_diff_eq!(top.1, 1.5, epsilon = 1e-12);

    // Sideways and slightly down picks the lower hemisphere
    let side = capsule.support_point((1.0, -1e-3, 0.0));
    assert!(side.1 < -0.99, "Expected lower segment end, got {:?}", side);
    assert_abs_diff_eq!(side.0, 0.5, epsilon = 1e-5);
}

#[test]
fn test_cylinder_support_point() {
    let cylinder = ConvexShape::new_cylinder(1.0, 0.5).unwrap();

    let rim = cylinder.support_point((1.0, 1.0, 0.0));
    assert_eq!(rim, (0.5, 1.0, 0.0));

    let cap = cylinder.support_point((0.0, -3.0, 0.0));
    assert_eq!(cap, (0.0, -1.0, 0.0));
}

#[test]
fn test_cuboid_support_point() {
    let cuboid = ConvexShape::new_cuboid((1.0, 2.0, 3.0)).unwrap();
    assert_eq!(cuboid.support_point((0.2, -0.1, 5.0)), (1.0, -2.0, 3.0));
}

#[test]
fn test_hull_support_point() {
    let hull = ConvexShape::new_hull(vec![
        (0.0, 0.0, 0.0),
        (1.0, 0.0, 0.0),
        (0.0, 1.0, 0.0),
        (0.0, 0.0, 1.0),
        (0.1, 0.1, 0.1),
    ]).unwrap();

    assert_eq!(hull.support_point((0.0, 1.0, 0.1)), (0.0, 1.0, 0.0));
    assert_eq!(hull.support_point((-1.0, -1.0, -1.0)), (0.0, 0.0, 0.0));
}

#[test]
fn test_invalid_shapes_are_rejected() {
    assert_eq!(ConvexShape::new_sphere(0.0), Err(CollisionError::InvalidDimension));
    assert_eq!(ConvexShape::new_sphere(f64::INFINITY), Err(CollisionError::InvalidDimension));
    assert_eq!(ConvexShape::new_capsule(-1.0, 1.0), Err(CollisionError::InvalidDimension));
    assert_eq!(ConvexShape::new_cylinder(1.0, -0.5), Err(CollisionError::InvalidDimension));
    assert_eq!(ConvexShape::new_cuboid((1.0, 0.0, 1.0)), Err(CollisionError::InvalidDimension));
    assert_eq!(ConvexShape::new_hull(Vec::new()), Err(CollisionError::EmptyHull));

    // A capsule without a segment is still valid
    assert!(ConvexShape::new_capsule(0.0, 1.0).is_ok());
}

#[test]
fn test_collider_applies_position_and_orientation() {
    // Box long along local x, turned 90 degrees about z so it is long along world y
    let orientation = Quaternion::from_axis_angle((0.0, 0.0, 1.0), PI / 2.0);
    let collider = Collider::obb((2.0, 0.5, 0.5), (10.0, 0.0, 0.0), orientation).unwrap();

    let up = collider.support_point((0.0, 1.0, 0.0));
    assert_abs_diff_eq!(up.1, 2.0, epsilon = 1e-9);

    let right = collider.support_point((1.0, 0.0, 0.0));
    assert_abs_diff_eq!(right.0, 10.5, epsilon = 1e-9);
}

#[test]
fn test_minkowski_support_combines_both_shapes() {
    let a = Collider::sphere(1.0, (0.0, 0.0, 0.0)).unwrap();
    let b = Collider::sphere(1.0, (1.5, 0.0, 0.0)).unwrap();

    let support = minkowski_support(&a, &b, (1.0, 0.0, 0.0));
    assert_abs_diff_eq!(support.point_a.0, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(support.point_b.0, 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(support.minkowski.0, 0.5, epsilon = 1e-12);
}
