use std::f64::consts::PI;
use crate::interactions::gjk_intersection;
use crate::models::{Collider, ConvexShape, Quaternion, TerminalSimplex};
use crate::utils::{cross_product, dot_product, vector_sub, GJK_MAX_ITERATIONS};

/// Every face plane of the tetrahedron must have the origin on the same side as the opposite vertex.
fn encloses_origin(simplex: &TerminalSimplex) -> bool {
    let p: Vec<(f64, f64, f64)> = simplex.points.iter().map(|s| s.minkowski).collect();
    let faces = [(0, 1, 2, 3), (0, 1, 3, 2), (0, 2, 3, 1), (1, 2, 3, 0)];

    faces.iter().all(|&(i, j, k, l)| {
        let normal = cross_product(vector_sub(p[j], p[i]), vector_sub(p[k], p[i]));
        let opposite = dot_product(normal, vector_sub(p[l], p[i]));
        let origin = dot_product(normal, vector_sub((0.0, 0.0, 0.0), p[i]));
        origin * opposite >= -1e-9
    })
}

fn intersect(a: &Collider, b: &Collider) -> Option<TerminalSimplex> {
    gjk_intersection(a, b, vector_sub(a.position, b.position), GJK_MAX_ITERATIONS)
}

#[test]
fn test_overlapping_spheres() {
    let a = Collider::sphere(1.0, (0.0, 0.0, 0.0)).unwrap();
    let b = Collider::sphere(1.0, (1.5, 0.0, 0.0)).unwrap();

    let simplex = intersect(&a, &b).expect("Spheres overlap by 0.5");
    assert!(encloses_origin(&simplex));
}

#[test]
fn test_separated_spheres() {
    let a = Collider::sphere(1.0, (0.0, 0.0, 0.0)).unwrap();
    let b = Collider::sphere(1.0, (3.0, 0.5, 0.0)).unwrap();
    assert!(intersect(&a, &b).is_none());
}

#[test]
fn test_concentric_shapes() {
    // Zero center difference falls back to a fixed search direction
    let a = Collider::aabb((1.0, 1.0, 1.0), (0.0, 0.0, 0.0)).unwrap();
    let b = Collider::sphere(0.5, (0.0, 0.0, 0.0)).unwrap();

    let simplex = intersect(&a, &b).expect("Concentric shapes overlap");
    assert!(encloses_origin(&simplex));
}

#[test]
fn test_rotated_boxes() {
    let orientation = Quaternion::from_axis_angle((0.0, 0.0, 1.0), PI / 4.0);
    let a = Collider::aabb((1.0, 1.0, 1.0), (0.0, 0.0, 0.0)).unwrap();

    // The corner of the turned box reaches sqrt(2) toward A
    let near = Collider::obb((1.0, 1.0, 1.0), (2.3, 0.0, 0.0), orientation).unwrap();
    let simplex = intersect(&a, &near).expect("Rotated corner reaches into A");
    assert!(encloses_origin(&simplex));

    let far = Collider::obb((1.0, 1.0, 1.0), (2.5, 0.0, 0.0), orientation).unwrap();
    assert!(intersect(&a, &far).is_none());
}

#[test]
fn test_hull_against_capsule() {
    let hull = ConvexShape::new_hull(vec![
        (-1.0, -1.0, -1.0),
        (1.0, -1.0, -1.0),
        (0.0, 1.0, -1.0),
        (0.0, 0.0, 1.0),
    ]).unwrap();
    let a = Collider::new(hull, (0.0, 0.0, 0.0), Quaternion::identity());

    let capsule = ConvexShape::new_capsule(1.0, 0.25).unwrap();
    let touching = Collider::new(capsule.clone(), (0.0, 0.0, 1.1), Quaternion::identity());
    let away = Collider::new(capsule, (5.0, 0.0, 0.0), Quaternion::identity());

    let simplex = intersect(&a, &touching).expect("Capsule end dips into the hull apex");
    assert!(encloses_origin(&simplex));
    assert!(intersect(&a, &away).is_none());
}

#[test]
fn test_zero_iterations_gives_up() {
    let a = Collider::sphere(1.0, (0.0, 0.0, 0.0)).unwrap();
    let b = Collider::sphere(1.0, (0.5, 0.0, 0.0)).unwrap();
    assert!(gjk_intersection(&a, &b, (1.0, 0.0, 0.0), 0).is_none());
}
