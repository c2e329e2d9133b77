use std::f64::consts::PI;
use approx::assert_abs_diff_eq;
use crate::models::Quaternion;

#[test]
fn test_identity_leaves_points_unchanged() {
    let p = (1.0, -2.0, 3.5);
    assert_eq!(Quaternion::identity().rotate_point(p), p);
}

#[test]
fn test_rotate_point_about_z() {
    let q = Quaternion::from_axis_angle((0.0, 0.0, 1.0), PI / 2.0);
    let rotated = q.rotate_point((1.0, 0.0, 0.0));

    assert_abs_diff_eq!(rotated.0, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(rotated.1, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(rotated.2, 0.0, epsilon = 1e-12);
}

#[test]
fn test_inverse_rotation_round_trips() {
    let q = Quaternion::from_axis_angle((1.0, 2.0, -0.5), 0.7);
    let p = (0.3, -1.2, 4.0);
    let back = q.inverse_rotate_point(q.rotate_point(p));

    assert_abs_diff_eq!(back.0, p.0, epsilon = 1e-12);
    assert_abs_diff_eq!(back.1, p.1, epsilon = 1e-12);
    assert_abs_diff_eq!(back.2, p.2, epsilon = 1e-12);
}

#[test]
fn test_non_unit_quaternion_is_normalized() {
    let q = Quaternion { w: 2.0, x: 0.0, y: 0.0, z: 0.0 };
    assert_abs_diff_eq!(q.normalized().magnitude(), 1.0, epsilon = 1e-12);

    let rotated = q.rotate_point((1.0, 1.0, 1.0));
    assert_abs_diff_eq!(rotated.0, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(rotated.1, 1.0, epsilon = 1e-12);
}

#[test]
fn test_multiply_composes_rotations() {
    let quarter = Quaternion::from_axis_angle((0.0, 0.0, 1.0), PI / 4.0);
    let half = quarter.multiply(&quarter);
    let rotated = half.rotate_point((1.0, 0.0, 0.0));

    assert_abs_diff_eq!(rotated.0, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(rotated.1, 1.0, epsilon = 1e-12);

    let undone = half.multiply(&half.inverse());
    assert_abs_diff_eq!(undone.w, 1.0, epsilon = 1e-12);
}
