use approx::assert_abs_diff_eq;
use crate::interactions::{collide, collide_pairs, EpaStatus};
use crate::models::{Collider, Quaternion};
use crate::utils::EpaConfig;

fn scene() -> Vec<Collider> {
    vec![
        Collider::aabb((1.0, 1.0, 1.0), (0.0, 0.0, 0.0)).unwrap(),
        Collider::sphere(0.5, (1.3, 0.0, 0.0)).unwrap(),
        Collider::sphere(0.5, (0.0, 5.0, 0.0)).unwrap(),
        Collider::obb(
            (0.5, 0.5, 0.5),
            (0.0, 0.0, 1.6),
            Quaternion::from_axis_angle((1.0, 1.0, 0.0), 0.3),
        ).unwrap(),
    ]
}

#[test]
fn test_collide_reports_penetration() {
    let _ = env_logger::builder().is_test(true).try_init();
    let colliders = scene();

    let contact = collide(&colliders[0], &colliders[1], &EpaConfig::default())
        .expect("Sphere overlaps the box face");
    assert_eq!(contact.status, EpaStatus::Success);

    // Sphere surface at x = 0.8 sits 0.2 inside the x = 1 face
    assert_abs_diff_eq!(contact.result.penetration_depth, 0.2, epsilon = 0.01);
    assert!(contact.result.normal.0 > 0.99);
}

#[test]
fn test_collide_separated() {
    let colliders = scene();
    assert!(collide(&colliders[0], &colliders[2], &EpaConfig::default()).is_none());
    assert!(collide(&colliders[1], &colliders[2], &EpaConfig::default()).is_none());
}

#[test]
fn test_collide_pairs_matches_sequential() {
    let _ = env_logger::builder().is_test(true).try_init();
    let colliders = scene();
    let config = EpaConfig::default();

    let pairs: Vec<(usize, usize)> = (0..colliders.len())
        .flat_map(|i| (i + 1..colliders.len()).map(move |j| (i, j)))
        .collect();

    let parallel = collide_pairs(&colliders, &pairs, &config);
    assert_eq!(parallel.len(), pairs.len());

    for (contact, &(i, j)) in parallel.iter().zip(pairs.iter()) {
        let sequential = collide(&colliders[i], &colliders[j], &config);
        assert_eq!(*contact, sequential, "Pair ({}, {}) differs", i, j);
    }

    // Box against the tilted box resting on it
    let box_pair = pairs.iter().position(|&pair| pair == (0, 3)).unwrap();
    assert!(parallel[box_pair].is_some());
}

#[test]
fn test_collide_pairs_skips_unknown_indices() {
    let colliders = scene();
    let results = collide_pairs(&colliders, &[(0, 1), (0, 42), (7, 1)], &EpaConfig::default());

    assert!(results[0].is_some());
    assert!(results[1].is_none());
    assert!(results[2].is_none());
}
