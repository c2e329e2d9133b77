use std::hint::black_box;
use criterion::{Criterion, criterion_group, criterion_main};
use log::debug;
use rs_epa::interactions::{collide_pairs, epa_collision_info, gjk_intersection};
use rs_epa::models::{Collider, Quaternion};
use rs_epa::utils::{EpaConfig, GJK_MAX_ITERATIONS};

pub fn bench_single_pair(c: &mut Criterion) {
    let mut group = c.benchmark_group("epa_single_pair");
    group.measurement_time(std::time::Duration::from_secs(5));
    group.sample_size(100);

    let cube = Collider::aabb((1.0, 1.0, 1.0), (0.0, 0.0, 0.0)).unwrap();
    let sphere = Collider::sphere(0.5, (1.2, 0.3, 0.0)).unwrap();
    let tilted = Collider::obb(
        (0.5, 0.5, 0.5),
        (0.0, 0.0, 1.4),
        Quaternion::from_axis_angle((1.0, 1.0, 0.0), 0.4),
    ).unwrap();

    let config = EpaConfig::default().with_max_iterations(64);

    for (name, other) in [("box_sphere", &sphere), ("box_box", &tilted)] {
        let simplex = gjk_intersection(&cube, other, (-1.0, 0.0, 0.0), GJK_MAX_ITERATIONS).unwrap();
        let (status, result) = epa_collision_info(&simplex, &cube, other, &config);
        debug!("{}: {} after {} iterations", name, status, result.num_iterations);

        group.bench_function(name, |b| b.iter(|| {
            epa_collision_info(black_box(&simplex), &cube, other, &config)
        }));
    }

    group.finish();
}

pub fn bench_collide_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("narrow_phase");
    group.sample_size(20);

    // A loose grid of unit spheres, each overlapping its right and upper neighbour
    let side = 32;
    let colliders: Vec<Collider> = (0..side * side)
        .map(|i| Collider::sphere(1.0, ((i % side) as f64 * 1.8, (i / side) as f64 * 1.8, 0.0)).unwrap())
        .collect();
    let pairs: Vec<(usize, usize)> = (0..side * side)
        .flat_map(|i| {
            let right = if i % side + 1 < side { Some((i, i + 1)) } else { None };
            let up = if i + side < side * side { Some((i, i + side)) } else { None };
            right.into_iter().chain(up)
        })
        .collect();
    let config = EpaConfig::default().with_max_iterations(64);

    group.bench_function("sphere_grid", |b| b.iter(|| {
        collide_pairs(black_box(&colliders), &pairs, &config)
    }));

    group.finish();
}

criterion_group!(benches, bench_single_pair, bench_collide_pairs);
criterion_main!(benches);
