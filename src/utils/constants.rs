use crate::utils::EpaConfig;

/// Storage size of every polytope array (points, triangles and edges).
pub const EPA_MAX_CAPACITY: usize = 1024;

/// The seed tetrahedron needs 4 points, 4 triangles and 6 edges.
pub const EPA_MIN_CAPACITY: usize = 6;

pub const EPA_DEFAULT_MAX_ITERATIONS: u32 = 20;

/// Gap between the support distance and the closest face distance below which EPA stops.
pub const EPA_CONVERGENCE_TOLERANCE: f64 = 0.01;

/// A face counts as visible from a point only if the point is further than this beyond its plane.
pub const EPA_VISIBILITY_EPSILON: f64 = 1e-9;

pub const GJK_MAX_ITERATIONS: u32 = 64;

/// Distance tolerance for the tetrahedron face tests in GJK.
pub const GJK_EPSILON: f64 = 1e-10;

pub const DEFAULT_EPA_CONFIG: EpaConfig = EpaConfig {
    max_iterations: EPA_DEFAULT_MAX_ITERATIONS,
    convergence_tolerance: EPA_CONVERGENCE_TOLERANCE,
    capacity: EPA_MAX_CAPACITY,
};
