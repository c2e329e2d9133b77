use std::fmt;
use log::{debug, trace, warn};
use crate::interactions::EpaPolytope;
use crate::models::{minkowski_support, SupportMap, TerminalSimplex};
use crate::utils::{barycentric_blend, closest_point_barycentric, dot_product, vector_add, vector_scale, EpaConfig};

/// How an EPA run ended. Every status comes with a usable result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EpaStatus {
    /// The support point stopped moving past the closest face.
    Success,
    /// A polytope array filled up; the result is the best face found before that.
    OutOfMemory,
    /// The iteration budget ran out before the gap closed.
    MaxNumIterationsReached,
}

impl EpaStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, EpaStatus::Success)
    }
}

impl fmt::Display for EpaStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EpaStatus::Success => write!(f, "Success"),
            EpaStatus::OutOfMemory => write!(f, "Out of memory"),
            EpaStatus::MaxNumIterationsReached => write!(f, "Max num iterations reached"),
        }
    }
}

/// Penetration information produced by EPA
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpaResult {
    /// Midpoint of the two surface points
    pub point: (f64, f64, f64),
    /// Unit normal of the closest Minkowski face, pointing from shape A toward shape B.
    /// Moving B by `normal * penetration_depth` separates the shapes.
    pub normal: (f64, f64, f64),
    pub penetration_depth: f64,
    /// Contact point on shape A
    pub point_a: (f64, f64, f64),
    /// Contact point on shape B
    pub point_b: (f64, f64, f64),
    /// Barycentric weights of the contact on the terminal face
    pub barycentric: (f64, f64, f64),
    pub num_iterations: u32,
}

/// EPA (Expanding Polytope Algorithm) for finding contact information
///
/// Expands the GJK tetrahedron `simplex` toward the boundary of the Minkowski difference
/// `shape_a - shape_b` until the face closest to the origin stops moving by more than
/// `config.convergence_tolerance`.
///
/// Regardless of the status, the returned result is the best approximation found. The caller
/// decides whether a non-success contact is good enough.
///
/// # Arguments
/// * `simplex` - Terminal GJK simplex; it must enclose the origin
/// * `shape_a` - First shape
/// * `shape_b` - Second shape
/// * `config` - Iteration budget, convergence tolerance and polytope capacity
#[must_use]
pub fn epa_collision_info<A, B>(
    simplex: &TerminalSimplex,
    shape_a: &A,
    shape_b: &B,
    config: &EpaConfig
) -> (EpaStatus, EpaResult)
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    let mut polytope = EpaPolytope::from_tetrahedron(simplex, config.capacity);

    let mut closest = 0;
    let mut num_iterations = 0;
    let mut status = EpaStatus::MaxNumIterationsReached;

    for iteration in 0..config.max_iterations {
        // The seed topology is closed, so an empty boundary means the input was malformed
        let Some(index) = polytope.find_triangle_closest_to_origin() else {
            warn!("EPA polytope has no active faces after {} iterations", iteration);
            break;
        };
        closest = index;
        num_iterations = iteration + 1;

        let triangle = *polytope.triangle(closest);
        let new_point = minkowski_support(shape_a, shape_b, triangle.normal);

        let support_distance = dot_product(new_point.minkowski, triangle.normal);
        let gap = support_distance - triangle.distance_to_origin;
        trace!(
            "EPA iteration {}: face {} at distance {}, gap {}",
            iteration, closest, triangle.distance_to_origin, gap
        );

        if gap < config.convergence_tolerance {
            status = EpaStatus::Success;
            break;
        }

        if !polytope.add_new_point_and_update(new_point, closest) {
            warn!(
                "EPA out of memory after {} iterations ({} points, {} triangles, {} edges, capacity {})",
                num_iterations,
                polytope.num_points(),
                polytope.num_triangles(),
                polytope.num_edges(),
                polytope.capacity()
            );
            status = EpaStatus::OutOfMemory;
            break;
        }
    }

    let result = extract_contact(&polytope, closest, num_iterations);
    debug!(
        "EPA finished: {} after {} iterations, depth {}",
        status, num_iterations, result.penetration_depth
    );
    (status, result)
}

/// Builds the contact from a polytope face.
///
/// The face's closest point to the origin, `normal * distance`, is expressed in barycentric
/// coordinates of the face's Minkowski points. The same weights blend each shape's surface points.
///
/// On flat shapes several faces can tie for the minimum distance and the projection may fall
/// into a neighbouring face. The weights are then those of the nearest point on this face's
/// boundary, so they stay in [0, 1] and the contact points stay on the shapes.
pub fn extract_contact(polytope: &EpaPolytope, triangle_index: u16, num_iterations: u32) -> EpaResult {
    let triangle = polytope.triangle(triangle_index);

    let a = polytope.point(triangle.a);
    let b = polytope.point(triangle.b);
    let c = polytope.point(triangle.c);

    let closest_to_origin = vector_scale(triangle.normal, triangle.distance_to_origin);
    let barycentric = closest_point_barycentric(a.minkowski, b.minkowski, c.minkowski, closest_to_origin);

    let point_a = barycentric_blend(barycentric, a.point_a, b.point_a, c.point_a);
    let point_b = barycentric_blend(barycentric, a.point_b, b.point_b, c.point_b);

    EpaResult {
        point: vector_scale(vector_add(point_a, point_b), 0.5),
        normal: triangle.normal,
        penetration_depth: triangle.distance_to_origin,
        point_a,
        point_b,
        barycentric,
        num_iterations,
    }
}
