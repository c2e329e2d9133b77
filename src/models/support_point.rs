use crate::utils::{negate_vector, vector_sub};

/// Anything that can report its farthest point along a direction.
///
/// Implementations must be pure: GJK and EPA call them repeatedly, and independent shape
/// pairs may be queried from different threads at the same time.
pub trait SupportMap {
    /// Farthest world-space point along `direction`. The direction does not need to be
    /// normalized, but it is never the zero vector when called from GJK or EPA.
    fn support_point(&self, direction: (f64, f64, f64)) -> (f64, f64, f64);
}

impl<T: SupportMap + ?Sized> SupportMap for &T {
    fn support_point(&self, direction: (f64, f64, f64)) -> (f64, f64, f64) {
        (**self).support_point(direction)
    }
}

/// support point (for use with GJK and EPA)
///
/// `minkowski` is a point of the Minkowski difference A - B, `point_a` and `point_b` are
/// the surface points on each shape that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SupportPoint {
    pub minkowski: (f64, f64, f64),
    pub point_a: (f64, f64, f64),
    pub point_b: (f64, f64, f64),
}

impl SupportPoint {
    pub fn new(point_a: (f64, f64, f64), point_b: (f64, f64, f64)) -> Self {
        Self {
            minkowski: vector_sub(point_a, point_b),
            point_a,
            point_b,
        }
    }
}

/// Get the support point for Minkowski difference (shape_a - shape_b)
pub fn minkowski_support<A, B>(shape_a: &A, shape_b: &B, direction: (f64, f64, f64)) -> SupportPoint
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    // Furthest point of shape_a along the direction, furthest point of shape_b against it
    let point_a = shape_a.support_point(direction);
    let point_b = shape_b.support_point(negate_vector(direction));
    SupportPoint::new(point_a, point_b)
}
