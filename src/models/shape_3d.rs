use crate::models::{Quaternion, SupportMap};
use crate::errors::CollisionError;
use crate::utils::{dot_product, normalize_vector, vector_add, vector_scale};

/// Convex shapes supported by the narrow phase, described in their local frame
/// (centered on the origin, symmetry axis along local y).
#[derive(Debug, Clone, PartialEq)]
pub enum ConvexShape {
    Sphere { radius: f64 },
    /// Segment from (0, -half_height, 0) to (0, half_height, 0) swept by a sphere
    Capsule { half_height: f64, radius: f64 },
    Cylinder { half_height: f64, radius: f64 },
    /// Box with half extents (x, y, z)
    Cuboid { half_extents: (f64, f64, f64) },
    /// Convex hull of a point cloud; the points do not have to be on the hull
    Hull { vertices: Vec<(f64, f64, f64)> },
}

fn check_dimension(value: f64) -> Result<f64, CollisionError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CollisionError::InvalidDimension)
    }
}

impl ConvexShape {
    pub fn new_sphere(radius: f64) -> Result<Self, CollisionError> {
        Ok(ConvexShape::Sphere { radius: check_dimension(radius)? })
    }

    /// A capsule whose segment has length `2 * half_height`. A zero half height is a sphere.
    pub fn new_capsule(half_height: f64, radius: f64) -> Result<Self, CollisionError> {
        if !half_height.is_finite() || half_height < 0.0 {
            return Err(CollisionError::InvalidDimension);
        }
        Ok(ConvexShape::Capsule { half_height, radius: check_dimension(radius)? })
    }

    pub fn new_cylinder(half_height: f64, radius: f64) -> Result<Self, CollisionError> {
        Ok(ConvexShape::Cylinder {
            half_height: check_dimension(half_height)?,
            radius: check_dimension(radius)?,
        })
    }

    pub fn new_cuboid(half_extents: (f64, f64, f64)) -> Result<Self, CollisionError> {
        Ok(ConvexShape::Cuboid {
            half_extents: (
                check_dimension(half_extents.0)?,
                check_dimension(half_extents.1)?,
                check_dimension(half_extents.2)?,
            ),
        })
    }

    pub fn new_hull(vertices: Vec<(f64, f64, f64)>) -> Result<Self, CollisionError> {
        if vertices.is_empty() {
            return Err(CollisionError::EmptyHull);
        }
        if vertices.iter().any(|v| !(v.0.is_finite() && v.1.is_finite() && v.2.is_finite())) {
            return Err(CollisionError::InvalidDimension);
        }
        Ok(ConvexShape::Hull { vertices })
    }

    pub fn name(&self) -> &'static str {
        match self {
            ConvexShape::Sphere { .. } => "Sphere",
            ConvexShape::Capsule { .. } => "Capsule",
            ConvexShape::Cylinder { .. } => "Cylinder",
            ConvexShape::Cuboid { .. } => "Cuboid",
            ConvexShape::Hull { .. } => "Hull",
        }
    }
}

impl SupportMap for ConvexShape {
    fn support_point(&self, direction: (f64, f64, f64)) -> (f64, f64, f64) {
        match self {
            ConvexShape::Sphere { radius } => vector_scale(normalize_vector(direction), *radius),
            ConvexShape::Capsule { half_height, radius } => {
                let tip = (0.0, if direction.1 >= 0.0 { *half_height } else { -half_height }, 0.0);
                vector_add(tip, vector_scale(normalize_vector(direction), *radius))
            },
            ConvexShape::Cylinder { half_height, radius } => {
                let radial = (direction.0 * direction.0 + direction.2 * direction.2).sqrt();
                let y = if direction.1 >= 0.0 { *half_height } else { -half_height };
                if radial > 1e-12 {
                    (direction.0 / radial * radius, y, direction.2 / radial * radius)
                } else {
                    // Pointing along the axis, any point of the cap disk is a valid answer
                    (0.0, y, 0.0)
                }
            },
            ConvexShape::Cuboid { half_extents } => (
                if direction.0 >= 0.0 { half_extents.0 } else { -half_extents.0 },
                if direction.1 >= 0.0 { half_extents.1 } else { -half_extents.1 },
                if direction.2 >= 0.0 { half_extents.2 } else { -half_extents.2 },
            ),
            ConvexShape::Hull { vertices } => {
                let mut best = (0.0, 0.0, 0.0);
                let mut best_dot = f64::NEG_INFINITY;
                for &vertex in vertices {
                    let d = dot_product(vertex, direction);
                    if d > best_dot {
                        best_dot = d;
                        best = vertex;
                    }
                }
                best
            },
        }
    }
}

/// A convex shape placed in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    pub shape: ConvexShape,
    pub position: (f64, f64, f64),
    pub orientation: Quaternion,
}

impl Collider {
    pub fn new(shape: ConvexShape, position: (f64, f64, f64), orientation: Quaternion) -> Self {
        Self { shape, position, orientation }
    }

    pub fn sphere(radius: f64, position: (f64, f64, f64)) -> Result<Self, CollisionError> {
        Ok(Self::new(ConvexShape::new_sphere(radius)?, position, Quaternion::identity()))
    }

    /// Axis-aligned box centered at `position`
    pub fn aabb(half_extents: (f64, f64, f64), position: (f64, f64, f64)) -> Result<Self, CollisionError> {
        Ok(Self::new(ConvexShape::new_cuboid(half_extents)?, position, Quaternion::identity()))
    }

    /// Oriented box centered at `position`
    pub fn obb(
        half_extents: (f64, f64, f64),
        position: (f64, f64, f64),
        orientation: Quaternion
    ) -> Result<Self, CollisionError> {
        Ok(Self::new(ConvexShape::new_cuboid(half_extents)?, position, orientation))
    }
}

impl SupportMap for Collider {
    fn support_point(&self, direction: (f64, f64, f64)) -> (f64, f64, f64) {
        // Query in the shape's local frame, then bring the answer back to world space
        let local_direction = self.orientation.inverse_rotate_point(direction);
        let local_support = self.shape.support_point(local_direction);
        vector_add(self.position, self.orientation.rotate_point(local_support))
    }
}
