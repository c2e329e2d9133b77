use crate::utils::{cross_product, vector_add, vector_scale};

/// Unit quaternion orienting a collider in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Quaternion {
    /// Creates a new identity quaternion (no rotation)
    pub fn identity() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Creates a quaternion from axis-angle representation
    pub fn from_axis_angle(axis: (f64, f64, f64), angle: f64) -> Self {
        let half_angle = angle / 2.0;
        let sin_half = half_angle.sin();
        let (ax, ay, az) = axis;
        let magnitude = (ax * ax + ay * ay + az * az).sqrt();

        if magnitude < 1e-10 {
            return Quaternion::identity();
        }

        Quaternion {
            w: half_angle.cos(),
            x: ax / magnitude * sin_half,
            y: ay / magnitude * sin_half,
            z: az / magnitude * sin_half,
        }
    }

    pub fn magnitude(&self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Returns a normalized version of the quaternion
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag < 1e-10 {
            return Quaternion::identity();
        }
        Quaternion {
            w: self.w / mag,
            x: self.x / mag,
            y: self.y / mag,
            z: self.z / mag,
        }
    }

    /// Multiplies two quaternions (composition of rotations)
    pub fn multiply(&self, other: &Quaternion) -> Quaternion {
        Quaternion {
            w: self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
            x: self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            y: self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            z: self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
        }
    }

    pub fn conjugate(&self) -> Quaternion {
        Quaternion {
            w: self.w,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    /// Returns the inverse rotation. Non-unit quaternions are normalized first.
    pub fn inverse(&self) -> Quaternion {
        self.normalized().conjugate()
    }

    /// Rotates a point by the (normalized) quaternion
    pub fn rotate_point(&self, point: (f64, f64, f64)) -> (f64, f64, f64) {
        let q = self.normalized();
        let axis = (q.x, q.y, q.z);

        // v' = v + 2w(q x v) + 2 q x (q x v)
        let t = vector_scale(cross_product(axis, point), 2.0);
        vector_add(vector_add(point, vector_scale(t, q.w)), cross_product(axis, t))
    }

    /// Rotates a world-space vector into the local frame
    pub fn inverse_rotate_point(&self, point: (f64, f64, f64)) -> (f64, f64, f64) {
        self.inverse().rotate_point(point)
    }
}
