use std::fmt;
use std::error::Error;

/// Represents errors that can occur while building collision inputs.
///
/// The EPA loop itself never fails with an error; it reports an `EpaStatus` alongside a
/// best-effort result instead.
#[derive(Debug, Clone, PartialEq)]
pub enum CollisionError {
    /// Indicates a negative, zero or non-finite shape dimension.
    InvalidDimension,
    /// Indicates a convex hull without any vertices.
    EmptyHull,
    /// Indicates an out-of-range EPA or GJK setting.
    InvalidConfig(String),
    /// Indicates that the polytope adjacency tables are inconsistent.
    TopologyViolation(String),
}

impl fmt::Display for CollisionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CollisionError::InvalidDimension => write!(f, "Invalid shape dimension"),
            CollisionError::EmptyHull => write!(f, "Convex hull has no vertices"),
            CollisionError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            CollisionError::TopologyViolation(msg) => write!(f, "Topology violation: {}", msg),
        }
    }
}

impl Error for CollisionError {}
