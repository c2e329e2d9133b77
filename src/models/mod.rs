mod shape_3d;
mod quaternion;
mod simplex;
mod support_point;

pub use shape_3d::*;
pub use quaternion::*;
pub use simplex::*;
pub use support_point::*;

#[cfg(test)]
mod shape_3d_tests;
#[cfg(test)]
mod quaternion_tests;
