mod epa_polytope;
mod epa_collision_3d;
mod gjk_collision_3d;
mod narrow_phase;

pub use epa_polytope::*;
pub use epa_collision_3d::*;
pub use gjk_collision_3d::*;
pub use narrow_phase::*;

#[cfg(test)]
mod gjk_collision_3d_tests;
#[cfg(test)]
mod narrow_phase_tests;
