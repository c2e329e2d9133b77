mod constants;
mod constants_config;
mod vector_math;

pub use constants::*;
pub use constants_config::*;
pub use vector_math::*;
