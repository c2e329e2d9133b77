// src/utils/constants_config.rs
use crate::errors::CollisionError;
use crate::utils::{
    DEFAULT_EPA_CONFIG,
    EPA_MAX_CAPACITY,
    EPA_MIN_CAPACITY,
};

/// Tunables for one EPA invocation.
///
/// The defaults match the fixed constants of the engine this was built for: 20 iterations,
/// a 0.01 convergence gap and 1024 slots per polytope array. Neither value is scaled by shape
/// size, callers working at very different scales should pick their own tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpaConfig {
    pub max_iterations: u32,
    pub convergence_tolerance: f64,
    /// Slots usable in each polytope array, at most `EPA_MAX_CAPACITY`.
    pub capacity: usize,
}

impl Default for EpaConfig {
    fn default() -> Self {
        DEFAULT_EPA_CONFIG
    }
}

impl EpaConfig {
    pub fn new(
        max_iterations: Option<u32>,
        convergence_tolerance: Option<f64>,
        capacity: Option<usize>,
    ) -> Result<Self, CollisionError> {
        let default = DEFAULT_EPA_CONFIG;
        let config = Self {
            max_iterations: max_iterations.unwrap_or(default.max_iterations),
            convergence_tolerance: convergence_tolerance.unwrap_or(default.convergence_tolerance),
            capacity: capacity.unwrap_or(default.capacity),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CollisionError> {
        if self.max_iterations == 0 {
            return Err(CollisionError::InvalidConfig("max_iterations must be at least 1".to_string()));
        }
        if !self.convergence_tolerance.is_finite() || self.convergence_tolerance <= 0.0 {
            return Err(CollisionError::InvalidConfig(format!(
                "convergence_tolerance must be positive and finite, got {}",
                self.convergence_tolerance
            )));
        }
        if self.capacity < EPA_MIN_CAPACITY || self.capacity > EPA_MAX_CAPACITY {
            return Err(CollisionError::InvalidConfig(format!(
                "capacity must be within {}..={}, got {}",
                EPA_MIN_CAPACITY, EPA_MAX_CAPACITY, self.capacity
            )));
        }
        Ok(())
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_convergence_tolerance(mut self, convergence_tolerance: f64) -> Self {
        self.convergence_tolerance = convergence_tolerance;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}
