//! Errors raised while turning a scenario file into a runnable scenario.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("`{name}` must be finite and greater than zero, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("`{name}` must be finite and non-negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("`max_particles_per_leaf` must be at least 1")]
    ZeroLeafCapacity,

    #[error("`neighbor_cap` must be at least 1")]
    ZeroNeighborCap,

    #[error("`max_tree_depth` {depth} exceeds the deepest tree the query stack can walk ({supported})")]
    TreeTooDeep { depth: u32, supported: u32 },

    #[error("`default_velocity` speed {speed} must lie in ({min}, {max}]")]
    DefaultVelocityOutOfRange { speed: f32, min: f32, max: f32 },

    #[error("`{name}` range is empty or inverted: [{lo}, {hi}]")]
    BadRange { name: &'static str, lo: f32, hi: f32 },

    #[error("`position_range` [{lo}, {hi}] leaves the domain [-{limit}, {limit}]")]
    SpawnOutsideDomain { lo: f32, hi: f32, limit: f32 },

    #[error("particle {index} starts at ({x}, {y}), outside the domain [-{limit}, {limit}]")]
    ParticleOutsideDomain { index: usize, x: f32, y: f32, limit: f32 },
}
