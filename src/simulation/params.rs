//! Numerical and behavioral parameters for the simulation
//!
//! `Parameters` holds every tunable the step pipeline reads:
//! - quadtree shape (`max_particles_per_leaf`, `max_tree_depth`),
//! - neighbor search (`perception_radius`, `neighbor_cap`),
//! - steering weights and optional `max_force`,
//! - integration limits (`max_speed`, `min_speed`, `default_velocity`),
//! - the domain half-extent `boundary_limit`

use crate::configuration::error::ConfigError;
use crate::simulation::quadtree::QUERY_STACK_CAPACITY;
use crate::simulation::states::NVec2;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub max_particles_per_leaf: u32, // leaf capacity before a split
    pub max_tree_depth: u32, // root is depth 0
    pub perception_radius: f32, // neighbor search radius
    pub neighbor_cap: usize, // max neighbors reported per query
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub separation_weight: f32,
    pub max_force: Option<f32>, // cap on the summed steering delta
    pub max_speed: f32,
    pub min_speed: f32, // below this a particle is considered frozen
    pub default_velocity: NVec2, // assigned to frozen particles
    pub boundary_limit: f32, // domain half-extent
    pub epsilon: f32, // guard for near-zero magnitudes
    pub boid_size: f32, // visual scale handed to presentation
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            max_particles_per_leaf: 10,
            max_tree_depth: 6,
            perception_radius: 0.09,
            neighbor_cap: 10,
            alignment_weight: 0.0004,
            cohesion_weight: 0.0002,
            separation_weight: 0.0006,
            max_force: None,
            max_speed: 0.01,
            min_speed: 1.0e-6,
            default_velocity: NVec2::new(0.001, 0.0),
            boundary_limit: 1.0,
            epsilon: 1.0e-6,
            boid_size: 0.01,
        }
    }
}

impl Parameters {
    /// Deepest tree whose worst-case traversal still fits the query stack.
    ///
    /// Each pop of an internal node pushes four children, so a depth-first
    /// walk holds at most `3 * depth + 1` pending nodes.
    pub fn max_supported_depth() -> u32 {
        (QUERY_STACK_CAPACITY as u32 - 1) / 3
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("perception_radius", self.perception_radius)?;
        positive("max_speed", self.max_speed)?;
        positive("boundary_limit", self.boundary_limit)?;
        positive("epsilon", self.epsilon)?;
        non_negative("min_speed", self.min_speed)?;
        non_negative("alignment_weight", self.alignment_weight)?;
        non_negative("cohesion_weight", self.cohesion_weight)?;
        non_negative("separation_weight", self.separation_weight)?;
        non_negative("boid_size", self.boid_size)?;
        if let Some(max_force) = self.max_force {
            positive("max_force", max_force)?;
        }

        if self.max_particles_per_leaf == 0 {
            return Err(ConfigError::ZeroLeafCapacity);
        }
        if self.neighbor_cap == 0 {
            return Err(ConfigError::ZeroNeighborCap);
        }

        let supported = Self::max_supported_depth();
        if self.max_tree_depth > supported {
            return Err(ConfigError::TreeTooDeep {
                depth: self.max_tree_depth,
                supported,
            });
        }

        let default_speed = self.default_velocity.norm();
        if !default_speed.is_finite() || default_speed <= self.min_speed || default_speed > self.max_speed {
            return Err(ConfigError::DefaultVelocityOutOfRange {
                speed: default_speed,
                min: self.min_speed,
                max: self.max_speed,
            });
        }

        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}
