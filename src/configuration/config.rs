//! Configuration types for loading flocking scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – execution options (parallelism, boundary policy, run length)
//! - [`ParametersConfig`] – quadtree, neighbor search, steering and speed tunables
//! - [`SpawnConfig`]      – seeded random initial state
//! - [`ParticleConfig`]   – optional explicit initial state per particle
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! Every field has a default, so an empty file is a valid scenario.
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   parallel: true
//!   boundary: "reflect_clamp"   # or "reflect"
//!   steps: 1000
//!   log_every: 100
//!
//! parameters:
//!   max_particles_per_leaf: 10
//!   max_tree_depth: 6
//!   perception_radius: 0.09
//!   neighbor_cap: 10
//!   alignment_weight: 0.0004
//!   cohesion_weight: 0.0002
//!   separation_weight: 0.0006
//!   max_speed: 0.01
//!   boundary_limit: 1.0
//!
//! spawn:
//!   particle_count: 100000
//!   seed: 42
//!   position_range: [-1.0, 1.0]
//!   velocity_range: [-0.01, 0.01]
//!
//! # optional, replaces random spawning
//! particles:
//!   - x: [0.0, 0.0]
//!     v: [0.001, 0.0]
//! ```

use serde::Deserialize;

use crate::simulation::engine::{BoundaryPolicy, Engine};
use crate::simulation::params::Parameters;

/// Execution options
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub parallel: bool, // `true` - rayon phases, `false` - single thread
    pub boundary: BoundaryPolicy, // what happens at the domain edge
    pub steps: u64, // number of steps the binary runs
    pub log_every: u64, // progress log period in steps, 0 = silent
}

impl Default for EngineConfig {
    fn default() -> Self {
        let engine = Engine::default();
        Self {
            parallel: engine.parallel,
            boundary: engine.boundary,
            steps: engine.steps,
            log_every: engine.log_every,
        }
    }
}

/// Tunables of the step pipeline, see [`Parameters`] for their meaning
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub max_particles_per_leaf: u32,
    pub max_tree_depth: u32,
    pub perception_radius: f32,
    pub neighbor_cap: usize,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub separation_weight: f32,
    pub max_force: Option<f32>,
    pub max_speed: f32,
    pub min_speed: f32,
    pub default_velocity: [f32; 2],
    pub boundary_limit: f32,
    pub epsilon: f32,
    pub boid_size: f32,
}

impl Default for ParametersConfig {
    fn default() -> Self {
        let p = Parameters::default();
        Self {
            max_particles_per_leaf: p.max_particles_per_leaf,
            max_tree_depth: p.max_tree_depth,
            perception_radius: p.perception_radius,
            neighbor_cap: p.neighbor_cap,
            alignment_weight: p.alignment_weight,
            cohesion_weight: p.cohesion_weight,
            separation_weight: p.separation_weight,
            max_force: p.max_force,
            max_speed: p.max_speed,
            min_speed: p.min_speed,
            default_velocity: [p.default_velocity.x, p.default_velocity.y],
            boundary_limit: p.boundary_limit,
            epsilon: p.epsilon,
            boid_size: p.boid_size,
        }
    }
}

/// Seeded random initial state: positions and velocity components drawn
/// uniformly from their ranges
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SpawnConfig {
    pub particle_count: u32,
    pub seed: u64, // same seed, same flock
    pub position_range: [f32; 2],
    pub velocity_range: [f32; 2],
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            particle_count: 10_000,
            seed: 42,
            position_range: [-1.0, 1.0],
            velocity_range: [-0.01, 0.01],
        }
    }
}

/// Explicit initial state of one particle
#[derive(Deserialize, Debug, Clone)]
pub struct ParticleConfig {
    pub x: [f32; 2], // initial position
    pub v: [f32; 2], // initial velocity
}

/// Top-level scenario configuration loaded from YAML
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub spawn: SpawnConfig,
    pub particles: Option<Vec<ParticleConfig>>, // overrides `spawn` when present
}
