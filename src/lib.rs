pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Particle, ParticleStore, NVec2};
pub use simulation::params::Parameters;
pub use simulation::engine::{Engine, BoundaryPolicy};
pub use simulation::quadtree::{Quadtree, QuadNode, TreeStats, NO_CHILDREN, QUERY_STACK_CAPACITY};
pub use simulation::neighbors::{NeighborQuery, brute_force_neighbors};
pub use simulation::forces::{SteeringSet, SteeringRule, Alignment, Cohesion, Separation};
pub use simulation::integrator::{integrate, update_particle, flock_step};
pub use simulation::scenario::{Scenario, spawn_particles};

pub use configuration::config::{EngineConfig, ParametersConfig, SpawnConfig, ParticleConfig, ScenarioConfig};
pub use configuration::error::ConfigError;

pub use visualization::transforms::{DrawTransform, draw_transforms};

pub use benchmark::benchmark::{bench_neighbors, bench_step};
