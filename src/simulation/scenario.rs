//! Build fully-initialized flocking scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - particle state (`ParticleStore`)
//! - active steering rules (`SteeringSet`)
//!
//! The scenario owns the particle buffer for the whole run; presentation code
//! only ever sees it through [`Scenario::snapshot`] between steps

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::configuration::config::{ParticleConfig, ScenarioConfig, SpawnConfig};
use crate::configuration::error::ConfigError;
use crate::simulation::engine::Engine;
use crate::simulation::forces::SteeringSet;
use crate::simulation::integrator::flock_step;
use crate::simulation::params::Parameters;
use crate::simulation::quadtree::TreeStats;
use crate::simulation::states::{NVec2, Particle, ParticleStore};

pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub store: ParticleStore,
    pub steering: SteeringSet,
    pub step: u64, // completed steps
    last_tree: TreeStats,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            max_particles_per_leaf: p_cfg.max_particles_per_leaf,
            max_tree_depth: p_cfg.max_tree_depth,
            perception_radius: p_cfg.perception_radius,
            neighbor_cap: p_cfg.neighbor_cap,
            alignment_weight: p_cfg.alignment_weight,
            cohesion_weight: p_cfg.cohesion_weight,
            separation_weight: p_cfg.separation_weight,
            max_force: p_cfg.max_force,
            max_speed: p_cfg.max_speed,
            min_speed: p_cfg.min_speed,
            default_velocity: NVec2::new(p_cfg.default_velocity[0], p_cfg.default_velocity[1]),
            boundary_limit: p_cfg.boundary_limit,
            epsilon: p_cfg.epsilon,
            boid_size: p_cfg.boid_size,
        };
        parameters.validate()?;

        // Engine (runtime) from EngineConfig
        let e_cfg = cfg.engine;
        let engine = Engine {
            parallel: e_cfg.parallel,
            boundary: e_cfg.boundary,
            steps: e_cfg.steps,
            log_every: e_cfg.log_every,
        };

        // Particles: explicit list wins over random spawning
        let particles = match cfg.particles {
            Some(list) => {
                if list.len() as u32 != cfg.spawn.particle_count {
                    warn!(
                        "scenario lists {} particles, ignoring spawn.particle_count = {}",
                        list.len(),
                        cfg.spawn.particle_count
                    );
                }
                let particles: Vec<Particle> = list.iter().map(particle_from_config).collect();
                check_inside_domain(&particles, parameters.boundary_limit)?;
                particles
            }
            None => {
                let [lo, hi] = cfg.spawn.position_range;
                let limit = parameters.boundary_limit;
                // NaN bounds fall through to check_range in spawn_particles
                if lo < -limit || hi > limit {
                    return Err(ConfigError::SpawnOutsideDomain { lo, hi, limit });
                }
                spawn_particles(&cfg.spawn)?
            }
        };

        let steering = SteeringSet::boids(&parameters);

        info!(
            "scenario: {} particles, parallel = {}, boundary = {:?}",
            particles.len(),
            engine.parallel,
            engine.boundary
        );

        Ok(Self::new(engine, parameters, ParticleStore::new(particles), steering))
    }

    pub fn new(engine: Engine, parameters: Parameters, store: ParticleStore, steering: SteeringSet) -> Self {
        Self {
            engine,
            parameters,
            store,
            steering,
            step: 0,
            last_tree: TreeStats::default(),
        }
    }

    /// Advance one full step (tree build, then query/steer/integrate)
    pub fn step(&mut self) {
        let tree = flock_step(&mut self.store, &self.steering, &self.parameters, &self.engine);
        self.last_tree = tree.stats();
        self.step += 1;

        if self.engine.log_every > 0 && self.step % self.engine.log_every == 0 {
            info!(
                "step {}: {} particles, mean speed {:.6}, {} tree nodes (depth {})",
                self.step,
                self.store.count(),
                self.mean_speed(),
                self.last_tree.node_count,
                self.last_tree.max_depth
            );
        } else {
            debug!("step {} done", self.step);
        }
    }

    /// Advance `steps` full steps
    pub fn run(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Read-only view of the particles after the last completed step
    pub fn snapshot(&self) -> &[Particle] {
        self.store.as_slice()
    }

    /// Stats of the tree built during the last step
    pub fn last_tree_stats(&self) -> TreeStats {
        self.last_tree
    }

    pub fn mean_speed(&self) -> f32 {
        let particles = self.store.as_slice();
        if particles.is_empty() {
            return 0.0;
        }
        particles.iter().map(|p| p.velocity.norm()).sum::<f32>() / particles.len() as f32
    }
}

fn particle_from_config(pc: &ParticleConfig) -> Particle {
    Particle::new(NVec2::new(pc.x[0], pc.x[1]), NVec2::new(pc.v[0], pc.v[1]))
}

/// The tree root only covers `[-limit, limit]²`, so initial state must start there
fn check_inside_domain(particles: &[Particle], limit: f32) -> Result<(), ConfigError> {
    let outside = particles.iter().position(|p| {
        let [x, y] = [p.position.x, p.position.y];
        !(x.abs() <= limit && y.abs() <= limit)
    });
    match outside {
        Some(index) => {
            let position = particles[index].position;
            Err(ConfigError::ParticleOutsideDomain {
                index,
                x: position.x,
                y: position.y,
                limit,
            })
        }
        None => Ok(()),
    }
}

/// Seeded uniform spawn inside the configured ranges
pub fn spawn_particles(spawn: &SpawnConfig) -> Result<Vec<Particle>, ConfigError> {
    let [p_lo, p_hi] = spawn.position_range;
    let [v_lo, v_hi] = spawn.velocity_range;
    check_range("position_range", p_lo, p_hi)?;
    check_range("velocity_range", v_lo, v_hi)?;

    let mut rng = StdRng::seed_from_u64(spawn.seed);
    let particles = (0..spawn.particle_count)
        .map(|_| {
            let position = NVec2::new(rng.gen_range(p_lo..=p_hi), rng.gen_range(p_lo..=p_hi));
            let velocity = NVec2::new(rng.gen_range(v_lo..=v_hi), rng.gen_range(v_lo..=v_hi));
            Particle::new(position, velocity)
        })
        .collect();

    Ok(particles)
}

fn check_range(name: &'static str, lo: f32, hi: f32) -> Result<(), ConfigError> {
    if lo.is_finite() && hi.is_finite() && lo <= hi {
        Ok(())
    } else {
        Err(ConfigError::BadRange { name, lo, hi })
    }
}
