//! Per-step integration for the flock
//!
//! - [`integrate`] advances one particle under a steering delta, speed limits
//!   and the boundary policy
//! - [`update_particle`] is the per-particle kernel: query, steer, integrate
//! - [`flock_step`] runs a whole step: tree build, then every particle

use rayon::prelude::*;

use super::engine::{BoundaryPolicy, Engine};
use super::forces::SteeringSet;
use super::neighbors::NeighborQuery;
use super::params::Parameters;
use super::quadtree::Quadtree;
use super::states::{NVec2, Particle, ParticleStore};

/// Advance one particle by one step.
///
/// `velocity += delta`, clamp to `max_speed`, revive frozen particles with
/// `default_velocity`, `position += velocity`, then handle each axis that left
/// the domain according to `policy`.
pub fn integrate(particle: Particle, delta: NVec2, params: &Parameters, policy: BoundaryPolicy) -> Particle {
    let mut velocity = particle.velocity + delta;

    let speed = velocity.norm();
    if speed > params.max_speed {
        velocity *= params.max_speed / speed;
    }
    let speed = velocity.norm();
    if speed.is_nan() || speed < params.min_speed {
        velocity = params.default_velocity;
    }

    let mut position = particle.position + velocity;

    let limit = params.boundary_limit;
    for axis in 0..2 {
        if position[axis].abs() > limit {
            velocity[axis] = -velocity[axis];
            if policy == BoundaryPolicy::ReflectClamp {
                position[axis] = position[axis].clamp(-limit, limit);
            }
        }
    }

    Particle { position, velocity }
}

/// Compute the next state of particle `i` from an immutable snapshot and the
/// tree built over it. Returns `None` for `i >= particles.len()`.
pub fn update_particle(
    i: u32,
    particles: &[Particle],
    tree: &Quadtree,
    steering: &SteeringSet,
    params: &Parameters,
    policy: BoundaryPolicy,
) -> Option<Particle> {
    let particle = *particles.get(i as usize)?;

    let neighbors: Vec<Particle> = NeighborQuery::around(i, particles, params)
        .run(tree, particles)
        .into_iter()
        .map(|j| particles[j as usize])
        .collect();

    let delta = steering.compute(&particle, &neighbors);
    Some(integrate(particle, delta, params, policy))
}

/// Advance the whole store by one step.
///
/// Phase 1 builds the quadtree from the current positions. Phase 2 maps every
/// particle through [`update_particle`] against that frozen snapshot, in
/// parallel when `engine.parallel` is set, and only then swaps the new buffer
/// in, so no particle ever sees a neighbor's half-updated state.
pub fn flock_step(store: &mut ParticleStore, steering: &SteeringSet, params: &Parameters, engine: &Engine) -> Quadtree {
    let particles = store.as_slice();
    let count = store.count();

    let tree = if engine.parallel {
        Quadtree::build_parallel(particles, params)
    } else {
        Quadtree::build(particles, params)
    };

    let next: Vec<Particle> = if engine.parallel {
        (0..count)
            .into_par_iter()
            .filter_map(|i| update_particle(i, particles, &tree, steering, params, engine.boundary))
            .collect()
    } else {
        (0..count)
            .filter_map(|i| update_particle(i, particles, &tree, steering, params, engine.boundary))
            .collect()
    };

    store.replace(next);
    tree
}
