use std::time::Instant;

use crate::simulation::engine::Engine;
use crate::simulation::forces::SteeringSet;
use crate::simulation::integrator::flock_step;
use crate::simulation::neighbors::{brute_force_neighbors, NeighborQuery};
use crate::simulation::params::Parameters;
use crate::simulation::quadtree::Quadtree;
use crate::simulation::states::{NVec2, Particle, ParticleStore};

/// Deterministic flock spread over the unit domain, no rand needed
fn synthetic_flock(n: usize) -> Vec<Particle> {
    (0..n)
        .map(|i| {
            let i_f = i as f32;
            Particle::new(
                NVec2::new((i_f * 0.37).sin(), (i_f * 0.13).cos()),
                NVec2::new((i_f * 0.07).sin() * 0.01, (i_f * 0.11).cos() * 0.01),
            )
        })
        .collect()
}

/// Time neighbor search for every particle: brute-force scan vs tree query
pub fn bench_neighbors() {
    let ns = [1_000, 2_000, 4_000, 8_000, 16_000];
    let params = Parameters::default();

    for n in ns {
        let particles = synthetic_flock(n);

        // Time brute force
        let t0 = Instant::now();
        let mut brute_hits = 0usize;
        for p in &particles {
            brute_hits += brute_force_neighbors(&particles, p.position, params.perception_radius, None).len();
        }
        let dt_brute = t0.elapsed().as_secs_f64();

        // Time build + queries
        let t1 = Instant::now();
        let tree = Quadtree::build(&particles, &params);
        let dt_build = t1.elapsed().as_secs_f64();
        let mut tree_hits = 0usize;
        for i in 0..n as u32 {
            tree_hits += NeighborQuery::around(i, &particles, &params).run(&tree, &particles).len();
        }
        let dt_tree = t1.elapsed().as_secs_f64();

        println!(
            "N = {n:6}, brute = {dt_brute:8.6} s ({brute_hits} hits), tree = {dt_tree:8.6} s (build {dt_build:8.6} s, {tree_hits} capped hits)"
        );
    }
}

/// Time full simulation steps: single thread vs rayon
pub fn bench_step() {
    let ns = [10_000, 50_000, 100_000];
    let steps = 20;
    let params = Parameters::default();
    let steering = SteeringSet::boids(&params);

    for n in ns {
        let particles = synthetic_flock(n);

        let mut timings = [0.0f64; 2];
        for (slot, parallel) in [false, true].into_iter().enumerate() {
            let engine = Engine {
                parallel,
                ..Engine::default()
            };
            let mut store = ParticleStore::new(particles.clone());

            // Warm up
            flock_step(&mut store, &steering, &params, &engine);

            let t0 = Instant::now();
            for _ in 0..steps {
                flock_step(&mut store, &steering, &params, &engine);
            }
            timings[slot] = t0.elapsed().as_secs_f64() / steps as f64;
        }

        println!(
            "N = {n:6}, sequential = {:8.6} s/step, parallel = {:8.6} s/step",
            timings[0], timings[1]
        );
    }
}
