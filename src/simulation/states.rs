//! Core state types for the flocking simulation.
//!
//! - `Particle`      a single boid (position + velocity)
//! - `ParticleStore` the flat, index-addressable particle buffer
//!
//! The store is owned by the scenario for the whole run and rewritten once
//! per step.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f32>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: NVec2,
    pub velocity: NVec2,
}

impl Particle {
    pub fn new(position: NVec2, velocity: NVec2) -> Self {
        Self { position, velocity }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    pub fn new(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    /// Read particle `i`
    ///
    /// # Panics
    /// When `i >= count()`. Only the per-particle kernel is allowed to see an
    /// out-of-range index, and it checks before calling.
    pub fn get(&self, i: u32) -> Particle {
        self.particles[i as usize]
    }

    /// Overwrite particle `i`
    ///
    /// # Panics
    /// When `i >= count()`.
    pub fn set(&mut self, i: u32, particle: Particle) {
        self.particles[i as usize] = particle;
    }

    pub fn count(&self) -> u32 {
        self.particles.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Read-only view of the whole buffer
    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    /// Swap in the buffer produced by a completed step
    pub(crate) fn replace(&mut self, particles: Vec<Particle>) {
        debug_assert_eq!(particles.len(), self.particles.len());
        self.particles = particles;
    }
}
