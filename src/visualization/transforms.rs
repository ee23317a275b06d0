//! Draw transforms for whatever renders the flock.
//!
//! The simulation never reads rendering state back; a renderer takes a
//! snapshot after a step and turns each particle into one oriented triangle
//! using these transforms.

use crate::simulation::states::{NVec2, Particle};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawTransform {
    pub translation: NVec2,
    pub rotation: f32, // radians, counter-clockwise from +x
    pub scale: f32,
}

impl DrawTransform {
    /// Heading follows the velocity; a particle at rest faces +x
    pub fn from_particle(particle: &Particle, boid_size: f32) -> Self {
        let v = particle.velocity;
        let rotation = if v.x == 0.0 && v.y == 0.0 { 0.0 } else { v.y.atan2(v.x) };
        Self {
            translation: particle.position,
            rotation,
            scale: boid_size,
        }
    }
}

pub fn draw_transforms(snapshot: &[Particle], boid_size: f32) -> Vec<DrawTransform> {
    snapshot
        .iter()
        .map(|p| DrawTransform::from_particle(p, boid_size))
        .collect()
}
