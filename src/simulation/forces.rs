//! Steering contributors for the flock
//!
//! Each rule turns a particle and its neighbor set into a raw steering
//! vector; [`SteeringSet`] normalizes every contribution, weights it and sums
//! the results into one velocity delta

use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec2, Particle};

/// Collection of weighted steering rules (alignment, cohesion, separation, ...)
/// Each rule implements [`SteeringRule`]; its direction is scaled by the
/// weight it was registered with
pub struct SteeringSet {
    terms: Vec<(f32, Box<dyn SteeringRule + Send + Sync>)>,
    max_force: Option<f32>,
    epsilon: f32,
}

impl SteeringSet {
    /// Create an empty set
    pub fn new(epsilon: f32) -> Self {
        Self {
            terms: Vec::new(),
            max_force: None,
            epsilon,
        }
    }

    /// The classic three rules with the weights from `params`
    pub fn boids(params: &Parameters) -> Self {
        Self::new(params.epsilon)
            .with(params.alignment_weight, Alignment)
            .with(params.cohesion_weight, Cohesion)
            .with(params.separation_weight, Separation { epsilon: params.epsilon })
            .limit(params.max_force)
    }

    /// Add a rule with its weight
    pub fn with<T>(mut self, weight: f32, rule: T) -> Self
    where
        T: SteeringRule + Send + Sync + 'static,
    {
        self.terms.push((weight, Box::new(rule)));
        self
    }

    /// Cap the magnitude of the summed delta (`None` leaves it unbounded)
    pub fn limit(mut self, max_force: Option<f32>) -> Self {
        self.max_force = max_force;
        self
    }

    /// Velocity delta for `particle` given its neighbors.
    /// No neighbors means no steering: the delta is zero.
    pub fn compute(&self, particle: &Particle, neighbors: &[Particle]) -> NVec2 {
        let mut delta = NVec2::zeros();
        if neighbors.is_empty() {
            return delta;
        }

        for (weight, rule) in &self.terms {
            let raw = rule.steer(particle, neighbors);
            let magnitude = raw.norm();
            // near-zero vectors have no usable direction
            if magnitude < self.epsilon {
                continue;
            }
            delta += raw * (*weight / magnitude);
        }

        if let Some(max_force) = self.max_force {
            let magnitude = delta.norm();
            if magnitude > max_force {
                delta *= max_force / magnitude;
            }
        }

        delta
    }
}

/// A steering rule. Implementations may assume `neighbors` is non-empty.
pub trait SteeringRule {
    fn steer(&self, particle: &Particle, neighbors: &[Particle]) -> NVec2;
}

/// Match the mean heading of the neighbors
pub struct Alignment;

impl SteeringRule for Alignment {
    fn steer(&self, _particle: &Particle, neighbors: &[Particle]) -> NVec2 {
        mean(neighbors.iter().map(|n| n.velocity), neighbors.len())
    }
}

/// Move toward the neighbors' centroid
pub struct Cohesion;

impl SteeringRule for Cohesion {
    fn steer(&self, particle: &Particle, neighbors: &[Particle]) -> NVec2 {
        mean(neighbors.iter().map(|n| n.position), neighbors.len()) - particle.position
    }
}

/// Move away from neighbors, each one contributing a unit-ish push
pub struct Separation {
    pub epsilon: f32, // floor on the distance divisor for coincident particles
}

impl SteeringRule for Separation {
    fn steer(&self, particle: &Particle, neighbors: &[Particle]) -> NVec2 {
        let pushes = neighbors.iter().map(|n| {
            let away = particle.position - n.position;
            away / away.norm().max(self.epsilon)
        });
        mean(pushes, neighbors.len())
    }
}

fn mean(values: impl Iterator<Item = NVec2>, count: usize) -> NVec2 {
    let sum = values.fold(NVec2::zeros(), |acc, v| acc + v);
    sum / count as f32
}
