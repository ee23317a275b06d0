//! Bounded neighbor-range queries against a [`Quadtree`].
//!
//! The walk is depth-first over an explicit fixed-size stack, never a
//! recursive call. A node is opened only when its box comes closer than
//! `radius` to the query point, and collection stops as soon as `cap`
//! neighbors have been admitted.
//!
//! When the cap truncates a query, which particles make it in depends on
//! the traversal order. Only untruncated results are a well-defined set.

use crate::simulation::params::Parameters;
use crate::simulation::quadtree::{Quadtree, QUERY_STACK_CAPACITY};
use crate::simulation::states::{NVec2, Particle};

/// One range query: every particle strictly closer than `radius` to `center`,
/// at most `cap` of them, skipping `exclude`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborQuery {
    pub center: NVec2,
    pub radius: f32,
    pub cap: usize,
    pub exclude: Option<u32>,
}

impl NeighborQuery {
    pub fn new(center: NVec2, radius: f32, cap: usize) -> Self {
        Self {
            center,
            radius,
            cap,
            exclude: None,
        }
    }

    /// Query for the flock mates of particle `i`, using the configured
    /// perception radius and neighbor cap
    pub fn around(i: u32, particles: &[Particle], params: &Parameters) -> Self {
        Self {
            center: particles[i as usize].position,
            radius: params.perception_radius,
            cap: params.neighbor_cap,
            exclude: Some(i),
        }
    }

    /// Run the query. The result never holds more than `cap` indices.
    pub fn run(&self, tree: &Quadtree, particles: &[Particle]) -> Vec<u32> {
        let mut found = Vec::with_capacity(self.cap.min(QUERY_STACK_CAPACITY));
        if self.cap == 0 || self.radius <= 0.0 {
            return found;
        }

        let radius_sq = self.radius * self.radius;
        let nodes = tree.nodes();

        let mut stack = NodeStack::new();
        stack.push(0);

        while let Some(node_idx) = stack.pop() {
            let node = &nodes[node_idx as usize];

            if node.distance_sq_to(&self.center) >= radius_sq {
                continue;
            }

            if node.is_leaf() {
                for &candidate in tree.bucket(node) {
                    if Some(candidate) == self.exclude {
                        continue;
                    }
                    let offset = particles[candidate as usize].position - self.center;
                    if offset.norm_squared() < radius_sq {
                        found.push(candidate);
                        if found.len() >= self.cap {
                            return found;
                        }
                    }
                }
            } else {
                for &child in &node.children {
                    stack.push(child);
                }
            }
        }

        found
    }
}

/// Reference O(N) scan returning every particle strictly inside `radius`,
/// in index order. Used to check and benchmark the tree query.
pub fn brute_force_neighbors(particles: &[Particle], center: NVec2, radius: f32, exclude: Option<u32>) -> Vec<u32> {
    let radius_sq = radius * radius;
    particles
        .iter()
        .enumerate()
        .filter(|(j, p)| Some(*j as u32) != exclude && (p.position - center).norm_squared() < radius_sq)
        .map(|(j, _)| j as u32)
        .collect()
}

/// Fixed-capacity LIFO of node indices.
///
/// A depth-first walk holds at most `3 * depth + 1` entries, which fits for
/// every depth `Parameters::validate` accepts. Trees built from unvalidated
/// parameters can go deeper; there a push onto a full stack silently drops
/// that subtree, so the query returns a subset of the true neighbors.
struct NodeStack {
    slots: [u32; QUERY_STACK_CAPACITY],
    len: usize,
}

impl NodeStack {
    fn new() -> Self {
        Self {
            slots: [0; QUERY_STACK_CAPACITY],
            len: 0,
        }
    }

    /// No-op when the stack is full
    fn push(&mut self, node: u32) {
        if self.len == QUERY_STACK_CAPACITY {
            return;
        }
        self.slots[self.len] = node;
        self.len += 1;
    }

    fn pop(&mut self) -> Option<u32> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(self.slots[self.len])
    }
}
