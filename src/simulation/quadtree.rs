//! # Per-step quadtree
//!
//! Spatial index rebuilt from scratch every simulation step so the neighbor
//! search in [`crate::simulation::neighbors`] only visits nearby particles
//! instead of all `N`.
//!
//! ## Layout
//!
//! The tree is flattened into two arrays:
//!
//! - `nodes`: every [`QuadNode`], root at index 0. A split allocates its four
//!   children as one contiguous block, so `children` is always
//!   `[c, c + 1, c + 2, c + 3]` or four copies of [`NO_CHILDREN`].
//! - `indices`: a permutation of `0..N` in which every leaf owns the
//!   contiguous slice `bucket_start..bucket_start + bucket_count`.
//!
//! ## Build
//!
//! The root covers the fixed domain `[-boundary_limit, boundary_limit]²` and
//! starts out holding every particle. Any leaf over `max_particles_per_leaf`
//! and shallower than `max_tree_depth` is split at the midpoint of its box and its
//! bucket is counting-sorted by quadrant in place, which hands each child a
//! contiguous sub-slice of the parent's bucket. Leaves at `max_tree_depth`
//! keep whatever they hold.
//!
//! Quadrant numbering follows the usual bit encoding:
//!
//! - Bit 0 (value 1): X axis, 0 for left (`x <= mid.x`), 1 for right
//! - Bit 1 (value 2): Y axis, 0 for bottom (`y <= mid.y`), 1 for top
//!
//! Points exactly on a midpoint go to the lower/left child.

use std::sync::atomic::{AtomicU32, Ordering};

use log::debug;
use rayon::prelude::*;

use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec2, Particle};

/// Children value shared by all four slots of a leaf
pub const NO_CHILDREN: u32 = u32::MAX;

/// Fixed capacity of the traversal stack used by neighbor queries
pub const QUERY_STACK_CAPACITY: usize = 64;

/// Buckets at least this large are partitioned with rayon
const PARALLEL_SPLIT_THRESHOLD: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadNode {
    pub min_bound: NVec2,
    pub max_bound: NVec2,
    pub children: [u32; 4],
    pub bucket_start: u32,
    pub bucket_count: u32,
}

impl QuadNode {
    fn leaf(min_bound: NVec2, max_bound: NVec2, bucket_start: u32, bucket_count: u32) -> Self {
        Self {
            min_bound,
            max_bound,
            children: [NO_CHILDREN; 4],
            bucket_start,
            bucket_count,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children[0] == NO_CHILDREN
    }

    pub fn midpoint(&self) -> NVec2 {
        (self.min_bound + self.max_bound) * 0.5
    }

    /// Squared distance from `p` to the nearest point of this node's box
    /// (zero when `p` is inside)
    pub fn distance_sq_to(&self, p: &NVec2) -> f32 {
        let nearest = NVec2::new(
            p.x.clamp(self.min_bound.x, self.max_bound.x),
            p.y.clamp(self.min_bound.y, self.max_bound.y),
        );
        (nearest - p).norm_squared()
    }
}

/// Summary of one build, used for logging and benchmarks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub node_count: usize,
    pub leaf_count: usize,
    pub max_depth: u32,
    pub overflowing_leaves: usize, // depth-capped leaves over capacity
}

#[derive(Debug, Clone)]
pub struct Quadtree {
    nodes: Vec<QuadNode>,
    indices: Vec<u32>,
    stats: TreeStats,
}

impl Quadtree {
    /// Build the tree on the calling thread
    pub fn build(particles: &[Particle], params: &Parameters) -> Self {
        Self::build_with(particles, params, false)
    }

    /// Build the tree, partitioning large buckets across the rayon pool.
    ///
    /// Bucket membership is identical to [`Quadtree::build`]; only the order
    /// of indices inside a leaf may differ.
    pub fn build_parallel(particles: &[Particle], params: &Parameters) -> Self {
        Self::build_with(particles, params, true)
    }

    fn build_with(particles: &[Particle], params: &Parameters, parallel: bool) -> Self {
        let n = particles.len();
        let limit = params.boundary_limit;

        let mut indices: Vec<u32> = (0..n as u32).collect();
        let mut scratch = vec![0u32; n];
        let mut nodes = vec![QuadNode::leaf(
            NVec2::new(-limit, -limit),
            NVec2::new(limit, limit),
            0,
            n as u32,
        )];
        let mut stats = TreeStats::default();

        // (node index, depth) of leaves still to inspect
        let mut pending: Vec<(u32, u32)> = vec![(0, 0)];

        while let Some((node_idx, depth)) = pending.pop() {
            let node = nodes[node_idx as usize];
            stats.max_depth = stats.max_depth.max(depth);

            if node.bucket_count <= params.max_particles_per_leaf {
                stats.leaf_count += 1;
                continue;
            }
            if depth >= params.max_tree_depth {
                stats.leaf_count += 1;
                stats.overflowing_leaves += 1;
                continue;
            }

            let start = node.bucket_start as usize;
            let end = start + node.bucket_count as usize;
            let mid = node.midpoint();
            let counts = if parallel && end - start >= PARALLEL_SPLIT_THRESHOLD {
                partition_bucket_parallel(&mut indices[start..end], &mut scratch[start..end], particles, &mid)
            } else {
                partition_bucket(&mut indices[start..end], &mut scratch[start..end], particles, &mid)
            };

            let first_child = nodes.len() as u32;
            let mut offset = node.bucket_start;
            for (quadrant, &count) in counts.iter().enumerate() {
                let (cmin, cmax) = child_bounds(&node.min_bound, &node.max_bound, quadrant);
                nodes.push(QuadNode::leaf(cmin, cmax, offset, count));
                pending.push((first_child + quadrant as u32, depth + 1));
                offset += count;
            }

            let parent = &mut nodes[node_idx as usize];
            parent.children = [first_child, first_child + 1, first_child + 2, first_child + 3];
            parent.bucket_count = 0;
        }

        stats.node_count = nodes.len();
        if stats.overflowing_leaves > 0 {
            debug!(
                "quadtree: {} leaves at max depth {} hold more than {} particles",
                stats.overflowing_leaves, params.max_tree_depth, params.max_particles_per_leaf
            );
        }
        debug!("quadtree: built over {n} particles: {stats:?}");

        Self { nodes, indices, stats }
    }

    pub fn nodes(&self) -> &[QuadNode] {
        &self.nodes
    }

    /// Reordered particle indices; leaves reference slices of this
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn root(&self) -> &QuadNode {
        &self.nodes[0]
    }

    pub fn stats(&self) -> TreeStats {
        self.stats
    }

    /// Particle indices stored directly in `node` (empty for internal nodes)
    pub fn bucket(&self, node: &QuadNode) -> &[u32] {
        let start = node.bucket_start as usize;
        &self.indices[start..start + node.bucket_count as usize]
    }
}

// helpers ===========================================================================

/// Quadrant of `p` relative to the split point `mid`, ties to lower/left
fn quadrant_of(p: &NVec2, mid: &NVec2) -> usize {
    let mut idx = 0;

    if p.x > mid.x { idx |= 1; } // bit 0
    if p.y > mid.y { idx |= 2; } // bit 1

    idx
}

/// Box of child `quadrant` when splitting `[parent_min, parent_max]` at its center
fn child_bounds(parent_min: &NVec2, parent_max: &NVec2, quadrant: usize) -> (NVec2, NVec2) {
    let center = (parent_min + parent_max) * 0.5;

    let mut min = *parent_min;
    let mut max = *parent_max;

    if (quadrant & 1) == 0 {
        max.x = center.x;
    } else {
        min.x = center.x;
    }

    if (quadrant & 2) == 0 {
        max.y = center.y;
    } else {
        min.y = center.y;
    }

    (min, max)
}

fn exclusive_prefix(counts: &[u32; 4]) -> [u32; 4] {
    let mut starts = [0u32; 4];
    for q in 1..4 {
        starts[q] = starts[q - 1] + counts[q - 1];
    }
    starts
}

/// Counting-sort `bucket` by quadrant. Returns the per-quadrant counts; after
/// the call quadrant `q` occupies `bucket[start_q..start_q + counts[q]]`.
fn partition_bucket(bucket: &mut [u32], scratch: &mut [u32], particles: &[Particle], mid: &NVec2) -> [u32; 4] {
    let mut counts = [0u32; 4];
    for &i in bucket.iter() {
        counts[quadrant_of(&particles[i as usize].position, mid)] += 1;
    }

    let mut cursor = exclusive_prefix(&counts);
    for &i in bucket.iter() {
        let q = quadrant_of(&particles[i as usize].position, mid);
        scratch[cursor[q] as usize] = i;
        cursor[q] += 1;
    }

    bucket.copy_from_slice(scratch);
    counts
}

/// Same contract as [`partition_bucket`]. Classification and counting run in
/// parallel, slots inside each quadrant are reserved with atomic offsets and
/// the scatter itself is a serial write, so nothing partial is ever visible.
fn partition_bucket_parallel(bucket: &mut [u32], scratch: &mut [u32], particles: &[Particle], mid: &NVec2) -> [u32; 4] {
    let quadrants: Vec<u8> = bucket
        .par_iter()
        .map(|&i| quadrant_of(&particles[i as usize].position, mid) as u8)
        .collect();

    let counts = quadrants
        .par_iter()
        .fold(
            || [0u32; 4],
            |mut acc, &q| {
                acc[q as usize] += 1;
                acc
            },
        )
        .reduce(
            || [0u32; 4],
            |a, b| [a[0] + b[0], a[1] + b[1], a[2] + b[2], a[3] + b[3]],
        );

    let starts = exclusive_prefix(&counts);
    let offsets: [AtomicU32; 4] = Default::default();

    let writes: Vec<(usize, u32)> = bucket
        .par_iter()
        .zip(quadrants.par_iter())
        .map(|(&i, &q)| {
            let q = q as usize;
            let slot = starts[q] + offsets[q].fetch_add(1, Ordering::Relaxed);
            (slot as usize, i)
        })
        .collect();

    for (slot, i) in writes {
        scratch[slot] = i;
    }

    bucket.copy_from_slice(scratch);
    counts
}
