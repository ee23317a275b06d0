//! High-level runtime engine settings
//!
//! Selects the execution mode (sequential or rayon-parallel) and the boundary
//! policy used when building and running a `Scenario`

use serde::Deserialize;

/// What happens when a particle leaves the square domain on some axis
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    #[serde(rename = "reflect")] // negate the velocity component only
    Reflect,

    #[serde(rename = "reflect_clamp")] // negate and pull the position back onto the boundary
    #[default]
    ReflectClamp,
}

#[derive(Debug, Clone)]
pub struct Engine {
    pub parallel: bool, // false = single thread, true = rayon phases
    pub boundary: BoundaryPolicy,
    pub steps: u64, // steps to run from the CLI
    pub log_every: u64, // 0 disables progress logging
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            parallel: true,
            boundary: BoundaryPolicy::ReflectClamp,
            steps: 1000,
            log_every: 100,
        }
    }
}
