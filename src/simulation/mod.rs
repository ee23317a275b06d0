pub mod states;
pub mod params;
pub mod engine;
pub mod quadtree;
pub mod neighbors;
pub mod forces;
pub mod integrator;
pub mod scenario;
