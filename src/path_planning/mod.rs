// Global path planning: sampling, roadmap construction, search, and
// waypoint generation

pub mod sampler;
pub mod roadmap;
pub mod a_star;
pub mod prune;
pub mod waypoints;

pub use sampler::*;
pub use roadmap::*;
pub use a_star::*;
pub use prune::*;
pub use waypoints::*;
