// Obstacle geometry and spatial indexing

pub mod polygon;
pub mod index;

pub use polygon::*;
pub use index::*;
