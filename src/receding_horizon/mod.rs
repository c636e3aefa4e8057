// Receding-horizon collision monitoring: local occupancy grid plus ray
// checks that trigger global replanning

pub mod voxel_map;
pub mod detector;

pub use voxel_map::*;
pub use detector::*;
