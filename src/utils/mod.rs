// Utility modules

pub mod bresenham;

pub use bresenham::*;
