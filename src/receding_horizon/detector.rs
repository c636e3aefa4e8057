//! Local obstacle detection along the intended travel direction
//!
//! Casts a ray from the vehicle's cell toward the next displacement and
//! reports the first occupied cell, skipping a leading dead-band so the
//! vehicle's own footprint never triggers a replan.

use nalgebra::Vector2;

use crate::common::GridCell;
use crate::receding_horizon::voxel_map::LocalVoxelMap;
use crate::utils::bresenham_line;

/// Result of one local ray check
#[derive(Debug, Clone)]
pub struct LocalScan {
    /// Whether an occupied cell lies on the ray beyond the dead-band
    pub blocked: bool,
    /// In-bounds ray cells from the vehicle toward the target
    pub ray: Vec<GridCell>,
    /// The first occupied cell, when blocked
    pub first_blocked: Option<GridCell>,
}

impl LocalScan {
    fn clear(ray: Vec<GridCell>) -> Self {
        LocalScan { blocked: false, ray, first_blocked: None }
    }

    fn blocked_at(ray: Vec<GridCell>, cell: GridCell) -> Self {
        LocalScan { blocked: true, ray, first_blocked: Some(cell) }
    }
}

/// Check whether the displacement from the vehicle's position is clear in
/// the local map. `displacement` is in world meters (north, east); cells
/// closer than `deadband` along the ray are ignored. A blocked result is
/// the signal to invalidate the global plan and replan.
pub fn detect_local_obstacle(
    map: &LocalVoxelMap,
    displacement: Vector2<f64>,
    deadband: usize,
) -> LocalScan {
    let center = map.center_cell();
    let target = GridCell::new(
        center.x + (displacement.x / map.voxel_size()).floor() as i32,
        center.y + (displacement.y / map.voxel_size()).floor() as i32,
    );

    let ray: Vec<GridCell> = bresenham_line(center.x, center.y, target.x, target.y)
        .into_iter()
        .filter(|&c| map.in_bounds(c))
        .collect();

    for &cell in ray.iter().skip(deadband) {
        if map.is_occupied(cell) {
            return LocalScan::blocked_at(ray.clone(), cell);
        }
    }

    LocalScan::clear(ray)
}
