//! Local occupancy grid centered on the vehicle
//!
//! A fixed-size 2D boolean grid rebuilt from the obstacle index whenever the
//! vehicle has moved enough to warrant a refresh. Only obstacles reaching at
//! least the vehicle's current altitude are marked.

use itertools::iproduct;
use nalgebra::DMatrix;

use crate::common::{GridCell, ObstacleRegion, Point2D, Point3D};
use crate::obstacles::ObstacleIndex;

/// Ephemeral occupancy grid around the vehicle's north/east position
#[derive(Debug, Clone)]
pub struct LocalVoxelMap {
    grid: DMatrix<bool>,
    voxel_size: f64,
    north_min: f64,
    east_min: f64,
}

impl LocalVoxelMap {
    /// Build the grid from the obstacle index. `center` is the vehicle's
    /// NED position (altitude magnitude `-z`); the grid spans
    /// `2 * half_dims` cells of `voxel_size` meters around it.
    pub fn build(
        center: Point3D,
        half_dims: (usize, usize),
        voxel_size: f64,
        index: &ObstacleIndex,
    ) -> Self {
        let rows = 2 * half_dims.0;
        let cols = 2 * half_dims.1;
        let mut grid = DMatrix::from_element(rows, cols, false);

        let north_min = center.x - voxel_size * half_dims.0 as f64;
        let east_min = center.y - voxel_size * half_dims.1 as f64;

        // Half-diagonal of the grid plus the largest footprint extent: no
        // obstacle farther than this can intersect the grid
        let half_diag = ((half_dims.0 as f64 * voxel_size).powi(2)
            + (half_dims.1 as f64 * voxel_size).powi(2))
        .sqrt();
        let query_radius = half_diag + index.max_poly_xy();

        let altitude = -center.z;
        for i in index.query_radius(Point2D::new(center.x, center.y), query_radius) {
            let poly = index.polygon(i);
            if poly.height() < altitude {
                continue;
            }

            let (x_min, x_max, y_min, y_max) = poly.bounding_box();
            let r0 = clamp_cell((x_min - north_min) / voxel_size, rows);
            let r1 = clamp_cell((x_max - north_min) / voxel_size, rows);
            let c0 = clamp_cell((y_min - east_min) / voxel_size, cols);
            let c1 = clamp_cell((y_max - east_min) / voxel_size, cols);

            for (r, c) in iproduct!(r0..=r1, c0..=c1) {
                grid[(r, c)] = true;
            }
        }

        LocalVoxelMap { grid, voxel_size, north_min, east_min }
    }

    /// Grid shape as (rows, cols) = (north cells, east cells)
    pub fn shape(&self) -> (usize, usize) {
        (self.grid.nrows(), self.grid.ncols())
    }

    /// Cell at the vehicle's position
    pub fn center_cell(&self) -> GridCell {
        GridCell::new((self.grid.nrows() / 2) as i32, (self.grid.ncols() / 2) as i32)
    }

    pub fn voxel_size(&self) -> f64 {
        self.voxel_size
    }

    /// World-space minima of the grid as (north_min, east_min)
    pub fn origin(&self) -> (f64, f64) {
        (self.north_min, self.east_min)
    }

    pub fn in_bounds(&self, cell: GridCell) -> bool {
        cell.x >= 0
            && (cell.x as usize) < self.grid.nrows()
            && cell.y >= 0
            && (cell.y as usize) < self.grid.ncols()
    }

    /// Whether the cell is occupied; out-of-bounds cells read as free.
    pub fn is_occupied(&self, cell: GridCell) -> bool {
        self.in_bounds(cell) && self.grid[(cell.x as usize, cell.y as usize)]
    }

    pub fn occupied_cells(&self) -> Vec<GridCell> {
        let mut cells = Vec::new();
        for (r, c) in iproduct!(0..self.grid.nrows(), 0..self.grid.ncols()) {
            if self.grid[(r, c)] {
                cells.push(GridCell::new(r as i32, c as i32));
            }
        }
        cells
    }

    #[cfg(test)]
    pub(crate) fn from_grid(grid: DMatrix<bool>, voxel_size: f64) -> Self {
        LocalVoxelMap { grid, voxel_size, north_min: 0.0, east_min: 0.0 }
    }
}

/// Discretize a world offset to a cell index clamped into the grid.
fn clamp_cell(scaled: f64, dim: usize) -> usize {
    let cell = scaled.floor() as i64;
    cell.clamp(0, dim as i64 - 1) as usize
}
