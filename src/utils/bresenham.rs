//! Symmetric digital line rasterization
//!
//! Integer Bresenham walk between two cells, inclusive of both endpoints.
//! Used for roadmap edge certification and local ray casting.

use crate::common::GridCell;

/// Rasterize the line from (x0, y0) to (x1, y1), endpoints included.
pub fn bresenham_line(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<GridCell> {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };

    let mut err = dx + dy;
    let mut x = x0;
    let mut y = y0;
    let mut cells = Vec::with_capacity((dx - dy) as usize + 1);

    loop {
        cells.push(GridCell::new(x, y));
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }

    cells
}
