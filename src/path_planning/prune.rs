//! Collinearity-based path simplification
//!
//! Removes interior path points whose 2D projection is collinear with its
//! neighbors within a tolerance, so long straight runs collapse to their
//! endpoints before waypoint generation.

use nalgebra::Matrix3;

use crate::common::{Path3D, Point3D};

/// Twice the signed area of the triangle spanned by the 2D projections,
/// via the homogeneous 3x3 determinant.
fn collinearity_det(p1: Point3D, p2: Point3D, p3: Point3D) -> f64 {
    Matrix3::new(
        p1.x, p1.y, 1.0, //
        p2.x, p2.y, 1.0, //
        p3.x, p3.y, 1.0,
    )
    .determinant()
}

/// Remove interior points collinear with their neighbors within `epsilon`.
///
/// Consecutive triples are examined in place; when the middle point is
/// dropped the same index is re-examined so runs of collinear points
/// collapse fully. The first and last points are never removed and the
/// accumulated cost is carried over unchanged.
pub fn prune_path(path: &Path3D, epsilon: f64) -> Path3D {
    let mut points = path.points.clone();
    let mut i = 0;

    while i + 2 < points.len() {
        let det = collinearity_det(points[i], points[i + 1], points[i + 2]);
        if det.abs() < epsilon {
            points.remove(i + 1);
        } else {
            i += 1;
        }
    }

    Path3D::from_points(points, path.cost)
}
