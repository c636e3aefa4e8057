//! Waypoint generation with headings relative to true north
//!
//! Each waypoint is oriented toward the next travel direction. The heading
//! is the angle between the displacement and the north unit vector (1, 0),
//! negated for westward displacements: positive means an eastward
//! (clockwise) rotation, negative westward, in (-pi, pi].

use nalgebra::Vector2;

use crate::common::{Path3D, Point3D, Waypoint};

/// Convert a planned path into oriented waypoints.
///
/// The first heading is taken from `local_position` to the first path
/// point; coordinates are truncated to integers. A zero-length displacement
/// (duplicate consecutive points) retains the previous heading instead of
/// producing a NaN; a degenerate first segment gets heading 0.
pub fn waypoints_from_path(path: &Path3D, local_position: Point3D) -> Vec<Waypoint> {
    let mut waypoints = Vec::with_capacity(path.len());
    let mut prev_heading = 0.0;

    for (i, point) in path.points.iter().enumerate() {
        let previous = if i == 0 { local_position } else { path.points[i - 1] };
        let heading = displacement_heading(previous, *point).unwrap_or(prev_heading);
        prev_heading = heading;

        waypoints.push(Waypoint::new(
            point.x as i32,
            point.y as i32,
            point.z as i32,
            heading,
        ));
    }

    waypoints
}

/// Signed heading of the displacement from `from` to `to`, or `None` when
/// the displacement has no direction.
fn displacement_heading(from: Point3D, to: Point3D) -> Option<f64> {
    let v = Vector2::new(to.x - from.x, to.y - from.y);
    let norm = v.norm();
    if norm == 0.0 {
        return None;
    }
    let unit = v / norm;

    // Angle to true north, in [0, pi]; clamp guards rounding at the poles
    let north = Vector2::new(1.0, 0.0);
    let angle = north.dot(&unit).clamp(-1.0, 1.0).acos();

    // Westward displacements rotate counter-clockwise
    Some(if unit.y < 0.0 { -angle } else { angle })
}
