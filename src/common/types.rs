//! Common types used throughout drone_motion_planning
//!
//! Coordinates follow the local frame of the obstacle data: x = north,
//! y = east. Planned points and waypoints carry an up-positive altitude in
//! `z`; a vehicle position is NED, so its altitude magnitude is `-z`.

use nalgebra::{Vector2, Vector3};

/// 2D point representation (north, east)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn distance(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn to_vector(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from(tuple: (f64, f64)) -> Self {
        Self { x: tuple.0, y: tuple.1 }
    }
}

impl From<Vector2<f64>> for Point2D {
    fn from(v: Vector2<f64>) -> Self {
        Self { x: v[0], y: v[1] }
    }
}

/// 3D point representation (north, east, altitude-or-down per context)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0 }
    }

    pub fn distance(&self, other: &Point3D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2) + (self.z - other.z).powi(2))
            .sqrt()
    }

    /// Projection onto the north/east plane
    pub fn xy(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<(f64, f64, f64)> for Point3D {
    fn from(tuple: (f64, f64, f64)) -> Self {
        Self { x: tuple.0, y: tuple.1, z: tuple.2 }
    }
}

/// Discrete grid cell for rasterization and the local occupancy map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Path through 3D space with its accumulated cost
#[derive(Debug, Clone)]
pub struct Path3D {
    pub points: Vec<Point3D>,
    pub cost: f64,
}

impl Path3D {
    pub fn new() -> Self {
        Self { points: Vec::new(), cost: 0.0 }
    }

    pub fn from_points(points: Vec<Point3D>, cost: f64) -> Self {
        Self { points, cost }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn x_coords(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn y_coords(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    pub fn total_length(&self) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        self.points.windows(2).map(|w| w[0].distance(&w[1])).sum()
    }
}

impl Default for Path3D {
    fn default() -> Self {
        Self::new()
    }
}

/// Flight waypoint: truncated local coordinates plus a heading in radians
/// relative to true north (positive eastward/clockwise).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub heading: f64,
}

impl Waypoint {
    pub fn new(x: i32, y: i32, z: i32, heading: f64) -> Self {
        Self { x, y, z, heading }
    }
}
