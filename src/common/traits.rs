//! Common traits defining interfaces at the geometry seam
//!
//! The spatial index and the rasterized collision checks only need a small
//! capability surface from an obstacle footprint, so they are written against
//! this trait rather than a concrete geometry type.

use crate::common::types::Point2D;

/// Capability interface for an obstacle footprint with a height ceiling.
pub trait ObstacleRegion {
    /// Whether the 2D point lies inside the footprint (boundary inclusive).
    fn contains(&self, point: Point2D) -> bool;

    /// Whether the 2D point lies strictly outside the footprint.
    fn disjoint_from(&self, point: Point2D) -> bool {
        !self.contains(point)
    }

    /// Height ceiling of the obstacle.
    fn height(&self) -> f64;

    /// Footprint vertices as a closed ring without the repeated closing vertex.
    fn coords(&self) -> &[Point2D];

    /// Footprint area.
    fn area(&self) -> f64;

    /// Footprint centroid.
    fn center(&self) -> Point2D;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct HalfPlane;

    impl ObstacleRegion for HalfPlane {
        fn contains(&self, point: Point2D) -> bool {
            point.x >= 0.0
        }
        fn height(&self) -> f64 {
            10.0
        }
        fn coords(&self) -> &[Point2D] {
            &[]
        }
        fn area(&self) -> f64 {
            f64::INFINITY
        }
        fn center(&self) -> Point2D {
            Point2D::origin()
        }
    }

    #[test]
    fn test_disjoint_is_negated_contains() {
        let region = HalfPlane;
        assert!(region.contains(Point2D::new(1.0, 0.0)));
        assert!(!region.disjoint_from(Point2D::new(1.0, 0.0)));
        assert!(region.disjoint_from(Point2D::new(-1.0, 0.0)));
    }
}
