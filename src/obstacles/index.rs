//! Obstacle set with a spatial index over footprint centers
//!
//! Built once from the raw obstacle table and treated as read-only by every
//! query site afterwards; it can be shared freely by reference.

use crate::common::{ObstacleRegion, PlannerError, PlannerResult, Point2D, Point3D};
use crate::obstacles::polygon::Polygon;

/// One row of the raw obstacle table supplied by an external loader:
/// center position plus half-extents along each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleRecord {
    pub north: f64,
    pub east: f64,
    pub alt: f64,
    pub d_north: f64,
    pub d_east: f64,
    pub d_alt: f64,
}

impl ObstacleRecord {
    pub fn new(north: f64, east: f64, alt: f64, d_north: f64, d_east: f64, d_alt: f64) -> Self {
        Self { north, east, alt, d_north, d_east, d_alt }
    }
}

impl From<[f64; 6]> for ObstacleRecord {
    fn from(row: [f64; 6]) -> Self {
        Self::new(row[0], row[1], row[2], row[3], row[4], row[5])
    }
}

/// Flight altitude configuration for sampling: a single fixed altitude or
/// a [min, max] band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AltitudeBand {
    Fixed(f64),
    Range(f64, f64),
}

impl AltitudeBand {
    fn limits(&self) -> (f64, f64) {
        match *self {
            AltitudeBand::Fixed(alt) => (alt, alt),
            AltitudeBand::Range(lo, hi) => (lo, hi),
        }
    }
}

/// Axis-aligned sampling box derived from the inflated obstacle set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub z_min: f64,
    pub z_max: f64,
}

/// Nearest-neighbor index over a fixed set of 2D points.
#[derive(Debug, Clone)]
pub(crate) struct KdIndex {
    points: Vec<Point2D>,
}

impl KdIndex {
    pub(crate) fn new(points: Vec<Point2D>) -> Self {
        KdIndex { points }
    }

    /// Indices of all points within `radius` of the query (inclusive).
    pub(crate) fn query_radius(&self, query: Point2D, radius: f64) -> Vec<usize> {
        self.points
            .iter()
            .enumerate()
            .filter_map(|(i, p)| if p.distance(&query) <= radius { Some(i) } else { None })
            .collect()
    }

    /// Index of the nearest point; ties break toward the lower index so that
    /// identical inputs always produce identical results.
    pub(crate) fn nearest(&self, query: Point2D) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, p) in self.points.iter().enumerate() {
            let d = p.distance(&query);
            match best {
                Some((_, bd)) if d >= bd => {}
                _ => best = Some((i, d)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// The `k` nearest points as (index, distance), closest first, ties
    /// broken by index.
    pub(crate) fn query_knn(&self, query: Point2D, k: usize) -> Vec<(usize, f64)> {
        let mut distances: Vec<(usize, f64)> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (i, p.distance(&query)))
            .collect();
        distances.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        distances.truncate(k);
        distances
    }
}

/// The full obstacle set: inflated footprints, their raw centers, a spatial
/// index over those centers, and the sampling box.
#[derive(Debug, Clone)]
pub struct ObstacleIndex {
    polygons: Vec<Polygon>,
    centers: Vec<Point2D>,
    tree: KdIndex,
    bounds: SamplingBounds,
    max_poly_xy: f64,
}

impl ObstacleIndex {
    /// Build the index from the raw obstacle table. Each record's half
    /// extents are inflated by `safety_dist` and turned into a rectangle
    /// footprint with ceiling `alt + d_alt`. `centers[i]` keeps the raw
    /// record center, which is what the spatial index is built over.
    pub fn from_records(
        records: &[ObstacleRecord],
        safety_dist: f64,
        altitude: AltitudeBand,
    ) -> PlannerResult<Self> {
        if records.is_empty() {
            return Err(PlannerError::InvalidParameter(
                "obstacle table is empty".to_string(),
            ));
        }

        let mut polygons = Vec::with_capacity(records.len());
        let mut centers = Vec::with_capacity(records.len());
        let mut max_poly_xy: f64 = 0.0;

        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;

        for r in records {
            polygons.push(Polygon::rectangle(
                r.north - r.d_north - safety_dist,
                r.north + r.d_north + safety_dist,
                r.east - r.d_east - safety_dist,
                r.east + r.d_east + safety_dist,
                r.alt + r.d_alt,
            ));
            centers.push(Point2D::new(r.north, r.east));

            // Half-extents are half widths, hence the factor of two. Radius
            // queries that need completeness add this bound to their radius.
            max_poly_xy = max_poly_xy.max(2.0 * r.d_north).max(2.0 * r.d_east);

            x_min = x_min.min(r.north - r.d_north - safety_dist);
            x_max = x_max.max(r.north + r.d_north + safety_dist);
            y_min = y_min.min(r.east - r.d_east - safety_dist);
            y_max = y_max.max(r.east + r.d_east + safety_dist);
        }

        let (z_min, z_max) = altitude.limits();
        let tree = KdIndex::new(centers.clone());

        Ok(ObstacleIndex {
            polygons,
            centers,
            tree,
            bounds: SamplingBounds { x_min, x_max, y_min, y_max, z_min, z_max },
            max_poly_xy,
        })
    }

    /// Obstacle indices whose recorded center lies within `radius` of
    /// `center` (2D Euclidean).
    pub fn query_radius(&self, center: Point2D, radius: f64) -> Vec<usize> {
        self.tree.query_radius(center, radius)
    }

    /// Index of the obstacle whose center is nearest to `p`.
    pub fn nearest(&self, p: Point2D) -> usize {
        // The record table is non-empty by construction
        self.tree.nearest(p).unwrap_or(0)
    }

    /// Whether the 3D point collides with some obstacle: a polygon within
    /// `max_poly_xy` of the xy projection contains it and reaches at least
    /// up to its altitude.
    pub fn in_collision(&self, p: Point3D) -> bool {
        let xy = p.xy();
        self.query_radius(xy, self.max_poly_xy).into_iter().any(|i| {
            let poly = &self.polygons[i];
            poly.contains(xy) && poly.height() >= p.z
        })
    }

    pub fn polygon(&self, index: usize) -> &Polygon {
        &self.polygons[index]
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn centers(&self) -> &[Point2D] {
        &self.centers
    }

    pub fn bounds(&self) -> &SamplingBounds {
        &self.bounds
    }

    /// Conservative bound on the largest footprint extent in the xy plane.
    pub fn max_poly_xy(&self) -> f64 {
        self.max_poly_xy
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_field() -> ObstacleIndex {
        let records = vec![
            ObstacleRecord::new(0.0, 0.0, 5.0, 2.0, 2.0, 5.0),
            ObstacleRecord::new(20.0, 0.0, 10.0, 3.0, 3.0, 10.0),
            ObstacleRecord::new(0.0, 30.0, 2.0, 1.0, 4.0, 2.0),
        ];
        ObstacleIndex::from_records(&records, 1.0, AltitudeBand::Fixed(5.0)).unwrap()
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let result = ObstacleIndex::from_records(&[], 1.0, AltitudeBand::Fixed(5.0));
        assert!(matches!(result, Err(PlannerError::InvalidParameter(_))));
    }

    #[test]
    fn test_inflated_footprint_and_ceiling() {
        let index = small_field();
        let poly = index.polygon(0);
        // Half extent 2.0 inflated by 1.0 each side
        assert_eq!(poly.bounding_box(), (-3.0, 3.0, -3.0, 3.0));
        assert_eq!(poly.height(), 10.0);
    }

    #[test]
    fn test_max_poly_xy_is_largest_full_extent() {
        let index = small_field();
        // Obstacle 2 has d_east = 4.0, so the widest footprint spans 8.0
        assert!((index.max_poly_xy() - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_query_radius_exactness() {
        let index = small_field();
        let hits = index.query_radius(Point2D::new(0.0, 0.0), 20.0);
        assert_eq!(hits, vec![0, 1]);
        // Center 2 sits exactly 20.0 away; the boundary is included
        let boundary = index.query_radius(Point2D::new(0.0, 10.0), 20.0);
        assert_eq!(boundary, vec![0, 2]);
    }

    #[test]
    fn test_collision_inside_and_below_ceiling() {
        let index = small_field();
        assert!(index.in_collision(Point3D::new(0.0, 0.0, 5.0)));
    }

    #[test]
    fn test_no_collision_above_ceiling() {
        let index = small_field();
        // Obstacle 0 tops out at 10.0
        assert!(!index.in_collision(Point3D::new(0.0, 0.0, 10.5)));
    }

    #[test]
    fn test_no_collision_outside_all_footprints() {
        let index = small_field();
        assert!(!index.in_collision(Point3D::new(10.0, 15.0, 5.0)));
    }

    #[test]
    fn test_nearest_picks_closest_center() {
        let index = small_field();
        assert_eq!(index.nearest(Point2D::new(19.0, 1.0)), 1);
        assert_eq!(index.nearest(Point2D::new(1.0, 28.0)), 2);
    }

    #[test]
    fn test_bounds_cover_inflated_extents() {
        let index = small_field();
        let b = index.bounds();
        assert_eq!(b.x_min, -3.0);
        assert_eq!(b.x_max, 24.0);
        assert_eq!(b.y_min, -4.0);
        assert_eq!(b.y_max, 35.0);
        assert_eq!(b.z_min, 5.0);
        assert_eq!(b.z_max, 5.0);
    }
}
