//! Obstacle footprint polygon with a height ceiling

use crate::common::{ObstacleRegion, Point2D};

/// Tolerance for treating a point as lying on a polygon edge.
const EDGE_EPS: f64 = 1e-9;

/// Planar obstacle footprint: a simple polygon plus the altitude its
/// obstacle reaches up to. Immutable once constructed; area and centroid
/// are derived at construction time.
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<Point2D>,
    height: f64,
    area: f64,
    centroid: Point2D,
}

impl Polygon {
    /// Build from a closed ring of vertices (closing vertex not repeated)
    /// and a height ceiling. The ring must describe a simple polygon.
    pub fn new(vertices: Vec<Point2D>, height: f64) -> Self {
        let (area, centroid) = Self::shoelace(&vertices);
        Polygon { vertices, height, area, centroid }
    }

    /// Axis-aligned rectangle footprint, the shape produced by inflating an
    /// obstacle record's half-extents.
    pub fn rectangle(x_min: f64, x_max: f64, y_min: f64, y_max: f64, height: f64) -> Self {
        Self::new(
            vec![
                Point2D::new(x_min, y_min),
                Point2D::new(x_min, y_max),
                Point2D::new(x_max, y_max),
                Point2D::new(x_max, y_min),
            ],
            height,
        )
    }

    /// Axis-aligned bounds as (x_min, x_max, y_min, y_max).
    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for v in &self.vertices {
            x_min = x_min.min(v.x);
            x_max = x_max.max(v.x);
            y_min = y_min.min(v.y);
            y_max = y_max.max(v.y);
        }
        (x_min, x_max, y_min, y_max)
    }

    /// Signed shoelace area and centroid of the ring.
    fn shoelace(vertices: &[Point2D]) -> (f64, Point2D) {
        let n = vertices.len();
        if n < 3 {
            let c = vertices.first().copied().unwrap_or_else(Point2D::origin);
            return (0.0, c);
        }

        let mut twice_area = 0.0;
        let mut cx = 0.0;
        let mut cy = 0.0;
        for i in 0..n {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            let cross = a.x * b.y - b.x * a.y;
            twice_area += cross;
            cx += (a.x + b.x) * cross;
            cy += (a.y + b.y) * cross;
        }

        let area = twice_area / 2.0;
        if area.abs() < EDGE_EPS {
            // Degenerate ring, fall back to the vertex mean
            let mx = vertices.iter().map(|v| v.x).sum::<f64>() / n as f64;
            let my = vertices.iter().map(|v| v.y).sum::<f64>() / n as f64;
            return (0.0, Point2D::new(mx, my));
        }

        (area.abs(), Point2D::new(cx / (6.0 * area), cy / (6.0 * area)))
    }

    fn on_edge(a: Point2D, b: Point2D, p: Point2D) -> bool {
        let abx = b.x - a.x;
        let aby = b.y - a.y;
        let apx = p.x - a.x;
        let apy = p.y - a.y;

        let cross = abx * apy - aby * apx;
        let len_sq = abx * abx + aby * aby;
        if cross * cross > EDGE_EPS * len_sq.max(1.0) {
            return false;
        }

        let dot = apx * abx + apy * aby;
        dot >= -EDGE_EPS && dot <= len_sq + EDGE_EPS
    }
}

impl ObstacleRegion for Polygon {
    /// Even-odd containment with an inclusive boundary. Treating boundary
    /// points as inside is the collision-safe direction.
    fn contains(&self, point: Point2D) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }

        for i in 0..n {
            if Self::on_edge(self.vertices[i], self.vertices[(i + 1) % n], point) {
                return true;
            }
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let vi = self.vertices[i];
            let vj = self.vertices[j];
            if (vi.y > point.y) != (vj.y > point.y) {
                let x_cross = vj.x + (point.y - vj.y) / (vi.y - vj.y) * (vi.x - vj.x);
                if point.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn coords(&self) -> &[Point2D] {
        &self.vertices
    }

    fn area(&self) -> f64 {
        self.area
    }

    fn center(&self) -> Point2D {
        self.centroid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Polygon {
        Polygon::rectangle(0.0, 1.0, 0.0, 1.0, 10.0)
    }

    #[test]
    fn test_contains_interior_point() {
        assert!(unit_square().contains(Point2D::new(0.5, 0.5)));
    }

    #[test]
    fn test_excludes_exterior_point() {
        let sq = unit_square();
        assert!(!sq.contains(Point2D::new(1.5, 0.5)));
        assert!(sq.disjoint_from(Point2D::new(-0.1, 0.5)));
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let sq = unit_square();
        assert!(sq.contains(Point2D::new(0.0, 0.5)));
        assert!(sq.contains(Point2D::new(1.0, 1.0)));
    }

    #[test]
    fn test_area_and_centroid() {
        let sq = Polygon::rectangle(0.0, 2.0, 0.0, 4.0, 5.0);
        assert!((sq.area() - 8.0).abs() < 1e-10);
        let c = sq.center();
        assert!((c.x - 1.0).abs() < 1e-10);
        assert!((c.y - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_height_ceiling() {
        assert_eq!(unit_square().height(), 10.0);
    }

    #[test]
    fn test_bounding_box() {
        let sq = Polygon::rectangle(-1.0, 2.0, 3.0, 7.0, 1.0);
        assert_eq!(sq.bounding_box(), (-1.0, 2.0, 3.0, 7.0));
    }

    #[test]
    fn test_non_rectangular_polygon() {
        // Right triangle, legs of length 4
        let tri = Polygon::new(
            vec![
                Point2D::new(0.0, 0.0),
                Point2D::new(4.0, 0.0),
                Point2D::new(0.0, 4.0),
            ],
            3.0,
        );
        assert!((tri.area() - 8.0).abs() < 1e-10);
        assert!(tri.contains(Point2D::new(1.0, 1.0)));
        assert!(!tri.contains(Point2D::new(3.0, 3.0)));
    }
}
