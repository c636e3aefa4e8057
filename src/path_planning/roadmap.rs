//! Probabilistic roadmap construction
//!
//! Connects each sampled node to its nearest neighbors when the straight
//! segment between them is certified free by rasterized collision checking.
//!
//! The certification is approximate on purpose: only every
//! `collision_stride`-th cell of the Bresenham line is tested, and each
//! tested cell is checked against the single nearest obstacle. A thin
//! obstacle sitting between two sampled cells can therefore be missed.
//! Widening the stride trades safety for speed; it is configurable.

use crate::common::{ObstacleRegion, Point2D, Point3D};
use crate::obstacles::index::KdIndex;
use crate::obstacles::ObstacleIndex;
use crate::utils::bresenham_line;

/// Configuration for roadmap construction
#[derive(Debug, Clone)]
pub struct RoadmapConfig {
    /// Number of nearest neighbors considered per node
    pub k_neighbors: usize,
    /// Rasterized cells skipped between collision tests along an edge
    pub collision_stride: usize,
}

impl Default for RoadmapConfig {
    fn default() -> Self {
        Self { k_neighbors: 10, collision_stride: 20 }
    }
}

/// Undirected weighted graph over collision-free sample points.
/// Connectivity is decided in the 2D projection; nodes keep their altitude.
#[derive(Debug, Clone)]
pub struct RoadmapGraph {
    nodes: Vec<Point3D>,
    adjacency: Vec<Vec<(usize, f64)>>,
}

impl RoadmapGraph {
    pub fn with_nodes(nodes: Vec<Point3D>) -> Self {
        let adjacency = vec![Vec::new(); nodes.len()];
        RoadmapGraph { nodes, adjacency }
    }

    /// Insert an undirected edge. Self-loops and duplicates are ignored.
    pub fn add_edge(&mut self, a: usize, b: usize, weight: f64) {
        if a == b || self.has_edge(a, b) {
            return;
        }
        self.adjacency[a].push((b, weight));
        self.adjacency[b].push((a, weight));
    }

    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.adjacency[a].iter().any(|&(n, _)| n == b)
    }

    pub fn nodes(&self) -> &[Point3D] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Point3D {
        self.nodes[index]
    }

    pub fn neighbors(&self, index: usize) -> &[(usize, f64)] {
        &self.adjacency[index]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|n| n.len()).sum::<usize>() / 2
    }

    /// All edges with a < b, for visualization.
    pub fn edges(&self) -> Vec<(usize, usize, f64)> {
        let mut edges = Vec::new();
        for (a, neighbors) in self.adjacency.iter().enumerate() {
            for &(b, w) in neighbors {
                if a < b {
                    edges.push((a, b, w));
                }
            }
        }
        edges
    }
}

/// Builds a roadmap over a node set against a fixed obstacle index
pub struct RoadmapBuilder<'a> {
    index: &'a ObstacleIndex,
    config: RoadmapConfig,
}

impl<'a> RoadmapBuilder<'a> {
    pub fn new(index: &'a ObstacleIndex) -> Self {
        Self::with_config(index, RoadmapConfig::default())
    }

    pub fn with_config(index: &'a ObstacleIndex, config: RoadmapConfig) -> Self {
        RoadmapBuilder { index, config }
    }

    /// Connect each node to its k nearest neighbors where the segment
    /// between them passes the rasterized collision check. Edge weights are
    /// the Euclidean distance between the endpoints.
    pub fn build(&self, nodes: Vec<Point3D>) -> RoadmapGraph {
        let node_tree = KdIndex::new(nodes.iter().map(|n| n.xy()).collect());
        let mut graph = RoadmapGraph::with_nodes(nodes);

        for i in 0..graph.len() {
            let n1 = graph.node(i);
            // k + 1 because the query set contains the node itself
            let neighbors = node_tree.query_knn(n1.xy(), self.config.k_neighbors + 1);

            for (j, _) in neighbors {
                if i == j || graph.has_edge(i, j) {
                    continue;
                }
                let n2 = graph.node(j);
                // Coincident samples would produce a zero-weight edge
                if n1 == n2 {
                    continue;
                }
                if self.segment_is_clear(n1.xy(), n2.xy()) {
                    graph.add_edge(i, j, n1.distance(&n2));
                }
            }
        }

        graph
    }

    /// Sample every `collision_stride`-th cell of the rasterized segment and
    /// test it against the nearest obstacle footprint.
    fn segment_is_clear(&self, a: Point2D, b: Point2D) -> bool {
        let cells = bresenham_line(a.x as i32, a.y as i32, b.x as i32, b.y as i32);
        let stride = self.config.collision_stride.max(1);

        for cell in cells.iter().step_by(stride) {
            let p = Point2D::new(cell.x as f64, cell.y as f64);
            let nearest = self.index.polygon(self.index.nearest(p));
            if !nearest.disjoint_from(p) {
                return false;
            }
        }

        true
    }
}
