//! drone_motion_planning - collision-free flight path planning for UAVs
//!
//! This crate plans paths for an aerial vehicle through a field of
//! rectangular-footprint obstacles and supports online replanning as the
//! vehicle moves. The global planner samples collision-free points, builds
//! a probabilistic roadmap of line-of-sight-certified edges, searches it
//! with A*, simplifies the result, and emits oriented waypoints. The
//! receding-horizon side keeps a local occupancy grid around the vehicle
//! and flags when the current heading runs into an obstacle.

// Core modules
pub mod common;
pub mod utils;

// Planning modules
pub mod obstacles;
pub mod path_planning;
pub mod receding_horizon;

// Re-export common types for convenience
pub use common::{GridCell, Path3D, Point2D, Point3D, Waypoint};
pub use common::{ObstacleRegion, PlannerError, PlannerResult};
pub use obstacles::{AltitudeBand, ObstacleIndex, ObstacleRecord, Polygon, SamplingBounds};
pub use path_planning::{
    astar, astar_path, closest_node, prune_path, waypoints_from_path, FreeSpaceSampler,
    RoadmapBuilder, RoadmapConfig, RoadmapGraph, SamplerConfig,
};
pub use receding_horizon::{detect_local_obstacle, LocalScan, LocalVoxelMap};

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Deterministic obstacle field for end-to-end checks
    fn field() -> ObstacleIndex {
        let records = vec![
            ObstacleRecord::new(20.0, 20.0, 15.0, 5.0, 5.0, 15.0),
            ObstacleRecord::new(60.0, 30.0, 20.0, 6.0, 6.0, 20.0),
            ObstacleRecord::new(40.0, 70.0, 12.0, 4.0, 8.0, 12.0),
            ObstacleRecord::new(80.0, 80.0, 18.0, 5.0, 5.0, 18.0),
        ];
        ObstacleIndex::from_records(&records, 3.0, AltitudeBand::Fixed(10.0)).unwrap()
    }

    fn plan_once(seed: u64) -> (Path3D, Vec<Waypoint>) {
        let index = field();
        let sampler = FreeSpaceSampler::new(&index);
        let mut rng = StdRng::seed_from_u64(seed);
        let nodes = sampler.sample_with_rng(150, &mut rng).unwrap();

        let builder = RoadmapBuilder::with_config(
            &index,
            RoadmapConfig { k_neighbors: 10, collision_stride: 5 },
        );
        let graph = builder.build(nodes);

        let start = closest_node(&graph, Point2D::new(0.0, 0.0)).unwrap();
        let goal = closest_node(&graph, Point2D::new(100.0, 100.0)).unwrap();
        let path = astar_path(&graph, start, goal).unwrap();
        let pruned = prune_path(&path, 1e-3);
        let waypoints = waypoints_from_path(&pruned, Point3D::new(0.0, 0.0, -10.0));
        (pruned, waypoints)
    }

    #[test]
    fn test_pipeline_is_deterministic_for_a_fixed_seed() {
        let (path_a, wp_a) = plan_once(11);
        let (path_b, wp_b) = plan_once(11);
        assert_eq!(path_a.points, path_b.points);
        assert_eq!(path_a.cost, path_b.cost);
        assert_eq!(wp_a, wp_b);
    }

    #[test]
    fn test_pipeline_produces_usable_waypoints() {
        let (path, waypoints) = plan_once(5);
        assert!(!waypoints.is_empty());
        assert_eq!(waypoints.len(), path.len());
        assert!(waypoints.iter().all(|w| w.heading.is_finite()));
        assert!(path.cost > 0.0);
    }
}
