//! A* search over the roadmap graph
//!
//! Canonical formulation: the cost stored per node is the true path cost
//! from the start, and the straight-line heuristic only enters the heap
//! priority. An exhausted open set is surfaced as a typed failure so callers
//! can tell "unreachable" apart from "already at the goal".

use ordered_float::NotNan;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::common::{Path3D, PlannerError, PlannerResult, Point2D, Point3D};
use crate::path_planning::roadmap::RoadmapGraph;

/// Straight-line distance heuristic between two roadmap nodes.
fn heuristic(a: Point3D, b: Point3D) -> f64 {
    a.distance(&b)
}

/// Index of the roadmap node nearest to an arbitrary point, used to attach
/// start and goal positions to the graph. Returns `None` on an empty graph.
pub fn closest_node(graph: &RoadmapGraph, p: Point2D) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, node) in graph.nodes().iter().enumerate() {
        let d = node.xy().distance(&p);
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

/// Search the roadmap from `start` to `goal` (node indices). Returns the
/// node index sequence start..=goal and its total cost.
pub fn astar(
    graph: &RoadmapGraph,
    start: usize,
    goal: usize,
) -> PlannerResult<(Vec<usize>, f64)> {
    let n = graph.len();
    if start >= n || goal >= n {
        return Err(PlannerError::InvalidParameter(format!(
            "node index out of range: start {}, goal {}, graph size {}",
            start, goal, n
        )));
    }

    if start == goal {
        return Ok((vec![start], 0.0));
    }

    let goal_point = graph.node(goal);

    let mut open_set = BinaryHeap::new();
    let mut cost_so_far: Vec<f64> = vec![f64::INFINITY; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    let mut closed = vec![false; n];

    cost_so_far[start] = 0.0;
    if let Ok(h0) = NotNan::new(heuristic(graph.node(start), goal_point)) {
        open_set.push((Reverse(h0), start));
    }

    while let Some((_, current)) = open_set.pop() {
        if current == goal {
            return Ok((reconstruct(&parent, start, goal), cost_so_far[goal]));
        }
        if closed[current] {
            continue;
        }
        closed[current] = true;

        for &(next, weight) in graph.neighbors(current) {
            if closed[next] {
                continue;
            }
            let new_cost = cost_so_far[current] + weight;
            if new_cost < cost_so_far[next] {
                cost_so_far[next] = new_cost;
                parent[next] = Some(current);
                let priority = new_cost + heuristic(graph.node(next), goal_point);
                if let Ok(priority) = NotNan::new(priority) {
                    open_set.push((Reverse(priority), next));
                }
            }
        }
    }

    Err(PlannerError::NoPathFound(format!(
        "goal node {} unreachable from start node {}",
        goal, start
    )))
}

/// Convenience wrapper producing the path as 3D points.
pub fn astar_path(graph: &RoadmapGraph, start: usize, goal: usize) -> PlannerResult<Path3D> {
    let (indices, cost) = astar(graph, start, goal)?;
    let points = indices.into_iter().map(|i| graph.node(i)).collect();
    Ok(Path3D::from_points(points, cost))
}

fn reconstruct(parent: &[Option<usize>], start: usize, goal: usize) -> Vec<usize> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(p) = parent[current] {
        path.push(p);
        if p == start {
            break;
        }
        current = p;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Diamond graph: start(0) - A(1) - goal(3) is shorter than
    /// start(0) - B(2) - goal(3).
    fn diamond() -> RoadmapGraph {
        let mut graph = RoadmapGraph::with_nodes(vec![
            Point3D::new(0.0, 0.0, 5.0),
            Point3D::new(10.0, 2.0, 5.0),
            Point3D::new(10.0, -20.0, 5.0),
            Point3D::new(20.0, 0.0, 5.0),
        ]);
        graph.add_edge(0, 1, 10.0);
        graph.add_edge(1, 3, 10.0);
        graph.add_edge(0, 2, 22.0);
        graph.add_edge(2, 3, 22.0);
        graph
    }

    #[test]
    fn test_astar_picks_cheaper_branch() {
        let graph = diamond();
        let (path, cost) = astar(&graph, 0, 3).unwrap();
        assert_eq!(path, vec![0, 1, 3]);
        assert!((cost - 20.0).abs() < 1e-10);
    }

    #[test]
    fn test_astar_unreachable_goal_is_typed_failure() {
        let mut graph = RoadmapGraph::with_nodes(vec![
            Point3D::new(0.0, 0.0, 5.0),
            Point3D::new(10.0, 0.0, 5.0),
            Point3D::new(100.0, 100.0, 5.0),
        ]);
        graph.add_edge(0, 1, 10.0);

        let result = astar(&graph, 0, 2);
        assert!(matches!(result, Err(PlannerError::NoPathFound(_))));
    }

    #[test]
    fn test_astar_start_equals_goal() {
        let graph = diamond();
        let (path, cost) = astar(&graph, 2, 2).unwrap();
        assert_eq!(path, vec![2]);
        assert_eq!(cost, 0.0);
    }

    #[test]
    fn test_astar_path_points_match_indices() {
        let graph = diamond();
        let path = astar_path(&graph, 0, 3).unwrap();
        assert_eq!(path.points.first(), Some(&graph.node(0)));
        assert_eq!(path.points.last(), Some(&graph.node(3)));
        assert!((path.cost - 20.0).abs() < 1e-10);
    }

    #[test]
    fn test_astar_reroutes_around_missing_edge() {
        // Remove the cheap branch; the long way around must be taken
        let mut graph = RoadmapGraph::with_nodes(vec![
            Point3D::new(0.0, 0.0, 5.0),
            Point3D::new(10.0, 2.0, 5.0),
            Point3D::new(10.0, -20.0, 5.0),
            Point3D::new(20.0, 0.0, 5.0),
        ]);
        graph.add_edge(0, 2, 22.0);
        graph.add_edge(2, 3, 22.0);

        let (path, cost) = astar(&graph, 0, 3).unwrap();
        assert_eq!(path, vec![0, 2, 3]);
        assert!((cost - 44.0).abs() < 1e-10);
    }

    #[test]
    fn test_closest_node() {
        let graph = diamond();
        assert_eq!(closest_node(&graph, Point2D::new(9.0, 1.0)), Some(1));
        assert_eq!(closest_node(&graph, Point2D::new(-1.0, 0.0)), Some(0));

        let empty = RoadmapGraph::with_nodes(Vec::new());
        assert_eq!(closest_node(&empty, Point2D::origin()), None);
    }
}
