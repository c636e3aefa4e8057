// Receding-horizon planning demo
//
// Builds a synthetic obstacle field, plans a global path over a
// probabilistic roadmap, converts it to waypoints, and runs the local
// obstacle check the flight controller would perform each tick.

use gnuplot::{AxesCommon, Caption, Color, Figure, PointSize, PointSymbol};
use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use drone_motion_planning::{
    astar_path, closest_node, detect_local_obstacle, prune_path, waypoints_from_path,
    AltitudeBand, FreeSpaceSampler, LocalVoxelMap, ObstacleIndex, ObstacleRecord,
    ObstacleRegion, Point2D, Point3D, RoadmapBuilder, RoadmapConfig,
};

const N_SAMPLE: usize = 300; // number of roadmap sample points
const SAFETY_DIST: f64 = 3.0; // obstacle inflation [m]
const FLIGHT_ALT: f64 = 10.0; // fixed flight altitude [m]
const PRUNE_EPSILON: f64 = 1e-3; // collinearity tolerance
const VOXEL_SIZE: f64 = 1.0; // local grid cell size [m]
const DEADBAND: usize = 2; // ignored leading ray cells

fn main() {
    println!("Receding-horizon planning demo");

    // Synthetic city block: a loose grid of buildings of varying heights
    let mut records = Vec::new();
    for i in 0..4 {
        for j in 0..4 {
            let north = 30.0 + 40.0 * i as f64;
            let east = 30.0 + 40.0 * j as f64;
            let height = 8.0 + 6.0 * ((i + j) % 3) as f64;
            records.push(ObstacleRecord::new(north, east, height / 2.0, 6.0, 6.0, height / 2.0));
        }
    }

    let index =
        ObstacleIndex::from_records(&records, SAFETY_DIST, AltitudeBand::Fixed(FLIGHT_ALT))
            .expect("obstacle table is non-empty");

    println!("Sampling {} free-space points...", N_SAMPLE);
    let sampler = FreeSpaceSampler::new(&index);
    let mut rng = StdRng::seed_from_u64(42);
    let nodes = sampler
        .sample_with_rng(N_SAMPLE, &mut rng)
        .expect("sampling box is not fully obstructed");

    println!("Building roadmap...");
    let builder = RoadmapBuilder::with_config(
        &index,
        RoadmapConfig { k_neighbors: 10, collision_stride: 5 },
    );
    let graph = builder.build(nodes);
    println!("Roadmap: {} nodes, {} edges", graph.len(), graph.edge_count());

    let vehicle = Point3D::new(10.0, 10.0, -FLIGHT_ALT);
    let start = closest_node(&graph, Point2D::new(10.0, 10.0)).expect("graph is non-empty");
    let goal = closest_node(&graph, Point2D::new(160.0, 160.0)).expect("graph is non-empty");

    println!("Searching...");
    let path = match astar_path(&graph, start, goal) {
        Ok(path) => path,
        Err(e) => {
            println!("{}", e);
            return;
        }
    };
    println!("Path: {} points, cost {:.1}", path.len(), path.cost);

    let pruned = prune_path(&path, PRUNE_EPSILON);
    let waypoints = waypoints_from_path(&pruned, vehicle);
    println!("Waypoints after pruning: {}", waypoints.len());
    for wp in &waypoints {
        println!(
            "  ({}, {}, {}) heading {:.1} deg",
            wp.x,
            wp.y,
            wp.z,
            wp.heading.to_degrees()
        );
    }

    // One control tick of the local check toward the first waypoint
    let map = LocalVoxelMap::build(vehicle, (10, 10), VOXEL_SIZE, &index);
    if let Some(wp) = waypoints.first() {
        let displacement =
            Vector2::new(wp.x as f64 - vehicle.x, wp.y as f64 - vehicle.y);
        let scan = detect_local_obstacle(&map, displacement, DEADBAND);
        if scan.blocked {
            println!("Local check: blocked at {:?}, replan required", scan.first_blocked);
        } else {
            println!("Local check: next leg is clear");
        }
    }

    // Visualization
    let mut fig = Figure::new();
    let axes = fig
        .axes2d()
        .set_title("Receding-horizon PRM planning", &[])
        .set_x_label("east [m]", &[])
        .set_y_label("north [m]", &[])
        .set_aspect_ratio(gnuplot::AutoOption::Fix(1.0));

    for poly in index.polygons() {
        let mut xs: Vec<f64> = poly.coords().iter().map(|v| v.y).collect();
        let mut ys: Vec<f64> = poly.coords().iter().map(|v| v.x).collect();
        xs.push(xs[0]);
        ys.push(ys[0]);
        axes.lines(&xs, &ys, &[Color("black")]);
    }

    let sample_e: Vec<f64> = graph.nodes().iter().map(|n| n.y).collect();
    let sample_n: Vec<f64> = graph.nodes().iter().map(|n| n.x).collect();
    axes.points(
        &sample_e,
        &sample_n,
        &[Caption("Samples"), Color("gray"), PointSymbol('.'), PointSize(0.5)],
    );

    for (a, b, _) in graph.edges() {
        let (na, nb) = (graph.node(a), graph.node(b));
        axes.lines(&[na.y, nb.y], &[na.x, nb.x], &[Color("#dddddd")]);
    }

    axes.lines(
        &pruned.points.iter().map(|p| p.y).collect::<Vec<_>>(),
        &pruned.points.iter().map(|p| p.x).collect::<Vec<_>>(),
        &[Caption("Path"), Color("green")],
    );

    fig.save_to_svg("./receding_horizon.svg", 640, 640).unwrap();
    println!("Plot saved to ./receding_horizon.svg");
}
