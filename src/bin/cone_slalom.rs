// Constrained RRT demo on a cone slalom course.
//
// The cones double as obstacles and as sampling targets, so the tree
// grows along the corridor the cones mark out.

use kinematic_rrt::utils::render_tree;
use kinematic_rrt::{ObstacleField, Point2D, Pose2D, RRTConfig, RRTPlanner, SampleTarget};

fn main() {
    println!("Constrained RRT cone slalom start!!");

    // Cone gates drifting to the left: (x, y, radius)
    let cones = vec![
        (2.0, 1.5, 0.3),
        (2.0, -1.5, 0.3),
        (4.0, 2.0, 0.3),
        (4.0, -1.0, 0.3),
        (6.0, 2.5, 0.3),
        (6.0, -0.5, 0.3),
        (8.0, 3.0, 0.3),
        (8.0, 0.0, 0.3),
    ];

    let obstacles = ObstacleField::from_tuples(&cones);
    let targets: Vec<SampleTarget> = cones.iter().map(|&cone| SampleTarget::from(cone)).collect();

    let start = Pose2D::new(0.0, 0.0, 0.0);
    let config = RRTConfig::default();

    let mut planner = RRTPlanner::new(start, obstacles, targets, config);
    planner.validate().unwrap();

    let mut iter = 0;
    planner.plan_with(
        |_, nodes| {
            iter += 1;
            if iter % 100 == 0 {
                println!("Iter: {}, number of nodes: {}", iter, nodes.len());
            }
        },
        || false,
    );

    println!(
        "Grew {} nodes, {} terminal",
        planner.tree().len(),
        planner.tree().leaves().len()
    );

    let goal = Point2D::new(9.0, 1.5);
    let path = planner.path_to(goal);
    match &path {
        Some(path) => println!(
            "Found path with {} points, length {:.2}",
            path.len(),
            path.total_length()
        ),
        None => println!("No terminal node reached the goal"),
    }

    std::fs::create_dir_all("img").unwrap();
    let output = "img/cone_slalom.png";
    render_tree(
        planner.tree().nodes(),
        planner.obstacles(),
        planner.start(),
        path.as_ref(),
        "Constrained RRT cone slalom",
        output,
    )
    .unwrap();
    println!("Plot saved to: {}", output);

    println!("Constrained RRT cone slalom finish!!");
}
