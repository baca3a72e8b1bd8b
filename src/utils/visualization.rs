//! Offline rendering of planning results
//!
//! One-shot gnuplot rendering of the grown tree, the obstacle field, the
//! start pose, and an optional extracted path, saved to PNG.

use std::f64::consts::PI;

use gnuplot::{AutoOption, AxesCommon, Caption, Color, Figure, LineWidth, PointSymbol};

use crate::common::{Path2D, PlannerError, PlannerResult, Pose2D};
use crate::obstacles::{CircleObstacle, ObstacleField};
use crate::tree::Node;

const CIRCLE_STEPS: usize = 32;

fn circle_points(obstacle: &CircleObstacle) -> (Vec<f64>, Vec<f64>) {
    let mut xs = Vec::with_capacity(CIRCLE_STEPS + 1);
    let mut ys = Vec::with_capacity(CIRCLE_STEPS + 1);
    for k in 0..=CIRCLE_STEPS {
        let angle = 2.0 * PI * k as f64 / CIRCLE_STEPS as f64;
        xs.push(obstacle.x + obstacle.radius * angle.cos());
        ys.push(obstacle.y + obstacle.radius * angle.sin());
    }
    (xs, ys)
}

/// Render tree edges, obstacle circles, the start pose, and an optional
/// path to a PNG at `output`.
pub fn render_tree(
    nodes: &[Node],
    obstacles: &ObstacleField,
    start: Pose2D,
    path: Option<&Path2D>,
    title: &str,
    output: &str,
) -> PlannerResult<()> {
    let mut fg = Figure::new();
    let axes = fg.axes2d();

    // Plot tree edges
    for node in nodes {
        if let Some(parent_index) = node.parent {
            let parent = &nodes[parent_index];
            axes.lines(&[parent.x, node.x], &[parent.y, node.y], &[Color("blue")]);
        }
    }

    // Plot obstacles as circle outlines
    for (i, obstacle) in obstacles.obstacles().iter().enumerate() {
        let (xs, ys) = circle_points(obstacle);
        if i == 0 {
            axes.lines(&xs, &ys, &[Caption("Obstacles"), Color("black")]);
        } else {
            axes.lines(&xs, &ys, &[Color("black")]);
        }
    }

    // Plot path
    if let Some(path) = path {
        axes.lines(
            &path.x_coords(),
            &path.y_coords(),
            &[Caption("Path"), Color("red"), LineWidth(2.0)],
        );
    }

    // Plot start pose with a heading tick
    axes.points(
        &[start.x],
        &[start.y],
        &[Caption("Start"), Color("green"), PointSymbol('O')],
    );
    axes.lines(
        &[start.x, start.x + start.yaw.cos()],
        &[start.y, start.y + start.yaw.sin()],
        &[Color("green")],
    );

    axes.set_title(title, &[])
        .set_x_label("X [m]", &[])
        .set_y_label("Y [m]", &[])
        .set_aspect_ratio(AutoOption::Fix(1.0));

    fg.save_to_png(output, 800, 600)
        .map_err(|e| PlannerError::VisualizationError(e.to_string()))
}
