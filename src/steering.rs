//! Kinematically constrained steering
//!
//! One growth step advances a fixed distance along a heading that may only
//! change by a quantized amount: the full configured turn step to the left
//! or right, or no turn at all. The decision threshold is fixed at 30
//! degrees regardless of the configured turn step, so a turn step of, say,
//! 10 degrees still triggers only when the target bearing deviates by more
//! than 30 degrees.

use std::f64::consts::PI;

use crate::common::Point2D;
use crate::tree::Node;

const TURN_DECISION_THRESHOLD: f64 = PI / 6.0;

/// Wrap an angle into [-pi, pi).
pub fn wrap_to_pi(angle: f64) -> f64 {
    (angle + PI).rem_euclid(2.0 * PI) - PI
}

/// Build the node one constrained step from `source` toward `target`.
///
/// The heading change is quantized to `{-turn_angle, 0, +turn_angle}`
/// against the fixed threshold, then the position advances `expand_dis`
/// along the new heading. Cost grows by `expand_dis` and the parent link
/// is set to `source_index`.
pub fn steer_constrained(
    source: &Node,
    source_index: usize,
    target: Point2D,
    expand_dis: f64,
    turn_angle: f64,
) -> Node {
    let bearing = (target.y - source.y).atan2(target.x - source.x);
    let heading_error = wrap_to_pi(bearing - source.yaw);

    let applied_turn = if heading_error > TURN_DECISION_THRESHOLD {
        turn_angle
    } else if heading_error >= -TURN_DECISION_THRESHOLD {
        0.0
    } else {
        -turn_angle
    };

    let yaw = source.yaw + applied_turn;
    Node {
        x: source.x + expand_dis * yaw.cos(),
        y: source.y + expand_dis * yaw.sin(),
        yaw,
        cost: source.cost + expand_dis,
        parent: Some(source_index),
    }
}
