//! kinematic_rrt - sampling-based local planner with turning constraints
//!
//! This crate grows a rapidly-exploring random tree of vehicle poses from
//! a start pose toward randomly sampled targets, with heading changes
//! quantized to a fixed turn step, bounded by a planning horizon, and
//! checked against circular obstacles. Low-cost collision-free paths are
//! extracted from the finished tree.

// Core modules
pub mod common;
pub mod utils;

// Planner modules
pub mod obstacles;
pub mod sampler;
pub mod steering;
pub mod tree;
pub mod planner;

// Re-export the planning surface for convenience
pub use common::{Path2D, Point2D, Pose2D};
pub use common::{PlannerError, PlannerResult};
pub use obstacles::{CircleObstacle, ObstacleField};
pub use planner::{PlanStats, PlannerState, RRTConfig, RRTPlanner};
pub use sampler::{SampleTarget, Sampler, TARGET_BIAS_RADIUS};
pub use steering::{steer_constrained, wrap_to_pi};
pub use tree::{Node, Tree};
