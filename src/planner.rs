//! Constrained RRT planner
//!
//! Grows a tree of kinematically feasible poses from a fixed start toward
//! randomly sampled points, bounded by a planning horizon, and extracts
//! low-cost collision-free paths from the result. Each planning invocation
//! re-roots the tree; nothing persists across runs.

use ordered_float::OrderedFloat;

use crate::common::{Path2D, PlannerError, PlannerResult, Point2D, Pose2D};
use crate::obstacles::ObstacleField;
use crate::sampler::{SampleTarget, Sampler, TARGET_BIAS_RADIUS};
use crate::steering::steer_constrained;
use crate::tree::{Node, Tree};

/// Near-node query radius as a multiple of the expansion step.
const NEAR_RADIUS_FACTOR: f64 = 3.0;

/// Configuration for the constrained RRT planner
#[derive(Debug, Clone)]
pub struct RRTConfig {
    /// Planning horizon: a branch stops growing once its cost reaches this
    pub plan_distance: f64,
    /// Expansion distance per step
    pub expand_dis: f64,
    /// Turn applied per left or right steering step, in radians
    pub turn_angle: f64,
    /// Iteration budget per planning run
    pub max_iter: usize,
    /// RNG seed; `None` draws from entropy
    pub seed: Option<u64>,
    /// Run choose-parent and rewiring on every insertion
    pub enable_rewiring: bool,
}

impl Default for RRTConfig {
    fn default() -> Self {
        Self {
            plan_distance: 10.0,
            expand_dis: 0.5,
            turn_angle: 30.0_f64.to_radians(),
            max_iter: 400,
            seed: None,
            enable_rewiring: false,
        }
    }
}

impl RRTConfig {
    pub fn validate(&self) -> PlannerResult<()> {
        if !self.plan_distance.is_finite() || self.plan_distance <= 0.0 {
            return Err(PlannerError::InvalidParameter(format!(
                "plan_distance must be positive, got {}",
                self.plan_distance
            )));
        }
        if !self.expand_dis.is_finite() || self.expand_dis <= 0.0 {
            return Err(PlannerError::InvalidParameter(format!(
                "expand_dis must be positive, got {}",
                self.expand_dis
            )));
        }
        if !self.turn_angle.is_finite() || self.turn_angle < 0.0 {
            return Err(PlannerError::InvalidParameter(format!(
                "turn_angle must be non-negative, got {}",
                self.turn_angle
            )));
        }
        if self.max_iter == 0 {
            return Err(PlannerError::InvalidParameter(
                "max_iter must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Observable planner lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerState {
    Idle,
    Growing,
    Done,
}

/// Aggregate counters for one planning run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanStats {
    /// Iterations executed, cancelled ones excluded
    pub iterations: usize,
    pub nodes_added: usize,
    /// Samples dropped because the nearest branch reached the horizon
    pub horizon_skips: usize,
    /// Candidates dropped as duplicates of an existing node
    pub duplicate_skips: usize,
    /// Candidates dropped by the collision check
    pub collision_rejects: usize,
    pub cancelled: bool,
}

/// Constrained RRT planner
pub struct RRTPlanner {
    config: RRTConfig,
    start: Pose2D,
    obstacles: ObstacleField,
    sampler: Sampler,
    tree: Tree,
    state: PlannerState,
    stats: PlanStats,
}

impl RRTPlanner {
    pub fn new(
        start: Pose2D,
        obstacles: ObstacleField,
        targets: Vec<SampleTarget>,
        config: RRTConfig,
    ) -> Self {
        let sampler = Sampler::new(start, config.plan_distance, targets, config.seed);
        RRTPlanner {
            start,
            obstacles,
            sampler,
            tree: Tree::new(Node::root(start)),
            state: PlannerState::Idle,
            stats: PlanStats::default(),
            config,
        }
    }

    /// Check the configuration, obstacle field, and targets against their
    /// construction contracts. The growth loop assumes these hold and
    /// never re-checks.
    pub fn validate(&self) -> PlannerResult<()> {
        self.config.validate()?;
        self.obstacles.validate()?;
        for (i, target) in self.sampler.targets().iter().enumerate() {
            if !target.x.is_finite() || !target.y.is_finite() || !target.near_radius.is_finite() {
                return Err(PlannerError::InvalidParameter(format!(
                    "target {} has a non-finite field",
                    i
                )));
            }
            if target.near_radius < 0.0 {
                return Err(PlannerError::InvalidParameter(format!(
                    "target {} has negative near_radius {}",
                    i, target.near_radius
                )));
            }
            if target.near_radius >= TARGET_BIAS_RADIUS {
                return Err(PlannerError::InvalidParameter(format!(
                    "target {} near_radius {} must stay below the bias radius {}",
                    i, target.near_radius, TARGET_BIAS_RADIUS
                )));
            }
        }
        Ok(())
    }

    /// Run a full planning cycle with no hooks attached.
    pub fn plan(&mut self) -> &Tree {
        self.plan_with(|_, _| {}, || false)
    }

    /// Run a full planning cycle.
    ///
    /// `observer` is invoked at the end of every executed iteration with
    /// the sampled point and read access to the node arena. `cancel` is
    /// polled once at the top of each iteration; returning true stops the
    /// run immediately and leaves the partial tree intact.
    pub fn plan_with<O, C>(&mut self, mut observer: O, mut cancel: C) -> &Tree
    where
        O: FnMut(Point2D, &[Node]),
        C: FnMut() -> bool,
    {
        self.tree = Tree::new(Node::root(self.start));
        self.stats = PlanStats::default();
        self.state = PlannerState::Growing;

        for _ in 0..self.config.max_iter {
            if cancel() {
                self.stats.cancelled = true;
                break;
            }
            self.stats.iterations += 1;

            let rnd = self.sampler.sample();
            self.extend(rnd);
            observer(rnd, self.tree.nodes());
        }

        self.state = PlannerState::Done;
        &self.tree
    }

    /// Draw one sample from the planner's own sampler. Together with
    /// [`extend`](Self::extend) this is the seam for stepping the planner
    /// one iteration at a time.
    pub fn sample(&mut self) -> Point2D {
        self.sampler.sample()
    }

    /// Attempt a single growth step toward `rnd`.
    ///
    /// Returns the index of the inserted node, or `None` when the step was
    /// filtered: nearest branch already at the horizon, candidate equal to
    /// an existing node, or candidate in collision. A filtered step leaves
    /// the tree untouched.
    pub fn extend(&mut self, rnd: Point2D) -> Option<usize> {
        let nearest_index = self.tree.nearest(rnd);
        if self.tree.node(nearest_index).cost >= self.config.plan_distance {
            self.stats.horizon_skips += 1;
            return None;
        }

        let mut node = steer_constrained(
            self.tree.node(nearest_index),
            nearest_index,
            rnd,
            self.config.expand_dis,
            self.config.turn_angle,
        );

        if self.tree.contains(&node) {
            self.stats.duplicate_skips += 1;
            return None;
        }
        if !self.obstacles.is_free(node.position()) {
            self.stats.collision_rejects += 1;
            return None;
        }

        let near = if self.config.enable_rewiring {
            let near = self
                .tree
                .near_indices(node.position(), NEAR_RADIUS_FACTOR * self.config.expand_dis);
            node = self.choose_parent(node, &near);
            near
        } else {
            Vec::new()
        };

        let index = self.tree.push(node);
        self.stats.nodes_added += 1;
        if self.tree.node(index).cost >= self.config.plan_distance {
            self.tree.mark_leaf(index);
        }
        if self.config.enable_rewiring {
            self.rewire(index, &near);
        }
        Some(index)
    }

    /// Among the near nodes, pick the parent minimizing `cost + distance`,
    /// subject to a collision-free straight extension from that parent.
    /// When every candidate is blocked the node keeps its steered parent;
    /// the yaw stays as steered either way.
    fn choose_parent(&self, mut node: Node, near: &[usize]) -> Node {
        let mut best_cost = f64::INFINITY;
        let mut best_parent = None;

        for &i in near {
            let candidate = self.tree.node(i);
            let d = candidate.position().distance(&node.position());
            let bearing = (node.y - candidate.y).atan2(node.x - candidate.x);
            if !self.obstacles.is_free_extension(
                candidate.position(),
                bearing,
                d,
                self.config.expand_dis,
            ) {
                continue;
            }
            let cost = candidate.cost + d;
            if cost < best_cost {
                best_cost = cost;
                best_parent = Some(i);
            }
        }

        if let Some(parent) = best_parent {
            node.cost = best_cost;
            node.parent = Some(parent);
        }
        node
    }

    /// Re-parent any near node whose cost strictly decreases through the
    /// new node. Costs of the re-parented node's descendants are left
    /// stale, matching insertion-time semantics elsewhere.
    fn rewire(&mut self, new_index: usize, near: &[usize]) {
        let (new_pos, new_cost) = {
            let n = self.tree.node(new_index);
            (n.position(), n.cost)
        };

        for &i in near {
            let (near_pos, near_cost) = {
                let n = self.tree.node(i);
                (n.position(), n.cost)
            };

            let d = near_pos.distance(&new_pos);
            let through_cost = new_cost + d;
            if near_cost <= through_cost {
                continue;
            }

            let bearing = (new_pos.y - near_pos.y).atan2(new_pos.x - near_pos.x);
            if self
                .obstacles
                .is_free_extension(near_pos, bearing, d, self.config.expand_dis)
            {
                self.tree.reparent(i, new_index, through_cost);
            }
        }
    }

    /// Lowest-cost node within one expansion step of `goal`, scanning the
    /// whole arena. Ties resolve to the lowest index. `None` means the
    /// tree never reached the goal, a normal outcome.
    pub fn best_terminal(&self, goal: Point2D) -> Option<usize> {
        let reach_squared = self.config.expand_dis * self.config.expand_dis;
        self.tree
            .nodes()
            .iter()
            .enumerate()
            .filter(|(_, n)| n.position().squared_distance(&goal) <= reach_squared)
            .min_by_key(|(_, n)| OrderedFloat(n.cost))
            .map(|(i, _)| i)
    }

    /// Walk parent links from `terminal_index` back to the root and return
    /// the waypoints ordered start first, with `end` appended as the final
    /// waypoint.
    pub fn extract_path(&self, terminal_index: usize, end: Point2D) -> Path2D {
        let mut points = vec![end];
        let mut index = terminal_index;

        while let Some(parent) = self.tree.node(index).parent {
            points.push(self.tree.node(index).position());
            index = parent;
        }
        points.push(self.tree.node(index).position());

        points.reverse();
        Path2D::from_points(points)
    }

    /// Select the best terminal for `goal` and extract its path.
    pub fn path_to(&self, goal: Point2D) -> Option<Path2D> {
        self.best_terminal(goal)
            .map(|index| self.extract_path(index, goal))
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn stats(&self) -> &PlanStats {
        &self.stats
    }

    pub fn state(&self) -> PlannerState {
        self.state
    }

    pub fn config(&self) -> &RRTConfig {
        &self.config
    }

    pub fn obstacles(&self) -> &ObstacleField {
        &self.obstacles
    }

    pub fn start(&self) -> Pose2D {
        self.start
    }
}
