//! Arena-backed planning tree
//!
//! Nodes live in one append-only vector with the root at index 0 and
//! parent links stored as indices. Terminal nodes, whose cost reached the
//! planning horizon at insertion, are tracked in a separate index list.

use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::common::{Point2D, Pose2D};

/// One pose in the tree
#[derive(Debug, Clone)]
pub struct Node {
    pub x: f64,
    pub y: f64,
    /// Heading in radians, accumulated without normalization
    pub yaw: f64,
    /// Path length from the root
    pub cost: f64,
    /// Arena index of the parent, `None` for the root
    pub parent: Option<usize>,
}

impl Node {
    pub fn root(pose: Pose2D) -> Self {
        Node {
            x: pose.x,
            y: pose.y,
            yaw: pose.yaw,
            cost: 0.0,
            parent: None,
        }
    }

    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

/// Equality covers pose and cost only; parent links are ignored, so two
/// nodes reached along different branches still count as duplicates.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.yaw == other.yaw && self.cost == other.cost
    }
}

/// Append-only tree over a node arena
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    leaf_indices: Vec<usize>,
}

impl Tree {
    pub fn new(root: Node) -> Self {
        Tree {
            nodes: vec![root],
            leaf_indices: Vec::new(),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub fn root(&self) -> &Node {
        &self.nodes[0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Append a node and return its index. The parent must already be in
    /// the arena, so in the absence of re-parenting every parent index is
    /// smaller than its child's.
    pub fn push(&mut self, node: Node) -> usize {
        debug_assert!(node.parent.map_or(true, |p| p < self.nodes.len()));
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Record `index` as terminal. Membership reflects the cost at
    /// insertion time and is not revisited by later re-parenting.
    pub fn mark_leaf(&mut self, index: usize) {
        self.leaf_indices.push(index);
    }

    /// Indices of nodes whose cost had reached the horizon when inserted.
    pub fn leaves(&self) -> &[usize] {
        &self.leaf_indices
    }

    pub fn contains(&self, node: &Node) -> bool {
        self.nodes.iter().any(|n| n == node)
    }

    /// Index of the node closest to `point` by squared Euclidean distance.
    /// Ties resolve to the lowest index.
    pub fn nearest(&self, point: Point2D) -> usize {
        self.nodes
            .iter()
            .position_min_by_key(|n| OrderedFloat(n.position().squared_distance(&point)))
            .unwrap_or(0)
    }

    /// Indices of all nodes with squared distance to `point` at most
    /// `radius` squared. Boundary-exact nodes are included.
    pub fn near_indices(&self, point: Point2D, radius: f64) -> Vec<usize> {
        let r_squared = radius * radius;
        self.nodes
            .iter()
            .positions(|n| n.position().squared_distance(&point) <= r_squared)
            .collect()
    }

    /// Re-point `index` at a new parent with an updated cost. Position and
    /// yaw are untouched.
    pub fn reparent(&mut self, index: usize, parent: usize, cost: f64) {
        self.nodes[index].parent = Some(parent);
        self.nodes[index].cost = cost;
    }
}
