//! Circular obstacle field and collision predicates
//!
//! Obstacles are static circles. A pose collides when its center distance
//! to an obstacle is less than or equal to the obstacle radius, so boundary
//! contact counts as a hit.

use crate::common::{PlannerError, PlannerResult, Point2D};

/// Circular obstacle (x, y, radius)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleObstacle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl CircleObstacle {
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self { x, y, radius }
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// True when `point` lies inside or exactly on the circle.
    pub fn contains(&self, point: Point2D) -> bool {
        self.center().squared_distance(&point) <= self.radius * self.radius
    }
}

/// Static set of circular obstacles for one planning run
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    obstacles: Vec<CircleObstacle>,
}

impl ObstacleField {
    pub fn new(obstacles: Vec<CircleObstacle>) -> Self {
        Self { obstacles }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn from_tuples(list: &[(f64, f64, f64)]) -> Self {
        let obstacles = list
            .iter()
            .map(|&(x, y, radius)| CircleObstacle::new(x, y, radius))
            .collect();
        Self::new(obstacles)
    }

    pub fn obstacles(&self) -> &[CircleObstacle] {
        &self.obstacles
    }

    /// True when `position` touches no obstacle.
    pub fn is_free(&self, position: Point2D) -> bool {
        self.obstacles.iter().all(|obs| !obs.contains(position))
    }

    /// Sweep a straight extension from `from` along `bearing`, testing the
    /// swept point after each `step` advance, `floor(distance / step)` times.
    /// The starting point itself is never tested.
    pub fn is_free_extension(&self, from: Point2D, bearing: f64, distance: f64, step: f64) -> bool {
        let substeps = (distance / step).floor() as usize;
        let dx = step * bearing.cos();
        let dy = step * bearing.sin();

        let mut cursor = from;
        for _ in 0..substeps {
            cursor.x += dx;
            cursor.y += dy;
            if !self.is_free(cursor) {
                return false;
            }
        }
        true
    }

    /// Check every obstacle has finite fields and a non-negative radius.
    /// The planning loop itself never validates.
    pub fn validate(&self) -> PlannerResult<()> {
        for (i, obs) in self.obstacles.iter().enumerate() {
            if !obs.x.is_finite() || !obs.y.is_finite() || !obs.radius.is_finite() {
                return Err(PlannerError::InvalidParameter(format!(
                    "obstacle {} has a non-finite field",
                    i
                )));
            }
            if obs.radius < 0.0 {
                return Err(PlannerError::InvalidParameter(format!(
                    "obstacle {} has negative radius {}",
                    i, obs.radius
                )));
            }
        }
        Ok(())
    }
}
