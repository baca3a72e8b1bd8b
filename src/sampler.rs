//! Random target sampling
//!
//! Two draw modes share one generator. With no targets configured, samples
//! come from the forward rectangle of the start pose: a uniform draw over
//! `[0, plan_distance] x [-plan_distance, plan_distance]` in the start
//! frame, rotated by the start yaw and translated to the start position.
//! With targets configured, one target is picked uniformly and the sample
//! lands in the annulus between the target's near radius and the fixed
//! outer bias radius. A single draw per call; infeasible points are
//! filtered downstream, never re-drawn here.

use std::f64::consts::PI;

use nalgebra::{Rotation2, Vector2};
use rand::prelude::*;
use rand_distr::{Distribution, Uniform};

use crate::common::{Point2D, Pose2D};

/// Outer radius of the annulus drawn around a sample target.
pub const TARGET_BIAS_RADIUS: f64 = 3.0;

/// A point of interest that biases sampling, with a keep-out near radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleTarget {
    pub x: f64,
    pub y: f64,
    /// Minimum sampling distance from the target center. Must stay below
    /// [`TARGET_BIAS_RADIUS`].
    pub near_radius: f64,
}

impl SampleTarget {
    pub fn new(x: f64, y: f64, near_radius: f64) -> Self {
        Self { x, y, near_radius }
    }
}

impl From<(f64, f64, f64)> for SampleTarget {
    fn from(tuple: (f64, f64, f64)) -> Self {
        Self {
            x: tuple.0,
            y: tuple.1,
            near_radius: tuple.2,
        }
    }
}

/// Sample source owning its generator
pub struct Sampler {
    start: Pose2D,
    plan_distance: f64,
    targets: Vec<SampleTarget>,
    rng: StdRng,
}

impl Sampler {
    /// A `None` seed draws the generator state from entropy; a fixed seed
    /// makes the sample sequence reproducible.
    pub fn new(
        start: Pose2D,
        plan_distance: f64,
        targets: Vec<SampleTarget>,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Sampler {
            start,
            plan_distance,
            targets,
            rng,
        }
    }

    pub fn targets(&self) -> &[SampleTarget] {
        &self.targets
    }

    pub fn sample(&mut self) -> Point2D {
        if self.targets.is_empty() {
            self.sample_forward_rect()
        } else {
            self.sample_target_annulus()
        }
    }

    fn sample_forward_rect(&mut self) -> Point2D {
        let forward = Uniform::new(0.0, self.plan_distance);
        let lateral = Uniform::new(-self.plan_distance, self.plan_distance);

        let local = Vector2::new(
            forward.sample(&mut self.rng),
            lateral.sample(&mut self.rng),
        );
        let world = Rotation2::new(self.start.yaw) * local + self.start.position().to_vector();

        Point2D::from(world)
    }

    fn sample_target_annulus(&mut self) -> Point2D {
        let target = self.targets[self.rng.gen_range(0..self.targets.len())];

        let angle = Uniform::new(0.0, 2.0 * PI).sample(&mut self.rng);
        let dist = Uniform::new(target.near_radius, TARGET_BIAS_RADIUS).sample(&mut self.rng);

        Point2D::new(
            target.x + dist * angle.cos(),
            target.y + dist * angle.sin(),
        )
    }
}
