//! Damped spring that trails the cursor box behind its hover anchor.
//!
//! The spring holds an offset from the anchor and a velocity. Pointer motion
//! while hovering kicks the velocity; every frame a linear restoring force
//! pulls the offset back toward zero and damping bleeds energy off. With
//! damping below 1 the offset always decays to rest.

#[cfg(test)]
#[path = "spring_test.rs"]
mod spring_test;

use crate::consts::{SPRING_DAMPING, SPRING_STRENGTH, VELOCITY_INFLUENCE};
use crate::geom::Point;

/// Offset/velocity pair integrated once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spring {
    pub offset: Point,
    pub velocity: Point,
}

impl Spring {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one tick and return the displaced position `anchor + offset`.
    pub fn update(&mut self, anchor: Point) -> Point {
        self.velocity.x += -self.offset.x * SPRING_STRENGTH;
        self.velocity.y += -self.offset.y * SPRING_STRENGTH;

        self.velocity.x *= SPRING_DAMPING;
        self.velocity.y *= SPRING_DAMPING;

        self.offset.x += self.velocity.x;
        self.offset.y += self.velocity.y;

        Point { x: anchor.x + self.offset.x, y: anchor.y + self.offset.y }
    }

    /// Add an impulse proportional to a raw pointer displacement.
    pub fn inject_velocity(&mut self, dx: f64, dy: f64) {
        self.velocity.x += dx * VELOCITY_INFLUENCE;
        self.velocity.y += dy * VELOCITY_INFLUENCE;
    }

    /// Drop all stored energy.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Scale offset and velocity by `factor`, keeping a fraction of the motion.
    pub fn dampen(&mut self, factor: f64) {
        self.offset.x *= factor;
        self.offset.y *= factor;
        self.velocity.x *= factor;
        self.velocity.y *= factor;
    }
}
