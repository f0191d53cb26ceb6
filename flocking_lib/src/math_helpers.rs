use glam::Vec2;

use crate::boid::Boid;

/// Euclidean distance in between the positions of two boids
#[inline]
pub fn simple_distance_boid(b1: &Boid, b2: &Boid) -> f32 {
    simple_distance_sq_boid(b1, b2).sqrt()
}

#[inline]
pub fn simple_distance_sq_boid(b1: &Boid, b2: &Boid) -> f32 {
    simple_distance_sq(b1.position.x, b2.position.x, b1.position.y, b2.position.y)
}

pub fn simple_distance(x1: f32, x2: f32, y1: f32, y2: f32) -> f32 {
    simple_distance_sq(x1, x2, y1, y2).sqrt()
}

pub fn simple_distance_sq(x1: f32, x2: f32, y1: f32, y2: f32) -> f32 {
    (x1 - x2).powi(2) + (y1 - y2).powi(2)
}

// glam is pinned at .17 and its normalize() produces a NaN vector for zero
// length input, steering needs a total version of it
pub trait SteerVec {
    /// Unit vector pointing the same way, or zero when there is no direction
    fn normalize_or_zero(&self) -> Self;
    /// Rescales to `max` length if longer, returns the vector unchanged otherwise
    fn limit(&self, max: f32) -> Self;
}

impl SteerVec for Vec2 {
    #[inline]
    fn normalize_or_zero(&self) -> Self {
        let length = self.length();
        if length > 0. && length.is_finite() {
            *self / length
        } else {
            Vec2::ZERO
        }
    }

    #[inline]
    fn limit(&self, max: f32) -> Self {
        if self.length() > max {
            self.normalize_or_zero() * max
        } else {
            *self
        }
    }
}
