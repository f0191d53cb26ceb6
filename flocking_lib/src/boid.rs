use std::f32::consts::TAU;

use glam::f32::Vec2;
use rand::Rng;

use crate::{
    math_helpers::{simple_distance_boid, SteerVec},
    options::RunOptions,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boid {
    // sequential id starting from 0
    pub id: usize,
    pub position: Vec2,
    pub velocity: Vec2,
    acceleration: Vec2,
}

impl Boid {
    /// Creates a new [`Boid`].
    pub fn new(x: f32, y: f32, velocity: Vec2, id: usize) -> Self {
        let acceleration = Vec2::ZERO;
        let position = Vec2::new(x, y);

        Boid {
            id,
            position,
            velocity,
            acceleration,
        }
    }

    /// Spawns a boid somewhere in the window, heading in a random direction at unit speed
    pub fn random<R: Rng + ?Sized>(rng: &mut R, run_options: &RunOptions, id: usize) -> Self {
        // x in [0, width)
        let x = rng.gen::<f32>() * run_options.window.win_w;
        // y in [0, height)
        let y = rng.gen::<f32>() * run_options.window.win_h;

        let angle = rng.gen::<f32>() * TAU;
        let init_vec = Vec2::new(angle.cos(), angle.sin());

        Boid::new(x, y, init_vec, id)
    }

    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    /// Orientation in radians, as used for drawing
    pub fn heading(&self) -> f32 {
        self.velocity.y.atan2(self.velocity.x)
    }

    /// Weighted sum of all the steering rules, every rule sees the same neighbours
    pub fn run_rules(&self, nearest_boids: &[&Boid], run_options: &RunOptions) -> Vec2 {
        let mut sum = Vec2::ZERO;

        sum += self.separation(nearest_boids, run_options) * run_options.separation_coefficient;
        sum += self.alignment(nearest_boids, run_options) * run_options.alignment_coefficient;
        sum += self.cohesion(nearest_boids, run_options) * run_options.cohesion_coefficient;

        sum
    }

    pub fn separation(&self, others: &[&Boid], run_options: &RunOptions) -> Vec2 {
        let mut res = Vec2::ZERO;
        let mut count = 0;

        for other in others {
            let distance = simple_distance_boid(self, other);
            if distance > 0. && distance < run_options.separation_distance {
                // closer neighbours push harder
                res += (self.position - other.position).normalize_or_zero() / distance;
                count += 1;
            }
        }

        if count > 0 {
            res /= count as f32;
        }

        if res.length() > 0. {
            self.steer(res, run_options)
        } else {
            Vec2::ZERO
        }
    }

    pub fn alignment(&self, others: &[&Boid], run_options: &RunOptions) -> Vec2 {
        let mut avg = Vec2::ZERO;
        let mut count = 0;

        for other in others {
            let distance = simple_distance_boid(self, other);
            if distance > 0. && distance < run_options.neighbour_distance {
                avg += other.velocity;
                count += 1;
            }
        }

        if count > 0 {
            avg /= count as f32;
            self.steer(avg, run_options)
        } else {
            Vec2::ZERO
        }
    }

    pub fn cohesion(&self, others: &[&Boid], run_options: &RunOptions) -> Vec2 {
        let mut center = Vec2::ZERO;
        let mut count = 0;

        for other in others {
            let distance = simple_distance_boid(self, other);
            if distance > 0. && distance < run_options.neighbour_distance {
                center += other.position;
                count += 1;
            }
        }

        if count > 0 {
            center /= count as f32;
            self.seek(center, run_options)
        } else {
            Vec2::ZERO
        }
    }

    pub fn seek(&self, target: Vec2, run_options: &RunOptions) -> Vec2 {
        self.steer(target - self.position, run_options)
    }

    /// Reynolds' steering, desired velocity at full speed minus the current one
    pub fn steer(&self, desired: Vec2, run_options: &RunOptions) -> Vec2 {
        let desired = desired.normalize_or_zero() * run_options.max_speed;

        (desired - self.velocity).limit(run_options.max_steering)
    }

    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    // Actually shifts the individual's location
    pub fn update_location(&mut self, run_options: &RunOptions) {
        self.velocity += self.acceleration;
        self.velocity = self.velocity.limit(run_options.max_speed);

        self.position += self.velocity;

        self.acceleration = Vec2::ZERO;

        self.boundaries(run_options)
    }

    /// Toroidal wrap, leaving past one edge re-enters at the opposite one
    fn boundaries(&mut self, run_options: &RunOptions) {
        let r = run_options.radius;
        let width = run_options.window.win_w;
        let height = run_options.window.win_h;

        if self.position.x < -r {
            self.position.x = width + r;
        }
        if self.position.y < -r {
            self.position.y = height + r;
        }
        if self.position.x > width + r {
            self.position.x = -r;
        }
        if self.position.y > height + r {
            self.position.y = -r;
        }
    }
}
