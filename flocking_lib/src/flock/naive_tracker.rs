use crate::{boid::Boid, math_helpers::simple_distance_boid, options::RunOptions};

use super::tracker::Tracker;

/// A naive implementation of boids tracking, which uses an O(N^2) algorithm for
/// finding boid's neighbours.
pub struct NaiveTracker {
    boids: Vec<Boid>,
}

impl NaiveTracker {
    pub fn get_neighbours_naive<'a>(
        boid: &Boid,
        all_boids: &'a [Boid],
        run_options: &RunOptions,
        neighbours: &mut Vec<&'a Boid>,
    ) {
        for b_other in all_boids.iter() {
            if b_other.id == boid.id {
                continue;
            }

            let distance = simple_distance_boid(boid, b_other);
            if distance < run_options.max_sensory_distance() {
                neighbours.push(b_other);
            }
        }
    }
}

impl Tracker for NaiveTracker {
    fn new(entities: &[Boid], _: &RunOptions) -> Self {
        NaiveTracker {
            boids: entities.to_vec(),
        }
    }

    fn get_neighbours<'a>(&'a self, boid: &Boid, run_options: &RunOptions) -> Vec<&'a Boid> {
        let mut res = Vec::<&'a Boid>::new();

        NaiveTracker::get_neighbours_naive(boid, &self.boids, run_options, &mut res);

        res
    }

    fn restart(&mut self, entities: &[Boid], _: &RunOptions) {
        self.boids = entities.to_vec();
    }

    fn view(&self) -> &[Boid] {
        &self.boids
    }

    fn view_mut(&mut self) -> &mut [Boid] {
        &mut self.boids
    }

    fn reindex(&mut self, _: &RunOptions) {
        // noop, there is no index
    }
}
