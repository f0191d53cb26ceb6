use glam::Vec2;

use crate::{boid::Boid, options::RunOptions};

// a tracker takes ownership of a flock of boids
// a tracker will follow an implementation consisting of choosing a datastructure to
// hold spatial information about boids in and have traits for querying 2D information

pub trait Tracker {
    fn new(entities: &[Boid], run_options: &RunOptions) -> Self
    where
        Self: Sized;

    /// Advances all boids by one tick.
    ///
    /// Steering for every boid is computed against the state all boids were in at
    /// the start of the tick, only then are the forces applied and locations updated.
    fn update(&mut self, run_options: &RunOptions) {
        // calculation loop, reads only
        let accelleration: Vec<Vec2> = self
            .view()
            .iter()
            .map(|boid| {
                let neighbours = self.get_neighbours(boid, run_options);
                boid.run_rules(&neighbours, run_options)
            })
            .collect();

        // update loop
        for (boid, force) in self.view_mut().iter_mut().zip(accelleration) {
            boid.apply_force(force);
            boid.update_location(run_options);
        }

        self.reindex(run_options);
    }

    fn restart(&mut self, entities: &[Boid], run_options: &RunOptions);
    fn view(&self) -> &[Boid];
    fn view_mut(&mut self) -> &mut [Boid];
    /// Refreshes any spatial index after boids have moved
    fn reindex(&mut self, run_options: &RunOptions);
    /// All other boids closer than the maximum sensory distance, in flock order
    fn get_neighbours<'a>(&'a self, boid: &Boid, run_options: &RunOptions) -> Vec<&'a Boid>;

    fn get_no_entities(&self) -> usize {
        self.view().len()
    }
}
