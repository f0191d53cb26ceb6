use birdwatcher::{Birdwatcher, BoidData};
use flock::Flock;
use options::RunOptions;

pub mod boid;
pub mod flock;

pub mod birdwatcher;
pub mod math_helpers;
pub mod options;

/// Runs a headless simulation for `no_iter` ticks and returns the sampled boid states
pub fn flock_base(no_iter: u64, ro: RunOptions) -> Vec<BoidData> {
    let mut flock = Flock::new(&ro);
    let mut bird_watcher = Birdwatcher::new(ro.sample_rate);

    (0..no_iter).for_each(|_| {
        flock.update(&ro);
        bird_watcher.watch(&flock);
    });

    bird_watcher.pop_data()
}
