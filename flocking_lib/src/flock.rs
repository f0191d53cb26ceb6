use rand::{Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::boid::Boid;
use crate::options::{RunOptions, TrackerType};

use self::naive_tracker::NaiveTracker;
use self::spathash_tracker::SpatHashTracker;
use self::tracker::Tracker;

pub mod naive_tracker;
pub mod spathash_tracker;
pub mod tracker;

pub struct Flock {
    tracker: Box<dyn Tracker>,
    tracker_type: TrackerType,
    rng: Box<dyn RngCore>,
    tick: u64,
}

impl Flock {
    /// Spawns `init_boids` boids, seeded from the options or from entropy
    pub fn new(run_options: &RunOptions) -> Self {
        Flock::with_rng(run_options, get_rng(run_options))
    }

    /// Spawns `init_boids` boids drawing from the given generator, which is kept
    /// for later restarts
    pub fn with_rng<R: RngCore + 'static>(run_options: &RunOptions, mut rng: R) -> Self {
        let boids = get_boids(run_options, &mut rng);
        log::info!(
            "spawned {} boids in a {}x{} window ({:?} tracker)",
            boids.len(),
            run_options.window.win_w,
            run_options.window.win_h,
            run_options.tracker_type
        );

        Flock {
            tracker: get_tracker(&boids, run_options),
            tracker_type: run_options.tracker_type,
            rng: Box::new(rng),
            tick: 0,
        }
    }

    /// Builds a flock from an explicit snapshot, ids are reassigned to match the order
    pub fn from_boids(boids: Vec<Boid>, run_options: &RunOptions) -> Self {
        let boids: Vec<Boid> = boids
            .into_iter()
            .enumerate()
            .map(|(id, mut b)| {
                b.id = id;
                b
            })
            .collect();

        Flock {
            tracker: get_tracker(&boids, run_options),
            tracker_type: run_options.tracker_type,
            rng: Box::new(get_rng(run_options)),
            tick: 0,
        }
    }

    /// Advances the simulation by one tick
    pub fn update(&mut self, run_options: &RunOptions) {
        self.tracker.update(run_options);
        self.tick += 1;

        log::trace!("tick {} done for {} boids", self.tick, self.len());
    }

    pub fn view(&self) -> &[Boid] {
        self.tracker.view()
    }

    pub fn len(&self) -> usize {
        self.tracker.get_no_entities()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of ticks since the flock was spawned or restarted
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Respawns the whole flock, the generator carries on from where it was.
    /// The tracker is kept unless the options ask for a different kind.
    pub fn restart(&mut self, run_options: &RunOptions) {
        let boids = get_boids(run_options, self.rng.as_mut());
        log::info!("restarting flock with {} boids", boids.len());

        if self.tracker_type == run_options.tracker_type {
            self.tracker.restart(&boids, run_options);
        } else {
            self.tracker = get_tracker(&boids, run_options);
            self.tracker_type = run_options.tracker_type;
        }
        self.tick = 0;
    }
}

fn get_rng(run_options: &RunOptions) -> Xoshiro256PlusPlus {
    match run_options.seed {
        Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
        None => Xoshiro256PlusPlus::from_entropy(),
    }
}

fn get_tracker(boids: &[Boid], run_options: &RunOptions) -> Box<dyn Tracker> {
    match run_options.tracker_type {
        TrackerType::Naive => Box::new(NaiveTracker::new(boids, run_options)),
        TrackerType::SpatHash => Box::new(SpatHashTracker::new(boids, run_options)),
    }
}

pub fn get_boids<R: Rng + ?Sized>(run_options: &RunOptions, rng: &mut R) -> Vec<Boid> {
    (0..run_options.init_boids)
        .map(|id| Boid::random(&mut *rng, run_options, id))
        .collect()
}
