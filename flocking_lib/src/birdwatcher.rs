use std::mem;

use serde::Serialize;

use crate::flock::Flock;

// so right now, this is more of a bird data acummulator than a birdwatcher
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct BoidData {
    pub id: usize,
    pub x: f32,
    pub y: f32,
    pub heading: f32,
    pub time: u64,
}

pub struct Birdwatcher {
    locations: Vec<BoidData>,
    render_ticker: u64,
    sample_rate: u64,
}

impl Birdwatcher {
    /// A sample rate of 0 is treated as 1, i.e. sampling on every call
    pub fn new(sample_rate: u64) -> Self {
        Birdwatcher {
            locations: Vec::new(),
            render_ticker: 0,
            sample_rate: sample_rate.max(1),
        }
    }

    /// Triggers data collection
    pub fn watch(&mut self, flock: &Flock) {
        if !self.should_sample() {
            return;
        }

        let time = self.render_ticker / self.sample_rate;
        self.locations.extend(flock.view().iter().map(|e| BoidData {
            id: e.id,
            x: e.position.x,
            y: e.position.y,
            heading: e.heading(),
            time,
        }));
    }

    pub fn restart(&mut self) {
        self.locations.clear();
        self.render_ticker = 0;
    }

    pub fn pop_data(&mut self) -> Vec<BoidData> {
        mem::take(&mut self.locations)
    }

    fn should_sample(&mut self) -> bool {
        self.render_ticker += 1;

        self.render_ticker % self.sample_rate == 0
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::Vec2;

    use crate::{
        birdwatcher::Birdwatcher,
        boid::Boid,
        flock::Flock,
        options::RunOptions,
    };

    fn flock(ro: &RunOptions) -> Flock {
        Flock::from_boids(
            vec![
                Boid::new(10., 10., Vec2::new(1., 0.), 0),
                Boid::new(300., 200., Vec2::new(0., 1.), 1),
            ],
            ro,
        )
    }

    #[test]
    fn samples_every_nth_watch() {
        let ro = RunOptions::default();
        let mut flock = flock(&ro);
        let mut bw = Birdwatcher::new(2);

        for _ in 0..5 {
            flock.update(&ro);
            bw.watch(&flock);
        }

        let data = bw.pop_data();
        assert_eq!(data.len(), 4);
        assert_eq!(data.iter().map(|d| d.time).collect::<Vec<_>>(), vec![1, 1, 2, 2]);
        assert!(bw.pop_data().is_empty());
    }

    #[test]
    fn records_positions_and_headings() {
        let ro = RunOptions::default();
        let flock = flock(&ro);
        let mut bw = Birdwatcher::new(1);

        bw.watch(&flock);

        let data = bw.pop_data();
        assert_eq!(data[0].id, 0);
        assert_eq!((data[0].x, data[0].y), (10., 10.));
        assert_eq!(data[0].heading, 0.);
        assert_relative_eq!(data[1].heading, std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn zero_sample_rate_samples_everything() {
        let ro = RunOptions::default();
        let flock = flock(&ro);
        let mut bw = Birdwatcher::new(0);

        bw.watch(&flock);
        bw.watch(&flock);

        assert_eq!(bw.pop_data().len(), 4);
    }

    #[test]
    fn restart_forgets_samples() {
        let ro = RunOptions::default();
        let flock = flock(&ro);
        let mut bw = Birdwatcher::new(1);

        bw.watch(&flock);
        bw.restart();

        assert!(bw.pop_data().is_empty());
    }
}
