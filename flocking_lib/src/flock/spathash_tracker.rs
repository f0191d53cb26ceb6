use std::ops::RangeInclusive;

use itertools::{iproduct, Itertools};

use crate::{boid::Boid, math_helpers::simple_distance_boid, options::RunOptions};

use super::tracker::Tracker;

/// Upper bound on grid cells along either axis, huge windows get coarser cells instead
const MAX_CELLS_PER_AXIS: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub struct SpatialHashingTableSettings {
    /// lowest x value a boid can take before wrapping
    pub x_min: f32,
    /// lowest y value a boid can take before wrapping
    pub y_min: f32,
    /// grid x range
    pub x_cell_count: usize,
    /// grid y range
    pub y_cell_count: usize,
    /// n cells of grid
    pub cell_count: usize,
    /// environment x units per grid x cell
    pub x_cell_res: f32,
    /// environment y units per grid y cell
    pub y_cell_res: f32,
}

/// Uses a spatial hashing space division method, where all cells of the underlying
/// table are stored in a 1D array and hold indexes into the flock.
///
/// Cells are never narrower than the maximum sensory distance, so a neighbourhood
/// query only ever needs the block of cells immediately around a boid. Neighbours
/// are reported in the same order as [`NaiveTracker`](super::naive_tracker::NaiveTracker)
/// does, which keeps both trackers' results bit for bit identical.
pub struct SpatHashTracker {
    boids: Vec<Boid>,
    table: Vec<Vec<usize>>,
    pub(crate) settings: SpatialHashingTableSettings,
}

impl SpatHashTracker {
    pub fn get_tracker_settings(run_options: &RunOptions) -> SpatialHashingTableSettings {
        let r = run_options.radius;
        let x_range = run_options.window.win_w + 2. * r;
        let y_range = run_options.window.win_h + 2. * r;

        let max_distance = run_options.max_sensory_distance();
        let x_cell_count = Self::get_cell_count(x_range, max_distance);
        let y_cell_count = Self::get_cell_count(y_range, max_distance);

        SpatialHashingTableSettings {
            x_min: -r,
            y_min: -r,
            x_cell_count,
            y_cell_count,
            cell_count: x_cell_count * y_cell_count,
            x_cell_res: x_range / x_cell_count as f32,
            y_cell_res: y_range / y_cell_count as f32,
        }
    }

    fn get_cell_count(range: f32, cell_size: f32) -> usize {
        if range.is_finite() && range > 0. && cell_size.is_finite() && cell_size > 0. {
            // floor keeps cells at least cell_size wide
            ((range / cell_size).floor() as usize).clamp(1, MAX_CELLS_PER_AXIS)
        } else {
            1
        }
    }

    /// Returns the cell along one axis, values outside the grid land in the edge cells
    pub fn get_axis_index(p: f32, min: f32, cell_res: f32, cell_count: usize) -> usize {
        let i = ((p - min) / cell_res).floor();
        (i.max(0.) as usize).min(cell_count - 1)
    }

    /// Returns "hashed" value representing an index for spatial subdivision
    pub fn get_table_index(p_x: f32, p_y: f32, settings: &SpatialHashingTableSettings) -> usize {
        Self::get_axis_index(p_x, settings.x_min, settings.x_cell_res, settings.x_cell_count)
            + Self::get_axis_index(p_y, settings.y_min, settings.y_cell_res, settings.y_cell_count)
                * settings.x_cell_count
    }

    fn axis_range(
        p: f32,
        reach: f32,
        min: f32,
        cell_res: f32,
        cell_count: usize,
    ) -> RangeInclusive<usize> {
        Self::get_axis_index(p - reach, min, cell_res, cell_count)
            ..=Self::get_axis_index(p + reach, min, cell_res, cell_count)
    }

    fn update_table(&mut self) {
        self.table.iter_mut().for_each(|cell| cell.clear());

        for (i, b) in self.boids.iter().enumerate() {
            let cell = Self::get_table_index(b.position.x, b.position.y, &self.settings);
            self.table[cell].push(i);
        }
    }
}

impl Tracker for SpatHashTracker {
    fn new(entities: &[Boid], run_options: &RunOptions) -> Self {
        let settings = SpatHashTracker::get_tracker_settings(run_options);
        log::debug!(
            "spatial hash grid {}x{} cells of {:.1}x{:.1}",
            settings.x_cell_count,
            settings.y_cell_count,
            settings.x_cell_res,
            settings.y_cell_res
        );

        let mut tracker = SpatHashTracker {
            boids: entities.to_vec(),
            table: vec![Vec::new(); settings.cell_count],
            settings,
        };
        tracker.update_table();

        tracker
    }

    fn get_neighbours<'a>(&'a self, boid: &Boid, run_options: &RunOptions) -> Vec<&'a Boid> {
        let s = &self.settings;
        let max_distance = run_options.max_sensory_distance();
        // widened a little so rounding can never drop a candidate cell
        let reach = max_distance * (1. + 1e-3) + 1e-3;

        let xs = Self::axis_range(boid.position.x, reach, s.x_min, s.x_cell_res, s.x_cell_count);
        let ys = Self::axis_range(boid.position.y, reach, s.y_min, s.y_cell_res, s.y_cell_count);

        iproduct!(ys, xs)
            .map(|(cy, cx)| cx + cy * s.x_cell_count)
            .flat_map(|cell| self.table[cell].iter().copied())
            .filter(|&i| {
                let other = &self.boids[i];
                other.id != boid.id && simple_distance_boid(boid, other) < max_distance
            })
            .sorted_unstable()
            .map(|i| &self.boids[i])
            .collect()
    }

    fn restart(&mut self, entities: &[Boid], run_options: &RunOptions) {
        self.boids = entities.to_vec();
        self.reindex(run_options);
    }

    fn view(&self) -> &[Boid] {
        &self.boids
    }

    fn view_mut(&mut self) -> &mut [Boid] {
        &mut self.boids
    }

    fn reindex(&mut self, run_options: &RunOptions) {
        // check if table grid needs rebuilding, e.g. window or distances changed
        let new_settings = SpatHashTracker::get_tracker_settings(run_options);
        if new_settings != self.settings {
            log::debug!(
                "resizing spatial hash grid to {}x{}",
                new_settings.x_cell_count,
                new_settings.y_cell_count
            );
            self.table.resize(new_settings.cell_count, Vec::new());
            self.settings = new_settings;
        }

        self.update_table();
    }
}
