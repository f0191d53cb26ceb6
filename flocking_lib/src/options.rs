use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunOptions {
    pub init_boids: usize,
    pub window: WindowSize,

    pub max_speed: f32,
    /// maximum magnitude of any single steering contribution
    pub max_steering: f32,

    pub separation_coefficient: f32,
    pub alignment_coefficient: f32,
    pub cohesion_coefficient: f32,

    /// desired separation, neighbours closer than this push the boid away
    pub separation_distance: f32,
    /// range of alignment and cohesion
    pub neighbour_distance: f32,

    /// margin past the window edge before a boid wraps to the other side
    pub radius: f32,
    /// render diameter, has no effect on the simulation
    pub size: f32,

    pub tracker_type: TrackerType,
    pub seed: Option<u64>,
    pub sample_rate: u64,
}

impl RunOptions {
    /// Neighbour cutoff, the largest of the individual rule distances
    pub fn max_sensory_distance(&self) -> f32 {
        self.separation_distance.max(self.neighbour_distance)
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        let WindowSize { win_w, win_h } = self.window;
        if !(win_w.is_finite() && win_h.is_finite() && win_w > 0. && win_h > 0.) {
            return Err(OptionsError::InvalidWindow {
                width: win_w,
                height: win_h,
            });
        }

        [
            ("max_speed", self.max_speed),
            ("max_steering", self.max_steering),
            ("separation_coefficient", self.separation_coefficient),
            ("alignment_coefficient", self.alignment_coefficient),
            ("cohesion_coefficient", self.cohesion_coefficient),
            ("separation_distance", self.separation_distance),
            ("neighbour_distance", self.neighbour_distance),
            ("radius", self.radius),
            ("size", self.size),
        ]
        .into_iter()
        .try_for_each(|(name, value)| {
            if value.is_finite() && value >= 0. {
                Ok(())
            } else {
                Err(OptionsError::InvalidParameter { name, value })
            }
        })?;

        if self.sample_rate == 0 {
            return Err(OptionsError::ZeroSampleRate);
        }

        Ok(())
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        let init_boids = 100;
        let init_width = 800;
        let init_height = 400;

        let max_speed = 3.0;
        let max_steering = 0.1;

        let separation_coefficient = 2.5;
        let alignment_coefficient = 1.0;
        let cohesion_coefficient = 1.0;

        let separation_distance = 25.;
        let neighbour_distance = 50.;

        RunOptions {
            init_boids,
            window: self::get_window_size(init_width, init_height),
            max_speed,
            max_steering,
            separation_coefficient,
            alignment_coefficient,
            cohesion_coefficient,
            separation_distance,
            neighbour_distance,
            radius: 3.,
            size: 16.,
            tracker_type: TrackerType::Naive,
            // tracker_type: TrackerType::SpatHash,
            seed: None,
            sample_rate: 1,
        }
    }
}

pub fn get_window_size(init_width: u32, init_height: u32) -> WindowSize {
    WindowSize {
        win_w: init_width as f32,
        win_h: init_height as f32,
    }
}

/// Canvas dimensions, the origin is the top left corner
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct WindowSize {
    /// width
    pub win_w: f32,
    /// height
    pub win_h: f32,
}

impl Default for WindowSize {
    fn default() -> Self {
        get_window_size(800, 400)
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
// {"type": "SpatHash"}
pub enum TrackerType {
    SpatHash,
    Naive,
}

#[derive(Debug, Error, PartialEq)]
pub enum OptionsError {
    #[error("window must have a positive finite size, got {width}x{height}")]
    InvalidWindow { width: f32, height: f32 },
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidParameter { name: &'static str, value: f32 },
    #[error("sample rate must be at least 1")]
    ZeroSampleRate,
}
