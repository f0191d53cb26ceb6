use std::{fs::File, io::BufReader, path::PathBuf};

use clap_serde_derive::{
    clap::{self, Parser},
    serde::Serialize,
    ClapSerde,
};
use flocking_lib::options::{get_window_size, OptionsError, RunOptions, TrackerType};
use thiserror::Error;

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Reynolds flocking (boids) drawn as a swarm of translucent circles.
pub struct Args {
    /// Config file
    #[arg(short, long = "config", default_value = "config.yaml")]
    pub config_path: PathBuf,

    /// Rest of arguments
    #[command(flatten)]
    pub config: <Config as ClapSerde>::Opt,
}

#[derive(ClapSerde, Serialize)]
/// Programatic configuration
///
/// Uses defaults, which can be overwritten by specifying a filepath for the `-c` or `--config` arg option
pub struct Config {
    #[default(100)]
    #[arg(short = 'n', long)]
    /// number of boids
    pub no_boids: usize,

    #[default(800)]
    #[arg(short = 'x', long)]
    pub init_width: u32,

    #[default(400)]
    #[arg(short = 'y', long)]
    pub init_height: u32,

    #[default(3.0)]
    #[arg(long = "max_speed")]
    pub max_speed: f32,
    #[default(0.1)]
    #[arg(long = "max_steering")]
    pub max_steering: f32,

    #[default(2.5)]
    #[arg(long = "sep_coef")]
    pub separation_coefficient: f32,
    #[default(1.0)]
    #[arg(long = "ali_coef")]
    pub alignment_coefficient: f32,
    #[default(1.0)]
    #[arg(long = "coh_coef")]
    pub cohesion_coefficient: f32,

    #[default(25.)]
    #[arg(long = "sep_dist")]
    pub separation_distance: f32,
    #[default(50.)]
    #[arg(long = "neigh_dist")]
    pub neighbour_distance: f32,

    #[default(3.)]
    #[arg(long = "radius")]
    /// how far past the edge a boid travels before wrapping
    pub radius: f32,
    #[default(16.)]
    #[arg(long = "size")]
    /// drawn diameter of a boid
    pub size: f32,

    #[default(false)]
    #[arg(long = "spathash")]
    /// use the spatial hashing neighbour lookup
    pub spatial_hashing: bool,

    #[default(0)]
    #[arg(short = 's', long)]
    /// seed for the initial flock, 0 seeds from entropy
    pub seed: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("error in configuration file {path:?}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid configuration: {0}")]
    Options(#[from] OptionsError),
}

impl Config {
    pub fn to_run_options(&self) -> RunOptions {
        RunOptions {
            init_boids: self.no_boids,
            window: get_window_size(self.init_width, self.init_height),
            max_speed: self.max_speed,
            max_steering: self.max_steering,
            separation_coefficient: self.separation_coefficient,
            alignment_coefficient: self.alignment_coefficient,
            cohesion_coefficient: self.cohesion_coefficient,
            separation_distance: self.separation_distance,
            neighbour_distance: self.neighbour_distance,
            radius: self.radius,
            size: self.size,
            tracker_type: if self.spatial_hashing {
                TrackerType::SpatHash
            } else {
                TrackerType::Naive
            },
            seed: (self.seed != 0).then_some(self.seed),
            ..Default::default()
        }
    }
}

/// Merges defaults, the config file (if there is one) and the command line, in that order
pub fn load_config(args: &mut Args) -> Result<Config, ConfigError> {
    match File::open(&args.config_path) {
        // Parse config with serde
        Ok(f) => match serde_yaml::from_reader::<_, <Config as ClapSerde>::Opt>(BufReader::new(f)) {
            // merge config already parsed from clap
            Ok(config) => Ok(Config::from(config).merge(&mut args.config)),
            Err(source) => Err(ConfigError::Yaml {
                path: args.config_path.clone(),
                source,
            }),
        },
        // If there is not config file return only config parsed from clap
        Err(_) => {
            log::debug!("no config file at {:?}, using defaults", args.config_path);
            Ok(Config::from(&mut args.config))
        }
    }
}

pub fn get_run_options(args: &mut Args) -> Result<RunOptions, ConfigError> {
    let run_options = load_config(args)?.to_run_options();
    run_options.validate()?;

    Ok(run_options)
}
