/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    pub elevator: ElevatorConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ElevatorConfig {
    pub n_floors: u8,
    pub max_capacity: usize,
}

/**
 * Settings for the passenger-flow simulation.
 *
 * # Fields
 * - `duration`:            Number of simulated minutes, one elevator step each.
 * - `request_probability`: Chance per minute that a new passenger shows up.
 * - `tick_ms`:             Wall-clock length of a simulated minute. 0 runs unpaced.
 * - `seed`:                Seed for the passenger generator. Random when absent.
 */
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub duration: u64,
    pub request_probability: f64,
    pub tick_ms: u64,
    pub seed: Option<u64>,
}

impl Default for ElevatorConfig {
    fn default() -> Self {
        ElevatorConfig {
            n_floors: 10,
            max_capacity: 8,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            duration: 24 * 60,
            request_probability: 0.01,
            tick_ms: 1000,
            seed: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&config_str)
}

pub fn parse_config(config_str: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(config_str)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.elevator.n_floors == 0 {
            return Err(ConfigError::Invalid(
                "elevator.n_floors must be at least 1".to_string(),
            ));
        }
        let p = self.simulation.request_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::Invalid(format!(
                "simulation.request_probability must be within [0, 1], got {}",
                p
            )));
        }
        Ok(())
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
