use thiserror::Error;
use crate::policy::PolicyError;
use crate::simulation::config::ConfigError;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Step {cursor} is out of range for a reference sequence of length {len}")]
    OutOfRange { cursor: usize, len: usize },
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Replacement policy error: {0}")]
    Policy(#[from] PolicyError),
    #[error("Invalid simulation state: {0}")]
    InvalidState(String),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
