//! Error types for the simulation core.
//!
//! Terminal verdicts (ejection, collision) are not errors; they are reported
//! through [`crate::simulation::stability::Verdict`].

use thiserror::Error;

use crate::simulation::clock::RunState;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("degenerate configuration: {0}")]
    DegenerateConfiguration(String),

    #[error("body index {index} out of range for {len} bodies")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cannot {command} while {from}")]
    InvalidTransition { from: RunState, command: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
