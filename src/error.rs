//! Error type shared by the simulation library

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by configuration loading, geometry checks and run logging
#[derive(Debug, Error)]
pub enum SimError {
    #[error("could not read configuration {path:?}: {source}")]
    ConfigLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not open log {path:?}: {source}")]
    LogWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("placed {placed} of {requested} disks before giving up after {attempts} attempts")]
    InfeasiblePacking {
        placed: usize,
        requested: usize,
        attempts: usize,
    },

    #[error("invalid scenario: {0}")]
    ScenarioParse(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
