//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. Every section and field may be omitted; the defaults are the
//! classic packing setup (30 disks in a 10 x 10 box, `k = 1000`, `gamma = 1`).
//!
//! - [`EngineConfig`]     – run mode, sub-steps per invocation, GUI-step cap
//! - [`ParametersConfig`] – time step, spring/drag constants, stop time, seed
//! - [`DomainConfig`]     – box size
//! - [`DisksConfig`]      – random generation or file input
//! - [`PackingConfig`]    – convergence tolerance and limits
//! - [`OutputConfig`]     – log destinations
//! - [`ScenarioConfig`]   – top-level wrapper
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   mode: "pack"            # or "simulate"
//!   substeps: 50            # Verlet steps per invocation (T)
//!   max_gui_steps: 2000
//!   instrumented: false
//!
//! parameters:
//!   dt: 0.01
//!   k: 1000.0
//!   gamma: 1.0
//!   stop_time: 10.0         # simulated time per packing cycle
//!   seed: 42
//!
//! domain:
//!   lx: 10.0
//!   ly: 10.0
//!
//! disks:
//!   n: 30
//!   r_min: 0.2
//!   r_max: 0.5
//!   read_from_file: false
//!   in_file: "packing_in.txt"
//!
//! packing:
//!   tolerance: 1.0e-3
//!   max_cycles: 1000
//!   stable_threshold: 15
//!
//! output:
//!   out_file: "packing_out.csv"
//! ```

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Result;

/// What a run does with the disks
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunModeConfig {
    #[serde(rename = "simulate")] // integrate for max_gui_steps invocations, logging every step
    Simulate,

    #[serde(rename = "pack")] // repeat cycles, shrinking the box to the settled bounding box
    #[default]
    Pack,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub mode: RunModeConfig,
    pub substeps: usize, // T
    pub max_gui_steps: usize,
    pub instrumented: bool, // per-step energy and bounding box records
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: RunModeConfig::Pack,
            substeps: 1,
            max_gui_steps: 2000,
            instrumented: false,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub dt: f64,
    pub k: f64,
    pub gamma: f64,
    pub stop_time: f64,
    pub clamp_final_step: bool,
    pub seed: u64,
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            dt: 0.01,
            k: 1.0e3,
            gamma: 1.0,
            stop_time: 10.0,
            clamp_final_step: true,
            seed: 42,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DomainConfig {
    pub lx: f64,
    pub ly: f64,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self { lx: 10.0, ly: 10.0 }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DisksConfig {
    pub n: usize,
    pub r_min: f64,
    pub r_max: f64,
    pub read_from_file: bool,
    pub in_file: PathBuf,
    pub max_placement_attempts: usize, // candidate centers tried per disk
}

impl Default for DisksConfig {
    fn default() -> Self {
        Self {
            n: 30,
            r_min: 0.2,
            r_max: 0.5,
            read_from_file: false,
            in_file: PathBuf::from("packing_in.txt"),
            max_placement_attempts: 100_000,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PackingConfig {
    pub tolerance: f64, // relative area change that counts as stable
    pub max_cycles: usize,
    pub stable_threshold: usize, // consecutive stable cycles needed to converge
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self {
            tolerance: 1.0e-3,
            max_cycles: 1000,
            stable_threshold: 15,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub out_file: Option<PathBuf>, // CSV run log
    pub metrics_file: Option<PathBuf>, // per-step StepMetrics, instrumented runs only
    pub final_config_file: Option<PathBuf>, // converged packing as x,y,r lines
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            out_file: Some(PathBuf::from("packing_out.csv")),
            metrics_file: None,
            final_config_file: None,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub domain: DomainConfig,
    pub disks: DisksConfig,
    pub packing: PackingConfig,
    pub output: OutputConfig,
}

impl ScenarioConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}
