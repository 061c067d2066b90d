//! High-level runtime engine settings
//!
//! Selects the run mode (plain simulation or packing), how many Verlet
//! sub-steps each driver invocation performs, and whether per-step
//! metrics are produced

use crate::configuration::config::RunModeConfig;

#[derive(Debug, Clone)]
pub struct Engine {
    pub mode: RunModeConfig, // simulate or pack
    pub substeps: usize, // Verlet steps per invocation (T)
    pub max_gui_steps: usize, // invocation cap for the plain simulation
    pub instrumented: bool, // compute StepMetrics after every step
}
