//! Numerical and physical parameters for a run
//!
//! `Parameters` is an immutable snapshot taken when the scenario is built:
//! - integration step size and packing stop time,
//! - spring constant `k` and drag coefficient `gamma`,
//! - random seed

#[derive(Debug, Clone)]
pub struct Parameters {
    pub dt: f64, // step size
    pub k: f64, // spring constant for disk-disk and disk-wall overlap
    pub gamma: f64, // linear drag coefficient
    pub stop_time: f64, // simulated time per packing cycle
    pub clamp_final_step: bool, // shorten the last step so the clock lands on stop_time
    pub seed: u64, // deterministic seed
}
