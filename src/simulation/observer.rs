//! Hook for whatever consumes the run as it happens (logs, viewers).
//! Every method defaults to doing nothing.

use crate::simulation::metrics::StepMetrics;
use crate::simulation::packing::{CycleReport, PackingOutcome};
use crate::simulation::states::System;

pub trait Observer {
    /// After every Verlet step of a plain run. `metrics` is set on instrumented runs.
    fn on_step(&mut self, _sys: &System, _metrics: Option<&StepMetrics>) {}

    /// After a packing cycle, with the disks already re-centered
    fn on_cycle(&mut self, _report: &CycleReport, _sys: &System) {}

    fn on_converged(&mut self, _outcome: &PackingOutcome, _sys: &System) {}
}

/// Observer that ignores everything
pub struct NullObserver;

impl Observer for NullObserver {}
