//! Packing controller: repeated settle-and-shrink cycles
//!
//! Each cycle resets the clock, gives every disk a fresh random velocity and
//! integrates to `stop_time`. The settled cluster is then moved so its
//! bounding box starts at the origin, and that bounding box becomes the next
//! cycle's box. The run converges after `stable_threshold` consecutive cycles
//! whose relative area change stays below `tolerance`, or stops at
//! `max_cycles`.
//!
//! ```text
//! RunningCycle --t >= stop_time--> CycleDone --+--> RunningCycle (shrunk box)
//!                                              +--> Converged
//! ```

use rand::Rng;
use rand_chacha::ChaChaRng;

use crate::configuration::config::PackingConfig;
use crate::error::{Result, SimError};
use crate::simulation::forces::AccelSet;
use crate::simulation::integrator::{advance, reached};
use crate::simulation::metrics::{bounding_box, BoundingBox};
use crate::simulation::observer::Observer;
use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec2, SimBox, System};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackingPhase {
    RunningCycle,
    CycleDone,
    Converged,
}

/// Area bookkeeping across cycles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackingHistory {
    pub prev_area: f64,
    pub stable_count: usize, // consecutive cycles below tolerance
    pub cycle_count: usize, // completed cycles
}

impl PackingHistory {
    pub fn new(initial_area: f64) -> Self {
        Self {
            prev_area: initial_area,
            stable_count: 0,
            cycle_count: 0,
        }
    }

    /// Fold one completed cycle's area in and return its relative change
    pub fn record(&mut self, area: f64, tolerance: f64) -> f64 {
        self.cycle_count += 1;
        let rel_change = if self.prev_area > 0.0 {
            (self.prev_area - area).abs() / self.prev_area
        } else {
            // a zero-area history can only be matched exactly
            if area == 0.0 { 0.0 } else { f64::INFINITY }
        };
        if rel_change < tolerance {
            self.stable_count += 1;
        } else {
            self.stable_count = 0;
        }
        self.prev_area = area;
        rel_change
    }

    pub fn is_done(&self, cfg: &PackingConfig) -> bool {
        self.cycle_count >= cfg.max_cycles || self.stable_count >= cfg.stable_threshold
    }
}

/// Summary of one completed cycle
#[derive(Debug, Clone, Copy)]
pub struct CycleReport {
    pub cycle: usize, // 1-based
    pub area: f64,
    pub rel_change: f64,
    pub stable_count: usize,
    pub bbox: BoundingBox, // before re-centering
    pub next_box: SimBox,
}

/// Final result of a packing run
#[derive(Debug, Clone, Copy)]
pub struct PackingOutcome {
    pub cycles: usize,
    pub area: f64,
    pub final_box: SimBox,
    pub stable: bool, // false when max_cycles ran out first
}

/// What one invocation of [`PackingController::do_step`] ended with
#[derive(Debug, Clone, Copy)]
pub enum PackingStatus {
    Running,
    CycleCompleted(CycleReport),
    Converged(PackingOutcome),
}

pub struct PackingController {
    cfg: PackingConfig,
    history: PackingHistory,
    phase: PackingPhase,
    initial_area: f64,
    rng: ChaChaRng,
}

impl PackingController {
    /// Start the first cycle on `sys`. The area history starts from the
    /// bounding box of the initial layout.
    pub fn new(sys: &mut System, cfg: PackingConfig, rng: ChaChaRng) -> Result<Self> {
        if sys.disks.is_empty() {
            return Err(SimError::DegenerateGeometry("cannot pack zero disks".into()));
        }
        let initial_area = bounding_box(&sys.disks)?.area();
        let mut ctl = Self {
            cfg,
            history: PackingHistory::new(initial_area),
            phase: PackingPhase::RunningCycle,
            initial_area,
            rng,
        };
        ctl.start_cycle(sys);
        Ok(ctl)
    }

    pub fn phase(&self) -> PackingPhase {
        self.phase
    }

    pub fn history(&self) -> &PackingHistory {
        &self.history
    }

    pub fn initial_area(&self) -> f64 {
        self.initial_area
    }

    /// One invocation: up to `substeps` Verlet steps toward `params.stop_time`,
    /// then the cycle bookkeeping if the clock got there.
    pub fn do_step(
        &mut self,
        sys: &mut System,
        forces: &AccelSet,
        params: &Parameters,
        substeps: usize,
    ) -> Result<PackingStatus> {
        if self.phase == PackingPhase::Converged {
            return Ok(PackingStatus::Converged(self.outcome(sys)));
        }

        advance(sys, forces, params, substeps, Some(params.stop_time));
        if !reached(sys, params, params.stop_time) {
            return Ok(PackingStatus::Running);
        }
        self.phase = PackingPhase::CycleDone;

        let report = self.finish_cycle(sys)?;
        if self.history.is_done(&self.cfg) {
            self.phase = PackingPhase::Converged;
            let outcome = self.outcome(sys);
            log::info!(
                "packing finished after {} cycles, area {:.4} ({})",
                outcome.cycles,
                outcome.area,
                if outcome.stable { "stable" } else { "cycle limit" }
            );
            return Ok(PackingStatus::Converged(outcome));
        }

        sys.bounds = report.next_box;
        self.start_cycle(sys);
        Ok(PackingStatus::CycleCompleted(report))
    }

    /// Drive cycles until convergence, reporting to `observer` along the way
    pub fn run(
        &mut self,
        sys: &mut System,
        forces: &AccelSet,
        params: &Parameters,
        substeps: usize,
        observer: &mut dyn Observer,
    ) -> Result<PackingOutcome> {
        // a zero-step invocation would never reach the stop time
        let substeps = substeps.max(1);
        loop {
            match self.do_step(sys, forces, params, substeps)? {
                PackingStatus::Running => {}
                PackingStatus::CycleCompleted(report) => observer.on_cycle(&report, sys),
                PackingStatus::Converged(outcome) => {
                    observer.on_converged(&outcome, sys);
                    return Ok(outcome);
                }
            }
        }
    }

    fn start_cycle(&mut self, sys: &mut System) {
        sys.t = 0.0;
        for d in sys.disks.iter_mut() {
            d.v = NVec2::new(self.rng.gen::<f64>() - 0.5, self.rng.gen::<f64>() - 0.5);
        }
        self.phase = PackingPhase::RunningCycle;
    }

    fn finish_cycle(&mut self, sys: &mut System) -> Result<CycleReport> {
        let bbox = bounding_box(&sys.disks)?;
        let area = bbox.area();

        let origin = NVec2::new(bbox.x_min, bbox.y_min);
        for d in sys.disks.iter_mut() {
            d.x -= origin;
        }

        let rel_change = self.history.record(area, self.cfg.tolerance);
        let report = CycleReport {
            cycle: self.history.cycle_count,
            area,
            rel_change,
            stable_count: self.history.stable_count,
            bbox,
            next_box: bbox.as_sim_box(),
        };
        log::debug!(
            "cycle {}: area {:.5}, change {:.2e}, stable {}",
            report.cycle, area, rel_change, report.stable_count
        );
        Ok(report)
    }

    fn outcome(&self, sys: &System) -> PackingOutcome {
        PackingOutcome {
            cycles: self.history.cycle_count,
            area: self.history.prev_area,
            final_box: bounding_box(&sys.disks)
                .map(|bb| bb.as_sim_box())
                .unwrap_or(sys.bounds),
            stable: self.history.stable_count >= self.cfg.stable_threshold,
        }
    }
}
