//! Plain simulation driver
//!
//! Each `do_step` call is one invocation from the caller's timer: `substeps`
//! Verlet steps, each followed by an observer callback. After
//! `max_gui_steps` invocations the driver reports `Stopped` and does nothing
//! further.

use crate::simulation::integrator::verlet_integrator;
use crate::simulation::metrics::StepMetrics;
use crate::simulation::observer::Observer;
use crate::simulation::scenario::Scenario;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverStatus {
    Continue,
    Stopped,
}

pub struct Driver {
    pub scenario: Scenario,
    gui_steps: usize,
}

impl Driver {
    pub fn new(scenario: Scenario) -> Self {
        Self { scenario, gui_steps: 0 }
    }

    pub fn gui_steps(&self) -> usize {
        self.gui_steps
    }

    pub fn do_step(&mut self, observer: &mut dyn Observer) -> DriverStatus {
        if self.gui_steps >= self.scenario.engine.max_gui_steps {
            return DriverStatus::Stopped;
        }

        // Split &mut Scenario into &mut fields in one destructuring step
        let Scenario {
            engine,
            parameters,
            system,
            forces,
            ..
        } = &mut self.scenario;

        for _ in 0..engine.substeps {
            verlet_integrator(system, forces, parameters);
            let metrics = engine
                .instrumented
                .then(|| StepMetrics::measure(system, parameters.k));
            observer.on_step(system, metrics.as_ref());
        }

        self.gui_steps += 1;
        if self.gui_steps >= self.scenario.engine.max_gui_steps {
            DriverStatus::Stopped
        } else {
            DriverStatus::Continue
        }
    }

    /// Invoke `do_step` until the step cap is hit
    pub fn run(&mut self, observer: &mut dyn Observer) {
        log::info!(
            "simulating {} disks for {} invocations of {} steps",
            self.scenario.system.disks.len(),
            self.scenario.engine.max_gui_steps,
            self.scenario.engine.substeps
        );
        while self.do_step(observer) == DriverStatus::Continue {}
        log::info!("simulation stopped at t = {:.3}", self.scenario.system.t);
    }
}
