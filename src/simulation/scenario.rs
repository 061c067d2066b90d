//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - packing limits (`PackingConfig`)
//! - system state (`System` with disks at t = 0)
//! - active force set (`AccelSet`)
//! - the seeded random stream, which the packing controller takes over

use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use crate::configuration::config::{PackingConfig, ScenarioConfig};
use crate::error::{Result, SimError};
use crate::simulation::engine::Engine;
use crate::simulation::forces::AccelSet;
use crate::simulation::generator::{generate_random, load_configuration};
use crate::simulation::observer::Observer;
use crate::simulation::packing::{PackingController, PackingOutcome};
use crate::simulation::params::Parameters;
use crate::simulation::states::{SimBox, System};

pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub packing: PackingConfig,
    pub system: System,
    pub forces: AccelSet,
    pub rng: ChaChaRng,
}

impl Scenario {
    /// An unreadable input file is reported and leaves the disk set empty;
    /// an infeasible random layout is an error.
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            dt: p_cfg.dt,
            k: p_cfg.k,
            gamma: p_cfg.gamma,
            stop_time: p_cfg.stop_time,
            clamp_final_step: p_cfg.clamp_final_step,
            seed: p_cfg.seed,
        };

        let e_cfg = cfg.engine;
        let engine = Engine {
            mode: e_cfg.mode,
            substeps: e_cfg.substeps,
            max_gui_steps: e_cfg.max_gui_steps,
            instrumented: e_cfg.instrumented,
        };

        let bounds = SimBox::new(cfg.domain.lx, cfg.domain.ly);
        let mut rng = ChaChaRng::seed_from_u64(parameters.seed);

        let d_cfg = cfg.disks;
        let disks = if d_cfg.read_from_file {
            match load_configuration(&d_cfg.in_file) {
                Ok(disks) => disks,
                Err(e @ SimError::ConfigLoad { .. }) => {
                    log::error!("{e}; continuing with no disks");
                    Vec::new()
                }
                Err(e) => return Err(e),
            }
        } else {
            generate_random(
                d_cfg.n,
                &bounds,
                d_cfg.r_min,
                d_cfg.r_max,
                &mut rng,
                d_cfg.max_placement_attempts,
            )?
        };
        log::info!("scenario: {} disks in {} x {} box", disks.len(), bounds.lx, bounds.ly);

        let forces = AccelSet::soft_disks(parameters.k, parameters.gamma);

        Ok(Self {
            engine,
            parameters,
            packing: cfg.packing,
            system: System::new(disks, bounds),
            forces,
            rng,
        })
    }

    /// Start packing this scenario's disks. The controller takes over the
    /// random stream from where generation left it; the scenario keeps a
    /// stream forked from it, so a later controller draws fresh velocities.
    pub fn packing_controller(&mut self) -> Result<PackingController> {
        let fork = ChaChaRng::seed_from_u64(self.rng.gen());
        let rng = std::mem::replace(&mut self.rng, fork);
        PackingController::new(&mut self.system, self.packing.clone(), rng)
    }

    /// Pack to convergence. With no disks there is nothing to pack: the run
    /// is skipped with a warning and the outcome is `None`.
    pub fn pack(&mut self, observer: &mut dyn Observer) -> Result<Option<PackingOutcome>> {
        if self.system.disks.is_empty() {
            log::warn!("no disks to pack, skipping the packing run");
            return Ok(None);
        }
        let mut controller = self.packing_controller()?;
        let outcome = controller.run(
            &mut self.system,
            &self.forces,
            &self.parameters,
            self.engine.substeps,
            observer,
        )?;
        Ok(Some(outcome))
    }
}
