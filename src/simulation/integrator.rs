//! Fixed-step velocity-Verlet integration for the disk system
//!
//! `verlet_step` is one kick-drift-kick step of arbitrary size; `advance`
//! is what a driver calls once per invocation: up to `substeps` steps,
//! optionally bounded by a stop time

use super::states::System;
use super::forces::AccelSet;
use super::params::Parameters;

/// Advance the system by one step of size `dt` using velocity-Verlet
/// Uses two force evaluations per step and updates positions, velocities,
/// accelerations and `sys.t` in-place
pub fn verlet_step(sys: &mut System, forces: &AccelSet, dt: f64) {
    if sys.disks.is_empty() { // no disks, only the clock moves
        sys.t += dt;
        return;
    }
    let half_dt = 0.5 * dt;

    // a_n from x_n, v_n
    forces.compute_accelerations(sys);

    // Kick + drift: v_n+1/2 = v_n + (dt/2) a_n, x_n+1 = x_n + dt v_n+1/2
    for d in sys.disks.iter_mut() {
        d.v += half_dt * d.a;
        d.x += dt * d.v;
    }

    sys.t += dt;

    // a_n+1 from x_n+1 (drag sees the half-step velocity)
    forces.compute_accelerations(sys);

    // Second kick: v_n+1 = v_n+1/2 + (dt/2) a_n+1
    for d in sys.disks.iter_mut() {
        d.v += half_dt * d.a;
    }
}

/// Advance the system by one full step of `params.dt`
pub fn verlet_integrator(sys: &mut System, forces: &AccelSet, params: &Parameters) {
    verlet_step(sys, forces, params.dt);
}

/// Run up to `substeps` Verlet steps, stopping early once `sys.t` reaches
/// `stop_time`. With `params.clamp_final_step` the last step is shortened
/// so the clock lands exactly on `stop_time`.
///
/// Returns the number of steps taken.
pub fn advance(
    sys: &mut System,
    forces: &AccelSet,
    params: &Parameters,
    substeps: usize,
    stop_time: Option<f64>,
) -> usize {
    let mut taken = 0;
    for _ in 0..substeps {
        let mut dt = params.dt;
        let mut landing = None;

        if let Some(stop) = stop_time {
            if reached(sys, params, stop) {
                break;
            }
            let remaining = stop - sys.t;
            if params.clamp_final_step && remaining <= dt {
                dt = remaining;
                landing = Some(stop);
            }
        }

        verlet_step(sys, forces, dt);
        if let Some(stop) = landing {
            sys.t = stop;
        }
        taken += 1;
    }
    taken
}

/// Whether the clock has reached `stop_time`, allowing for round-off
/// from summing many `dt`s
pub fn reached(sys: &System, params: &Parameters, stop_time: f64) -> bool {
    stop_time - sys.t <= 1e-9 * params.dt
}
