use std::time::Instant;

use crate::simulation::forces::AccelSet;
use crate::simulation::integrator::verlet_integrator;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Disk, NVec2, SimBox, System};

/// Helper to build a square lattice of `n` disks, spaced so that
/// neighbours overlap slightly and the pair springs actually fire
fn make_system(n: usize) -> System {
    let side = (n as f64).sqrt().ceil() as usize;
    let radius = 0.5;
    let spacing = 0.95; // < 2r
    let l = side as f64 * spacing + 2.0 * radius;

    let disks = (0..n)
        .map(|i| {
            let i_f = i as f64;
            let (col, row) = ((i % side) as f64, (i / side) as f64);
            // deterministic jitter, no rand needed
            Disk::new(radius + col * spacing, radius + row * spacing, radius)
                .with_velocity((i_f * 0.37).sin() * 0.5, (i_f * 0.13).cos() * 0.5)
        })
        .collect();

    System::new(disks, SimBox::new(l, l))
}

fn make_params() -> Parameters {
    Parameters {
        dt: 0.01,
        k: 1.0e3,
        gamma: 1.0,
        stop_time: 10.0,
        clamp_final_step: true,
        seed: 42,
    }
}

/// Time one full force evaluation for growing `n`
pub fn bench_forces() {
    let ns = [100, 200, 400, 800, 1600, 3200];
    let params = make_params();
    let forces = AccelSet::soft_disks(params.k, params.gamma);

    for n in ns {
        let sys = make_system(n);
        let mut out = vec![NVec2::zeros(); n];

        // Warm up
        forces.accumulate_accels(&sys, &mut out);

        let t0 = Instant::now();
        forces.accumulate_accels(&sys, &mut out);
        let dt_eval = t0.elapsed().as_secs_f64();

        println!("N = {n:5}, force evaluation = {:8.6} s", dt_eval);
    }
}

/// Milliseconds per Verlet step against `n`, as CSV
pub fn bench_verlet_curve() {
    println!("N,step_ms");

    let params = make_params();
    let forces = AccelSet::soft_disks(params.k, params.gamma);

    for n in (100..=3200).step_by(100) {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 800 { 5 } else { 1 };
        let mut sys = make_system(n);

        let t0 = Instant::now();
        for _ in 0..steps {
            verlet_integrator(&mut sys, &forces, &params);
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6}", n, ms);
    }
}
