use diskpack::simulation::states::{Disk, SimBox, System, NVec2};
use diskpack::simulation::params::Parameters;
use diskpack::simulation::forces::AccelSet;
use diskpack::simulation::integrator::{advance, verlet_step};
use diskpack::simulation::metrics::{bounding_box, kinetic_energy, potential_energy};
use diskpack::SimError;

/// Two resting disks of radius 1 in a 10 x 10 box, centers `sep` apart along x
pub fn two_disk_system(sep: f64) -> System {
    let cx = 5.0;
    System::new(
        vec![Disk::new(cx - sep / 2.0, 5.0, 1.0), Disk::new(cx + sep / 2.0, 5.0, 1.0)],
        SimBox::new(10.0, 10.0),
    )
}

/// Default physics parameters for tests
pub fn test_params() -> Parameters {
    Parameters {
        dt: 0.01,
        k: 1000.0,
        gamma: 0.0,
        stop_time: 1.0,
        clamp_final_step: true,
        seed: 42,
    }
}

pub fn force_set(p: &Parameters) -> AccelSet {
    AccelSet::soft_disks(p.k, p.gamma)
}

fn total_energy(sys: &System, k: f64) -> f64 {
    potential_energy(&sys.disks, &sys.bounds, k) + kinetic_energy(&sys.disks)
}

// ==================================================================================
// Force tests
// ==================================================================================

#[test]
fn pair_force_newton_third_law() {
    let mut sys = two_disk_system(1.5);
    let p = test_params();
    force_set(&p).compute_accelerations(&mut sys);

    let net = sys.disks[0].a + sys.disks[1].a;
    assert!(net.norm() < 1e-12, "Net force not zero: {:?}", net);
}

#[test]
fn pair_force_pushes_apart_along_line_of_centers() {
    // centers 1.0 apart along (0.6, 0.8), radii 1 -> overlap 1.0
    let mut sys = System::new(
        vec![Disk::new(4.0, 4.0, 1.0), Disk::new(4.6, 4.8, 1.0)],
        SimBox::new(10.0, 10.0),
    );
    let p = test_params();
    force_set(&p).compute_accelerations(&mut sys);

    let a0 = sys.disks[0].a;
    let a1 = sys.disks[1].a;
    assert!((a0 - NVec2::new(-600.0, -800.0)).norm() < 1e-9, "a0 = {:?}", a0);
    assert!((a1 - NVec2::new(600.0, 800.0)).norm() < 1e-9, "a1 = {:?}", a1);
    assert!((a0.norm() - p.k * 1.0).abs() < 1e-9);
}

#[test]
fn free_disk_feels_nothing() {
    let mut sys = System::new(vec![Disk::new(5.0, 5.0, 1.0)], SimBox::new(10.0, 10.0));
    let p = test_params();
    force_set(&p).compute_accelerations(&mut sys);

    assert_eq!(sys.disks[0].a, NVec2::zeros());
}

#[test]
fn separated_disks_feel_nothing() {
    let mut sys = two_disk_system(2.5);
    let p = test_params();
    force_set(&p).compute_accelerations(&mut sys);

    for d in &sys.disks {
        assert_eq!(d.a, NVec2::zeros());
    }
}

#[test]
fn left_wall_pushes_right() {
    let mut sys = System::new(vec![Disk::new(0.5, 5.0, 1.0)], SimBox::new(10.0, 10.0));
    let p = test_params();
    force_set(&p).compute_accelerations(&mut sys);

    let a = sys.disks[0].a;
    assert!((a.x - 500.0).abs() < 1e-9, "ax = {}", a.x);
    assert_eq!(a.y, 0.0);
}

#[test]
fn corner_walls_add_independently() {
    // left penetration 0.5, bottom penetration 0.75
    let mut sys = System::new(vec![Disk::new(0.5, 0.25, 1.0)], SimBox::new(10.0, 10.0));
    let p = test_params();
    force_set(&p).compute_accelerations(&mut sys);

    let a = sys.disks[0].a;
    assert!((a.x - 500.0).abs() < 1e-9);
    assert!((a.y - 750.0).abs() < 1e-9);
}

#[test]
fn top_right_walls_push_inward() {
    let mut sys = System::new(vec![Disk::new(9.8, 9.6, 0.5)], SimBox::new(10.0, 10.0));
    let p = test_params();
    force_set(&p).compute_accelerations(&mut sys);

    let a = sys.disks[0].a;
    assert!((a.x + 300.0).abs() < 1e-9, "ax = {}", a.x);
    assert!((a.y + 100.0).abs() < 1e-9, "ay = {}", a.y);
}

#[test]
fn drag_opposes_velocity() {
    let mut sys = System::new(
        vec![Disk::new(5.0, 5.0, 1.0).with_velocity(1.0, -2.0)],
        SimBox::new(10.0, 10.0),
    );
    let mut p = test_params();
    p.gamma = 0.5;
    force_set(&p).compute_accelerations(&mut sys);

    assert!((sys.disks[0].a - NVec2::new(-0.5, 1.0)).norm() < 1e-12);
}

#[test]
fn coincident_centers_stay_finite() {
    let mut sys = System::new(
        vec![Disk::new(5.0, 5.0, 1.0), Disk::new(5.0, 5.0, 1.0)],
        SimBox::new(10.0, 10.0),
    );
    let p = test_params();
    force_set(&p).compute_accelerations(&mut sys);

    for d in &sys.disks {
        assert!(d.a.x.is_finite() && d.a.y.is_finite());
        assert_eq!(d.a, NVec2::zeros());
    }
}

#[test]
fn coincident_centers_keep_their_spring_energy() {
    let sys = two_disk_system(0.0);
    let u = potential_energy(&sys.disks, &sys.bounds, 1000.0);
    // full overlap of 2.0: ½ · 1000 · 2²
    assert!((u - 2000.0).abs() < 1e-9, "U = {}", u);
}

#[test]
fn force_evaluation_overwrites_stale_acceleration() {
    let mut sys = System::new(vec![Disk::new(5.0, 5.0, 1.0)], SimBox::new(10.0, 10.0));
    sys.disks[0].a = NVec2::new(123.0, -7.0);
    let p = test_params();
    force_set(&p).compute_accelerations(&mut sys);

    assert_eq!(sys.disks[0].a, NVec2::zeros());
}

#[test]
fn spring_force_is_minus_gradient_of_potential() {
    // overlapping pair, disk 0 also pressed into the left wall
    let sys = System::new(
        vec![Disk::new(0.8, 5.0, 1.0), Disk::new(2.3, 5.3, 1.0)],
        SimBox::new(10.0, 10.0),
    );
    let p = test_params();
    let mut out = vec![NVec2::zeros(); 2];
    force_set(&p).accumulate_accels(&sys, &mut out);

    let h = 1e-6;
    let mut plus = sys.clone();
    let mut minus = sys.clone();
    plus.disks[0].x.x += h;
    minus.disks[0].x.x -= h;
    let du_dx = (potential_energy(&plus.disks, &plus.bounds, p.k)
        - potential_energy(&minus.disks, &minus.bounds, p.k))
        / (2.0 * h);

    assert!((out[0].x + du_dx).abs() < 1e-3, "F = {}, -dU/dx = {}", out[0].x, -du_dx);
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn free_flight_moves_at_constant_velocity() {
    let mut sys = System::new(
        vec![Disk::new(5.0, 5.0, 1.0).with_velocity(1.0, -0.5)],
        SimBox::new(10.0, 10.0),
    );
    let p = test_params();
    let forces = force_set(&p);

    for _ in 0..10 {
        verlet_step(&mut sys, &forces, p.dt);
    }

    let d = &sys.disks[0];
    assert!((d.x - NVec2::new(5.1, 4.95)).norm() < 1e-12, "x = {:?}", d.x);
    assert!((d.v - NVec2::new(1.0, -0.5)).norm() < 1e-12);
    assert!((sys.t - 0.1).abs() < 1e-12);
}

#[test]
fn advance_clamps_final_step_onto_stop_time() {
    let mut sys = System::new(vec![Disk::new(5.0, 5.0, 1.0)], SimBox::new(10.0, 10.0));
    let mut p = test_params();
    p.dt = 0.3;
    let forces = force_set(&p);

    let taken = advance(&mut sys, &forces, &p, 10, Some(1.0));

    assert_eq!(taken, 4);
    assert_eq!(sys.t, 1.0);

    // already there: nothing more to do
    assert_eq!(advance(&mut sys, &forces, &p, 10, Some(1.0)), 0);
}

#[test]
fn advance_without_clamp_overshoots() {
    let mut sys = System::new(vec![Disk::new(5.0, 5.0, 1.0)], SimBox::new(10.0, 10.0));
    let mut p = test_params();
    p.dt = 0.3;
    p.clamp_final_step = false;
    let forces = force_set(&p);

    let taken = advance(&mut sys, &forces, &p, 10, Some(1.0));

    assert_eq!(taken, 4);
    assert!((sys.t - 1.2).abs() < 1e-12);
}

#[test]
fn advance_respects_substep_budget() {
    let mut sys = System::new(vec![Disk::new(5.0, 5.0, 1.0)], SimBox::new(10.0, 10.0));
    let p = test_params();
    let forces = force_set(&p);

    assert_eq!(advance(&mut sys, &forces, &p, 7, None), 7);
    assert!((sys.t - 0.07).abs() < 1e-12);
}

#[test]
fn verlet_conserves_energy_without_drag() {
    // overlap 0.2 -> U = 0.5 * 1000 * 0.04 = 20
    let mut sys = two_disk_system(1.8);
    let mut p = test_params();
    p.dt = 0.0005;
    let forces = force_set(&p);

    let e0 = total_energy(&sys, p.k);
    assert!((e0 - 20.0).abs() < 1e-9);

    for _ in 0..400 {
        verlet_step(&mut sys, &forces, p.dt);
    }

    let e1 = total_energy(&sys, p.k);
    assert!(((e1 - e0) / e0).abs() < 1e-2, "E0 = {}, E1 = {}", e0, e1);
    // the pair has separated and the spring energy is now kinetic
    assert!(sys.disks[1].x.x - sys.disks[0].x.x > 2.0);
}

#[test]
fn drag_dissipates_energy() {
    let mut sys = two_disk_system(1.8);
    let mut p = test_params();
    p.dt = 0.0005;
    p.gamma = 1.0;
    let forces = force_set(&p);

    let e0 = total_energy(&sys, p.k);
    for _ in 0..400 {
        verlet_step(&mut sys, &forces, p.dt);
    }

    assert!(total_energy(&sys, p.k) < e0);
}

#[test]
fn empty_system_only_advances_clock() {
    let mut sys = System::new(Vec::new(), SimBox::new(10.0, 10.0));
    let p = test_params();
    verlet_step(&mut sys, &force_set(&p), p.dt);

    assert!(sys.disks.is_empty());
    assert!((sys.t - p.dt).abs() < 1e-15);
}

// ==================================================================================
// Metrics tests
// ==================================================================================

#[test]
fn pair_potential_energy() {
    let sys = two_disk_system(1.8);
    let u = potential_energy(&sys.disks, &sys.bounds, 1000.0);
    assert!((u - 20.0).abs() < 1e-9, "U = {}", u);
}

#[test]
fn wall_potential_energy() {
    let disks = vec![Disk::new(0.5, 5.0, 1.0)];
    let u = potential_energy(&disks, &SimBox::new(10.0, 10.0), 1000.0);
    assert!((u - 125.0).abs() < 1e-9, "U = {}", u);
}

#[test]
fn kinetic_energy_unit_mass() {
    let disks = vec![
        Disk::new(1.0, 1.0, 0.5).with_velocity(3.0, 4.0),
        Disk::new(3.0, 1.0, 0.5).with_velocity(0.0, -1.0),
    ];
    assert!((kinetic_energy(&disks) - 13.0).abs() < 1e-12);
}

#[test]
fn bounding_box_covers_full_extent() {
    let disks = vec![Disk::new(1.0, 1.0, 0.5), Disk::new(4.0, 3.0, 1.0)];
    let bb = bounding_box(&disks).unwrap();

    assert_eq!((bb.x_min, bb.x_max, bb.y_min, bb.y_max), (0.5, 5.0, 0.5, 4.0));
    assert!((bb.width() - 4.5).abs() < 1e-12);
    assert!((bb.height() - 3.5).abs() < 1e-12);
    assert!((bb.area() - 15.75).abs() < 1e-12);
}

#[test]
fn bounding_box_of_nothing_is_an_error() {
    let err = bounding_box(&[]).unwrap_err();
    assert!(matches!(err, SimError::DegenerateGeometry(_)));
}
