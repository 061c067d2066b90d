//! Core state types for the disk simulation.
//!
//! - `Disk`   one circular particle (position, velocity, acceleration, radius)
//! - `SimBox` the rectangular container `[0, lx] x [0, ly]`
//! - `System` the ordered disk collection, the clock `t` and the active box
//!
//! Disks are pure data; anything that draws them reads these fields.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Disk {
    pub x: NVec2, // center position
    pub v: NVec2, // velocity
    pub a: NVec2, // acceleration, overwritten by every force evaluation
    pub radius: f64, // fixed at creation
}

impl Disk {
    /// Disk at rest at `(x, y)`
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self {
            x: NVec2::new(x, y),
            v: NVec2::zeros(),
            a: NVec2::zeros(),
            radius,
        }
    }

    pub fn with_velocity(mut self, vx: f64, vy: f64) -> Self {
        self.v = NVec2::new(vx, vy);
        self
    }
}

/// Box dimensions. Passed around by value; a packing cycle hands back a new one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimBox {
    pub lx: f64,
    pub ly: f64,
}

impl SimBox {
    pub fn new(lx: f64, ly: f64) -> Self {
        Self { lx, ly }
    }

    pub fn area(&self) -> f64 {
        self.lx * self.ly
    }
}

/// Disks may sit slightly outside `bounds`: walls are soft springs, not hard constraints.
#[derive(Debug, Clone)]
pub struct System {
    pub disks: Vec<Disk>, // index is the disk's identity for the whole run
    pub t: f64, // time
    pub bounds: SimBox, // active box
}

impl System {
    pub fn new(disks: Vec<Disk>, bounds: SimBox) -> Self {
        Self { disks, t: 0.0, bounds }
    }
}
