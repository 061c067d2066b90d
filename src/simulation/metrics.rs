//! Scalar diagnostics computed from the current disk state
//!
//! The potential is the one the spring forces in [`crate::simulation::forces`]
//! derive from, so `-grad U` reproduces those forces term by term.

use crate::error::{Result, SimError};
use crate::simulation::forces::{pair_overlap, wall_penetrations};
use crate::simulation::states::{Disk, SimBox, System};

/// Tightest axis-aligned box around the full extent of every disk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Box of the same size with its lower-left corner at the origin
    pub fn as_sim_box(&self) -> SimBox {
        SimBox::new(self.width(), self.height())
    }
}

/// Per-step record produced by the instrumented driver
#[derive(Debug, Clone, Copy)]
pub struct StepMetrics {
    pub t: f64,
    pub potential: f64,
    pub kinetic: f64,
    pub bbox: Option<BoundingBox>, // None for an empty disk set
}

impl StepMetrics {
    pub fn measure(sys: &System, k: f64) -> Self {
        Self {
            t: sys.t,
            potential: potential_energy(&sys.disks, &sys.bounds, k),
            kinetic: kinetic_energy(&sys.disks),
            bbox: bounding_box(&sys.disks).ok(),
        }
    }
}

/// Total spring energy: `½ k overlap²` per overlapping pair plus
/// `½ k p²` per positive wall penetration
pub fn potential_energy(disks: &[Disk], bounds: &SimBox, k: f64) -> f64 {
    let mut u = 0.0;
    for (i, a) in disks.iter().enumerate() {
        for b in &disks[i + 1..] {
            // coincident centers still count: only the force direction is undefined there
            let overlap = pair_overlap(a, b);
            if overlap > 0.0 {
                u += 0.5 * k * overlap * overlap;
            }
        }
        for p in wall_penetrations(a, bounds) {
            if p > 0.0 {
                u += 0.5 * k * p * p;
            }
        }
    }
    u
}

/// `Σ ½|v|²` with unit mass
pub fn kinetic_energy(disks: &[Disk]) -> f64 {
    disks.iter().map(|d| 0.5 * d.v.norm_squared()).sum()
}

pub fn bounding_box(disks: &[Disk]) -> Result<BoundingBox> {
    if disks.is_empty() {
        return Err(SimError::DegenerateGeometry(
            "bounding box of an empty disk set".into(),
        ));
    }

    let mut bb = BoundingBox {
        x_min: f64::INFINITY,
        x_max: f64::NEG_INFINITY,
        y_min: f64::INFINITY,
        y_max: f64::NEG_INFINITY,
    };
    for d in disks {
        bb.x_min = bb.x_min.min(d.x.x - d.radius);
        bb.x_max = bb.x_max.max(d.x.x + d.radius);
        bb.y_min = bb.y_min.min(d.x.y - d.radius);
        bb.y_max = bb.y_max.max(d.x.y + d.radius);
    }
    Ok(bb)
}
