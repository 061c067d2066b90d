//! Force / acceleration contributors for the disk engine
//!
//! Unit mass throughout, so a force is an acceleration. The full force law is
//! an [`AccelSet`] of three terms: disk-disk springs, wall springs and drag.

use crate::simulation::states::{Disk, NVec2, SimBox, System};

/// Collection of acceleration terms (springs, walls, drag)
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per disk
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// The soft-disk force law: pair springs, wall springs, then drag
    pub fn soft_disks(k: f64, gamma: f64) -> Self {
        Self::new()
            .with(PairRepulsion { k })
            .with(WallRepulsion { k })
            .with(LinearDrag { gamma })
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations for all disks in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, sys: &System, out: &mut [NVec2]) {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec2::zeros();
        }
        for term in &self.terms {
            term.acceleration(sys, out);
        }
    }

    /// Overwrite every disk's `a` with the current net acceleration.
    /// Positions and velocities are left untouched.
    pub fn compute_accelerations(&self, sys: &mut System) {
        let mut out = vec![NVec2::zeros(); sys.disks.len()];
        self.accumulate_accels(&*sys, &mut out);
        for (d, a) in sys.disks.iter_mut().zip(out) {
            d.a = a;
        }
    }
}

/// Trait for acceleration sources operating on [`System`]
/// Implementations add their contribution into `out[i]` for each disk
pub trait Acceleration {
    fn acceleration(&self, sys: &System, out: &mut [NVec2]);
}

/// Overlap between two disks along the line of centers
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub normal: NVec2, // unit vector from the first disk to the second
    pub overlap: f64, // sum of radii minus center distance, > 0
}

/// Sum of radii minus center distance; positive when the disks overlap
pub fn pair_overlap(a: &Disk, b: &Disk) -> f64 {
    let d = b.x - a.x;
    (a.radius + b.radius) - d.x.hypot(d.y)
}

/// Contact between `a` and `b`, or `None` when they do not overlap.
/// Coincident centers have no line of centers and are reported as no contact.
pub fn pair_contact(a: &Disk, b: &Disk) -> Option<Contact> {
    let overlap = pair_overlap(a, b);
    if overlap <= 0.0 {
        return None;
    }
    let d = b.x - a.x;
    let dist = d.x.hypot(d.y);
    if dist == 0.0 {
        return None;
    }
    if dist == 0.0 {
        log::trace!("skipping pair with coincident centers at ({}, {})", a.x.x, a.x.y);
        return None;
    }
    Some(Contact { normal: d / dist, overlap })
}

/// Penetration depth into each wall as `[left, right, bottom, top]`.
/// Non-positive entries mean no contact with that side.
pub fn wall_penetrations(d: &Disk, bounds: &SimBox) -> [f64; 4] {
    let r = d.radius;
    [
        r - d.x.x,
        d.x.x - (bounds.lx - r),
        r - d.x.y,
        d.x.y - (bounds.ly - r),
    ]
}

/// Hookean repulsion between overlapping disks, `|f| = k * overlap`
pub struct PairRepulsion {
    pub k: f64, // spring constant
}

impl Acceleration for PairRepulsion {
    fn acceleration(&self, sys: &System, out: &mut [NVec2]) {
        let n = sys.disks.len();

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            let di = &sys.disks[i];
            for j in (i + 1)..n {
                let Some(c) = pair_contact(di, &sys.disks[j]) else {
                    continue;
                };
                // push i back along -normal, j forward along +normal
                let f = self.k * c.overlap * c.normal;
                out[i] -= f;
                out[j] += f;
            }
        }
    }
}

/// Wall springs, each side independent so corner contacts simply add up
pub struct WallRepulsion {
    pub k: f64, // spring constant
}

impl Acceleration for WallRepulsion {
    fn acceleration(&self, sys: &System, out: &mut [NVec2]) {
        for (d, a) in sys.disks.iter().zip(out.iter_mut()) {
            let [left, right, bottom, top] = wall_penetrations(d, &sys.bounds);
            if left > 0.0 { a.x += self.k * left; }
            if right > 0.0 { a.x -= self.k * right; }
            if bottom > 0.0 { a.y += self.k * bottom; }
            if top > 0.0 { a.y -= self.k * top; }
        }
    }
}

/// Velocity-proportional drag, `a -= gamma * v`
pub struct LinearDrag {
    pub gamma: f64,
}

impl Acceleration for LinearDrag {
    fn acceleration(&self, sys: &System, out: &mut [NVec2]) {
        for (d, a) in sys.disks.iter().zip(out.iter_mut()) {
            *a -= self.gamma * d.v;
        }
    }
}
