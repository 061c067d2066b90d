//! Initial disk layouts: rejection-sampled random placement, or a text file
//! with one `x y r` (or `x,y,r`) per line.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use rand::Rng;

use crate::error::{Result, SimError};
use crate::simulation::states::{Disk, SimBox};

/// Place `n` non-overlapping disks with radii uniform in `[r_min, r_max]`,
/// centers uniform in `[r, lx - r] x [r, ly - r]` and velocity components
/// uniform in `[-0.5, 0.5]`.
///
/// Each disk gets at most `max_attempts` candidate centers. If none fits,
/// fails with [`SimError::InfeasiblePacking`].
pub fn generate_random<R: Rng>(
    n: usize,
    bounds: &SimBox,
    r_min: f64,
    r_max: f64,
    rng: &mut R,
    max_attempts: usize,
) -> Result<Vec<Disk>> {
    let mut disks: Vec<Disk> = Vec::with_capacity(n);
    let infeasible = |placed: usize, attempts: usize| SimError::InfeasiblePacking {
        placed,
        requested: n,
        attempts,
    };

    while disks.len() < n {
        let r = if r_max > r_min { rng.gen_range(r_min..=r_max) } else { r_min };

        // a disk wider than the box never fits
        if 2.0 * r > bounds.lx || 2.0 * r > bounds.ly {
            return Err(infeasible(disks.len(), 0));
        }

        let mut placed = None;
        for _ in 0..max_attempts {
            let x = r + (bounds.lx - 2.0 * r) * rng.gen::<f64>();
            let y = r + (bounds.ly - 2.0 * r) * rng.gen::<f64>();
            let clear = disks
                .iter()
                .all(|d| (x - d.x.x).hypot(y - d.x.y) >= r + d.radius);
            if clear {
                placed = Some((x, y));
                break;
            }
        }

        let (x, y) = placed.ok_or_else(|| infeasible(disks.len(), max_attempts))?;
        let vx = rng.gen::<f64>() - 0.5;
        let vy = rng.gen::<f64>() - 0.5;
        disks.push(Disk::new(x, y, r).with_velocity(vx, vy));
    }

    Ok(disks)
}

/// Parse one disk per line. Blank lines and `#` comments are skipped, as are
/// lines with fewer than three tokens or a non-numeric `x`, `y` or `r`.
/// Tokens past the third are ignored.
pub fn parse_configuration(text: &str) -> Vec<Disk> {
    let mut disks = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let tok: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();
        if tok.len() < 3 {
            continue;
        }

        match (tok[0].parse::<f64>(), tok[1].parse::<f64>(), tok[2].parse::<f64>()) {
            (Ok(x), Ok(y), Ok(r)) => disks.push(Disk::new(x, y, r)),
            _ => log::warn!("line {}: not a disk, skipping: {line}", lineno + 1),
        }
    }
    disks
}

/// Read and parse a configuration file
pub fn load_configuration(path: &Path) -> Result<Vec<Disk>> {
    let text = fs::read_to_string(path).map_err(|source| SimError::ConfigLoad {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_configuration(&text))
}

/// `x,y,r` per line at 5 decimals; [`parse_configuration`] reads it back
pub fn serialize_configuration(disks: &[Disk]) -> String {
    let mut out = String::new();
    for d in disks {
        let _ = writeln!(out, "{:.5},{:.5},{:.5}", d.x.x, d.x.y, d.radius);
    }
    out
}
