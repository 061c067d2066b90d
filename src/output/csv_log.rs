//! CSV run log
//!
//! Plain runs write one `t,i,x,y,r` row per disk per step. Packing runs write
//! the initial layout, one `cycle,area` row per cycle and the final layout.
//! Instrumented runs send per-step scalars (energy, bounding box) to a
//! separate metrics file instead of folding them into the disk rows.
//!
//! Logging is best effort: a failed open is an error for the caller to
//! report, a failed write disables the affected stream with a warning.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{Result, SimError};
use crate::simulation::metrics::StepMetrics;
use crate::simulation::observer::Observer;
use crate::simulation::packing::{CycleReport, PackingOutcome};
use crate::simulation::params::Parameters;
use crate::simulation::states::System;

pub struct CsvLog {
    out: Option<BufWriter<File>>,
    metrics: Option<BufWriter<File>>,
}

fn open_log(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| SimError::LogWrite {
            path: path.to_path_buf(),
            source,
        })
}

/// Run `f` on the stream; drop the stream if it fails
fn emit<F>(stream: &mut Option<BufWriter<File>>, f: F)
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    if let Some(w) = stream.as_mut() {
        if let Err(e) = f(w) {
            log::warn!("log write failed, disabling this log: {e}");
            *stream = None;
        }
    }
}

fn write_positions(w: &mut impl Write, sys: &System) -> io::Result<()> {
    writeln!(w, "# i,x,y,r")?;
    for (i, d) in sys.disks.iter().enumerate() {
        writeln!(w, "{},{:.5},{:.5},{:.5}", i, d.x.x, d.x.y, d.radius)?;
    }
    Ok(())
}

impl CsvLog {
    pub fn create(out_file: &Path) -> Result<Self> {
        Ok(Self {
            out: Some(open_log(out_file)?),
            metrics: None,
        })
    }

    /// Also write per-step metrics to `path`
    pub fn with_metrics(mut self, path: &Path) -> Result<Self> {
        let mut w = open_log(path)?;
        writeln!(w, "# t,U,K,xMin,xMax,yMin,yMax,width,height").map_err(|source| {
            SimError::LogWrite {
                path: path.to_path_buf(),
                source,
            }
        })?;
        self.metrics = Some(w);
        Ok(self)
    }

    /// Run parameters and the column header for a plain run
    pub fn begin_simulation(&mut self, sys: &System, params: &Parameters) {
        emit(&mut self.out, |w| {
            write_header(w, sys, params)?;
            writeln!(w, "# t,i,x,y,r")
        });
    }

    /// Run parameters and the starting layout for a packing run
    pub fn begin_packing(&mut self, sys: &System, params: &Parameters) {
        emit(&mut self.out, |w| {
            write_header(w, sys, params)?;
            writeln!(w, "# stop_time={:.3}", params.stop_time)?;
            writeln!(w, "# initial positions")?;
            write_positions(w, sys)?;
            writeln!(w, "# cycle,area")
        });
    }

    pub fn flush(&mut self) {
        emit(&mut self.out, |w| w.flush());
        emit(&mut self.metrics, |w| w.flush());
    }
}

fn write_header(w: &mut impl Write, sys: &System, params: &Parameters) -> io::Result<()> {
    writeln!(
        w,
        "# N={} dt={:.4} k={:.3} gamma={:.3} Lx={:.3} Ly={:.3} seed={}",
        sys.disks.len(),
        params.dt,
        params.k,
        params.gamma,
        sys.bounds.lx,
        sys.bounds.ly,
        params.seed
    )
}

impl Observer for CsvLog {
    fn on_step(&mut self, sys: &System, metrics: Option<&StepMetrics>) {
        emit(&mut self.out, |w| {
            for (i, d) in sys.disks.iter().enumerate() {
                writeln!(w, "{:.5},{},{:.5},{:.5},{:.5}", sys.t, i, d.x.x, d.x.y, d.radius)?;
            }
            Ok(())
        });

        let Some(m) = metrics else { return };
        emit(&mut self.metrics, |w| {
            write!(w, "{:.5},{:.4},{:.4}", m.t, m.potential, m.kinetic)?;
            match m.bbox {
                Some(bb) => writeln!(
                    w,
                    ",{:.5},{:.5},{:.5},{:.5},{:.5},{:.5}",
                    bb.x_min, bb.x_max, bb.y_min, bb.y_max, bb.width(), bb.height()
                ),
                None => writeln!(w, ",,,,,,"),
            }
        });
    }

    fn on_cycle(&mut self, report: &CycleReport, _sys: &System) {
        emit(&mut self.out, |w| writeln!(w, "{},{:.5}", report.cycle, report.area));
    }

    fn on_converged(&mut self, outcome: &PackingOutcome, sys: &System) {
        emit(&mut self.out, |w| {
            // the last cycle's row; earlier ones came through on_cycle
            writeln!(w, "{},{:.5}", outcome.cycles, outcome.area)?;
            writeln!(w, "# final positions")?;
            write_positions(w, sys)?;
            writeln!(w, "# final area={:.5} cycles={} stable={}", outcome.area, outcome.cycles, outcome.stable)
        });
        self.flush();
    }
}

impl Drop for CsvLog {
    fn drop(&mut self) {
        self.flush();
    }
}
