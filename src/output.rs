//! Tabular result files
//!
//! Every line is one sample, fields separated by single spaces so the files
//! load directly into gnuplot or numpy.

use crate::error::Result;
use crate::math::{Field, PhaseVector};
use crate::physics::systems::wrap_angle;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of a trajectory run
pub fn trajectory_file_name(tau: f64, integrator: &str, system: &str) -> String {
    format!("{tau}_{integrator}_{system}.dat")
}

/// File name of one phase-portrait orbit
pub fn portrait_file_name(q0: f64, p0: f64, integrator: &str, system: &str) -> String {
    format!("{q0}_{p0}_{integrator}_{system}_portrait.dat")
}

fn create(directory: &Path, file_name: &str) -> Result<(PathBuf, BufWriter<File>)> {
    fs::create_dir_all(directory)?;
    let path = directory.join(file_name);
    let file = File::create(&path)?;
    debug!("Writing {}", path.display());
    Ok((path, BufWriter::new(file)))
}

/// Writes `t q… p… [E]` lines
pub struct TrajectoryWriter {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl TrajectoryWriter {
    pub fn create(directory: impl AsRef<Path>, file_name: &str) -> Result<Self> {
        let (path, writer) = create(directory.as_ref(), file_name)?;
        Ok(Self { path, writer })
    }

    /// Values are written in the field's own `Display` form, so decimal runs
    /// keep every digit
    pub fn write_sample<F: Field>(
        &mut self,
        t: F,
        q: &PhaseVector<F>,
        p: &PhaseVector<F>,
        energy: Option<F>,
    ) -> Result<()> {
        write!(self.writer, "{t} {q} {p}")?;
        if let Some(energy) = energy {
            write!(self.writer, " {energy}")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer.flush()?;
        Ok(self.path)
    }
}

/// Writes `wrapped_angle p…` lines
pub struct PortraitWriter {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl PortraitWriter {
    pub fn create(directory: impl AsRef<Path>, file_name: &str) -> Result<Self> {
        let (path, writer) = create(directory.as_ref(), file_name)?;
        Ok(Self { path, writer })
    }

    /// Only the first position coordinate is an angle; it is wrapped into
    /// `(−π, π]` so orbits that roll over the top stay on the plot.
    pub fn write_sample(&mut self, q: &PhaseVector<f64>, p: &PhaseVector<f64>) -> Result<()> {
        let angle = q.iter().next().copied().map_or(0.0, wrap_angle);
        writeln!(self.writer, "{angle} {p}")?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer.flush()?;
        Ok(self.path)
    }
}
