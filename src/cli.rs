//! Command line interface for Symplectic

use clap::Parser;
use std::fmt;
use std::path::PathBuf;

use crate::config::{PortraitOrbit, Precision, SimulationConfig};
use crate::error::IntegratorError;
use crate::math::{Decimal, Field, Real, Scalar, Vector};
use crate::output::{PortraitWriter, TrajectoryWriter, portrait_file_name, trajectory_file_name};
use crate::physics::hamiltonian::ConservativeSystem;
use crate::physics::integrators::registry::{IntegratorKind, IntegratorRegistry};
use crate::physics::integrators::{CompiledIntegrator, Integrator, StepPlan};
use crate::physics::systems::System;
use crate::physics::trajectory::IntegrateExt;
use tracing::{debug, info};

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Configuration file could not be loaded
    ConfigLoad(String),
    /// Invalid integrator name provided
    InvalidIntegrator(String),
    /// A run could not be completed
    Run(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ConfigLoad(msg) => write!(f, "Failed to load configuration: {msg}"),
            CliError::InvalidIntegrator(msg) => write!(f, "Invalid integrator: {msg}"),
            CliError::Run(msg) => write!(f, "Run failed: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<IntegratorError> for CliError {
    fn from(err: IntegratorError) -> Self {
        match err {
            IntegratorError::UnknownIntegrator { .. } => {
                CliError::InvalidIntegrator(err.to_string())
            }
            _ => CliError::Run(err.to_string()),
        }
    }
}

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// Symplectic - composed symplectic integrators for Hamiltonian systems
#[derive(Parser, Debug, Default)]
#[command(version, long_version = LONG_VERSION, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory result files are written to (overrides config file)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Integrator to run, may be repeated (e.g., leapfrog, yoshida6)
    #[arg(short = 'i', long = "integrator", value_name = "NAME")]
    pub integrators: Vec<String>,

    /// System to run, may be repeated
    #[arg(short = 's', long = "system", value_name = "SYSTEM")]
    pub systems: Vec<System>,

    /// Time step, may be repeated
    #[arg(short = 't', long = "tau", value_name = "STEP")]
    pub time_steps: Vec<f64>,

    /// Integration horizon (overrides config file)
    #[arg(short = 'T', long, value_name = "TIME")]
    pub end_time: Option<f64>,

    /// Arithmetic for the trajectory runs (overrides config file)
    #[arg(long, value_enum, value_name = "PRECISION")]
    pub precision: Option<Precision>,

    /// Skip the phase portrait runs
    #[arg(long)]
    pub no_portrait: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// List available integrators and exit
    #[arg(long)]
    pub list_integrators: bool,

    /// Print the flat kick/drift plan of an integrator and exit
    #[arg(long, value_name = "NAME")]
    pub print_plan: Option<String>,
}

/// Handles the --list-integrators flag by printing available integrators and exiting
pub fn handle_list_integrators() {
    let registry = IntegratorRegistry::default();
    println!("Available integrators:");
    for name in registry.list_available() {
        println!("  - {name}");
    }

    let aliases = registry.list_aliases();
    if !aliases.is_empty() {
        println!("\nAliases:");
        for (alias, target) in aliases {
            println!("  - {alias} -> {target}");
        }
    }
}

/// Handles the --print-plan flag
pub fn print_plan(name: &str) -> Result<(), CliError> {
    let registry = IntegratorRegistry::default();
    let kind = registry
        .resolve(name)
        .map_err(|err| CliError::InvalidIntegrator(err.to_string()))?;
    let plan = kind
        .plan::<f64>()
        .map_err(|err| CliError::Run(err.to_string()))?;

    println!(
        "{} (order {}, {} force evaluations per step):",
        kind.name(),
        kind.convergence_order(),
        plan.force_evaluations()
    );
    print!("{plan}");
    Ok(())
}

/// Loads configuration from file or defaults, then applies command-line overrides
pub fn load_and_apply_config(args: &Args) -> Result<SimulationConfig, CliError> {
    let mut config = if let Some(config_path) = &args.config {
        if !config_path.exists() {
            return Err(CliError::ConfigLoad(format!(
                "{} does not exist",
                config_path.display()
            )));
        }
        info!("Loading configuration from: {}", config_path.display());
        SimulationConfig::load_or_default(config_path)
    } else {
        SimulationConfig::load_from_user_config()
    };

    if let Some(output_dir) = &args.output_dir {
        info!("Overriding output directory to: {}", output_dir.display());
        config.run.output_dir = output_dir.clone();
    }

    if !args.integrators.is_empty() {
        // Validate integrator names against registry
        let registry = IntegratorRegistry::default();
        for name in &args.integrators {
            registry
                .resolve(name)
                .map_err(|err| CliError::InvalidIntegrator(err.to_string()))?;
        }

        info!("Using integrators: {}", args.integrators.join(", "));
        config.run.integrators = args.integrators.clone();
    }

    if !args.systems.is_empty() {
        config.systems.enabled = args.systems.clone();
    }

    if !args.time_steps.is_empty() {
        if let Some(tau) = args.time_steps.iter().find(|tau| !(**tau > 0.0)) {
            return Err(CliError::Run(format!("time step must be positive, got {tau}")));
        }
        config.run.time_steps = args.time_steps.clone();
    }

    if let Some(end_time) = args.end_time {
        info!("Overriding integration horizon to: {end_time}");
        config.run.end_time = end_time;
    }

    if let Some(precision) = args.precision {
        config.run.precision = precision;
    }

    if args.no_portrait {
        config.portrait.enabled = false;
    }

    Ok(config)
}

/// Write one trajectory file per enabled system × time step × integrator,
/// then the phase portrait if it is enabled
///
/// Returns the paths of every file written.
pub fn run(config: &SimulationConfig) -> Result<Vec<PathBuf>, CliError> {
    let registry = IntegratorRegistry::default();
    let mut written = match config.run.precision {
        Precision::Double => run_trajectories::<f64>(config, &registry)?,
        Precision::Decimal => run_trajectories::<Decimal>(config, &registry)?,
    };
    if config.portrait.enabled {
        written.extend(run_portrait(config, &registry)?);
    }
    Ok(written)
}

/// A configured integrator, flattened once and bound to each system in turn
struct PreparedIntegrator<'a, F> {
    name: &'a str,
    kind: IntegratorKind,
    plan: StepPlan<F>,
}

impl<F: Field> PreparedIntegrator<'_, F> {
    fn bind<H>(&self, hamiltonian: H) -> CompiledIntegrator<F, H> {
        CompiledIntegrator::new(
            self.plan.clone(),
            hamiltonian,
            self.kind.name(),
            self.kind.convergence_order(),
        )
    }
}

fn prepare_integrators<'a, F: Field>(
    registry: &IntegratorRegistry,
    names: &'a [String],
) -> Result<Vec<PreparedIntegrator<'a, F>>, IntegratorError> {
    names
        .iter()
        .map(|name| -> Result<PreparedIntegrator<'a, F>, IntegratorError> {
            let kind = registry.resolve(name)?;
            let plan = kind.plan()?;
            debug!(integrator = %name, entries = plan.len(), "prepared plan");
            Ok(PreparedIntegrator { name, kind, plan })
        })
        .collect()
}

fn run_trajectories<F: Real>(
    config: &SimulationConfig,
    registry: &IntegratorRegistry,
) -> Result<Vec<PathBuf>, CliError> {
    let prepared = prepare_integrators::<F>(registry, &config.run.integrators)?;
    let end_time = F::from_f64(config.run.end_time);

    let mut written = Vec::new();
    for &system in &config.systems.enabled {
        let (q0, p0) = system.initial_state::<F>();
        for &tau in &config.run.time_steps {
            for integrator in &prepared {
                let compiled = integrator.bind(system);
                let file_name = trajectory_file_name(tau, integrator.name, system.name());
                let mut writer = TrajectoryWriter::create(&config.run.output_dir, &file_name)?;

                let mut samples = 0_usize;
                let trajectory =
                    compiled.try_integrate(q0.clone(), p0.clone(), F::from_f64(tau), end_time)?;
                for (t, q, p) in trajectory {
                    let energy = config.run.record_energy.then(|| system.energy(&q, &p));
                    writer.write_sample(t, &q, &p, energy)?;
                    samples += 1;
                }

                let path = writer.finish()?;
                debug!(
                    system = %system,
                    tau,
                    integrator = %integrator.name,
                    samples,
                    "trajectory written"
                );
                written.push(path);
            }
        }
        info!(
            "Finished {} runs for {system}",
            config.run.time_steps.len() * prepared.len()
        );
    }
    Ok(written)
}

/// Replace the first coordinate of `base` with `value`
fn with_first(base: &Vector, value: Scalar) -> Vector {
    let mut coords = base.as_slice().to_vec();
    match coords.first_mut() {
        Some(first) => *first = value,
        None => coords.push(value),
    }
    Vector::new(coords)
}

fn run_portrait(
    config: &SimulationConfig,
    registry: &IntegratorRegistry,
) -> Result<Vec<PathBuf>, CliError> {
    let portrait = &config.portrait;
    let system = portrait.system;
    let integrator: Box<dyn Integrator<Scalar, Vector>> =
        registry.create(&portrait.integrator, system)?;
    let (q_base, p_base) = system.initial_state::<Scalar>();

    let mut written = Vec::with_capacity(portrait.orbits.len());
    for &PortraitOrbit { q0, p0 } in &portrait.orbits {
        let file_name = portrait_file_name(q0, p0, &portrait.integrator, system.name());
        let mut writer = PortraitWriter::create(&config.run.output_dir, &file_name)?;

        let start = (with_first(&q_base, q0), with_first(&p_base, p0));
        for (_, q, p) in
            integrator.try_integrate(start.0, start.1, portrait.time_step, portrait.end_time)?
        {
            writer.write_sample(&q, &p)?;
        }
        written.push(writer.finish()?);
    }

    info!(
        "Wrote {} {system} portrait orbits with {}",
        written.len(),
        portrait.integrator
    );
    Ok(written)
}
