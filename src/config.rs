use crate::math::Scalar;
use crate::physics::systems::System;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Prefix of environment variables layered over the user config file, e.g.
/// `SYMPLECTIC_RUN__END_TIME=20`
pub const ENV_PREFIX: &str = "SYMPLECTIC";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
pub struct SimulationConfig {
    pub run: RunConfig,
    pub systems: SystemsConfig,
    pub portrait: PortraitConfig,
}

/// Arithmetic the trajectory runs are carried out in
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    /// `f64`
    #[default]
    Double,
    /// 28-digit decimal; time steps such as `0.1` are represented exactly
    Decimal,
}

/// Trajectory runs: every enabled system × time step × integrator
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub output_dir: PathBuf,
    pub end_time: Scalar,
    pub time_steps: Vec<Scalar>,
    pub integrators: Vec<String>,
    pub record_energy: bool,
    pub precision: Precision,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("results"),
            end_time: 10.0,
            time_steps: vec![0.1, 0.01, 0.001, 0.0001],
            integrators: vec![
                "symplectic_euler".to_string(),
                "leapfrog".to_string(),
                "yoshida4".to_string(),
                "yoshida6".to_string(),
            ],
            record_energy: true,
            precision: Precision::Double,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SystemsConfig {
    pub enabled: Vec<System>,
}

impl Default for SystemsConfig {
    fn default() -> Self {
        Self {
            enabled: vec![System::Harmonic, System::Kepler],
        }
    }
}

/// Phase portrait: a family of orbits of one system with one integrator
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PortraitConfig {
    pub enabled: bool,
    pub system: System,
    pub integrator: String,
    pub time_step: Scalar,
    pub end_time: Scalar,
    pub orbits: Vec<PortraitOrbit>,
}

impl Default for PortraitConfig {
    fn default() -> Self {
        let resting = [-6.0, -4.0, -3.0, -2.0, -1.0].map(|q0| PortraitOrbit { q0, p0: 0.0 });
        let rolling = [2.0, -2.0].map(|p0| PortraitOrbit { q0: -2.5, p0 });
        Self {
            enabled: true,
            system: System::Pendulum,
            integrator: "yoshida4".to_string(),
            time_step: 0.01,
            end_time: 100.0,
            orbits: resting.into_iter().chain(rolling).collect(),
        }
    }
}

/// Initial state of one portrait orbit (first coordinate only)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct PortraitOrbit {
    pub q0: Scalar,
    pub p0: Scalar,
}

impl SimulationConfig {
    /// Load configuration from a file, falling back to defaults if the file doesn't exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!(
                        "Failed to parse config file {}: {}. Using defaults.",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            },
            Err(_) => {
                info!("Config file {} not found. Using defaults.", path.display());
                Self::default()
            }
        }
    }

    /// Load `config.toml` from the platform config directory, with
    /// `SYMPLECTIC_`-prefixed environment variables layered on top
    pub fn load_from_user_config() -> Self {
        let Some(dirs) = ProjectDirs::from("", "", "symplectic") else {
            warn!("No home directory found. Using default configuration.");
            return Self::default();
        };

        let path = dirs.config_dir().join("config.toml");
        match Self::load_layered(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load configuration from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Defaults, then the file at `path` if it exists, then the environment
    pub fn load_layered(path: &Path) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
