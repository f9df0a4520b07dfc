//! Registry pattern for looking up integrators by name
//!
//! The registry is a discovery and factory mechanism. Each [`IntegratorKind`]
//! is self-describing: it knows its canonical name, its aliases and its
//! convergence order. Registering a kind records it under all of those names;
//! creating an integrator resolves the name back to its kind and builds a
//! fresh boxed integrator around the caller's Hamiltonian.

use super::{Integrator, StepPlan, build_euler, build_leapfrog, build_yoshida, yoshida_plan};
use crate::error::{IntegratorError, Result};
use crate::math::{Field, LinearSpace};
use crate::physics::hamiltonian::Hamiltonian;
use std::collections::{HashMap, HashSet};

/// Every integrator the registry can build
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntegratorKind {
    SymplecticEuler,
    Leapfrog,
    /// Order `2·levels`
    Yoshida { levels: u32 },
}

impl IntegratorKind {
    pub fn name(&self) -> String {
        match self {
            IntegratorKind::SymplecticEuler => "symplectic_euler".to_string(),
            IntegratorKind::Leapfrog => "leapfrog".to_string(),
            IntegratorKind::Yoshida { levels } => format!("yoshida{}", 2 * levels),
        }
    }

    pub fn aliases(&self) -> Vec<&'static str> {
        match self {
            IntegratorKind::SymplecticEuler => vec!["euler"],
            IntegratorKind::Leapfrog => vec!["verlet"],
            IntegratorKind::Yoshida { levels: 2 } => vec!["yoshida"],
            IntegratorKind::Yoshida { .. } => vec![],
        }
    }

    pub fn convergence_order(&self) -> usize {
        match self {
            IntegratorKind::SymplecticEuler => 1,
            IntegratorKind::Leapfrog => 2,
            IntegratorKind::Yoshida { levels } => 2 * *levels as usize,
        }
    }

    /// Flat kick/drift plan one step of this integrator replays
    pub fn plan<F: Field>(&self) -> Result<StepPlan<F>> {
        match self {
            IntegratorKind::SymplecticEuler => Ok(StepPlan::symplectic_euler()),
            IntegratorKind::Leapfrog => Ok(StepPlan::leapfrog()),
            IntegratorKind::Yoshida { levels } => yoshida_plan(*levels),
        }
    }

    pub fn build<F, S, H>(&self, hamiltonian: H) -> Result<Box<dyn Integrator<F, S>>>
    where
        F: Field,
        S: LinearSpace<F>,
        H: Hamiltonian<S> + Send + Sync + 'static,
    {
        let integrator: Box<dyn Integrator<F, S>> = match self {
            IntegratorKind::SymplecticEuler => Box::new(build_euler(hamiltonian)),
            IntegratorKind::Leapfrog => Box::new(build_leapfrog(hamiltonian)),
            IntegratorKind::Yoshida { levels } => {
                Box::new(build_yoshida::<F, H>(hamiltonian, *levels)?)
            }
        };
        Ok(integrator)
    }
}

/// Registry for runtime integrator lookup
#[derive(Clone, Debug)]
pub struct IntegratorRegistry {
    /// Maps names (canonical and aliases) to integrator kinds
    integrators: HashMap<String, IntegratorKind>,
}

impl IntegratorRegistry {
    /// Create an empty registry without any pre-registered integrators.
    pub fn new() -> Self {
        Self {
            integrators: HashMap::new(),
        }
    }

    /// Register all standard integrators.
    ///
    /// Returns self for method chaining.
    pub fn with_standard_integrators(mut self) -> Self {
        self.register_integrator(IntegratorKind::SymplecticEuler);
        self.register_integrator(IntegratorKind::Leapfrog);
        for levels in 2..=4 {
            self.register_integrator(IntegratorKind::Yoshida { levels });
        }
        self
    }

    /// Register a single integrator.
    ///
    /// Returns self for method chaining.
    pub fn with_integrator(mut self, kind: IntegratorKind) -> Self {
        self.register_integrator(kind);
        self
    }

    pub fn register_integrator(&mut self, kind: IntegratorKind) {
        self.integrators.insert(kind.name(), kind);
        for alias in kind.aliases() {
            self.integrators.insert(alias.to_string(), kind);
        }
    }

    /// Resolve a canonical name or alias
    pub fn resolve(&self, name: &str) -> Result<IntegratorKind> {
        self.integrators.get(name).copied().ok_or_else(|| {
            let alias_names: Vec<String> = self
                .list_aliases()
                .into_iter()
                .map(|(alias, _)| alias)
                .collect();
            IntegratorError::UnknownIntegrator {
                name: name.to_string(),
                available: self.list_available().join(", "),
                aliases: alias_names.join(", "),
            }
        })
    }

    /// Build the integrator registered under `name` for `hamiltonian`
    pub fn create<F, S, H>(&self, name: &str, hamiltonian: H) -> Result<Box<dyn Integrator<F, S>>>
    where
        F: Field,
        S: LinearSpace<F>,
        H: Hamiltonian<S> + Send + Sync + 'static,
    {
        self.resolve(name)?.build(hamiltonian)
    }

    pub fn list_available(&self) -> Vec<String> {
        let canonical_names: HashSet<String> =
            self.integrators.values().map(IntegratorKind::name).collect();

        let mut names: Vec<String> = canonical_names.into_iter().collect();
        names.sort();
        names
    }

    pub fn list_aliases(&self) -> Vec<(String, String)> {
        let mut aliases: Vec<(String, String)> = self
            .integrators
            .iter()
            .filter_map(|(key, kind)| {
                let canonical_name = kind.name();
                (*key != canonical_name).then(|| (key.clone(), canonical_name))
            })
            .collect();

        aliases.sort_by(|a, b| a.0.cmp(&b.0));
        aliases
    }
}

impl Default for IntegratorRegistry {
    fn default() -> Self {
        Self::new().with_standard_integrators()
    }
}
