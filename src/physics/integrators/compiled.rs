//! Integrators that replay a precomputed [`StepPlan`]

use super::{Integrator, StepPlan, apply};
use crate::math::{Field, LinearSpace};
use crate::physics::hamiltonian::Hamiltonian;

/// Replays a flat plan of weighted kicks and drifts
///
/// One step costs exactly [`StepPlan::force_evaluations`] force calls,
/// however deep the composition the plan was flattened from.
#[derive(Clone, Debug)]
pub struct CompiledIntegrator<F, H> {
    plan: StepPlan<F>,
    hamiltonian: H,
    name: String,
    order: usize,
}

impl<F: Field, H> CompiledIntegrator<F, H> {
    pub fn new(plan: StepPlan<F>, hamiltonian: H, name: impl Into<String>, order: usize) -> Self {
        Self {
            plan,
            hamiltonian,
            name: name.into(),
            order,
        }
    }

    pub fn plan(&self) -> &StepPlan<F> {
        &self.plan
    }
}

impl<F, S, H> Integrator<F, S> for CompiledIntegrator<F, H>
where
    F: Field,
    S: LinearSpace<F>,
    H: Hamiltonian<S> + Send + Sync,
{
    fn step(&self, q: S, p: S, tau: F) -> (S, S) {
        self.plan.iter().fold((q, p), |(q, p), entry| {
            apply(entry.kind, &self.hamiltonian, tau * entry.weight, q, p)
        })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn convergence_order(&self) -> usize {
        self.order
    }
}
