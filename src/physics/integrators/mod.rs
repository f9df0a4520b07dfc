//! Symplectic integration methods for separable Hamiltonian systems
//!
//! Every integrator here is a sequence of two elementary shear maps:
//!
//! ```text
//! Kick(τ):  (q, p) → (q, p − τ·dV/dq(q))
//! Drift(τ): (q, p) → (q + τ·dT/dp(p), p)
//! ```
//!
//! Each shear has unit Jacobian determinant, so any composition of them is
//! symplectic. The methods only differ in how many shears they chain and with
//! which weights.

use crate::math::{Field, LinearSpace};
use crate::physics::hamiltonian::Hamiltonian;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod coefficients;
pub mod compiled;
pub mod composition;
pub mod leapfrog;
pub mod plan;
pub mod registry;
pub mod symplectic_euler;
pub mod tracer;
pub mod yoshida;

pub use compiled::CompiledIntegrator;
pub use composition::{BaseScheme, ComposedIntegrator, Composition};
pub use leapfrog::Leapfrog;
pub use plan::{CoefficientEntry, StepPlan};
pub use registry::{IntegratorKind, IntegratorRegistry};
pub use symplectic_euler::SymplecticEuler;
pub use yoshida::{YoshidaIntegrator, build_euler, build_leapfrog, build_yoshida, yoshida_plan};

/// Base trait for all integrators
///
/// Integrators own the Hamiltonian they advance and are immutable once built,
/// so `step` only needs a shared reference.
pub trait Integrator<F: Field, S: LinearSpace<F>>: Send + Sync {
    /// Advance `(q, p)` by one time step `tau`
    fn step(&self, q: S, p: S, tau: F) -> (S, S);

    /// Canonical name of this integrator
    fn name(&self) -> &str;

    /// Order of the local truncation error in `tau`
    fn convergence_order(&self) -> usize;
}

impl<F: Field, S: LinearSpace<F>, I: Integrator<F, S> + ?Sized> Integrator<F, S> for Box<I> {
    fn step(&self, q: S, p: S, tau: F) -> (S, S) {
        (**self).step(q, p, tau)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn convergence_order(&self) -> usize {
        (**self).convergence_order()
    }
}

/// The two elementary half-maps every symplectic scheme is built from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Momentum update from the force at the current position
    Kick,
    /// Position update from the velocity at the current momentum
    Drift,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepKind::Kick => f.pad("kick"),
            StepKind::Drift => f.pad("drift"),
        }
    }
}

/// `(q, p − τ·force(q))`
pub fn kick<F, S, H>(hamiltonian: &H, tau: F, q: S, p: S) -> (S, S)
where
    F: Field,
    S: LinearSpace<F>,
    H: Hamiltonian<S> + ?Sized,
{
    let force = hamiltonian.force(&q);
    (q, p - force * tau)
}

/// `(q + τ·velocity(p), p)`
pub fn drift<F, S, H>(hamiltonian: &H, tau: F, q: S, p: S) -> (S, S)
where
    F: Field,
    S: LinearSpace<F>,
    H: Hamiltonian<S> + ?Sized,
{
    let velocity = hamiltonian.velocity(&p);
    (q + velocity * tau, p)
}

/// Apply the half-map named by `kind`
pub fn apply<F, S, H>(kind: StepKind, hamiltonian: &H, tau: F, q: S, p: S) -> (S, S)
where
    F: Field,
    S: LinearSpace<F>,
    H: Hamiltonian<S> + ?Sized,
{
    match kind {
        StepKind::Kick => kick(hamiltonian, tau, q, p),
        StepKind::Drift => drift(hamiltonian, tau, q, p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::hamiltonian::SplitHamiltonian;

    #[test]
    fn test_kick_only_touches_momentum() {
        let h = SplitHamiltonian::new(|q: &f64| 3.0 * q, |_: &f64| -> f64 { panic!("no drift") });
        let (q, p) = kick(&h, 0.5, 2.0, 1.0);
        assert_eq!(q, 2.0);
        assert_eq!(p, 1.0 - 0.5 * 6.0);
    }

    #[test]
    fn test_drift_only_touches_position() {
        let h = SplitHamiltonian::new(|_: &f64| -> f64 { panic!("no kick") }, |p: &f64| p * p);
        let (q, p) = drift(&h, 0.25, 1.0, 2.0);
        assert_eq!(q, 1.0 + 0.25 * 4.0);
        assert_eq!(p, 2.0);
    }

    #[test]
    fn test_apply_dispatches_on_kind() {
        let h = SplitHamiltonian::new(|q: &f64| *q, |p: &f64| *p);
        assert_eq!(apply(StepKind::Kick, &h, 1.0, 1.0, 1.0), kick(&h, 1.0, 1.0, 1.0));
        assert_eq!(
            apply(StepKind::Drift, &h, 1.0, 1.0, 1.0),
            drift(&h, 1.0, 1.0, 1.0)
        );
        assert_eq!(StepKind::Kick.to_string(), "kick");
    }
}
