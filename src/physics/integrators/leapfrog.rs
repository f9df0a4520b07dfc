//! Leapfrog (Störmer-Verlet) integration method

use super::{Integrator, drift, kick};
use crate::math::{Field, LinearSpace};
use crate::physics::hamiltonian::Hamiltonian;

/// Leapfrog integrator
///
/// A second-order, time-symmetric splitting: half a kick, a full drift, and
/// another half kick.
///
/// ```text
/// p(t+τ/2) = p(t)      − τ/2 · dV/dq(q(t))
/// q(t+τ)   = q(t)      + τ   · dT/dp(p(t+τ/2))
/// p(t+τ)   = p(t+τ/2)  − τ/2 · dV/dq(q(t+τ))
/// ```
///
/// Because the scheme reads the same forward and backward, its error
/// expansion only has odd powers of τ. That symmetry is what lets the
/// triple-jump composition raise its order by two per level, which makes
/// leapfrog the base of every Yoshida integrator in this crate.
#[derive(Debug, Clone, Copy)]
pub struct Leapfrog<H> {
    hamiltonian: H,
}

impl<H> Leapfrog<H> {
    pub fn new(hamiltonian: H) -> Self {
        Self { hamiltonian }
    }
}

impl<F, S, H> Integrator<F, S> for Leapfrog<H>
where
    F: Field,
    S: LinearSpace<F>,
    H: Hamiltonian<S> + Send + Sync,
{
    fn step(&self, q: S, p: S, tau: F) -> (S, S) {
        let half = tau / F::two();
        let (q, p) = kick(&self.hamiltonian, half, q, p);
        let (q, p) = drift(&self.hamiltonian, tau, q, p);
        kick(&self.hamiltonian, half, q, p)
    }

    fn name(&self) -> &str {
        "leapfrog"
    }

    fn convergence_order(&self) -> usize {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::PhaseVector;
    use crate::physics::hamiltonian::SplitHamiltonian;

    #[test]
    fn test_matches_explicit_composition() {
        let h = SplitHamiltonian::new(
            |q: &PhaseVector<f64>| q.map(|x| x * x * x - x),
            |p: &PhaseVector<f64>| p.map(|x| 2.0 * x),
        );
        let integrator = Leapfrog::new(h);

        let q0 = PhaseVector::from([0.3, -1.2]);
        let p0 = PhaseVector::from([0.7, 0.1]);
        let tau = 0.05;

        let (q, p) = kick(&h, tau / 2.0, q0.clone(), p0.clone());
        let (q, p) = drift(&h, tau, q, p);
        let expected = kick(&h, tau / 2.0, q, p);

        assert_eq!(integrator.step(q0, p0, tau), expected);
    }

    #[test]
    fn test_time_reversibility() {
        let spring = SplitHamiltonian::new(|q: &f64| *q, |p: &f64| *p);
        let integrator = Leapfrog::new(spring);

        let (q1, p1) = integrator.step(0.8, -0.3, 0.1);
        let (q0, p0) = integrator.step(q1, p1, -0.1);

        assert!((q0 - 0.8).abs() < 1e-14);
        assert!((p0 + 0.3).abs() < 1e-14);
    }

    #[test]
    fn test_energy_conservation() {
        let spring = SplitHamiltonian::new(|q: &f64| *q, |p: &f64| *p);
        let integrator = Leapfrog::new(spring);

        let (mut q, mut p) = (1.0_f64, 0.0_f64);
        for _ in 0..1000 {
            (q, p) = integrator.step(q, p, 0.01);
        }

        let energy = 0.5 * (q * q + p * p);
        let energy_error = (energy - 0.5).abs() / 0.5;
        assert!(energy_error < 1e-4, "Energy error: {energy_error}");
    }
}
