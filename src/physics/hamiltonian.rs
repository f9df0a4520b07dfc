//! The seam through which callers hand their physics to an integrator
//!
//! A separable Hamiltonian `H(q, p) = T(p) + V(q)` is fully described, as far
//! as a splitting integrator is concerned, by the two gradients `dV/dq` and
//! `dT/dp`.

/// Gradients of a separable Hamiltonian
pub trait Hamiltonian<S> {
    /// `dV/dq` evaluated at `position`; a kick subtracts it from the momentum
    fn force(&self, position: &S) -> S;

    /// `dT/dp` evaluated at `momentum`; a drift adds it to the position
    fn velocity(&self, momentum: &S) -> S;
}

impl<S, H: Hamiltonian<S> + ?Sized> Hamiltonian<S> for &H {
    fn force(&self, position: &S) -> S {
        (**self).force(position)
    }

    fn velocity(&self, momentum: &S) -> S {
        (**self).velocity(momentum)
    }
}

/// A Hamiltonian built from two plain functions
#[derive(Clone, Copy, Debug)]
pub struct SplitHamiltonian<V, T> {
    force: V,
    velocity: T,
}

impl<V, T> SplitHamiltonian<V, T> {
    pub fn new(force: V, velocity: T) -> Self {
        Self { force, velocity }
    }
}

impl<S, V, T> Hamiltonian<S> for SplitHamiltonian<V, T>
where
    V: Fn(&S) -> S,
    T: Fn(&S) -> S,
{
    fn force(&self, position: &S) -> S {
        (self.force)(position)
    }

    fn velocity(&self, momentum: &S) -> S {
        (self.velocity)(momentum)
    }
}

/// A Hamiltonian that can also report the value of its energy
///
/// Energy is never used to advance a state; the run driver only writes it
/// out so long-term conservation can be inspected.
pub trait ConservativeSystem<F, S>: Hamiltonian<S> {
    fn energy(&self, position: &S, momentum: &S) -> F;
}
