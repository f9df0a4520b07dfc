//! Lazy time stepping
//!
//! [`IntegrateExt::integrate`] turns any integrator into an iterator over the
//! sampled states `(t, q, p)` of a trajectory. Nothing is computed until the
//! iterator is pulled: the first pull yields the initial state, every later
//! pull advances the state by one step and yields it if the new time is still
//! within the horizon.

use super::integrators::Integrator;
use crate::error::{IntegratorError, Result};
use crate::math::{Field, LinearSpace};
use std::iter::FusedIterator;

/// Iterator over the states of one trajectory
///
/// Once the time check fails the iterator stays exhausted.
#[derive(Debug)]
pub struct Trajectory<'a, F, S, I: ?Sized> {
    integrator: &'a I,
    state: Option<(F, S, S)>,
    tau: F,
    end: F,
    started: bool,
}

impl<'a, F, S, I> Iterator for Trajectory<'a, F, S, I>
where
    F: Field,
    S: LinearSpace<F>,
    I: Integrator<F, S> + ?Sized,
{
    type Item = (F, S, S);

    fn next(&mut self) -> Option<Self::Item> {
        let (t, q, p) = self.state.take()?;

        if !self.started {
            self.started = true;
            self.state = Some((t, q.clone(), p.clone()));
            return Some((t, q, p));
        }

        let (q, p) = self.integrator.step(q, p, self.tau);
        let t = t + self.tau;
        if t <= self.end {
            self.state = Some((t, q.clone(), p.clone()));
            Some((t, q, p))
        } else {
            None
        }
    }
}

impl<F, S, I> FusedIterator for Trajectory<'_, F, S, I>
where
    F: Field,
    S: LinearSpace<F>,
    I: Integrator<F, S> + ?Sized,
{
}

/// Trajectory construction for every integrator, boxed trait objects included
pub trait IntegrateExt<F: Field, S: LinearSpace<F>>: Integrator<F, S> {
    /// Sample the trajectory from `(q0, p0)` at `t = 0` with step `tau` up
    /// to and including `end`
    ///
    /// The state comes first and the horizon last, mirroring
    /// [`Integrator::step`]: `integrate(q0, p0, tau, end)` samples the same
    /// points as the horizon-first form `Integrate(end, tau, q0, p0)`.
    fn integrate(&self, q0: S, p0: S, tau: F, end: F) -> Trajectory<'_, F, S, Self> {
        Trajectory {
            integrator: self,
            state: Some((F::zero(), q0, p0)),
            tau,
            end,
            started: false,
        }
    }

    /// Like [`IntegrateExt::integrate`], but rejects an initial state whose
    /// halves differ in dimension and a step that would never reach `end`
    fn try_integrate(&self, q0: S, p0: S, tau: F, end: F) -> Result<Trajectory<'_, F, S, Self>> {
        if q0.dimension() != p0.dimension() {
            return Err(IntegratorError::DimensionMismatch {
                left: q0.dimension(),
                right: p0.dimension(),
            });
        }
        if !(tau > F::zero()) {
            return Err(IntegratorError::InvalidArgument(format!(
                "time step must be positive, got {tau}"
            )));
        }
        Ok(self.integrate(q0, p0, tau, end))
    }
}

impl<F, S, I> IntegrateExt<F, S> for I
where
    F: Field,
    S: LinearSpace<F>,
    I: Integrator<F, S> + ?Sized,
{
}
