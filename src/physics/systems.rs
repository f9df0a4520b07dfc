//! Built-in Hamiltonian systems
//!
//! All three have the kinetic energy `T(p) = p·p/2`, so their velocity is the
//! momentum itself; they differ in the potential. Each one is defined over
//! `PhaseVector<F>` for any [`Real`] field, so the same system runs in `f64`
//! or in 28-digit decimal arithmetic.

use super::hamiltonian::{ConservativeSystem, Hamiltonian};
use crate::math::{PhaseVector, Real};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::fmt;

/// `V(q) = q·q/2`
#[derive(Clone, Copy, Debug, Default)]
pub struct HarmonicOscillator;

impl<F: Real> Hamiltonian<PhaseVector<F>> for HarmonicOscillator {
    fn force(&self, position: &PhaseVector<F>) -> PhaseVector<F> {
        position.clone()
    }

    fn velocity(&self, momentum: &PhaseVector<F>) -> PhaseVector<F> {
        momentum.clone()
    }
}

impl<F: Real> ConservativeSystem<F, PhaseVector<F>> for HarmonicOscillator {
    fn energy(&self, position: &PhaseVector<F>, momentum: &PhaseVector<F>) -> F {
        (position.norm_squared() + momentum.norm_squared()) / F::two()
    }
}

/// `V(q) = −1/|q|`, the two-body problem in relative coordinates
#[derive(Clone, Copy, Debug, Default)]
pub struct Kepler;

impl<F: Real> Hamiltonian<PhaseVector<F>> for Kepler {
    fn force(&self, position: &PhaseVector<F>) -> PhaseVector<F> {
        let r = position.norm_squared().sqrt();
        position.clone() * (F::one() / (r * r * r))
    }

    fn velocity(&self, momentum: &PhaseVector<F>) -> PhaseVector<F> {
        momentum.clone()
    }
}

impl<F: Real> ConservativeSystem<F, PhaseVector<F>> for Kepler {
    fn energy(&self, position: &PhaseVector<F>, momentum: &PhaseVector<F>) -> F {
        -F::one() / position.norm_squared().sqrt() + momentum.norm_squared() / F::two()
    }
}

/// `V(q) = −Σ cos q`, one uncoupled pendulum per coordinate
#[derive(Clone, Copy, Debug, Default)]
pub struct Pendulum;

impl<F: Real> Hamiltonian<PhaseVector<F>> for Pendulum {
    fn force(&self, position: &PhaseVector<F>) -> PhaseVector<F> {
        position.map(Real::sin)
    }

    fn velocity(&self, momentum: &PhaseVector<F>) -> PhaseVector<F> {
        momentum.clone()
    }
}

impl<F: Real> ConservativeSystem<F, PhaseVector<F>> for Pendulum {
    fn energy(&self, position: &PhaseVector<F>, momentum: &PhaseVector<F>) -> F {
        let potential = position.iter().fold(F::zero(), |sum, &q| sum + q.cos());
        momentum.norm_squared() / F::two() - potential
    }
}

/// Selects one of the built-in systems by name
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum System {
    Harmonic,
    Kepler,
    Pendulum,
}

impl System {
    pub const ALL: [System; 3] = [System::Harmonic, System::Kepler, System::Pendulum];

    pub fn name(&self) -> &'static str {
        match self {
            System::Harmonic => "harmonic",
            System::Kepler => "kepler",
            System::Pendulum => "pendulum",
        }
    }

    /// Default `(q0, p0)` for trajectory runs
    pub fn initial_state<F: Real>(&self) -> (PhaseVector<F>, PhaseVector<F>) {
        let state = |q: &[i64], p: &[i64]| {
            let convert = |coords: &[i64]| {
                PhaseVector::new(coords.iter().map(|&x| F::from_i64(x)).collect())
            };
            (convert(q), convert(p))
        };
        match self {
            System::Harmonic => state(&[1], &[0]),
            // Unit circular orbit
            System::Kepler => state(&[1, 0], &[0, 1]),
            System::Pendulum => state(&[-2], &[0]),
        }
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<F: Real> Hamiltonian<PhaseVector<F>> for System {
    fn force(&self, position: &PhaseVector<F>) -> PhaseVector<F> {
        match self {
            System::Harmonic => HarmonicOscillator.force(position),
            System::Kepler => Kepler.force(position),
            System::Pendulum => Pendulum.force(position),
        }
    }

    fn velocity(&self, momentum: &PhaseVector<F>) -> PhaseVector<F> {
        momentum.clone()
    }
}

impl<F: Real> ConservativeSystem<F, PhaseVector<F>> for System {
    fn energy(&self, position: &PhaseVector<F>, momentum: &PhaseVector<F>) -> F {
        match self {
            System::Harmonic => HarmonicOscillator.energy(position, momentum),
            System::Kepler => Kepler.energy(position, momentum),
            System::Pendulum => Pendulum.energy(position, momentum),
        }
    }
}

/// Map an angle into `(−π, π]`
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle - TAU * libm::floor((angle + PI) / TAU);
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}
