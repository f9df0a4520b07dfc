//! Seeded randomness for tests and benchmarks

use crate::math::{Field, PhaseVector};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deterministic random source shared by the test suites
#[derive(Debug, Clone, PartialEq)]
pub struct SharedRng(pub ChaCha8Rng);

impl SharedRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::default(),
        }
    }

    /// Uniform scalar in `[low, high)`
    pub fn scalar<F: Field>(&mut self, low: f64, high: f64) -> F {
        F::from_f64(self.0.random_range(low..high))
    }

    /// Vector of `dimension` coordinates drawn uniformly from `[low, high)`
    pub fn phase_vector<F: Field>(
        &mut self,
        dimension: usize,
        low: f64,
        high: f64,
    ) -> PhaseVector<F> {
        PhaseVector::new((0..dimension).map(|_| self.scalar(low, high)).collect())
    }
}

impl Default for SharedRng {
    fn default() -> Self {
        Self(ChaCha8Rng::from_rng(&mut rand::rng()))
    }
}
