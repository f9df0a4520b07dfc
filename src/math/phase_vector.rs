//! Heap-allocated coordinate vectors of arbitrary length

use super::field::Field;
use super::linear_space::LinearSpace;
use crate::error::{IntegratorError, Result};
use std::fmt;
use std::ops::{Add, Index, Mul, Neg, Sub};

/// Owned vector of field coordinates
///
/// The empty vector doubles as the additive identity of every dimension: it
/// absorbs into sums and scales to itself. Combining two non-empty vectors of
/// different lengths is always rejected, in release builds as well.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct PhaseVector<F> {
    coords: Vec<F>,
}

impl<F: Field> PhaseVector<F> {
    pub fn new(coords: Vec<F>) -> Self {
        Self { coords }
    }

    pub fn is_identity(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn as_slice(&self) -> &[F] {
        &self.coords
    }

    pub fn iter(&self) -> impl Iterator<Item = &F> {
        self.coords.iter()
    }

    /// Apply `f` to every coordinate
    pub fn map(&self, f: impl Fn(F) -> F) -> Self {
        Self {
            coords: self.coords.iter().map(|&x| f(x)).collect(),
        }
    }

    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a + b)
    }

    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        if other.is_identity() {
            return Ok(self.clone());
        }
        if self.is_identity() {
            return Ok(-other.clone());
        }
        self.zip_with(other, |a, b| a - b)
    }

    /// Euclidean inner product; the identity is orthogonal to everything
    pub fn checked_dot(&self, other: &Self) -> Result<F> {
        if self.is_identity() || other.is_identity() {
            return Ok(F::zero());
        }
        self.ensure_same_dimension(other)?;
        Ok(self
            .coords
            .iter()
            .zip(&other.coords)
            .fold(F::zero(), |acc, (&a, &b)| acc + a * b))
    }

    pub fn dot(&self, other: &Self) -> F {
        self.checked_dot(other).unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn norm_squared(&self) -> F {
        self.dot(self)
    }

    fn ensure_same_dimension(&self, other: &Self) -> Result<()> {
        if self.len() != other.len() {
            return Err(IntegratorError::DimensionMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        Ok(())
    }

    fn zip_with(&self, other: &Self, op: impl Fn(F, F) -> F) -> Result<Self> {
        if self.is_identity() {
            return Ok(other.clone());
        }
        if other.is_identity() {
            return Ok(self.clone());
        }
        self.ensure_same_dimension(other)?;
        Ok(Self {
            coords: self
                .coords
                .iter()
                .zip(&other.coords)
                .map(|(&a, &b)| op(a, b))
                .collect(),
        })
    }
}

impl<F: Field> From<Vec<F>> for PhaseVector<F> {
    fn from(coords: Vec<F>) -> Self {
        Self::new(coords)
    }
}

impl<F: Field, const N: usize> From<[F; N]> for PhaseVector<F> {
    fn from(coords: [F; N]) -> Self {
        Self::new(coords.to_vec())
    }
}

impl<F> Index<usize> for PhaseVector<F> {
    type Output = F;

    fn index(&self, index: usize) -> &F {
        &self.coords[index]
    }
}

impl<F: Field> Add for PhaseVector<F> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.checked_add(&rhs).unwrap_or_else(|err| panic!("{err}"))
    }
}

impl<F: Field> Sub for PhaseVector<F> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.checked_sub(&rhs).unwrap_or_else(|err| panic!("{err}"))
    }
}

impl<F: Field> Neg for PhaseVector<F> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|x| -x)
    }
}

impl<F: Field> Mul<F> for PhaseVector<F> {
    type Output = Self;

    fn mul(self, rhs: F) -> Self {
        self.map(|x| x * rhs)
    }
}

impl<F: Field> LinearSpace<F> for PhaseVector<F> {
    fn zero() -> Self {
        Self { coords: Vec::new() }
    }

    fn dimension(&self) -> usize {
        self.coords.len()
    }
}

/// Space-separated coordinates, the column format of the result files
impl<F: fmt::Display> fmt::Display for PhaseVector<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, x) in self.coords.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{x}")?;
        }
        Ok(())
    }
}
