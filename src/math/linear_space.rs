//! Phase-space vector abstraction

use super::field::Field;
use std::fmt::Debug;
use std::ops::{Add, Mul, Neg, Sub};

/// A vector space over the field `F`
///
/// Values are treated as immutable: each operation consumes its operands and
/// produces a fresh value. Nothing in the integrators mutates a state in
/// place, so one state may safely feed several branches of a composition.
pub trait LinearSpace<F: Field>:
    Clone
    + Debug
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Mul<F, Output = Self>
{
    /// Additive identity
    fn zero() -> Self;

    /// Number of components, `0` for a dimension-agnostic identity
    fn dimension(&self) -> usize;
}

/// A field is a one-dimensional vector space over itself.
///
/// The flattening tracer relies on this to run integrators on plain scalars.
impl<F: Field> LinearSpace<F> for F {
    fn zero() -> Self {
        F::zero()
    }

    fn dimension(&self) -> usize {
        1
    }
}

impl LinearSpace<f64> for glam::DVec3 {
    fn zero() -> Self {
        glam::DVec3::ZERO
    }

    fn dimension(&self) -> usize {
        3
    }
}

impl LinearSpace<f32> for glam::Vec3 {
    fn zero() -> Self {
        glam::Vec3::ZERO
    }

    fn dimension(&self) -> usize {
        3
    }
}

impl LinearSpace<f64> for glam::DVec2 {
    fn zero() -> Self {
        glam::DVec2::ZERO
    }

    fn dimension(&self) -> usize {
        2
    }
}
