//! Scalar field abstraction
//!
//! Every time step, composition weight and vector component is a value of a
//! [`Field`]. The integrators are written once against this trait and
//! monomorphised for each concrete backend, so an `f32` run, an `f64` run and
//! a 28-digit [`Decimal`] run share the exact same algorithms.

use rust_decimal::{Decimal, MathematicalOps};
use std::fmt::{Debug, Display};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A scalar type closed under the four arithmetic operations
///
/// Implementors must behave like an ordered field for the values the
/// integrators actually produce. `from_i64` is the only way integers enter
/// the field, which keeps integer-to-scalar conversion exact and explicit.
pub trait Field:
    Copy
    + Debug
    + Display
    + PartialEq
    + PartialOrd
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Additive identity
    fn zero() -> Self;

    /// Multiplicative identity
    fn one() -> Self;

    /// Exact conversion of a small integer into the field
    fn from_i64(value: i64) -> Self;

    /// Machine epsilon of the representation
    ///
    /// Only used to judge whether build-time iterations converged.
    fn epsilon() -> Self;

    /// Lossy conversion used for diagnostics and error reporting
    fn to_f64(self) -> f64;

    /// Nearest representable value; used to feed sampled test data and
    /// configured constants into the field
    fn from_f64(value: f64) -> Self;

    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    fn abs(self) -> Self {
        if self < Self::zero() { -self } else { self }
    }

    fn two() -> Self {
        Self::from_i64(2)
    }
}

impl Field for f64 {
    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }

    fn from_i64(value: i64) -> Self {
        value as f64
    }

    fn epsilon() -> Self {
        f64::EPSILON
    }

    fn to_f64(self) -> f64 {
        self
    }

    fn from_f64(value: f64) -> Self {
        value
    }

    fn abs(self) -> Self {
        f64::abs(self)
    }
}

impl Field for f32 {
    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }

    fn from_i64(value: i64) -> Self {
        value as f32
    }

    fn epsilon() -> Self {
        f32::EPSILON
    }

    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn from_f64(value: f64) -> Self {
        value as f32
    }

    fn abs(self) -> Self {
        f32::abs(self)
    }
}

impl Field for Decimal {
    fn zero() -> Self {
        Decimal::ZERO
    }

    fn one() -> Self {
        Decimal::ONE
    }

    fn from_i64(value: i64) -> Self {
        Decimal::from(value)
    }

    /// One unit in the last of the 28 fractional digits
    fn epsilon() -> Self {
        Decimal::new(1, 28)
    }

    fn to_f64(self) -> f64 {
        f64::try_from(self).unwrap_or(f64::NAN)
    }

    /// Goes through the shortest decimal rendering of `value`, so `0.1`
    /// becomes exactly `0.1` rather than the binary neighbour of it.
    /// Non-finite input maps to zero.
    fn from_f64(value: f64) -> Self {
        value
            .to_string()
            .parse::<Decimal>()
            .or_else(|_| Decimal::try_from(value))
            .unwrap_or(Decimal::ZERO)
    }

    fn abs(self) -> Self {
        Decimal::abs(&self)
    }
}

/// A [`Field`] with the elementary functions the built-in systems need
///
/// The integrators never call these; only force and energy functions do.
pub trait Real: Field {
    /// Square root of a non-negative value
    fn sqrt(self) -> Self;

    fn sin(self) -> Self;

    fn cos(self) -> Self;
}

impl Real for f64 {
    fn sqrt(self) -> Self {
        libm::sqrt(self)
    }

    fn sin(self) -> Self {
        libm::sin(self)
    }

    fn cos(self) -> Self {
        libm::cos(self)
    }
}

impl Real for f32 {
    fn sqrt(self) -> Self {
        libm::sqrtf(self)
    }

    fn sin(self) -> Self {
        libm::sinf(self)
    }

    fn cos(self) -> Self {
        libm::cosf(self)
    }
}

impl Real for Decimal {
    /// Negative input has no decimal square root and yields zero
    fn sqrt(self) -> Self {
        MathematicalOps::sqrt(&self).unwrap_or(Decimal::ZERO)
    }

    fn sin(self) -> Self {
        MathematicalOps::sin(&self)
    }

    fn cos(self) -> Self {
        MathematicalOps::cos(&self)
    }
}
