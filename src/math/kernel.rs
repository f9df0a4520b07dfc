//! Root finding and integer powers over an arbitrary [`Field`]
//!
//! Both routines exist to compute triple-jump coefficients at build time, so
//! they favour reproducibility over speed: Newton's method always runs a
//! fixed number of iterations, and the result is only checked afterwards.

use super::field::Field;
use crate::error::{IntegratorError, Result};
use std::collections::HashMap;

/// Fixed number of Newton iterations used by every build-time solver
pub const NEWTON_ITERATIONS: usize = 100;

/// Multiple of the field epsilon a solved residual may not exceed
pub(crate) const CONVERGENCE_SLACK: i64 = 1024;

/// Principal real `k`-th root of a positive `x`
///
/// Runs `y ← ((k−1)·y + x / y^(k−1)) / k` exactly [`NEWTON_ITERATIONS`] times
/// starting from `y = x`. There is no early exit; instead the final `y^k` is
/// compared against `x` and a residual above `1024·ε·x` is reported as
/// [`IntegratorError::NumericDivergence`].
pub fn root<F: Field>(x: F, k: u32) -> Result<F> {
    if k == 0 {
        return Err(IntegratorError::InvalidArgument(
            "root degree must be at least 1".to_string(),
        ));
    }
    if !(x > F::zero()) {
        return Err(IntegratorError::InvalidArgument(format!(
            "root is only defined for positive values, got {x}"
        )));
    }

    let degree = F::from_i64(i64::from(k));
    let lower = exponent(k - 1)?;
    let mut y = x;
    for _ in 0..NEWTON_ITERATIONS {
        let denominator = pow(y, lower)?;
        if denominator.is_zero() {
            return Err(IntegratorError::DivisionByZero("root"));
        }
        y = ((degree - F::one()) * y + x / denominator) / degree;
    }

    let residual = (pow(y, exponent(k)?)? - x).abs();
    let tolerance = F::epsilon() * F::from_i64(CONVERGENCE_SLACK) * x;
    if !(residual <= tolerance) {
        return Err(IntegratorError::NumericDivergence {
            operation: "root",
            residual: residual.to_f64(),
        });
    }
    Ok(y)
}

/// `x` raised to the integer power `k`
///
/// Exponentiation by squaring with a memo of already computed powers, seeded
/// with `x^0` and `x^1` and local to this call. Negative exponents return the
/// reciprocal of the positive power.
pub fn pow<F: Field>(x: F, k: i32) -> Result<F> {
    let mut cache = HashMap::from([(0, F::one()), (1, x)]);
    let magnitude = power_by_squaring(x, k.unsigned_abs(), &mut cache);
    if k >= 0 {
        return Ok(magnitude);
    }
    if magnitude.is_zero() {
        return Err(IntegratorError::DivisionByZero("pow"));
    }
    Ok(F::one() / magnitude)
}

fn power_by_squaring<F: Field>(x: F, k: u32, cache: &mut HashMap<u32, F>) -> F {
    if let Some(&known) = cache.get(&k) {
        return known;
    }

    let half = power_by_squaring(x, k / 2, cache);
    let result = if k % 2 == 0 {
        half * half
    } else {
        x * half * half
    };

    cache.insert(k, result);
    result
}

fn exponent(k: u32) -> Result<i32> {
    i32::try_from(k)
        .map_err(|_| IntegratorError::InvalidArgument(format!("exponent {k} is out of range")))
}
