//! Triple-jump coefficients for Yoshida composition
//!
//! A time-symmetric integrator `S(τ)` of order `2k` becomes one of order
//! `2k + 2` when applied three times as `S(x1·τ) ∘ S(x0·τ) ∘ S(x1·τ)`, provided
//!
//! ```text
//! 2·x1 + x0 = 1                    (the sub-steps add up to τ)
//! 2·x1^(2k+1) + x0^(2k+1) = 0      (the leading error term cancels)
//! ```
//!
//! The closed form `x1 = 1 / (2 − 2^(1/(2k+1)))` solves this system exactly in
//! real arithmetic; it is used as the starting point of a Newton iteration
//! that polishes the pair in whatever field the coefficients live in.

use crate::error::{IntegratorError, Result};
use crate::math::kernel::{CONVERGENCE_SLACK, NEWTON_ITERATIONS};
use crate::math::{Field, pow, root};
use tracing::trace;

/// Sub-step scales of one triple jump
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TripleJump<F> {
    /// Scale of the first and last sub-step (`x1`)
    pub outer: F,
    /// Scale of the middle sub-step (`x0`), negative for every level
    pub middle: F,
}

impl<F: Field> TripleJump<F> {
    /// Residuals of the two order conditions at recursion `level`
    pub fn residuals(&self, level: u32) -> Result<(F, F)> {
        let power = odd_power(level)?;
        let consistency = F::two() * self.outer + self.middle - F::one();
        let cancellation = F::two() * pow(self.outer, power)? + pow(self.middle, power)?;
        Ok((consistency, cancellation))
    }
}

/// Solve the order conditions of recursion `level` (1 for the step from
/// order 2 to order 4)
///
/// Runs exactly [`NEWTON_ITERATIONS`] Newton steps on the 2×2 system with
/// its explicit inverse. A singular Jacobian is reported as
/// [`IntegratorError::DivisionByZero`]; a final residual above `1024·ε` as
/// [`IntegratorError::NumericDivergence`].
pub fn triple_jump_coefficients<F: Field>(level: u32) -> Result<TripleJump<F>> {
    if level == 0 {
        return Err(IntegratorError::InvalidArgument(
            "triple-jump levels start at 1".to_string(),
        ));
    }

    let power = odd_power(level)?;
    let degree = F::from_i64(i64::from(power));
    let two = F::two();

    let mut outer = F::one() / (two - root(two, power as u32)?);
    let mut middle = F::one() - two * outer;

    for _ in 0..NEWTON_ITERATIONS {
        let w11 = F::one();
        let w12 = two;
        let w21 = two * degree * pow(outer, power - 1)?;
        let w22 = degree * pow(middle, power - 1)?;
        let det = w11 * w22 - w21 * w12;
        if det.is_zero() {
            return Err(IntegratorError::DivisionByZero("triple-jump Jacobian"));
        }

        let y0 = two * outer + middle - F::one();
        let y1 = two * pow(outer, power)? + pow(middle, power)?;

        middle = middle - (w22 * y0 - w12 * y1) / det;
        outer = outer - (-w21 * y0 + w11 * y1) / det;
    }

    let coefficients = TripleJump { outer, middle };
    let (consistency, cancellation) = coefficients.residuals(level)?;
    let residual = consistency.abs() + cancellation.abs();
    // Written negated so that a NaN residual is rejected as well.
    if !(residual <= F::epsilon() * F::from_i64(CONVERGENCE_SLACK)) {
        return Err(IntegratorError::NumericDivergence {
            operation: "triple-jump coefficient solve",
            residual: residual.to_f64(),
        });
    }

    trace!(
        level,
        outer = outer.to_f64(),
        middle = middle.to_f64(),
        "solved triple-jump coefficients"
    );
    Ok(coefficients)
}

/// `2·level + 1`
fn odd_power(level: u32) -> Result<i32> {
    level
        .checked_mul(2)
        .and_then(|doubled| doubled.checked_add(1))
        .and_then(|power| i32::try_from(power).ok())
        .ok_or_else(|| IntegratorError::InvalidArgument(format!("level {level} is out of range")))
}
