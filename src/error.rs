//! Error types shared by the numeric kernel, the integrator builders and the
//! result writers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntegratorError {
    #[error("Dimension mismatch: left operand has {left} components, right operand has {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{operation} did not converge (residual {residual:e})")]
    NumericDivergence {
        operation: &'static str,
        residual: f64,
    },

    #[error("Division by zero in {0}")]
    DivisionByZero(&'static str),

    #[error("Unknown integrator: '{name}'. Available integrators: {available}. Aliases: {aliases}")]
    UnknownIntegrator {
        name: String,
        available: String,
        aliases: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IntegratorError>;
