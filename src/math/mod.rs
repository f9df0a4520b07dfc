//! Numeric foundations: scalar fields, vector spaces and the build-time
//! numeric kernel.

pub mod field;
pub mod kernel;
pub mod linear_space;
pub mod phase_vector;

pub use field::{Field, Real};
pub use rust_decimal::Decimal;
pub use kernel::{pow, root};
pub use linear_space::LinearSpace;
pub use phase_vector::PhaseVector;

/// Scalar type used by the run driver and the built-in systems
pub type Scalar = f64;

/// Phase-space vector type used by the run driver and the built-in systems
pub type Vector = PhaseVector<Scalar>;
