//! Symplectic library
//!
//! Structure-preserving integrators for separable Hamiltonian systems,
//! including Yoshida compositions of any even order, exposed as a library
//! to enable integration testing and benchmarking.

pub mod cli;
pub mod config;
pub mod error;
pub mod math;
pub mod output;
pub mod physics;

// Test utilities are public for integration tests
pub mod test_utils;

pub use error::{IntegratorError, Result};
pub use physics::integrators::{
    Integrator, build_euler, build_leapfrog, build_yoshida, yoshida_plan,
};
pub use physics::trajectory::IntegrateExt;
