//! Hamiltonians, integrators and trajectories

pub mod hamiltonian;
pub mod integrators;
pub mod systems;
pub mod trajectory;

pub use hamiltonian::{ConservativeSystem, Hamiltonian, SplitHamiltonian};
pub use systems::{System, wrap_angle};
pub use trajectory::{IntegrateExt, Trajectory};
