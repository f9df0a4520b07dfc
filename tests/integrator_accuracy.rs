//! Accuracy tests for symplectic integrators
//!
//! Tests each integrator against known analytical solutions and verifies
//! expected order of convergence.

use glam::DVec3;
use symplectic::IntegrateExt;
use symplectic::physics::Hamiltonian;
use symplectic::physics::integrators::registry::IntegratorRegistry;
use symplectic::physics::integrators::{Integrator, Leapfrog, SymplecticEuler, build_yoshida};

type Scalar = f64;
type Vector = DVec3;

const PI: Scalar = std::f64::consts::PI;

/// Test fixture for a simple harmonic oscillator
///
/// `H(q, p) = p·p/2 + ω²·q·q/2`. With `q(0) = A`, `p(0) = 0`:
/// q(t) = A * cos(ωt)
/// p(t) = -A * ω * sin(ωt)
#[derive(Clone, Copy, Debug)]
struct HarmonicOscillator {
    omega: Scalar,
    amplitude: Scalar,
}

impl HarmonicOscillator {
    fn new(omega: Scalar, amplitude: Scalar) -> Self {
        Self { omega, amplitude }
    }

    fn initial_state(&self) -> (Vector, Vector) {
        (Vector::new(self.amplitude, 0.0, 0.0), Vector::ZERO)
    }

    /// Analytical position at time t
    fn exact_position(&self, t: Scalar) -> Vector {
        Vector::new(self.amplitude * (self.omega * t).cos(), 0.0, 0.0)
    }

    /// Analytical momentum at time t
    fn exact_momentum(&self, t: Scalar) -> Vector {
        Vector::new(
            -self.amplitude * self.omega * (self.omega * t).sin(),
            0.0,
            0.0,
        )
    }

    /// Total energy (should be conserved)
    fn energy(&self, position: Vector, momentum: Vector) -> Scalar {
        let kinetic = 0.5 * momentum.length_squared();
        let potential = 0.5 * self.omega * self.omega * position.length_squared();
        kinetic + potential
    }
}

impl Hamiltonian<Vector> for HarmonicOscillator {
    fn force(&self, position: &Vector) -> Vector {
        self.omega * self.omega * *position
    }

    fn velocity(&self, momentum: &Vector) -> Vector {
        *momentum
    }
}

/// Run a simulation with given integrator and return final state
fn simulate(
    integrator: &dyn Integrator<Scalar, Vector>,
    oscillator: &HarmonicOscillator,
    dt: Scalar,
    steps: usize,
) -> (Vector, Vector, Scalar) {
    let (mut position, mut momentum) = oscillator.initial_state();
    for _ in 0..steps {
        (position, momentum) = integrator.step(position, momentum, dt);
    }

    let final_time = dt * steps as Scalar;
    (position, momentum, final_time)
}

/// Calculate relative error between numerical and analytical solutions
fn calculate_error(numerical: Vector, analytical: Vector) -> Scalar {
    (numerical - analytical).length() / analytical.length().max(1e-10)
}

/// Largest relative energy error along a trajectory
fn max_energy_error(
    integrator: &dyn Integrator<Scalar, Vector>,
    oscillator: &HarmonicOscillator,
    dt: Scalar,
    end_time: Scalar,
) -> Scalar {
    let (q0, p0) = oscillator.initial_state();
    let initial_energy = oscillator.energy(q0, p0);
    integrator
        .integrate(q0, p0, dt, end_time)
        .map(|(_, q, p)| ((oscillator.energy(q, p) - initial_energy) / initial_energy).abs())
        .fold(0.0, Scalar::max)
}

/// Observed convergence orders between successive halvings of the time step
fn observed_orders(
    integrator: &dyn Integrator<Scalar, Vector>,
    oscillator: &HarmonicOscillator,
    time_steps: &[Scalar],
) -> Vec<Scalar> {
    let errors: Vec<Scalar> = time_steps
        .iter()
        .map(|&dt| {
            let steps = (1.0 / dt).round() as usize;
            let (pos, _, time) = simulate(integrator, oscillator, dt, steps);
            calculate_error(pos, oscillator.exact_position(time))
        })
        .collect();

    errors
        .windows(2)
        // Avoid division by errors that are already at round-off level
        .filter(|pair| pair[1] > 1e-11)
        .map(|pair| (pair[0] / pair[1]).log2())
        .collect()
}

/// Test energy conservation for symplectic integrators
#[test]
fn test_symplectic_euler_energy_conservation() {
    let oscillator = HarmonicOscillator::new(2.0 * PI, 1.0);
    let integrator = SymplecticEuler::new(oscillator);

    let error = max_energy_error(&integrator, &oscillator, 0.001, 10.0);

    // Symplectic Euler should conserve energy to within ~1% for this test
    assert!(error < 0.01, "Energy drift too large: {:.2}%", error * 100.0);
}

#[test]
fn test_leapfrog_energy_conservation() {
    let oscillator = HarmonicOscillator::new(2.0 * PI, 1.0);
    let integrator = Leapfrog::new(oscillator);

    let error = max_energy_error(&integrator, &oscillator, 0.01, 10.0);
    println!("Leapfrog energy error: {:.6}%", error * 100.0);
    // The bound for leapfrog is (ω·dt)²/4, just under 0.1% here
    assert!(error < 0.002, "Energy drift too large: {:.2}%", error * 100.0);
}

#[test]
fn test_yoshida_energy_conservation() {
    let oscillator = HarmonicOscillator::new(2.0 * PI, 1.0);

    for (levels, tolerance) in [(2, 1e-5), (3, 1e-7)] {
        let integrator = build_yoshida::<Scalar, _>(oscillator, levels).unwrap();
        let error = max_energy_error(&integrator, &oscillator, 0.01, 10.0);
        println!("Yoshida level {levels} energy error: {error:e}");
        assert!(error < tolerance, "Level {levels} energy error {error:e}");
    }
}

/// Test order of convergence for various integrators
#[test]
fn test_symplectic_euler_order() {
    let oscillator = HarmonicOscillator::new(1.0, 1.0);
    let integrator = SymplecticEuler::new(oscillator);

    for order in observed_orders(&integrator, &oscillator, &[0.1, 0.05, 0.025, 0.0125]) {
        println!("Symplectic Euler convergence order: {order:.2}");
        assert!(order > 0.8 && order < 1.5, "Unexpected convergence order: {order}");
    }
}

#[test]
fn test_leapfrog_order() {
    let oscillator = HarmonicOscillator::new(1.0, 1.0);
    let integrator = Leapfrog::new(oscillator);

    for order in observed_orders(&integrator, &oscillator, &[0.1, 0.05, 0.025, 0.0125]) {
        println!("Leapfrog convergence order: {order:.2}");
        assert!(order > 1.8 && order < 2.5, "Unexpected convergence order: {order}");
    }
}

#[test]
fn test_yoshida_orders() {
    let oscillator = HarmonicOscillator::new(1.0, 1.0);

    for (levels, time_steps) in [
        (2, [0.2, 0.1, 0.05, 0.025]),
        (3, [0.25, 0.125, 0.0625, 0.03125]),
    ] {
        let integrator = build_yoshida::<Scalar, _>(oscillator, levels).unwrap();
        let expected = 2.0 * levels as Scalar;

        let orders = observed_orders(&integrator, &oscillator, &time_steps);
        assert!(!orders.is_empty(), "Errors vanished below round-off");
        for order in orders {
            println!("Yoshida level {levels} convergence order: {order:.2}");
            assert!(
                order > expected - 0.5,
                "Level {levels} should achieve near order {expected}, got {order}"
            );
        }
    }
}

/// Halving the step shrinks the energy oscillation by about 2^order
#[test]
fn test_energy_error_scales_with_order() {
    let oscillator = HarmonicOscillator::new(2.0 * PI, 1.0);
    let dt = 0.01;

    for levels in 1..=3 {
        let integrator = build_yoshida::<Scalar, _>(oscillator, levels).unwrap();
        let coarse = max_energy_error(&integrator, &oscillator, dt, 10.0);
        let fine = max_energy_error(&integrator, &oscillator, dt / 2.0, 10.0);

        let ratio = coarse / fine;
        let expected = (2.0 as Scalar).powi(2 * levels as i32);
        println!("Yoshida level {levels} energy ratio: {ratio:.2} (expected {expected})");
        assert!(
            (ratio / expected - 1.0).abs() < 0.15,
            "Level {levels}: halving dt shrank the energy error by {ratio:.2}, expected {expected}"
        );
    }
}

/// Test long-term stability of integrators
#[test]
fn test_long_term_stability() {
    let oscillator = HarmonicOscillator::new(2.0 * PI, 1.0);
    let dt = 0.01;
    let steps = 100000; // 1000 seconds, ~1000 periods

    let registry = IntegratorRegistry::default();
    for (name, tolerance) in [
        ("symplectic_euler", 0.2),
        ("leapfrog", 0.002),
        ("yoshida4", 1e-5),
        ("yoshida6", 1e-7),
    ] {
        let integrator: Box<dyn Integrator<Scalar, Vector>> =
            registry.create(name, oscillator).unwrap();
        let (q0, p0) = oscillator.initial_state();
        let initial_energy = oscillator.energy(q0, p0);

        let (position, momentum, _) = simulate(integrator.as_ref(), &oscillator, dt, steps);
        let final_energy = oscillator.energy(position, momentum);
        let energy_drift = ((final_energy - initial_energy) / initial_energy).abs();

        println!("{name} long-term energy drift: {:.2e}", energy_drift);

        // Symplectic methods keep the energy error bounded instead of drifting
        assert!(
            energy_drift < tolerance,
            "{name} energy drift too large: {energy_drift:e}"
        );
    }
}

/// Test integrator registry creation
#[test]
fn test_registry_integrator_creation() {
    let registry = IntegratorRegistry::default();
    let oscillator = HarmonicOscillator::new(1.0, 1.0);

    for name in ["euler", "verlet", "yoshida", "yoshida6", "yoshida8"] {
        let integrator: Result<Box<dyn Integrator<Scalar, Vector>>, _> =
            registry.create(name, oscillator);
        assert!(integrator.is_ok(), "Failed to create integrator: {}", name);
    }
}

/// Test harmonic oscillator accuracy for all integrators
#[test]
fn test_all_integrators_harmonic_oscillator() {
    let oscillator = HarmonicOscillator::new(2.0 * PI, 1.0);
    let dt = 0.01;
    let steps = 100; // One period

    let registry = IntegratorRegistry::default();

    println!("\nHarmonic Oscillator Test Results (1 period):");
    println!("---------------------------------------------");

    let mut previous_error = Scalar::INFINITY;
    for name in registry.list_available() {
        if name == "symplectic_euler" {
            continue;
        }
        let integrator: Box<dyn Integrator<Scalar, Vector>> =
            registry.create(&name, oscillator).unwrap();
        let (pos, mom, time) = simulate(integrator.as_ref(), &oscillator, dt, steps);

        let pos_error = calculate_error(pos, oscillator.exact_position(time));
        let mom_error = calculate_error(mom, oscillator.exact_momentum(time));

        println!(
            "{:20} | Position Error: {:.3e} | Momentum Error: {:.3e}",
            name, pos_error, mom_error
        );

        // list_available is sorted: leapfrog, yoshida4, yoshida6, yoshida8
        assert!(
            pos_error < previous_error,
            "{name} should beat lower orders"
        );
        previous_error = pos_error.max(1e-12);
    }
}
