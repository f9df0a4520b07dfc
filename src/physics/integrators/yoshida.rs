//! Builders for the symplectic integrator family
//!
//! `build_yoshida(h, levels)` yields an integrator of order `2·levels`. Level
//! one is plain leapfrog; deeper levels compose leapfrog with triple jumps,
//! flatten the composition once, and hand back a [`CompiledIntegrator`] that
//! replays the flat plan.
//!
//! All numeric faults of the construction (a diverging coefficient solve, a
//! singular Jacobian) surface here. Once built, stepping cannot fail.

use super::tracer::flatten;
use super::{
    BaseScheme, CompiledIntegrator, Composition, Integrator, Leapfrog, StepPlan, SymplecticEuler,
};
use crate::error::{IntegratorError, Result};
use crate::math::{Field, LinearSpace};
use crate::physics::hamiltonian::Hamiltonian;
use tracing::debug;

pub fn build_euler<H>(hamiltonian: H) -> SymplecticEuler<H> {
    SymplecticEuler::new(hamiltonian)
}

pub fn build_leapfrog<H>(hamiltonian: H) -> Leapfrog<H> {
    Leapfrog::new(hamiltonian)
}

/// Flat plan of the Yoshida integrator with `levels` recursion levels
///
/// The plan does not depend on any Hamiltonian, so it can be computed once
/// and shared through [`CompiledIntegrator::new`].
pub fn yoshida_plan<F: Field>(levels: u32) -> Result<StepPlan<F>> {
    if levels == 0 {
        return Err(IntegratorError::InvalidArgument(
            "Yoshida integrators need at least one level".to_string(),
        ));
    }
    let composition = Composition::over(BaseScheme::Leapfrog, levels)?;
    Ok(flatten(&composition))
}

/// Build the Yoshida integrator of order `2·levels` for `hamiltonian`
pub fn build_yoshida<F: Field, H>(hamiltonian: H, levels: u32) -> Result<YoshidaIntegrator<F, H>> {
    match levels {
        0 => Err(IntegratorError::InvalidArgument(
            "Yoshida integrators need at least one level".to_string(),
        )),
        1 => Ok(YoshidaIntegrator::Leapfrog(Leapfrog::new(hamiltonian))),
        _ => {
            let plan = yoshida_plan::<F>(levels)?;
            let order = 2 * levels as usize;
            debug!(
                order,
                entries = plan.len(),
                force_evaluations = plan.force_evaluations(),
                "built compiled Yoshida integrator"
            );
            Ok(YoshidaIntegrator::Compiled(CompiledIntegrator::new(
                plan,
                hamiltonian,
                format!("yoshida{order}"),
                order,
            )))
        }
    }
}

/// Result of [`build_yoshida`]
#[derive(Clone, Debug)]
pub enum YoshidaIntegrator<F, H> {
    Leapfrog(Leapfrog<H>),
    Compiled(CompiledIntegrator<F, H>),
}

impl<F, S, H> Integrator<F, S> for YoshidaIntegrator<F, H>
where
    F: Field,
    S: LinearSpace<F>,
    H: Hamiltonian<S> + Send + Sync,
{
    fn step(&self, q: S, p: S, tau: F) -> (S, S) {
        match self {
            YoshidaIntegrator::Leapfrog(integrator) => integrator.step(q, p, tau),
            YoshidaIntegrator::Compiled(integrator) => integrator.step(q, p, tau),
        }
    }

    fn name(&self) -> &str {
        match self {
            YoshidaIntegrator::Leapfrog(integrator) => Integrator::<F, S>::name(integrator),
            YoshidaIntegrator::Compiled(integrator) => Integrator::<F, S>::name(integrator),
        }
    }

    fn convergence_order(&self) -> usize {
        match self {
            YoshidaIntegrator::Leapfrog(integrator) => {
                Integrator::<F, S>::convergence_order(integrator)
            }
            YoshidaIntegrator::Compiled(integrator) => {
                Integrator::<F, S>::convergence_order(integrator)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::hamiltonian::SplitHamiltonian;
    use crate::physics::integrators::{ComposedIntegrator, StepKind};

    fn spring() -> impl Hamiltonian<f64> + Copy + Send + Sync {
        SplitHamiltonian::new(|q: &f64| *q, |p: &f64| *p)
    }

    #[test]
    fn test_level_zero_is_rejected() {
        assert!(matches!(
            build_yoshida::<f64, _>(spring(), 0),
            Err(IntegratorError::InvalidArgument(_))
        ));
        assert!(yoshida_plan::<f64>(0).is_err());
    }

    #[test]
    fn test_level_one_is_leapfrog() {
        let integrator = build_yoshida::<f64, _>(spring(), 1).unwrap();
        assert!(matches!(integrator, YoshidaIntegrator::Leapfrog(_)));
        assert_eq!(Integrator::<f64, f64>::convergence_order(&integrator), 2);
        assert_eq!(
            integrator.step(1.0, 0.0, 0.1),
            Leapfrog::new(spring()).step(1.0, 0.0, 0.1)
        );
    }

    #[test]
    fn test_deeper_levels_are_compiled() {
        for levels in 2..=4 {
            let integrator = build_yoshida::<f64, _>(spring(), levels).unwrap();
            let order = 2 * levels as usize;
            assert_eq!(Integrator::<f64, f64>::convergence_order(&integrator), order);
            assert_eq!(
                Integrator::<f64, f64>::name(&integrator),
                format!("yoshida{order}")
            );

            let YoshidaIntegrator::Compiled(compiled) = &integrator else {
                panic!("level {levels} should be compiled");
            };
            assert_eq!(compiled.plan().force_evaluations(), 3_usize.pow(levels - 1) + 1);
        }
    }

    #[test]
    fn test_compiled_matches_recursive_execution() {
        let h = SplitHamiltonian::new(|q: &f64| q.sin(), |p: &f64| *p);
        let composed =
            ComposedIntegrator::new(Composition::over(BaseScheme::Leapfrog, 3).unwrap(), h);
        let compiled = build_yoshida::<f64, _>(h, 3).unwrap();

        let (q, p) = compiled.step(-2.0, 0.4, 0.05);
        let (q_ref, p_ref) = composed.step(-2.0, 0.4, 0.05);
        assert!((q - q_ref).abs() < 1e-14);
        assert!((p - p_ref).abs() < 1e-14);
    }

    #[test]
    fn test_plan_is_shared_across_hamiltonians() {
        let plan = yoshida_plan::<f64>(2).unwrap();
        assert!((plan.total_weight(StepKind::Kick) - 1.0).abs() < 1e-14);

        let stiff = CompiledIntegrator::new(
            plan.clone(),
            SplitHamiltonian::new(|q: &f64| 100.0 * q, |p: &f64| *p),
            "stiff",
            4,
        );
        let soft = CompiledIntegrator::new(plan, spring(), "soft", 4);
        assert_eq!(stiff.plan(), soft.plan());
    }
}
