//! Flat lists of weighted kick and drift operations

use super::StepKind;
use crate::math::Field;
use std::fmt;

/// One weighted half-map of a [`StepPlan`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoefficientEntry<F> {
    pub weight: F,
    pub kind: StepKind,
}

impl<F> CoefficientEntry<F> {
    pub fn new(weight: F, kind: StepKind) -> Self {
        Self { weight, kind }
    }

    pub fn kick(weight: F) -> Self {
        Self::new(weight, StepKind::Kick)
    }

    pub fn drift(weight: F) -> Self {
        Self::new(weight, StepKind::Drift)
    }
}

/// A minimal, directly replayable sequence of weighted half-maps
///
/// Weights are fractions of the step size: replaying a plan with step `τ`
/// applies every entry with `τ·weight`. Plans are only ever built through
/// [`StepPlan::from_entries`], which merges neighbours of the same kind, so
/// no two adjacent entries share a [`StepKind`].
#[derive(Clone, Debug, PartialEq)]
pub struct StepPlan<F> {
    entries: Vec<CoefficientEntry<F>>,
}

impl<F: Field> StepPlan<F> {
    /// Build a plan from arbitrary entries, summing adjacent same-kind weights
    pub fn from_entries(entries: impl IntoIterator<Item = CoefficientEntry<F>>) -> Self {
        let mut merged: Vec<CoefficientEntry<F>> = Vec::new();
        for entry in entries {
            match merged.last_mut() {
                Some(last) if last.kind == entry.kind => last.weight = last.weight + entry.weight,
                _ => merged.push(entry),
            }
        }
        Self { entries: merged }
    }

    /// Plan of one symplectic Euler step: kick, then drift
    pub fn symplectic_euler() -> Self {
        Self::from_entries([
            CoefficientEntry::kick(F::one()),
            CoefficientEntry::drift(F::one()),
        ])
    }

    /// Plan of one leapfrog step: half kick, drift, half kick
    pub fn leapfrog() -> Self {
        let half = F::one() / F::two();
        Self::from_entries([
            CoefficientEntry::kick(half),
            CoefficientEntry::drift(F::one()),
            CoefficientEntry::kick(half),
        ])
    }

    pub fn entries(&self) -> &[CoefficientEntry<F>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CoefficientEntry<F>> {
        self.entries.iter()
    }

    /// Total weight applied by entries of `kind`; one for any consistent plan
    pub fn total_weight(&self, kind: StepKind) -> F {
        self.entries
            .iter()
            .filter(|entry| entry.kind == kind)
            .fold(F::zero(), |acc, entry| acc + entry.weight)
    }

    /// Number of force evaluations one replay costs
    pub fn force_evaluations(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.kind == StepKind::Kick)
            .count()
    }

    /// True when no two neighbouring entries share a kind
    pub fn is_alternating(&self) -> bool {
        self.entries.windows(2).all(|pair| pair[0].kind != pair[1].kind)
    }
}

impl<'a, F> IntoIterator for &'a StepPlan<F> {
    type Item = &'a CoefficientEntry<F>;
    type IntoIter = std::slice::Iter<'a, CoefficientEntry<F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// One line per entry: index, kind and weight
impl<F: fmt::Display> fmt::Display for StepPlan<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            writeln!(f, "{i:>4} {:<5} {}", entry.kind, entry.weight)?;
        }
        Ok(())
    }
}
