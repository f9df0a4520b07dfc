//! Trace-and-reduce flattening of composed integrators
//!
//! A composition of depth `n` calls its base scheme `3^(n−1)` times per step.
//! The flattener pays that cost once: it runs the composition a single time
//! on a one-dimensional probe space whose "force" and "velocity" are both the
//! constant one, recording the coordinate each call observes. With unit
//! gradients every kick lowers the probe momentum by exactly its weight and
//! every drift raises the probe position by exactly its weight, so the
//! weights can be read back off the recorded coordinates.
//!
//! The recovered plan never depends on the caller's physics: it is a property
//! of the composition alone, and one trace serves every Hamiltonian.

use super::{CoefficientEntry, ComposedIntegrator, Composition, Integrator, StepKind, StepPlan};
use crate::math::Field;
use crate::physics::hamiltonian::Hamiltonian;
use std::sync::Mutex;
use tracing::trace;

/// One probe observation
///
/// `value` is the probe coordinate handed to the probe's gradient: the
/// position for a kick, the momentum for a drift.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceRecord<F> {
    pub value: F,
    pub kind: StepKind,
}

/// Hamiltonian over the scalar space that records every evaluation
#[derive(Debug)]
struct Probe<F> {
    records: Mutex<Vec<TraceRecord<F>>>,
}

impl<F: Field> Probe<F> {
    fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    fn observe(&self, value: F, kind: StepKind) -> F {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(TraceRecord { value, kind });
        F::one()
    }

    fn into_records(self) -> Vec<TraceRecord<F>> {
        self.records
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<F: Field> Hamiltonian<F> for Probe<F> {
    fn force(&self, position: &F) -> F {
        self.observe(*position, StepKind::Kick)
    }

    fn velocity(&self, momentum: &F) -> F {
        self.observe(*momentum, StepKind::Drift)
    }
}

/// Run `composition` once on the probe and return its raw trace together
/// with the final probe state `(q_end, p_end)`
pub fn record<F: Field>(composition: &Composition<F>) -> (Vec<TraceRecord<F>>, F, F) {
    let probe = Probe::new();
    let (q_end, p_end) = {
        let traced = ComposedIntegrator::new(composition.clone(), &probe);
        traced.step(F::zero(), F::zero(), F::one())
    };
    (probe.into_records(), q_end, p_end)
}

/// Recover the minimal plan from a probe trace
///
/// Records are first grouped into runs of equal kind, which merges adjacent
/// kicks (and drifts) that a replay may apply as one. The runs are then
/// walked backwards from the final state: a kick run weighs
/// `p_before − p_after`, a drift run `q_after − q_before`, where the
/// "before" coordinate is the one recorded by the last record of the
/// preceding run (zero for the first run).
pub fn reduce<F: Field>(records: &[TraceRecord<F>], q_end: F, p_end: F) -> StepPlan<F> {
    let runs: Vec<&[TraceRecord<F>]> = records.chunk_by(|a, b| a.kind == b.kind).collect();

    let (mut q, mut p) = (q_end, p_end);
    let mut entries = Vec::with_capacity(runs.len());
    for (index, run) in runs.iter().enumerate().rev() {
        let before = index
            .checked_sub(1)
            .and_then(|previous| runs[previous].last())
            .map_or(F::zero(), |record| record.value);

        match run[0].kind {
            StepKind::Kick => {
                entries.push(CoefficientEntry::kick(before - p));
                p = before;
            }
            StepKind::Drift => {
                entries.push(CoefficientEntry::drift(q - before));
                q = before;
            }
        }
    }

    entries.reverse();
    StepPlan::from_entries(entries)
}

/// Flatten `composition` into a directly replayable plan
pub fn flatten<F: Field>(composition: &Composition<F>) -> StepPlan<F> {
    let (records, q_end, p_end) = record(composition);
    let plan = reduce(&records, q_end, p_end);
    trace!(
        levels = composition.levels(),
        recorded = records.len(),
        entries = plan.len(),
        "flattened composition"
    );
    plan
}
