//! Recursive triple-jump composition
//!
//! A [`Composition`] is the build-time description of a Yoshida integrator:
//! a base scheme wrapped by one triple jump per recursion level. Nodes live
//! in an arena and refer to their inner integrator by index; every level
//! wraps the node built just before it, so the tree is a chain whose root is
//! the last node pushed.
//!
//! Executing a composition directly costs `3^(levels−1)` base steps per call.
//! [`ComposedIntegrator`] does exactly that and serves as the reference the
//! flattened plans are checked against.

use super::coefficients::{TripleJump, triple_jump_coefficients};
use super::{CoefficientEntry, Integrator, Leapfrog, StepPlan, SymplecticEuler};
use crate::error::{IntegratorError, Result};
use crate::math::{Field, LinearSpace};
use crate::physics::hamiltonian::Hamiltonian;
use serde::{Deserialize, Serialize};

/// Integrator at the leaves of a composition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseScheme {
    SymplecticEuler,
    Leapfrog,
}

impl BaseScheme {
    /// Flat plan of a single base step
    pub fn plan<F: Field>(self) -> StepPlan<F> {
        match self {
            BaseScheme::SymplecticEuler => StepPlan::symplectic_euler(),
            BaseScheme::Leapfrog => StepPlan::leapfrog(),
        }
    }

    pub fn convergence_order(self) -> usize {
        match self {
            BaseScheme::SymplecticEuler => 1,
            BaseScheme::Leapfrog => 2,
        }
    }

    fn step<F, S, H>(self, hamiltonian: &H, q: S, p: S, tau: F) -> (S, S)
    where
        F: Field,
        S: LinearSpace<F>,
        H: Hamiltonian<S> + Sync,
    {
        match self {
            BaseScheme::SymplecticEuler => SymplecticEuler::new(hamiltonian).step(q, p, tau),
            BaseScheme::Leapfrog => Leapfrog::new(hamiltonian).step(q, p, tau),
        }
    }
}

/// Index of a node inside a [`Composition`] arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One node of the composition tree
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CompositionNode<F> {
    /// A single step of the base scheme
    Base(BaseScheme),
    /// `inner(x1·τ) ∘ inner(x0·τ) ∘ inner(x1·τ)`
    TripleJump { inner: NodeId, jump: TripleJump<F> },
}

/// Arena-allocated triple-jump tree
#[derive(Clone, Debug, PartialEq)]
pub struct Composition<F> {
    nodes: Vec<CompositionNode<F>>,
}

impl<F: Field> Composition<F> {
    /// A composition of depth one: just the base scheme
    pub fn base(scheme: BaseScheme) -> Self {
        Self {
            nodes: vec![CompositionNode::Base(scheme)],
        }
    }

    /// Wrap the current root in a triple jump with the given coefficients
    pub fn wrap(mut self, jump: TripleJump<F>) -> Self {
        let inner = self.root();
        self.nodes.push(CompositionNode::TripleJump { inner, jump });
        self
    }

    /// Build `levels` levels over `scheme`, solving recursion levels
    /// `1..levels` for their coefficients
    ///
    /// Each level wraps the composition built so far.
    pub fn over(scheme: BaseScheme, levels: u32) -> Result<Self> {
        if levels == 0 {
            return Err(IntegratorError::InvalidArgument(
                "a composition needs at least one level".to_string(),
            ));
        }
        (1..levels).try_fold(Self::base(scheme), |composition, level| {
            Ok(composition.wrap(triple_jump_coefficients(level)?))
        })
    }

    pub fn root(&self) -> NodeId {
        NodeId(self.nodes.len() - 1)
    }

    pub fn node(&self, id: NodeId) -> &CompositionNode<F> {
        &self.nodes[id.0]
    }

    /// Number of recursion levels, counting the base scheme as one
    pub fn levels(&self) -> usize {
        self.nodes.len()
    }

    pub fn base_scheme(&self) -> BaseScheme {
        match self.nodes[0] {
            CompositionNode::Base(scheme) => scheme,
            CompositionNode::TripleJump { .. } => {
                unreachable!("the first arena node is always the base scheme")
            }
        }
    }

    /// Base steps one direct execution performs
    pub fn base_steps(&self) -> usize {
        3_usize.pow(self.levels() as u32 - 1)
    }

    /// Leapfrog compositions gain two orders per level; compositions over
    /// a non-symmetric base stay at the base order.
    pub fn convergence_order(&self) -> usize {
        match self.base_scheme() {
            BaseScheme::Leapfrog => 2 * self.levels(),
            BaseScheme::SymplecticEuler => 1,
        }
    }

    /// Flatten symbolically by expanding the coefficient algebra
    ///
    /// Produces the same plan as the trace-based flattener without running
    /// any integrator.
    pub fn expand(&self) -> StepPlan<F> {
        let mut entries = Vec::new();
        self.expand_node(self.root(), F::one(), &mut entries);
        StepPlan::from_entries(entries)
    }

    fn expand_node(&self, id: NodeId, scale: F, entries: &mut Vec<CoefficientEntry<F>>) {
        match *self.node(id) {
            CompositionNode::Base(scheme) => entries.extend(
                scheme
                    .plan::<F>()
                    .iter()
                    .map(|entry| CoefficientEntry::new(scale * entry.weight, entry.kind)),
            ),
            CompositionNode::TripleJump { inner, jump } => {
                self.expand_node(inner, scale * jump.outer, entries);
                self.expand_node(inner, scale * jump.middle, entries);
                self.expand_node(inner, scale * jump.outer, entries);
            }
        }
    }
}

/// Executes a [`Composition`] recursively, one base step per leaf
#[derive(Clone, Debug)]
pub struct ComposedIntegrator<F, H> {
    composition: Composition<F>,
    hamiltonian: H,
    name: String,
}

impl<F: Field, H> ComposedIntegrator<F, H> {
    pub fn new(composition: Composition<F>, hamiltonian: H) -> Self {
        let name = format!("composed{}", composition.convergence_order());
        Self {
            composition,
            hamiltonian,
            name,
        }
    }

    pub fn composition(&self) -> &Composition<F> {
        &self.composition
    }

    fn step_node<S>(&self, id: NodeId, q: S, p: S, tau: F) -> (S, S)
    where
        S: LinearSpace<F>,
        H: Hamiltonian<S> + Sync,
    {
        match *self.composition.node(id) {
            CompositionNode::Base(scheme) => scheme.step(&self.hamiltonian, q, p, tau),
            CompositionNode::TripleJump { inner, jump } => {
                let (q, p) = self.step_node(inner, q, p, tau * jump.outer);
                let (q, p) = self.step_node(inner, q, p, tau * jump.middle);
                self.step_node(inner, q, p, tau * jump.outer)
            }
        }
    }
}

impl<F, S, H> Integrator<F, S> for ComposedIntegrator<F, H>
where
    F: Field,
    S: LinearSpace<F>,
    H: Hamiltonian<S> + Send + Sync,
{
    fn step(&self, q: S, p: S, tau: F) -> (S, S) {
        self.step_node(self.composition.root(), q, p, tau)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn convergence_order(&self) -> usize {
        self.composition.convergence_order()
    }
}
