//! The solver's tracing seam.
//!
//! Diagnostics are opt-in rather than baked into the core as unconditional
//! `println!` calls: `SolverHooks` is the seam a caller hangs observability
//! off of. The driver calls it once per phase boundary; the default
//! implementation does nothing.

use crate::equation::Equation;
use crate::substitution::Substitution;

/// Names the five stages the driver runs equations and a substitution past.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    UnitPropagation,
    VariablePropagation,
    TrivialAssignment,
    Sve,
    Done,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::UnitPropagation => "unit propagation",
            Phase::VariablePropagation => "variable propagation",
            Phase::TrivialAssignment => "trivial assignment",
            Phase::Sve => "SVE",
            Phase::Done => "done",
        };
        f.write_str(name)
    }
}

/// A caller-supplied observer invoked at each phase boundary.
pub trait SolverHooks {
    /// Called after `phase` has finished running, with the residual
    /// equations and the substitution accumulated so far.
    fn on_phase_complete(&self, phase: Phase, equations: &[Equation], substitution: &Substitution);
}

/// The default, silent implementation used by [`crate::unify_all`].
pub struct NoopHooks;

impl SolverHooks for NoopHooks {
    fn on_phase_complete(&self, _phase: Phase, _equations: &[Equation], _substitution: &Substitution) {}
}
