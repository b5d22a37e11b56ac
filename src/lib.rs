//! Boolean unification over a free Boolean algebra, used as the solver core
//! for compiler effect types: given a set of equations between Boolean
//! formulas, produce a most-general substitution that satisfies all of them
//! or report a conflict.
//!
//! The staged pipeline (unit propagation → variable propagation → trivial
//! assignment → successive variable elimination) discharges the cheap,
//! common-case equations before falling back to the expensive general
//! algorithm on whatever residue remains. See [`driver::unify_all`] for the
//! entry point.

pub mod config;
pub mod did;
pub mod driver;
pub mod equation;
pub mod error;
pub mod hooks;
pub mod phases;
pub mod rigidity;
pub mod substitution;
pub mod term;
pub mod utils;

pub use config::SolveConfig;
pub use driver::{
    unify_all, unify_all_with_config, unify_all_with_hooks, unify_all_with_hooks_and_config,
    unify_terms, CallerSubstitution, EffectType, Shape,
};
pub use equation::Equation;
pub use error::UnificationError;
pub use hooks::{NoopHooks, Phase, SolverHooks};
pub use rigidity::{RigidSet, Rigidity, RigidityEnv};
pub use substitution::Substitution;
pub use term::{Term, VariableId};
