//! The driver: interns caller variables, translates caller types into
//! [`Term`]s, runs the four solver phases in sequence, and maps the result
//! back into caller vocabulary.
//!
//! The translator itself (how a real compiler's effect-type representation
//! maps onto the six `Term` shapes) is a client concern; this module only
//! fixes its *contract*, the [`EffectType`] trait. A caller's `Type` is
//! expected to be a closed, statically-typed recursive enum, so the
//! `as_shape` match below is exhaustive and [`UnificationError::Internal`]
//! is never constructed here; the variant exists in the public error type
//! for a caller whose own translation layer is more dynamic than a Rust
//! enum.

use crate::config::SolveConfig;
use crate::equation::Equation;
use crate::error::UnificationError;
use crate::hooks::{NoopHooks, Phase, SolverHooks};
use crate::phases::{
    sve_phase, trivial_assignment_phase, unit_propagation_phase, variable_propagation_phase,
};
use crate::rigidity::{RigidSet, RigidityEnv, Rigidity};
use crate::substitution::Substitution;
use crate::term::{Term, VariableId};
use std::collections::HashMap;
use std::hash::Hash;

/// The contract a caller's domain type must satisfy to be unified by this
/// crate. `Sym` is the caller's own variable identity (e.g. a type-variable
/// index or interned name); `Self` is the caller's effect-type
/// representation, structurally isomorphic to [`Term`] via [`Shape`].
pub trait EffectType: Clone {
    type Sym: Clone + Ord + Hash + Eq;

    /// Every variable symbol occurring anywhere in `self`, used by the
    /// driver to build its interning bijection before translation.
    fn type_vars(&self) -> Vec<Self::Sym>;

    /// A one-level structural view, used by the driver to walk `self` into
    /// a [`Term`].
    fn as_shape(&self) -> Shape<'_, Self>;

    fn pure() -> Self;
    fn univ() -> Self;
    fn var(sym: Self::Sym) -> Self;
    fn complement(inner: Self) -> Self;
    fn union(a: Self, b: Self) -> Self;
    fn intersection(a: Self, b: Self) -> Self;
}

/// A borrowed, one-level view of an [`EffectType`] value.
pub enum Shape<'a, T: EffectType> {
    Pure,
    Univ,
    Var(T::Sym),
    Complement(&'a T),
    Union(&'a T, &'a T),
    Intersection(&'a T, &'a T),
}

/// A mapping from caller variable symbol to caller type, the result type of
/// [`unify_all`].
#[derive(Clone, Debug)]
pub struct CallerSubstitution<T: EffectType>(HashMap<T::Sym, T>);

impl<T: EffectType> CallerSubstitution<T> {
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    pub fn get(&self, sym: &T::Sym) -> Option<&T> {
        self.0.get(sym)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T::Sym, &T)> {
        self.0.iter()
    }
}

/// Bijection between caller symbols and solver-internal dense ids, local to
/// one [`unify_all`] call.
struct Interner<Sym> {
    forward: HashMap<Sym, VariableId>,
    backward: Vec<Sym>,
}

impl<Sym: Clone + Eq + Hash> Interner<Sym> {
    fn new() -> Self {
        Self {
            forward: HashMap::new(),
            backward: Vec::new(),
        }
    }

    fn intern(&mut self, sym: Sym) -> VariableId {
        if let Some(id) = self.forward.get(&sym) {
            return *id;
        }
        let id = self.backward.len();
        self.backward.push(sym.clone());
        self.forward.insert(sym, id);
        id
    }

    fn resolve(&self, id: VariableId) -> &Sym {
        &self.backward[id]
    }
}

/// The common case: no tracing, the default complexity budget.
pub fn unify_all<T: EffectType>(
    pairs: &[(T, T)],
    rigidity: &RigidityEnv<T::Sym>,
) -> Result<CallerSubstitution<T>, UnificationError<T>> {
    unify_all_with_hooks_and_config(pairs, rigidity, &NoopHooks, &SolveConfig::default())
}

/// As [`unify_all`], but invokes `hooks` at every phase boundary.
pub fn unify_all_with_hooks<T: EffectType>(
    pairs: &[(T, T)],
    rigidity: &RigidityEnv<T::Sym>,
    hooks: &dyn SolverHooks,
) -> Result<CallerSubstitution<T>, UnificationError<T>> {
    unify_all_with_hooks_and_config(pairs, rigidity, hooks, &SolveConfig::default())
}

/// As [`unify_all`], but with an explicit [`SolveConfig`].
pub fn unify_all_with_config<T: EffectType>(
    pairs: &[(T, T)],
    rigidity: &RigidityEnv<T::Sym>,
    config: &SolveConfig,
) -> Result<CallerSubstitution<T>, UnificationError<T>> {
    unify_all_with_hooks_and_config(pairs, rigidity, &NoopHooks, config)
}

/// The fully general entry point; the other three forward to this one with
/// defaults.
pub fn unify_all_with_hooks_and_config<T: EffectType>(
    pairs: &[(T, T)],
    rigidity: &RigidityEnv<T::Sym>,
    hooks: &dyn SolverHooks,
    config: &SolveConfig,
) -> Result<CallerSubstitution<T>, UnificationError<T>> {
    if pairs.is_empty() {
        hooks.on_phase_complete(Phase::Done, &[], &Substitution::empty());
        return Ok(CallerSubstitution::empty());
    }

    let mut interner = Interner::new();
    let mut rigid_ids = Vec::new();

    // Build the interning bijection over every caller-side variable up
    // front, before translating a single term.
    for (a, b) in pairs {
        for sym in a.type_vars().into_iter().chain(b.type_vars()) {
            interner.intern(sym);
        }
    }

    let equations: Vec<Equation> = pairs
        .iter()
        .map(|(a, b)| {
            Equation::new(
                translate(a, rigidity, &mut interner, &mut rigid_ids),
                translate(b, rigidity, &mut interner, &mut rigid_ids),
            )
        })
        .collect();

    let rigid = RigidSet::new(rigid_ids);

    let total = solve(equations, &rigid, hooks, config).map_err(|e| to_caller_error(e, &interner))?;
    hooks.on_phase_complete(Phase::Done, &[], &total);

    Ok(to_caller_substitution(total, &interner))
}

/// Runs the staged solver directly on `Term` equations, skipping the
/// `EffectType` translation layer. This is what the demo CLI (`unify`,
/// component K) calls: its JSON documents already deserialize straight into
/// `Term`s, so there is no caller domain type to translate from.
pub fn unify_terms(
    equations: Vec<Equation>,
    rigid: &RigidSet,
    hooks: &dyn SolverHooks,
    config: &SolveConfig,
) -> Result<Substitution, UnificationError<Term>> {
    if equations.is_empty() {
        hooks.on_phase_complete(Phase::Done, &[], &Substitution::empty());
        return Ok(Substitution::empty());
    }
    let total = solve(equations, rigid, hooks, config)?;
    hooks.on_phase_complete(Phase::Done, &[], &total);
    Ok(total)
}

/// Runs phases D through G in sequence, entirely in solver-internal `Term`
/// vocabulary. Kept separate from [`unify_all_with_hooks_and_config`] so
/// the phase pipeline never has to thread the caller's `EffectType` through
/// error construction: conflicts are reported in `Term` and translated
/// back to caller vocabulary exactly once, by the caller of this function.
fn solve(
    equations: Vec<Equation>,
    rigid: &RigidSet,
    hooks: &dyn SolverHooks,
    config: &SolveConfig,
) -> Result<Substitution, UnificationError<Term>> {
    let (equations, sub_d) = unit_propagation_phase(equations, rigid, hooks)?;
    let equations = simplify(equations)?;

    let (equations, sub_e) = variable_propagation_phase(equations, rigid)?;
    hooks.on_phase_complete(Phase::VariablePropagation, &equations, &sub_e);
    let equations = simplify(equations)?;

    let (equations, sub_f) = trivial_assignment_phase(equations, rigid)?;
    hooks.on_phase_complete(Phase::TrivialAssignment, &equations, &sub_f);
    let equations = simplify(equations)?;

    let sub_g = sve_phase(equations, rigid, config)?;
    hooks.on_phase_complete(Phase::Sve, &[], &sub_g);

    Ok(sub_g & sub_f & sub_e & sub_d)
}

/// Discards trivially-true equations and detects an unconditional constant
/// conflict. See §4.4: the simplify/conflict-check step run between phases.
fn simplify(equations: Vec<Equation>) -> Result<Vec<Equation>, UnificationError<Term>> {
    let mut kept = Vec::with_capacity(equations.len());
    for eq in equations {
        if eq.is_trivial() {
            continue;
        }
        if eq.is_constant_conflict() {
            return Err(UnificationError::MismatchedEffects {
                lhs: eq.lhs,
                rhs: eq.rhs,
            });
        }
        kept.push(eq);
    }
    Ok(kept)
}

/// Maps a solver-internal error (witnesses in `Term` vocabulary) back to
/// the caller's own `EffectType`.
fn to_caller_error<T: EffectType>(
    error: UnificationError<Term>,
    interner: &Interner<T::Sym>,
) -> UnificationError<T> {
    match error {
        UnificationError::MismatchedEffects { lhs, rhs } => UnificationError::MismatchedEffects {
            lhs: term_to_type(&lhs, interner),
            rhs: term_to_type(&rhs, interner),
        },
        UnificationError::TooComplex { lhs, rhs, limit } => UnificationError::TooComplex {
            lhs: term_to_type(&lhs, interner),
            rhs: term_to_type(&rhs, interner),
            limit,
        },
        UnificationError::Internal(msg) => UnificationError::Internal(msg),
    }
}

fn translate<T: EffectType>(
    ty: &T,
    rigidity: &RigidityEnv<T::Sym>,
    interner: &mut Interner<T::Sym>,
    rigid_ids: &mut Vec<VariableId>,
) -> Term {
    match ty.as_shape() {
        Shape::Pure => Term::True,
        Shape::Univ => Term::False,
        Shape::Var(sym) => {
            let id = interner.intern(sym.clone());
            if rigidity.get(&sym) == Rigidity::Rigid {
                rigid_ids.push(id);
            }
            Term::Var(id)
        }
        Shape::Complement(inner) => Term::mk_not(translate(inner, rigidity, interner, rigid_ids)),
        // The client's union maps to conjunction and intersection to
        // disjunction: effects use the dual lattice where ⊤ means "no
        // effect", so "more effects" (union of effect sets) moves *away*
        // from ⊤, which is what ∧ does to its operands.
        Shape::Union(a, b) => Term::mk_and(
            translate(a, rigidity, interner, rigid_ids),
            translate(b, rigidity, interner, rigid_ids),
        ),
        Shape::Intersection(a, b) => Term::mk_or(
            translate(a, rigidity, interner, rigid_ids),
            translate(b, rigidity, interner, rigid_ids),
        ),
    }
}

fn term_to_type<T: EffectType>(term: &Term, interner: &Interner<T::Sym>) -> T {
    match term {
        Term::True => T::pure(),
        Term::False => T::univ(),
        Term::Var(id) => T::var(interner.resolve(*id).clone()),
        Term::Not(t) => T::complement(term_to_type(t, interner)),
        Term::And(ts) => ts
            .iter()
            .map(|t| term_to_type(t, interner))
            .reduce(T::union)
            .expect("And always has at least two children"),
        Term::Or(ts) => ts
            .iter()
            .map(|t| term_to_type(t, interner))
            .reduce(T::intersection)
            .expect("Or always has at least two children"),
    }
}

fn to_caller_substitution<T: EffectType>(
    substitution: Substitution,
    interner: &Interner<T::Sym>,
) -> CallerSubstitution<T> {
    let mut out = HashMap::new();
    for (id, term) in substitution.iter() {
        out.insert(interner.resolve(id).clone(), term_to_type(term, interner));
    }
    CallerSubstitution(out)
}
