//! The substitution algebra: a finite mapping from variable id to term, with
//! application, extension, and left-biased composition.

use crate::equation::Equation;
use crate::term::{Term, VariableId};
use std::collections::HashMap;
use std::ops::{Add, BitAnd};

/// A finite mapping `id -> Term`.
///
/// Invariants (see `SPEC_FULL.md` §3): every key is a flexible id, every
/// value is in canonical form, and no value contains its own key among its
/// free variables. Extension methods enforce the latter with a debug
/// assertion, since a violation here is a solver-internal bug, never a
/// caller-input error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Substitution(HashMap<VariableId, Term>);

impl Substitution {
    /// The empty substitution, the identity of `@@` (`&`) and `++` (`+`).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Looks up the binding for `variable`, if any.
    pub fn get(&self, variable: VariableId) -> Option<&Term> {
        self.0.get(&variable)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains_key(&self, variable: VariableId) -> bool {
        self.0.contains_key(&variable)
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableId, &Term)> {
        self.0.iter().map(|(id, t)| (*id, t))
    }

    /// A substitution with the single binding `variable -> term`.
    pub fn singleton(variable: VariableId, term: Term) -> Self {
        let mut s = Self::empty();
        s.extend(variable, term);
        s
    }

    /// A substitution with the single binding `variable -> term`, skipping
    /// the occurs check.
    ///
    /// SVE (`phases::sve`) is the one legitimate user of this: the Loewenheim
    /// formula it builds for an eliminated variable `x` is
    /// `t_x = σ(t0) ∨ (x ∧ ¬σ(t1))`, which mentions `x` on its own
    /// right-hand side by construction. That's not an occurs-check bug: the
    /// binding is a parametric solution form (`x` stands for "any value
    /// consistent with the rest"), not a rewrite rule meant to be applied
    /// repeatedly, so the usual no-self-reference invariant doesn't apply to
    /// it.
    pub(crate) fn singleton_unchecked(variable: VariableId, term: Term) -> Self {
        let mut s = Self::empty();
        s.0.insert(variable, term);
        s
    }

    /// Adds `variable -> term` to `self`. Requires `variable` is not already
    /// bound and that `variable` does not occur free in `term` (both are
    /// solver-internal invariants, asserted in debug builds).
    pub fn extend(&mut self, variable: VariableId, term: Term) {
        debug_assert!(
            !self.0.contains_key(&variable),
            "variable {variable} already bound in substitution"
        );
        debug_assert!(
            !term.contains_variable(variable),
            "occurs check violated binding {variable}"
        );
        self.0.insert(variable, term);
    }

    /// Returns a new substitution with `variable -> term` added.
    pub fn extended(mut self, variable: VariableId, term: Term) -> Self {
        self.extend(variable, term);
        self
    }

    /// Applies `self` to a term, replacing each `Var(x)` by `self[x]` when
    /// bound, and rebuilding connectives through the smart constructors so
    /// the result stays canonical.
    pub fn apply(&self, term: &Term) -> Term {
        match term {
            Term::True => Term::True,
            Term::False => Term::False,
            Term::Var(id) => match self.get(*id) {
                Some(bound) => bound.clone(),
                None => Term::Var(*id),
            },
            Term::Not(t) => Term::mk_not(self.apply(t)),
            Term::And(ts) => Term::mk_and_all(ts.iter().map(|t| self.apply(t)).collect()),
            Term::Or(ts) => Term::mk_or_all(ts.iter().map(|t| self.apply(t)).collect()),
        }
    }

    /// Applies `self` to both sides of an equation, re-normalizing
    /// orientation afterwards.
    pub fn apply_equation(&self, equation: &Equation) -> Equation {
        Equation::new(self.apply(&equation.lhs), self.apply(&equation.rhs))
    }

    /// Maps [`Substitution::apply_equation`] over a list of equations.
    pub fn apply_all(&self, equations: &[Equation]) -> Vec<Equation> {
        equations.iter().map(|eq| self.apply_equation(eq)).collect()
    }
}

/// Left-biased composition, written `s1 @@ s2` in the substitution algebra's
/// usual notation: "apply `s2` first, then `s1`". Rust has no infix operator
/// spelled `@@`, so this is realized as `&` (`BitAnd`), the closest available
/// stand-in; read `s1 & s2` as `s1 @@ s2`.
impl BitAnd for Substitution {
    type Output = Substitution;

    fn bitand(self, s2: Substitution) -> Substitution {
        if self.is_empty() {
            return s2;
        }
        if s2.is_empty() {
            return self;
        }

        let mut result = HashMap::with_capacity(self.0.len() + s2.0.len());

        for (x, t) in &s2.0 {
            result.insert(*x, self.apply(t));
        }

        for (x, t) in &self.0 {
            result.entry(*x).or_insert_with(|| t.clone());
        }

        Substitution(result)
    }
}

/// Disjoint merge, written `s1 ++ s2` in the same notation. Precondition:
/// `domain(s1) ∩ domain(s2) = ∅`, asserted in debug builds since any
/// violation is a solver-internal bug (SVE's own recursion structure
/// guarantees disjointness by construction).
impl Add for Substitution {
    type Output = Substitution;

    fn add(mut self, other: Substitution) -> Substitution {
        for (x, t) in other.0 {
            debug_assert!(
                !self.0.contains_key(&x),
                "disjoint merge precondition violated for variable {x}"
            );
            self.0.insert(x, t);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_identity_for_composition() {
        let s = Substitution::singleton(0, Term::True);
        assert_eq!(Substitution::empty() & s.clone(), s);
        assert_eq!(s.clone() & Substitution::empty(), s);
    }

    #[test]
    fn apply_replaces_bound_variables() {
        let s = Substitution::singleton(0, Term::True);
        let t = Term::mk_and(Term::Var(0), Term::Var(1));
        assert_eq!(s.apply(&t), Term::Var(1));
    }

    #[test]
    fn apply_leaves_unbound_variables() {
        let s = Substitution::singleton(0, Term::True);
        assert_eq!(s.apply(&Term::Var(1)), Term::Var(1));
    }

    #[test]
    fn composition_matches_sequential_application() {
        // s2: 0 -> Var(1); s1: 1 -> True
        let s2 = Substitution::singleton(0, Term::Var(1));
        let s1 = Substitution::singleton(1, Term::True);

        let composed = s1.clone() & s2.clone();

        let t = Term::Var(0);
        assert_eq!(composed.apply(&t), s1.apply(&s2.apply(&t)));
        assert_eq!(composed.apply(&t), Term::True);
    }

    #[test]
    fn disjoint_merge_unions_bindings() {
        let s1 = Substitution::singleton(0, Term::True);
        let s2 = Substitution::singleton(1, Term::False);
        let merged = s1 + s2;
        assert_eq!(merged.get(0), Some(&Term::True));
        assert_eq!(merged.get(1), Some(&Term::False));
    }

    #[test]
    #[should_panic]
    fn extend_panics_on_occurs_check_violation() {
        let mut s = Substitution::empty();
        s.extend(0, Term::mk_and(Term::Var(0), Term::Var(1)));
    }
}
