//! Boolean-formula terms with smart constructors enforcing canonical form.
//!
//! A [`Term`] is the algebraic representation of an effect type: a free Boolean
//! algebra over [`VariableId`] leaves and the constants [`Term::True`] (Pure)
//! and [`Term::False`] (Univ). Terms are never built directly through the enum
//! variants from outside this module; the `mk_*` smart constructors keep every
//! term in canonical flat form (no nested connectives, no annihilated
//! subterms, no duplicate variable children), which is what the staged solver
//! relies on to terminate its rewrite passes on syntactic equality.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A dense, call-local identifier for a Boolean variable.
pub type VariableId = usize;

/// A Boolean-formula term in canonical form.
///
/// Construct values of this type only through the `mk_*` functions in this
/// module; hand-built variants can violate the invariants the solver depends
/// on (see the module-level docs).
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Term {
    /// Identity of ∧; also known as Pure.
    True,
    /// Identity of ∨; also known as Univ.
    False,
    /// A variable reference.
    Var(VariableId),
    /// Complement. Invariant: the child is not `True`, `False`, or another `Not`.
    Not(Box<Term>),
    /// Conjunction. Invariant: at least two children, none of them `True`,
    /// `False`, or another `And`; at most one occurrence of each variable.
    And(Vec<Term>),
    /// Disjunction. Mirrors the invariants of `And`.
    Or(Vec<Term>),
}

impl Term {
    /// Builds the complement of `t`, folding double negation and the two
    /// constants.
    pub fn mk_not(t: Term) -> Term {
        match t {
            Term::True => Term::False,
            Term::False => Term::True,
            Term::Not(inner) => *inner,
            other => Term::Not(Box::new(other)),
        }
    }

    /// Builds the conjunction of two terms.
    pub fn mk_and(a: Term, b: Term) -> Term {
        Term::mk_and_all(vec![a, b])
    }

    /// Builds the disjunction of two terms.
    pub fn mk_or(a: Term, b: Term) -> Term {
        Term::mk_or_all(vec![a, b])
    }

    /// Builds the conjunction of a list of terms, flattening nested `And`s,
    /// dropping `True`, short-circuiting on `False`, and absorbing duplicate
    /// variable children.
    pub fn mk_and_all(terms: Vec<Term>) -> Term {
        let mut flat = Vec::with_capacity(terms.len());
        for t in terms {
            match t {
                Term::True => {}
                Term::False => return Term::False,
                Term::And(children) => flat.extend(children),
                other => flat.push(other),
            }
        }

        absorb_duplicate_vars(&mut flat);

        match flat.len() {
            0 => Term::True,
            1 => flat.into_iter().next().unwrap(),
            _ => Term::And(flat),
        }
    }

    /// Builds the disjunction of a list of terms; the dual of [`Term::mk_and_all`].
    pub fn mk_or_all(terms: Vec<Term>) -> Term {
        let mut flat = Vec::with_capacity(terms.len());
        for t in terms {
            match t {
                Term::False => {}
                Term::True => return Term::True,
                Term::Or(children) => flat.extend(children),
                other => flat.push(other),
            }
        }

        absorb_duplicate_vars(&mut flat);

        match flat.len() {
            0 => Term::False,
            1 => flat.into_iter().next().unwrap(),
            _ => Term::Or(flat),
        }
    }

    /// Builds `(a ∧ ¬b) ∨ (¬a ∧ b)`, the symmetric difference used by SVE to
    /// turn an equation into a single query term.
    pub fn mk_xor(a: Term, b: Term) -> Term {
        let not_a = Term::mk_not(a.clone());
        let not_b = Term::mk_not(b.clone());
        Term::mk_or(Term::mk_and(a, not_b), Term::mk_and(not_a, b))
    }

    /// The set of variable ids occurring anywhere in `self`.
    pub fn free_vars(&self) -> BTreeSet<VariableId> {
        let mut out = BTreeSet::new();
        self.free_vars_into(&mut out);
        out
    }

    fn free_vars_into(&self, out: &mut BTreeSet<VariableId>) {
        match self {
            Term::True | Term::False => {}
            Term::Var(id) => {
                out.insert(*id);
            }
            Term::Not(t) => t.free_vars_into(out),
            Term::And(ts) | Term::Or(ts) => {
                for t in ts {
                    t.free_vars_into(out);
                }
            }
        }
    }

    /// Checks whether `variable` occurs anywhere in `self` (the occurs check).
    pub fn contains_variable(&self, variable: VariableId) -> bool {
        match self {
            Term::True | Term::False => false,
            Term::Var(id) => *id == variable,
            Term::Not(t) => t.contains_variable(variable),
            Term::And(ts) | Term::Or(ts) => ts.iter().any(|t| t.contains_variable(variable)),
        }
    }

    /// Leaf count plus connective count; used to compare equation sizes and
    /// to bound SVE recursion.
    pub fn size(&self) -> usize {
        match self {
            Term::True | Term::False | Term::Var(_) => 1,
            Term::Not(t) => 1 + t.size(),
            Term::And(ts) | Term::Or(ts) => 1 + ts.iter().map(Term::size).sum::<usize>(),
        }
    }

    /// Replaces every occurrence of `variable` with `replacement`, rebuilding
    /// the result through the smart constructors so it stays canonical.
    pub fn substitute_var(&self, variable: VariableId, replacement: &Term) -> Term {
        match self {
            Term::True => Term::True,
            Term::False => Term::False,
            Term::Var(id) if *id == variable => replacement.clone(),
            Term::Var(id) => Term::Var(*id),
            Term::Not(t) => Term::mk_not(t.substitute_var(variable, replacement)),
            Term::And(ts) => Term::mk_and_all(
                ts.iter()
                    .map(|t| t.substitute_var(variable, replacement))
                    .collect(),
            ),
            Term::Or(ts) => Term::mk_or_all(
                ts.iter()
                    .map(|t| t.substitute_var(variable, replacement))
                    .collect(),
            ),
        }
    }

    /// Evaluates `self` under a total assignment of every free variable to a
    /// boolean, used by SVE's brute-force satisfiability check.
    pub fn eval(&self, assignment: &std::collections::BTreeMap<VariableId, bool>) -> bool {
        match self {
            Term::True => true,
            Term::False => false,
            Term::Var(id) => *assignment.get(id).unwrap_or(&false),
            Term::Not(t) => !t.eval(assignment),
            Term::And(ts) => ts.iter().all(|t| t.eval(assignment)),
            Term::Or(ts) => ts.iter().any(|t| t.eval(assignment)),
        }
    }

    /// `true` if `self` is exactly the `And`-of-variables shape matched by
    /// unit propagation's second pattern (`x1 ∧ … ∧ xn`).
    pub fn as_all_vars(&self) -> Option<Vec<VariableId>> {
        match self {
            Term::Var(id) => Some(vec![*id]),
            Term::And(ts) => ts
                .iter()
                .map(|t| match t {
                    Term::Var(id) => Some(*id),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::True => write!(f, "⊤"),
            Term::False => write!(f, "⊥"),
            Term::Var(id) => write!(f, "${id}"),
            Term::Not(t) => write!(f, "¬{t}"),
            Term::And(ts) => {
                write!(f, "(")?;
                for (i, t) in ts.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ∧ ")?;
                    }
                    write!(f, "{t}")?;
                }
                write!(f, ")")
            }
            Term::Or(ts) => {
                write!(f, "(")?;
                for (i, t) in ts.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ∨ ")?;
                    }
                    write!(f, "{t}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Removes duplicate `Var` children from a flattened connective's child list,
/// but only when *every* child is a `Var` (`x ∧ x = x`, but e.g.
/// `(x ∧ f(x)) ∧ x` is not flattened this way because `f(x)` is not a bare
/// variable and duplicate detection over non-variable subterms is not part
/// of this algebra's canonical form).
fn absorb_duplicate_vars(children: &mut Vec<Term>) {
    if !children.iter().all(|t| matches!(t, Term::Var(_))) {
        return;
    }

    let mut seen = BTreeSet::new();
    children.retain(|t| match t {
        Term::Var(id) => seen.insert(*id),
        _ => true,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mk_not_folds_constants_and_double_negation() {
        assert_eq!(Term::mk_not(Term::True), Term::False);
        assert_eq!(Term::mk_not(Term::False), Term::True);
        assert_eq!(Term::mk_not(Term::mk_not(Term::Var(0))), Term::Var(0));
    }

    #[test]
    fn mk_and_absorbs_true_and_short_circuits_on_false() {
        assert_eq!(
            Term::mk_and_all(vec![Term::True, Term::Var(0), Term::True]),
            Term::Var(0)
        );
        assert_eq!(
            Term::mk_and_all(vec![Term::Var(0), Term::False]),
            Term::False
        );
        assert_eq!(Term::mk_and_all(vec![]), Term::True);
    }

    #[test]
    fn mk_or_absorbs_false_and_short_circuits_on_true() {
        assert_eq!(
            Term::mk_or_all(vec![Term::False, Term::Var(0), Term::False]),
            Term::Var(0)
        );
        assert_eq!(Term::mk_or_all(vec![Term::Var(0), Term::True]), Term::True);
        assert_eq!(Term::mk_or_all(vec![]), Term::False);
    }

    #[test]
    fn mk_and_flattens_nested_and() {
        let nested = Term::mk_and(Term::Var(0), Term::Var(1));
        let flat = Term::mk_and_all(vec![nested, Term::Var(2)]);
        assert_eq!(
            flat,
            Term::And(vec![Term::Var(0), Term::Var(1), Term::Var(2)])
        );
    }

    #[test]
    fn mk_and_absorbs_duplicate_variables() {
        let result = Term::mk_and_all(vec![Term::Var(0), Term::Var(1), Term::Var(0)]);
        assert_eq!(result, Term::And(vec![Term::Var(0), Term::Var(1)]));
    }

    #[test]
    fn mk_and_does_not_dedup_non_variable_children() {
        let f = Term::Not(Box::new(Term::Var(0)));
        let result = Term::mk_and_all(vec![f.clone(), f.clone()]);
        assert_eq!(result, Term::And(vec![f.clone(), f]));
    }

    #[test]
    fn free_vars_collects_all_leaves() {
        let t = Term::mk_and(Term::Var(0), Term::mk_or(Term::Var(1), Term::Var(0)));
        assert_eq!(
            t.free_vars().into_iter().collect::<Vec<_>>(),
            vec![0, 1]
        );
    }

    #[test]
    fn substitute_var_rebuilds_canonically() {
        let t = Term::mk_and(Term::Var(0), Term::Var(1));
        let result = t.substitute_var(0, &Term::True);
        assert_eq!(result, Term::Var(1));
    }

    #[test]
    fn idempotence_of_canonicalization() {
        let inputs = vec![
            Term::mk_and_all(vec![Term::Var(0), Term::Var(1), Term::True]),
            Term::mk_or_all(vec![Term::Var(0), Term::False, Term::Var(0)]),
            Term::mk_not(Term::mk_not(Term::Var(3))),
        ];

        for t in inputs {
            let rebuilt = match &t {
                Term::And(ts) => Term::mk_and_all(ts.clone()),
                Term::Or(ts) => Term::mk_or_all(ts.clone()),
                Term::Not(inner) => Term::mk_not((**inner).clone()),
                other => other.clone(),
            };
            assert_eq!(t, rebuilt);
        }
    }

    #[test]
    fn as_all_vars_matches_unit_propagation_shape() {
        let all_vars = Term::mk_and(Term::Var(0), Term::Var(1));
        assert_eq!(all_vars.as_all_vars(), Some(vec![0, 1]));

        let mixed = Term::mk_and(Term::Var(0), Term::mk_not(Term::Var(1)));
        assert_eq!(mixed.as_all_vars(), None);
    }

    #[test]
    fn xor_is_false_iff_terms_are_equivalent() {
        let mut assignment = std::collections::BTreeMap::new();
        for a in [false, true] {
            for b in [false, true] {
                assignment.insert(0, a);
                assignment.insert(1, b);
                let xor = Term::mk_xor(Term::Var(0), Term::Var(1));
                assert_eq!(xor.eval(&assignment), a != b);
            }
        }
    }
}
