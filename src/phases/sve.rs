//! Phase 4: Successive Variable Elimination.
//!
//! The last resort once the cheaper rewrite phases have stalled: solves the
//! residual equations directly via the Boudet–Contejean–Devie construction.
//! For each equation `a ~ b`, build the query `q = a ⊕ b` (true exactly where
//! `a` and `b` disagree) and recursively eliminate its free flexible
//! variables one at a time, bottoming out in a brute-force satisfiability
//! check over whatever (rigid) variables remain.

use crate::config::SolveConfig;
use crate::equation::Equation;
use crate::error::UnificationError;
use crate::rigidity::RigidSet;
use crate::substitution::Substitution;
use crate::term::{Term, VariableId};
use std::collections::BTreeMap;

/// Solves every residual equation via SVE, composing the per-equation
/// unifiers left to right.
pub fn sve_phase(
    equations: Vec<Equation>,
    rigid: &RigidSet,
    config: &SolveConfig,
) -> Result<Substitution, UnificationError<Term>> {
    let mut remaining = equations;
    let mut total = Substitution::empty();

    let mut i = 0;
    while i < remaining.len() {
        let eq = remaining[i].clone();
        i += 1;

        let query = Term::mk_xor(eq.lhs.clone(), eq.rhs.clone());
        let flexible: Vec<VariableId> = query
            .free_vars()
            .into_iter()
            .filter(|v| rigid.is_flexible(*v))
            .collect();

        if flexible.len() > config.max_sve_free_vars {
            return Err(UnificationError::TooComplex {
                lhs: eq.lhs,
                rhs: eq.rhs,
                limit: config.max_sve_free_vars,
            });
        }

        let sigma_i = eliminate(query, &flexible, &eq, config)?;

        // Substitution::apply_all re-normalizes orientation, so later
        // equations in `remaining` already reflect this round's bindings.
        remaining = sigma_i.apply_all(&remaining);
        total = total & sigma_i;
    }

    Ok(total)
}

/// Recursively eliminates the flexible variables in `vars` from `query`,
/// per the Boudet–Contejean–Devie construction. `source` is only kept
/// around to attribute `MismatchedEffects`/`TooComplex` to the equation the
/// caller actually wrote, rather than to the internal query term.
fn eliminate(
    query: Term,
    vars: &[VariableId],
    source: &Equation,
    config: &SolveConfig,
) -> Result<Substitution, UnificationError<Term>> {
    let Some((&x, rest)) = vars.split_first() else {
        return base_case(&query, source, config);
    };

    let t0 = query.substitute_var(x, &Term::False);
    let t1 = query.substitute_var(x, &Term::True);
    let combined = Term::mk_and(t0.clone(), t1.clone());

    let sigma_rest = eliminate(combined, rest, source, config)?;

    let t0_resolved = sigma_rest.apply(&t0);
    let t1_resolved = sigma_rest.apply(&t1);
    let t_x = Term::mk_or(
        t0_resolved,
        Term::mk_and(Term::Var(x), Term::mk_not(t1_resolved)),
    );

    Ok(Substitution::singleton_unchecked(x, t_x) + sigma_rest)
}

/// No flexible variables left to eliminate: `query` is satisfiable only in
/// the free (rigid) variables that remain. The original equation has a
/// unifier iff `query` can never be made true; if it can, those rigid
/// variables witness a concrete assignment where `lhs` and `rhs` disagree.
fn base_case(
    query: &Term,
    source: &Equation,
    config: &SolveConfig,
) -> Result<Substitution, UnificationError<Term>> {
    let free = query.free_vars();
    if free.len() > config.max_sve_free_vars {
        return Err(UnificationError::TooComplex {
            lhs: source.lhs.clone(),
            rhs: source.rhs.clone(),
            limit: config.max_sve_free_vars,
        });
    }

    if is_satisfiable(query, &free) {
        Err(UnificationError::MismatchedEffects {
            lhs: source.lhs.clone(),
            rhs: source.rhs.clone(),
        })
    } else {
        Ok(Substitution::empty())
    }
}

/// Brute-force satisfiability over the (small, by construction bounded)
/// variable set `vars`: tries every boolean assignment via the cartesian
/// product of `{false, true}` over `vars`, short-circuiting on the first
/// satisfying one.
fn is_satisfiable(term: &Term, vars: &std::collections::BTreeSet<VariableId>) -> bool {
    use itertools::Itertools;

    if vars.is_empty() {
        return term.eval(&BTreeMap::new());
    }

    let vars: Vec<VariableId> = vars.iter().copied().collect();

    std::iter::repeat([false, true])
        .take(vars.len())
        .multi_cartesian_product()
        .any(|values| {
            let assignment: BTreeMap<VariableId, bool> =
                vars.iter().copied().zip(values).collect();
            term.eval(&assignment)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(equations: Vec<Equation>, rigid: &RigidSet) -> Result<Substitution, UnificationError<Term>> {
        sve_phase(equations, rigid, &SolveConfig::default())
    }

    #[test]
    fn solves_single_flexible_variable_against_true() {
        // $0 = ⊤ has the unique unifier $0 -> ⊤.
        let equations = vec![Equation::new(Term::Var(0), Term::True)];
        let subst = run(equations, &RigidSet::default()).unwrap();
        assert_eq!(subst.get(0), Some(&Term::True));
    }

    #[test]
    fn solves_or_equal_to_true_with_a_parametric_binding() {
        // Matches scenario 6: ($1 ∨ $2) = ⊤.
        let equations = vec![Equation::new(
            Term::mk_or(Term::Var(1), Term::Var(2)),
            Term::True,
        )];
        let subst = run(equations, &RigidSet::default()).unwrap();

        // Whatever binding SVE produced, applying it to both sides of the
        // original equation and simplifying must yield a tautology: there
        // is no remaining way to falsify it by choosing $2 (the one
        // variable the returned substitution leaves free).
        let lhs_resolved = subst.apply(&Term::mk_or(Term::Var(1), Term::Var(2)));
        for v2 in [false, true] {
            let mut assignment = BTreeMap::new();
            assignment.insert(2, v2);
            assert!(lhs_resolved.eval(&assignment));
        }
    }

    #[test]
    fn detects_unsatisfiable_equation_as_mismatched_effects() {
        // ⊤ = ⊥ can never hold.
        let equations = vec![Equation::new(Term::True, Term::False)];
        let result = run(equations, &RigidSet::default());
        assert!(matches!(
            result,
            Err(UnificationError::MismatchedEffects { .. })
        ));
    }

    #[test]
    fn variable_equal_to_its_own_negation_is_unsatisfiable() {
        // $0 = ¬$0: eliminating $0 collapses the xor query to the constant
        // ⊤ with zero free variables left, exercising the base case's
        // zero-variable satisfiability check directly.
        let equations = vec![Equation::new(Term::Var(0), Term::mk_not(Term::Var(0)))];
        let result = run(equations, &RigidSet::default());
        assert!(matches!(
            result,
            Err(UnificationError::MismatchedEffects { .. })
        ));
    }

    #[test]
    fn conflicting_rigid_variable_is_unsatisfiable() {
        // $0 = ⊤ with $0 rigid: no substitution can make this hold, and the
        // base case must detect it directly (xor is satisfiable over $0).
        let rigid = RigidSet::new([0]);
        let equations = vec![Equation::new(Term::Var(0), Term::True)];
        let result = run(equations, &rigid);
        assert!(matches!(
            result,
            Err(UnificationError::MismatchedEffects { .. })
        ));
    }

    #[test]
    fn rigid_variable_consistent_with_true_solves_with_empty_substitution() {
        // $0 = $0 with $0 rigid is trivially true; SVE sees `$0 ⊕ $0 = ⊥`,
        // which is unsatisfiable (never forced true), so the unifier is
        // empty.
        let rigid = RigidSet::new([0]);
        let equations = vec![Equation::new(Term::Var(0), Term::Var(0))];
        let subst = run(equations, &rigid).unwrap();
        assert!(subst.is_empty());
    }

    #[test]
    fn exceeding_the_configured_budget_is_reported_as_too_complex() {
        let vars: Vec<Term> = (0..4).map(Term::Var).collect();
        let equations = vec![Equation::new(Term::mk_and_all(vars), Term::True)];
        let tight = SolveConfig {
            max_sve_free_vars: 2,
        };
        let result = sve_phase(equations, &RigidSet::default(), &tight);
        assert!(matches!(result, Err(UnificationError::TooComplex { .. })));
    }

    #[test]
    fn composes_across_multiple_equations() {
        // $0 = ⊤, $1 = $0, solved left to right: the second equation's
        // query must see $0 already resolved to ⊤.
        let equations = vec![
            Equation::new(Term::Var(0), Term::True),
            Equation::new(Term::Var(1), Term::Var(0)),
        ];
        let subst = run(equations, &RigidSet::default()).unwrap();
        assert_eq!(subst.get(0), Some(&Term::True));
        assert_eq!(subst.apply(&Term::Var(1)), Term::True);
    }
}
