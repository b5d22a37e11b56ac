//! Phase 2: Variable Propagation.
//!
//! A single pass over the residual equations: every equation of shape
//! `Var(x) ~ Var(y)` is solved by binding one side to the other, preferring
//! to bind a flexible variable. Two distinct rigid variables can never be
//! unified this way and is a conflict.

use crate::equation::Equation;
use crate::error::UnificationError;
use crate::rigidity::RigidSet;
use crate::substitution::Substitution;
use crate::term::{Term, VariableId};

/// Runs variable propagation once over `equations`.
pub fn variable_propagation_phase(
    equations: Vec<Equation>,
    rigid: &RigidSet,
) -> Result<(Vec<Equation>, Substitution), UnificationError<Term>> {
    let mut substitution = Substitution::empty();
    let mut kept = Vec::with_capacity(equations.len());

    for eq in equations {
        match as_var_var(&eq) {
            Some((x, y)) if x == y => {}
            Some((x, y)) => match choose_binding(x, y, rigid) {
                Some((bind_var, to)) if !substitution.contains_key(bind_var) => {
                    substitution.extend(bind_var, to);
                }
                Some(_) => kept.push(eq),
                None => {
                    return Err(UnificationError::MismatchedEffects {
                        lhs: Term::Var(x),
                        rhs: Term::Var(y),
                    });
                }
            },
            None => kept.push(eq),
        }
    }

    let kept = substitution.apply_all(&kept);
    Ok((kept, substitution))
}

fn as_var_var(eq: &Equation) -> Option<(VariableId, VariableId)> {
    match (&eq.lhs, &eq.rhs) {
        (Term::Var(x), Term::Var(y)) => Some((*x, *y)),
        _ => None,
    }
}

/// Picks which side to bind: a flexible `x` binds to `y`; failing that, a
/// flexible `y` binds to `x`; two rigid variables can't be unified unless
/// they are the same id (already handled by the caller).
fn choose_binding(x: VariableId, y: VariableId, rigid: &RigidSet) -> Option<(VariableId, Term)> {
    if rigid.is_flexible(x) {
        Some((x, Term::Var(y)))
    } else if rigid.is_flexible(y) {
        Some((y, Term::Var(x)))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binds_flexible_left_variable_to_right() {
        let equations = vec![Equation::new(Term::Var(1), Term::Var(2))];
        let (remaining, subst) = variable_propagation_phase(equations, &RigidSet::default()).unwrap();
        assert!(remaining.is_empty());
        assert_eq!(subst.get(1), Some(&Term::Var(2)));
    }

    #[test]
    fn binds_flexible_variable_to_a_rigid_one() {
        let rigid = RigidSet::new([1]);
        let equations = vec![Equation::new(Term::Var(1), Term::Var(2))];
        let (remaining, subst) = variable_propagation_phase(equations, &rigid).unwrap();
        assert!(remaining.is_empty());
        assert_eq!(subst.get(2), Some(&Term::Var(1)));
        assert!(subst.get(1).is_none());
    }

    #[test]
    fn two_distinct_rigid_variables_conflict() {
        let rigid = RigidSet::new([1, 2]);
        let equations = vec![Equation::new(Term::Var(1), Term::Var(2))];
        let result = variable_propagation_phase(equations, &rigid);
        assert!(matches!(
            result,
            Err(UnificationError::MismatchedEffects { .. })
        ));
    }

    #[test]
    fn same_rigid_variable_on_both_sides_is_not_a_conflict() {
        let rigid = RigidSet::new([1]);
        let equations = vec![Equation::new(Term::Var(1), Term::Var(1))];
        let (remaining, subst) = variable_propagation_phase(equations, &rigid).unwrap();
        assert!(remaining.is_empty());
        assert!(subst.is_empty());
    }

    #[test]
    fn leaves_non_var_var_equations_untouched() {
        let equations = vec![Equation::new(Term::Var(0), Term::True)];
        let (remaining, subst) =
            variable_propagation_phase(equations.clone(), &RigidSet::default()).unwrap();
        assert_eq!(remaining, equations);
        assert!(subst.is_empty());
    }
}
