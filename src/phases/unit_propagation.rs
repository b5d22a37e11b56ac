//! Phase 1: Unit Propagation.
//!
//! Eliminates equations of shape `x = ⊤` and `x1 ∧ … ∧ xn = ⊤`, iterating to a
//! fixpoint. Both patterns are the same shape once a bare variable is viewed
//! as the single-element case of "conjunction of variables", so this
//! implementation matches them with one helper, [`Term::as_all_vars`].

use crate::did::Did;
use crate::equation::Equation;
use crate::error::UnificationError;
use crate::hooks::{Phase, SolverHooks};
use crate::rigidity::RigidSet;
use crate::substitution::Substitution;
use crate::term::{Term, VariableId};

/// Runs unit propagation to a fixpoint, returning the residual equations and
/// the bindings discovered along the way.
pub fn unit_propagation_phase(
    mut equations: Vec<Equation>,
    rigid: &RigidSet,
    hooks: &dyn SolverHooks,
) -> Result<(Vec<Equation>, Substitution), UnificationError<Term>> {
    let mut substitution = Substitution::empty();

    loop {
        let mut did = Did::Nothing;
        let mut kept = Vec::with_capacity(equations.len());

        for eq in equations {
            match all_vars_equal_true(&eq) {
                Some(vars) => {
                    let mut all_flexible = true;
                    for v in vars {
                        if rigid.is_rigid(v) {
                            all_flexible = false;
                            continue;
                        }
                        if bind_fresh(&mut substitution, v) {
                            did = Did::Something;
                        }
                    }
                    if !all_flexible {
                        kept.push(eq);
                    }
                }
                None => kept.push(eq),
            }
        }

        equations = kept;

        if did.did_nothing() {
            break;
        }

        equations = substitution.apply_all(&equations);
        hooks.on_phase_complete(Phase::UnitPropagation, &equations, &substitution);
    }

    Ok((equations, substitution))
}

/// Matches UP-1 (`Var(x) ~ True`) and UP-2 (`And(vars) ~ True`) together:
/// returns the variables that would need to be bound to `True`, in either
/// orientation of the equation.
fn all_vars_equal_true(eq: &Equation) -> Option<Vec<VariableId>> {
    if eq.rhs == Term::True {
        eq.lhs.as_all_vars()
    } else if eq.lhs == Term::True {
        eq.rhs.as_all_vars()
    } else {
        None
    }
}

/// Binds `v -> True` if it is not already bound. Returns whether a new
/// binding was made (used to drive the fixpoint's `Did` signal).
fn bind_fresh(substitution: &mut Substitution, v: VariableId) -> bool {
    if substitution.contains_key(v) {
        return false;
    }
    substitution.extend(v, Term::True);
    true
}
