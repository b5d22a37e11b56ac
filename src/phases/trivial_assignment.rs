//! Phase 3: Trivial Assignment.
//!
//! A single pass over the residual equations: every equation of shape
//! `Var(x) ~ t` where `x` is flexible and does not occur free in `t` (the
//! occurs check) is solved by binding `x` directly to `t`. Later equations in
//! the same pass see earlier bindings already applied to their right-hand
//! side, so a chain like `x ~ y, y ~ z` binds `x` to the fully-resolved form
//! of `y` rather than to `y` itself.

use crate::equation::Equation;
use crate::error::UnificationError;
use crate::rigidity::RigidSet;
use crate::substitution::Substitution;
use crate::term::Term;

/// Runs trivial assignment once over `equations`.
pub fn trivial_assignment_phase(
    equations: Vec<Equation>,
    rigid: &RigidSet,
) -> Result<(Vec<Equation>, Substitution), UnificationError<Term>> {
    let mut substitution = Substitution::empty();
    let mut kept = Vec::with_capacity(equations.len());

    for eq in equations {
        let eligible = match &eq.lhs {
            Term::Var(x) => rigid.is_flexible(*x) && !eq.rhs.contains_variable(*x),
            _ => false,
        };

        if eligible {
            let Term::Var(x) = eq.lhs else { unreachable!() };
            if !substitution.contains_key(x) {
                let resolved_rhs = substitution.apply(&eq.rhs);
                substitution.extend(x, resolved_rhs);
                continue;
            }
        }

        kept.push(eq);
    }

    let kept = substitution.apply_all(&kept);
    Ok((kept, substitution))
}
