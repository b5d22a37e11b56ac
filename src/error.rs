//! The error model returned by [`crate::unify_all`].
//!
//! A hand-rolled `Display` impl rather than a `thiserror`-derived one;
//! `anyhow` is reserved for the CLI boundary (`src/bin/unify.rs`).

use std::fmt;

/// A conflict or resource-budget failure from the Boolean unifier, generic
/// over the caller's own `Type` representation so the two witnessing terms
/// can be reported in caller vocabulary rather than solver-internal ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnificationError<Type> {
    /// The equation set has no unifier; `lhs` and `rhs` witness the conflict.
    MismatchedEffects { lhs: Type, rhs: Type },
    /// SVE exceeded its configured budget while solving this equation.
    TooComplex {
        lhs: Type,
        rhs: Type,
        limit: usize,
    },
    /// The translator handed the solver a `Type` shape it does not
    /// recognize. This is the Rust analogue of an internal-compiler
    /// exception: a programmer error in the caller, surfaced as a value
    /// instead of a panic because an algorithmic library should not abort
    /// on untrusted input shapes.
    Internal(String),
}

impl<Type: fmt::Display> fmt::Display for UnificationError<Type> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnificationError::MismatchedEffects { lhs, rhs } => {
                write!(f, "mismatched effects: `{lhs}` is not equivalent to `{rhs}`")
            }
            UnificationError::TooComplex { lhs, rhs, limit } => write!(
                f,
                "unification of `{lhs}` and `{rhs}` exceeded the complexity budget ({limit})"
            ),
            UnificationError::Internal(msg) => write!(f, "internal unifier error: {msg}"),
        }
    }
}

impl<Type: fmt::Debug + fmt::Display> std::error::Error for UnificationError<Type> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_effects_display_names_both_sides() {
        let err = UnificationError::MismatchedEffects {
            lhs: "Pure",
            rhs: "Univ",
        };
        assert_eq!(
            err.to_string(),
            "mismatched effects: `Pure` is not equivalent to `Univ`"
        );
    }

    #[test]
    fn too_complex_display_reports_limit() {
        let err: UnificationError<&str> = UnificationError::TooComplex {
            lhs: "a",
            rhs: "b",
            limit: 24,
        };
        assert!(err.to_string().contains("24"));
    }
}
