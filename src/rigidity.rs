//! Flexible/rigid variable classification.

use crate::term::VariableId;
use std::collections::BTreeSet;
use std::hash::Hash;

/// Whether a variable may be bound by the unifier (`Flexible`) or must be
/// treated as an uninterpreted constant (`Rigid`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rigidity {
    Flexible,
    Rigid,
}

/// Caller-supplied classification of variables, keyed by the caller's own
/// variable identity `Sym` rather than by the solver-internal dense id.
///
/// Variables not present default to [`Rigidity::Flexible`], matching the
/// spec's `RigidityEnv.get(sym) -> {Flexible | Rigid}` contract.
#[derive(Clone, Debug, Default)]
pub struct RigidityEnv<Sym> {
    rigid: BTreeSet<Sym>,
}

impl<Sym: Ord + Clone + Hash + Eq> RigidityEnv<Sym> {
    /// An environment in which every variable is flexible.
    pub fn all_flexible() -> Self {
        Self {
            rigid: BTreeSet::new(),
        }
    }

    /// Builds an environment from the set of symbols that should be treated
    /// as rigid; everything else defaults to flexible.
    pub fn with_rigid(rigid: impl IntoIterator<Item = Sym>) -> Self {
        Self {
            rigid: rigid.into_iter().collect(),
        }
    }

    /// Looks up the rigidity of `sym`, defaulting to `Flexible`.
    pub fn get(&self, sym: &Sym) -> Rigidity {
        if self.rigid.contains(sym) {
            Rigidity::Rigid
        } else {
            Rigidity::Flexible
        }
    }
}

/// The solver-internal set of rigid dense ids, derived once per call by the
/// driver from a [`RigidityEnv`] via the variable interning bijection.
#[derive(Clone, Debug, Default)]
pub struct RigidSet(BTreeSet<VariableId>);

impl RigidSet {
    pub fn new(ids: impl IntoIterator<Item = VariableId>) -> Self {
        Self(ids.into_iter().collect())
    }

    pub fn is_rigid(&self, id: VariableId) -> bool {
        self.0.contains(&id)
    }

    pub fn is_flexible(&self, id: VariableId) -> bool {
        !self.is_rigid(id)
    }
}
