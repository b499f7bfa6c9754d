//! Heuristics for selecting which variable to branch on next during search.

use crate::solver::{space::Space, value::Value, variable::Variable};

/// A strategy for choosing the next variable to assign.
///
/// A good choice can dramatically shrink the explored search tree. Every
/// implementation must be deterministic so that solver runs are repeatable.
pub trait VariableSelectionHeuristic<V: Value> {
    /// Picks one of `unassigned` to branch on, given the current pruned
    /// space. Returns `None` only when `unassigned` is empty.
    fn select_variable(
        &self,
        unassigned: &[Variable<V>],
        space: &Space<V>,
    ) -> Option<Variable<V>>;
}

/// Selects the unassigned variable with the smallest name.
///
/// A basic deterministic baseline, mostly useful in tests.
pub struct SelectFirstHeuristic;

impl<V: Value> VariableSelectionHeuristic<V> for SelectFirstHeuristic {
    fn select_variable(
        &self,
        unassigned: &[Variable<V>],
        _space: &Space<V>,
    ) -> Option<Variable<V>> {
        unassigned.iter().min().cloned()
    }
}

/// Minimum-remaining-values: selects the unassigned variable whose current
/// domain has the fewest candidate values.
///
/// This is a fail-first strategy — tackling the most constrained variable
/// early prunes the search tree fastest. Ties break on ascending variable
/// name; an infinite (universal) domain sorts last.
pub struct MinimumRemainingValuesHeuristic;

impl<V: Value> VariableSelectionHeuristic<V> for MinimumRemainingValuesHeuristic {
    fn select_variable(
        &self,
        unassigned: &[Variable<V>],
        space: &Space<V>,
    ) -> Option<Variable<V>> {
        unassigned
            .iter()
            .min_by_key(|var| (space.get(var).size().unwrap_or(usize::MAX), (*var).clone()))
            .cloned()
    }
}
