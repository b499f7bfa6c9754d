//! Heuristics for ordering the candidate values tried for a variable.

use crate::{
    error::Result,
    solver::{domain::Domain, value::Value},
};

/// A strategy for the order in which a variable's candidate values are
/// tried during branching. Orderings must be deterministic.
pub trait ValueOrderingHeuristic<V: Value> {
    /// The domain's values in the order they should be attempted. Fails for
    /// domains with no finite enumeration.
    fn order_values(&self, domain: &Domain<V>) -> Result<Vec<V>>;
}

/// Tries values in ascending order, the domain's natural iteration order.
pub struct AscendingValueHeuristic;

impl<V: Value> ValueOrderingHeuristic<V> for AscendingValueHeuristic {
    fn order_values(&self, domain: &Domain<V>) -> Result<Vec<V>> {
        Ok(domain.iter()?.cloned().collect())
    }
}

/// Tries values in descending order.
pub struct DescendingValueHeuristic;

impl<V: Value> ValueOrderingHeuristic<V> for DescendingValueHeuristic {
    fn order_values(&self, domain: &Domain<V>) -> Result<Vec<V>> {
        let mut values: Vec<V> = domain.iter()?.cloned().collect();
        values.reverse();
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn orderings_are_ascending_and_descending() {
        let domain = Domain::discrete([4i64, 1, 3]);
        assert_eq!(
            AscendingValueHeuristic.order_values(&domain).unwrap(),
            vec![1, 3, 4]
        );
        assert_eq!(
            DescendingValueHeuristic.order_values(&domain).unwrap(),
            vec![4, 3, 1]
        );
    }

    #[test]
    fn the_universe_cannot_be_ordered() {
        assert!(AscendingValueHeuristic
            .order_values(&Domain::<i64>::Universe)
            .is_err());
    }
}
