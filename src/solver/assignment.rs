use im::HashMap;

use crate::{
    error::{Error, Result},
    solver::{value::Value, variable::Variable},
};

/// A partial or total mapping from variables to concrete values.
///
/// Every stored value is guaranteed to lie within the corresponding
/// variable's native domain; writes that would break this fail with
/// [`Error::DomainViolation`] and leave the assignment untouched. Equality
/// is structural over the mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment<V: Value> {
    values: HashMap<Variable<V>, V>,
}

impl<V: Value> Assignment<V> {
    pub fn new() -> Self {
        Assignment {
            values: HashMap::new(),
        }
    }

    /// Binds `var` to `value`, validating against the native domain.
    pub fn assign(&mut self, var: &Variable<V>, value: V) -> Result<()> {
        if !var.domain().contains(&value) {
            return Err(Error::domain_violation(var.name(), &value));
        }
        self.values.insert(var.clone(), value);
        Ok(())
    }

    /// Removes the binding for `var`. Unbound variables are a no-op.
    pub fn unassign(&mut self, var: &Variable<V>) {
        self.values.remove(var);
    }

    pub fn get(&self, var: &Variable<V>) -> Option<&V> {
        self.values.get(var)
    }

    pub fn contains(&self, var: &Variable<V>) -> bool {
        self.values.contains_key(var)
    }

    /// Tuple lookup: the values of `vars` in order, or `None` if any of them
    /// is unassigned.
    pub fn values_of(&self, vars: &[Variable<V>]) -> Option<Vec<V>> {
        vars.iter()
            .map(|var| self.values.get(var).cloned())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable<V>, &V)> {
        self.values.iter()
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable<V>> {
        self.values.keys()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    // Used by the Cartesian-product enumerator, whose values come from
    // stored domains that are already restricted to the native domain.
    pub(crate) fn insert_unchecked(&mut self, var: Variable<V>, value: V) {
        self.values.insert(var, value);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::{domain::Domain, variable::VariableRegistry};

    fn var(registry: &mut VariableRegistry, name: &str) -> Variable<i64> {
        registry.variable(name, Domain::discrete(0..10)).unwrap()
    }

    #[test]
    fn in_domain_values_round_trip() {
        let mut registry = VariableRegistry::new();
        let x = var(&mut registry, "x");

        let mut assignment = Assignment::new();
        assignment.assign(&x, 7).unwrap();
        assert_eq!(assignment.get(&x), Some(&7));
        assert!(assignment.contains(&x));
        assert_eq!(assignment.len(), 1);
    }

    #[test]
    fn out_of_domain_values_are_rejected() {
        let mut registry = VariableRegistry::new();
        let x = var(&mut registry, "x");

        let mut assignment = Assignment::new();
        let err = assignment.assign(&x, 42).err().unwrap();
        assert!(matches!(err, Error::DomainViolation { .. }));
        assert!(assignment.is_empty());
    }

    #[test]
    fn unassign_restores_the_unbound_state() {
        let mut registry = VariableRegistry::new();
        let x = var(&mut registry, "x");
        let y = var(&mut registry, "y");

        let mut assignment = Assignment::new();
        assignment.assign(&x, 1).unwrap();
        assignment.unassign(&x);
        assignment.unassign(&y); // absent, no-op
        assert!(!assignment.contains(&x));
        assert_eq!(assignment, Assignment::new());
    }

    #[test]
    fn tuple_lookup_requires_every_variable() {
        let mut registry = VariableRegistry::new();
        let x = var(&mut registry, "x");
        let y = var(&mut registry, "y");

        let mut assignment = Assignment::new();
        assignment.assign(&x, 1).unwrap();
        assert_eq!(assignment.values_of(&[x.clone(), y.clone()]), None);

        assignment.assign(&y, 2).unwrap();
        assert_eq!(
            assignment.values_of(&[y.clone(), x.clone(), x]),
            Some(vec![2, 1, 1])
        );
    }
}
