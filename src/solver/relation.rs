use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use crate::{
    error::Result,
    solver::{assignment::Assignment, space::Space, value::Value, variable::Variable},
};

static NEXT_RELATION_ID: AtomicU64 = AtomicU64::new(0);

/// A satisfaction predicate over one value per input position.
pub type Predicate<V> = Arc<dyn Fn(&[V]) -> bool>;

/// A constraint over an ordered tuple of variables.
///
/// The input sequence keeps duplicates (the same variable may occupy several
/// positions); `variables` holds the distinct referenced variables in first
/// appearance order. Identity, equality and hashing come from a
/// process-assigned sequential id, so two separately constructed relations
/// are never equal even with identical inputs and predicate.
#[derive(Clone)]
pub struct Relation<V: Value> {
    id: u64,
    inputs: Vec<Variable<V>>,
    variables: Vec<Variable<V>>,
    predicate: Predicate<V>,
}

impl<V: Value> Relation<V> {
    pub fn new(
        inputs: impl IntoIterator<Item = Variable<V>>,
        predicate: impl Fn(&[V]) -> bool + 'static,
    ) -> Self {
        Self::from_predicate(inputs.into_iter().collect(), Arc::new(predicate))
    }

    fn from_predicate(inputs: Vec<Variable<V>>, predicate: Predicate<V>) -> Self {
        let mut variables: Vec<Variable<V>> = Vec::new();
        for var in &inputs {
            if !variables.contains(var) {
                variables.push(var.clone());
            }
        }
        Relation {
            id: NEXT_RELATION_ID.fetch_add(1, Ordering::Relaxed),
            inputs,
            variables,
            predicate,
        }
    }

    /// The number of input positions, counting duplicates.
    pub fn arity(&self) -> usize {
        self.inputs.len()
    }

    /// The input variables in position order.
    pub fn inputs(&self) -> &[Variable<V>] {
        &self.inputs
    }

    /// The distinct referenced variables, in first appearance order.
    pub fn variables(&self) -> &[Variable<V>] {
        &self.variables
    }

    pub fn references(&self, var: &Variable<V>) -> bool {
        self.variables.contains(var)
    }

    /// The space of this relation's variables at their native domains.
    pub fn default_space(&self) -> Space<V> {
        Space::over(self.variables.iter().cloned())
    }

    /// `true` iff every input variable is assigned and the predicate holds.
    ///
    /// An incomplete assignment is neither satisfied nor violated, so both
    /// this and [`Relation::violated`] return `false` for it.
    pub fn satisfied(&self, assignment: &Assignment<V>) -> bool {
        match assignment.values_of(&self.inputs) {
            Some(values) => (self.predicate)(&values),
            None => false,
        }
    }

    /// `true` iff every input variable is assigned and the predicate fails.
    pub fn violated(&self, assignment: &Assignment<V>) -> bool {
        match assignment.values_of(&self.inputs) {
            Some(values) => !(self.predicate)(&values),
            None => false,
        }
    }

    /// Conjunction: the inputs concatenate and the combined predicate splits
    /// the value tuple at this relation's arity.
    pub fn and(&self, other: &Relation<V>) -> Relation<V> {
        let split = self.arity();
        let left = Arc::clone(&self.predicate);
        let right = Arc::clone(&other.predicate);
        let inputs = self
            .inputs
            .iter()
            .chain(other.inputs.iter())
            .cloned()
            .collect();
        Self::from_predicate(
            inputs,
            Arc::new(move |values: &[V]| left(&values[..split]) && right(&values[split..])),
        )
    }

    /// Disjunction, with the same input concatenation as [`Relation::and`].
    pub fn or(&self, other: &Relation<V>) -> Relation<V> {
        let split = self.arity();
        let left = Arc::clone(&self.predicate);
        let right = Arc::clone(&other.predicate);
        let inputs = self
            .inputs
            .iter()
            .chain(other.inputs.iter())
            .cloned()
            .collect();
        Self::from_predicate(
            inputs,
            Arc::new(move |values: &[V]| left(&values[..split]) || right(&values[split..])),
        )
    }

    /// Brute-force enumeration of every satisfying assignment over this
    /// relation's variables at their native domains.
    pub fn satisfying_assignments(
        &self,
    ) -> Result<impl Iterator<Item = Assignment<V>> + '_> {
        self.satisfying_assignments_in(&self.default_space())
    }

    /// Satisfying assignments over this relation's variables restricted to
    /// `given`.
    pub fn satisfying_assignments_in<'a>(
        &'a self,
        given: &Space<V>,
    ) -> Result<impl Iterator<Item = Assignment<V>> + 'a> {
        let product = given.get_many(&self.variables).assignments()?;
        Ok(product.filter(move |assignment| self.satisfied(assignment)))
    }

    /// Assignments over this relation's variables restricted to `given`
    /// that the relation does not violate. The enumeration covers exactly
    /// the relation's own variables, so incomplete sub-assignments never
    /// occur here.
    pub fn nonviolating_assignments_in<'a>(
        &'a self,
        given: &Space<V>,
    ) -> Result<impl Iterator<Item = Assignment<V>> + 'a> {
        let product = given.get_many(&self.variables).assignments()?;
        Ok(product.filter(move |assignment| !self.violated(assignment)))
    }

    /// Hyper-arc pruning against `given`: for each of this relation's
    /// variables, keep exactly the values witnessed by at least one
    /// non-violated assignment, then intersect with `given` restricted to
    /// all *other* variables so no variable outside this relation's scope is
    /// ever widened. With no variables, or no surviving assignment, the
    /// accumulated part stays empty over this relation's variables.
    pub fn pruned_space(&self, given: &Space<V>) -> Result<Space<V>> {
        let mut witnessed = Space::empty(self.variables.iter().cloned());
        if !self.variables.is_empty() {
            // TODO: stop enumerating early once every value still present in
            // `given` has been witnessed for every variable.
            for assignment in self.nonviolating_assignments_in(given)? {
                for (var, value) in assignment.iter() {
                    witnessed.add(var, value.clone())?;
                }
            }
        }
        let others: Vec<Variable<V>> = given
            .variables()
            .filter(|var| !self.references(var))
            .cloned()
            .collect();
        Ok(witnessed.intersect(&given.get_many(&others)))
    }
}

impl<V: Value> std::fmt::Debug for Relation<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relation")
            .field("id", &self.id)
            .field("inputs", &self.inputs)
            .finish_non_exhaustive()
    }
}

impl<V: Value> PartialEq for Relation<V> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<V: Value> Eq for Relation<V> {}

impl<V: Value> std::hash::Hash for Relation<V> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
