use std::collections::HashSet;

use im::HashMap;

use crate::{
    error::{Error, Result},
    solver::{assignment::Assignment, domain::Domain, value::Value, variable::Variable},
};

/// A mapping from variables to their currently admissible domains.
///
/// Lookups are total: a variable absent from the explicit mapping falls back
/// to its own native domain. Every stored domain is intersected with the
/// native domain on write, so a space can only restrict a variable, never
/// widen it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Space<V: Value> {
    domains: HashMap<Variable<V>, Domain<V>>,
}

impl<V: Value> Space<V> {
    pub fn new() -> Self {
        Space {
            domains: HashMap::new(),
        }
    }

    /// A space holding each of `vars` at its native domain.
    pub fn over(vars: impl IntoIterator<Item = Variable<V>>) -> Self {
        let domains = vars
            .into_iter()
            .map(|var| {
                let domain = var.domain().clone();
                (var, domain)
            })
            .collect();
        Space { domains }
    }

    /// A space built from explicit `(variable, domain)` pairs. Each given
    /// domain is restricted to the variable's native domain.
    pub fn from_domains(pairs: impl IntoIterator<Item = (Variable<V>, Domain<V>)>) -> Self {
        let mut space = Space::new();
        for (var, domain) in pairs {
            space.set(var, domain);
        }
        space
    }

    /// A space mapping each of `vars` to the empty domain.
    pub fn empty(vars: impl IntoIterator<Item = Variable<V>>) -> Self {
        let domains = vars.into_iter().map(|var| (var, Domain::Empty)).collect();
        Space { domains }
    }

    /// Reinterprets a concrete assignment as a maximally restricted space:
    /// every assigned variable maps to a singleton of its value.
    pub fn from_assignment(assignment: &Assignment<V>) -> Self {
        let domains = assignment
            .iter()
            .map(|(var, value)| (var.clone(), Domain::Singleton(value.clone())))
            .collect();
        Space { domains }
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable<V>> {
        self.domains.keys()
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// The current domain of `var`, falling back to its native domain when
    /// the space holds no entry for it.
    pub fn get(&self, var: &Variable<V>) -> Domain<V> {
        self.domains
            .get(var)
            .cloned()
            .unwrap_or_else(|| var.domain().clone())
    }

    /// A sub-space over exactly `vars`, each at its current domain here.
    pub fn get_many(&self, vars: &[Variable<V>]) -> Space<V> {
        let domains = vars
            .iter()
            .map(|var| (var.clone(), self.get(var)))
            .collect();
        Space { domains }
    }

    /// Stores `domain ∩ var.domain()` for `var`.
    pub fn set(&mut self, var: Variable<V>, domain: Domain<V>) {
        let restricted = var.domain().intersect(&domain);
        self.domains.insert(var, restricted);
    }

    /// Same result as `set(var, get(var) ∩ domain)`, but when the variable
    /// is already present the stored domain is narrowed directly instead of
    /// recomputing the native fallback.
    pub fn restrict(&mut self, var: &Variable<V>, domain: &Domain<V>) {
        if let Some(current) = self.domains.get_mut(var) {
            *current = current.intersect(domain);
            return;
        }
        self.set(var.clone(), domain.clone());
    }

    /// Inserts `value` into the discrete domain stored for `var`, after
    /// validating it against the variable's native domain. An absent or
    /// empty entry becomes the one-element discrete domain.
    pub fn add(&mut self, var: &Variable<V>, value: V) -> Result<()> {
        if !var.domain().contains(&value) {
            return Err(Error::domain_violation(var.name(), &value));
        }
        match self.domains.get_mut(var) {
            Some(slot @ Domain::Empty) => {
                *slot = Domain::discrete([value]);
                return Ok(());
            }
            Some(Domain::Discrete(elements)) => {
                elements.insert(value);
                return Ok(());
            }
            Some(other) => return Err(Error::unsupported("add", other.kind())),
            None => {}
        }
        self.domains.insert(var.clone(), Domain::discrete([value]));
        Ok(())
    }

    /// `true` iff the assignment covers every variable of this space and
    /// each covered value lies inside the stored domain.
    pub fn contains(&self, assignment: &Assignment<V>) -> bool {
        self.domains.iter().all(|(var, domain)| {
            assignment
                .get(var)
                .map(|value| domain.contains(value))
                .unwrap_or(false)
        })
    }

    fn joint_variables<'a>(&'a self, other: &'a Space<V>) -> Vec<&'a Variable<V>> {
        let mut seen: HashSet<&Variable<V>> = HashSet::new();
        self.domains
            .keys()
            .chain(other.domains.keys())
            .filter(|var| seen.insert(var))
            .collect()
    }

    /// Pointwise intersection, keyed over the union of both key sets.
    pub fn intersect(&self, other: &Space<V>) -> Space<V> {
        let domains = self
            .joint_variables(other)
            .into_iter()
            .map(|var| {
                let domain = self.get(var).intersect(&other.get(var));
                (var.clone(), domain)
            })
            .collect();
        Space { domains }
    }

    /// Pointwise union, keyed over the union of both key sets.
    pub fn union(&self, other: &Space<V>) -> Space<V> {
        let domains = self
            .joint_variables(other)
            .into_iter()
            .map(|var| {
                let domain = self.get(var).union(&other.get(var));
                (var.clone(), domain)
            })
            .collect();
        Space { domains }
    }

    /// In-place counterpart of [`Space::intersect`].
    pub fn intersect_with(&mut self, other: &Space<V>) {
        let vars: Vec<Variable<V>> = self
            .joint_variables(other)
            .into_iter()
            .cloned()
            .collect();
        for var in vars {
            let domain = other.get(&var);
            self.restrict(&var, &domain);
        }
    }

    /// In-place counterpart of [`Space::union`].
    pub fn union_with(&mut self, other: &Space<V>) {
        let vars: Vec<Variable<V>> = self
            .joint_variables(other)
            .into_iter()
            .cloned()
            .collect();
        for var in vars {
            let merged = self.get(&var).union(&other.get(&var));
            self.domains.insert(var, merged);
        }
    }

    /// The lazy Cartesian product of every stored domain, yielded as full
    /// assignments over this space's variables.
    ///
    /// Columns are ordered by variable name and values ascend within each
    /// column, so the sequence is deterministic and restartable. Fails if
    /// any stored domain is the non-enumerable universe; a space holding an
    /// empty domain simply yields nothing.
    pub fn assignments(&self) -> Result<Assignments<V>> {
        let mut columns: Vec<(Variable<V>, Vec<V>)> = Vec::with_capacity(self.domains.len());
        for (var, domain) in self.domains.iter() {
            let values: Vec<V> = domain.iter()?.cloned().collect();
            columns.push((var.clone(), values));
        }
        columns.sort_by(|(a, _), (b, _)| a.cmp(b));
        let exhausted = columns.iter().any(|(_, values)| values.is_empty());
        Ok(Assignments {
            indices: vec![0; columns.len()],
            columns,
            exhausted,
        })
    }
}

/// Iterator over the Cartesian product of a space's domains.
///
/// Works as an odometer over the value columns: the last column spins
/// fastest. A product with zero columns yields exactly one empty assignment.
pub struct Assignments<V: Value> {
    columns: Vec<(Variable<V>, Vec<V>)>,
    indices: Vec<usize>,
    exhausted: bool,
}

impl<V: Value> Iterator for Assignments<V> {
    type Item = Assignment<V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let mut assignment = Assignment::new();
        for ((var, values), &index) in self.columns.iter().zip(self.indices.iter()) {
            assignment.insert_unchecked(var.clone(), values[index].clone());
        }

        let mut column = self.columns.len();
        loop {
            if column == 0 {
                self.exhausted = true;
                break;
            }
            column -= 1;
            self.indices[column] += 1;
            if self.indices[column] < self.columns[column].1.len() {
                break;
            }
            self.indices[column] = 0;
        }

        Some(assignment)
    }
}
