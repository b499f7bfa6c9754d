use std::{collections::HashSet, sync::Arc};

use crate::{
    error::{Error, Result},
    solver::{domain::Domain, value::Value},
};

/// A named variable with a fixed native domain.
///
/// The handle is a cheap `Arc` clone; identity, equality, hashing and
/// ordering all derive solely from the name. The native domain is fixed at
/// construction — a [`Space`](crate::solver::space::Space) holds
/// *restrictions* of it, never mutations of the original.
#[derive(Clone)]
pub struct Variable<V: Value>(Arc<Inner<V>>);

#[derive(Debug)]
struct Inner<V: Value> {
    name: String,
    domain: Domain<V>,
}

impl<V: Value> Variable<V> {
    fn new(name: String, domain: Domain<V>) -> Self {
        Variable(Arc::new(Inner { name, domain }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The variable's declared domain.
    pub fn domain(&self) -> &Domain<V> {
        &self.0.domain
    }
}

impl<V: Value> std::fmt::Debug for Variable<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "?{}", self.0.name)
    }
}

impl<V: Value> std::fmt::Display for Variable<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.name)
    }
}

impl<V: Value> PartialEq for Variable<V> {
    fn eq(&self, other: &Self) -> bool {
        self.0.name == other.0.name
    }
}

impl<V: Value> Eq for Variable<V> {}

impl<V: Value> std::hash::Hash for Variable<V> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
    }
}

impl<V: Value> PartialOrd for Variable<V> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<V: Value> Ord for Variable<V> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.name.cmp(&other.0.name)
    }
}

/// Allocates variable names for one problem instance.
///
/// Each registry owns its own name set, so independent problems can coexist
/// without colliding. Within a registry no two variables ever share a name.
#[derive(Debug, Default)]
pub struct VariableRegistry {
    names: HashSet<String>,
    unnamed: u64,
}

impl VariableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a variable under an explicit name.
    pub fn variable<V: Value>(&mut self, name: &str, domain: Domain<V>) -> Result<Variable<V>> {
        if !self.names.insert(name.to_string()) {
            return Err(Error::DuplicateVariable {
                name: name.to_string(),
            });
        }
        Ok(Variable::new(name.to_string(), domain))
    }

    /// Creates a variable under the next free auto-generated name.
    pub fn fresh<V: Value>(&mut self, domain: Domain<V>) -> Variable<V> {
        loop {
            let name = format!("x{}", self.unnamed);
            self.unnamed += 1;
            if self.names.insert(name.clone()) {
                return Variable::new(name, domain);
            }
        }
    }
}
