use im::OrdSet;

use crate::{
    error::{Error, Result},
    solver::value::Value,
};

/// The set of values a variable may take.
///
/// `Universe` and `Empty` are stateless canonical markers: the domain that
/// contains everything and the domain that contains nothing. `Discrete`
/// holds an explicit finite set, and `Singleton` exactly one value. The
/// algebra below is symmetric in its operands and is total for `intersect`
/// and `union`; only the in-place forms are restricted to `Discrete`
/// receivers.
#[derive(Debug, Clone)]
pub enum Domain<V: Value> {
    Universe,
    Empty,
    Discrete(OrdSet<V>),
    Singleton(V),
}

impl<V: Value> Domain<V> {
    /// Builds a `Discrete` domain from any collection of values.
    pub fn discrete(values: impl IntoIterator<Item = V>) -> Self {
        Domain::Discrete(values.into_iter().collect())
    }

    /// The variant name, used in error reporting.
    pub fn kind(&self) -> &'static str {
        match self {
            Domain::Universe => "universe",
            Domain::Empty => "empty",
            Domain::Discrete(_) => "discrete",
            Domain::Singleton(_) => "singleton",
        }
    }

    pub fn contains(&self, value: &V) -> bool {
        match self {
            Domain::Universe => true,
            Domain::Empty => false,
            Domain::Discrete(elements) => elements.contains(value),
            Domain::Singleton(element) => element == value,
        }
    }

    /// `true` if the domain admits at least one value.
    pub fn is_nonempty(&self) -> bool {
        match self {
            Domain::Universe | Domain::Singleton(_) => true,
            Domain::Empty => false,
            Domain::Discrete(elements) => !elements.is_empty(),
        }
    }

    /// The number of admissible values, or `None` for the infinite universe.
    pub fn size(&self) -> Option<usize> {
        match self {
            Domain::Universe => None,
            Domain::Empty => Some(0),
            Domain::Discrete(elements) => Some(elements.len()),
            Domain::Singleton(_) => Some(1),
        }
    }

    /// Iterates the domain's values in ascending order.
    ///
    /// Fails on `Universe`, which has no finite enumeration.
    pub fn iter(&self) -> Result<Box<dyn Iterator<Item = &V> + '_>> {
        match self {
            Domain::Universe => Err(Error::unsupported("iterate", self.kind())),
            Domain::Empty => Ok(Box::new(std::iter::empty())),
            Domain::Discrete(elements) => Ok(Box::new(elements.iter())),
            Domain::Singleton(element) => Ok(Box::new(std::iter::once(element))),
        }
    }

    /// Intersection. `Universe` is the identity, `Empty` absorbs, discrete
    /// sets intersect element-wise, and singletons filter.
    pub fn intersect(&self, other: &Domain<V>) -> Domain<V> {
        match (self, other) {
            (Domain::Universe, d) | (d, Domain::Universe) => d.clone(),
            (Domain::Empty, _) | (_, Domain::Empty) => Domain::Empty,
            (Domain::Discrete(a), Domain::Discrete(b)) => {
                Domain::Discrete(a.iter().filter(|v| b.contains(v)).cloned().collect())
            }
            (Domain::Singleton(a), Domain::Singleton(b)) => {
                if a == b {
                    self.clone()
                } else {
                    Domain::Empty
                }
            }
            (Domain::Singleton(x), Domain::Discrete(s))
            | (Domain::Discrete(s), Domain::Singleton(x)) => {
                if s.contains(x) {
                    Domain::Discrete(OrdSet::unit(x.clone()))
                } else {
                    Domain::Empty
                }
            }
        }
    }

    /// Union. `Empty` is the identity, `Universe` absorbs, discrete sets
    /// merge element-wise, and singletons join in.
    pub fn union(&self, other: &Domain<V>) -> Domain<V> {
        match (self, other) {
            (Domain::Universe, _) | (_, Domain::Universe) => Domain::Universe,
            (Domain::Empty, d) | (d, Domain::Empty) => d.clone(),
            (Domain::Discrete(a), Domain::Discrete(b)) => {
                Domain::Discrete(a.clone().union(b.clone()))
            }
            (Domain::Singleton(a), Domain::Singleton(b)) => {
                if a == b {
                    self.clone()
                } else {
                    Domain::discrete([a.clone(), b.clone()])
                }
            }
            (Domain::Singleton(x), Domain::Discrete(s))
            | (Domain::Discrete(s), Domain::Singleton(x)) => {
                Domain::Discrete(s.update(x.clone()))
            }
        }
    }

    /// In-place intersection, defined for `Discrete` receivers only.
    ///
    /// A singleton's element count is fixed, and the canonical markers are
    /// never mutated, so every other receiver is an unsupported operation.
    pub fn intersect_assign(&mut self, other: &Domain<V>) -> Result<()> {
        match self {
            Domain::Discrete(elements) => {
                let kept: OrdSet<V> =
                    elements.iter().filter(|v| other.contains(v)).cloned().collect();
                *elements = kept;
                Ok(())
            }
            _ => Err(Error::unsupported("intersect_assign", self.kind())),
        }
    }

    /// In-place union, defined for `Discrete` receivers only. A union with
    /// `Universe` cannot be stored in a discrete set and is also unsupported.
    pub fn union_assign(&mut self, other: &Domain<V>) -> Result<()> {
        match self {
            Domain::Discrete(elements) => {
                match other {
                    Domain::Universe => return Err(Error::unsupported("union_assign", other.kind())),
                    Domain::Empty => {}
                    Domain::Discrete(more) => {
                        for v in more.iter() {
                            elements.insert(v.clone());
                        }
                    }
                    Domain::Singleton(v) => {
                        elements.insert(v.clone());
                    }
                }
                Ok(())
            }
            _ => Err(Error::unsupported("union_assign", self.kind())),
        }
    }

    /// Inserts a value into a `Discrete` domain.
    pub fn insert(&mut self, value: V) -> Result<()> {
        match self {
            Domain::Discrete(elements) => {
                elements.insert(value);
                Ok(())
            }
            _ => Err(Error::unsupported("insert", self.kind())),
        }
    }

    /// Removes a value from a `Discrete` domain. Absent values are ignored.
    pub fn remove(&mut self, value: &V) -> Result<()> {
        match self {
            Domain::Discrete(elements) => {
                elements.remove(value);
                Ok(())
            }
            _ => Err(Error::unsupported("remove", self.kind())),
        }
    }
}

/// Variant-aware equality, extensional over the finite variants: a
/// `Singleton{v}` equals a `Discrete` set whose only element is `v`, and an
/// empty `Discrete` set equals `Empty`. Without the latter the intersection
/// associativity law would not hold, since `Discrete ∩ Discrete` keeps the
/// discrete variant even when the result has no elements. `Universe` equals
/// only itself.
impl<V: Value> PartialEq for Domain<V> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Domain::Universe, Domain::Universe) => true,
            (Domain::Empty, Domain::Empty) => true,
            (Domain::Discrete(a), Domain::Discrete(b)) => a == b,
            (Domain::Singleton(a), Domain::Singleton(b)) => a == b,
            (Domain::Singleton(x), Domain::Discrete(s))
            | (Domain::Discrete(s), Domain::Singleton(x)) => s.len() == 1 && s.contains(x),
            (Domain::Empty, Domain::Discrete(s)) | (Domain::Discrete(s), Domain::Empty) => {
                s.is_empty()
            }
            _ => false,
        }
    }
}

impl<V: Value> Eq for Domain<V> {}
