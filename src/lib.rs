//! Vincula is a compositional constraint satisfaction toolkit.
//!
//! It models discrete variables with restricted domains, composable
//! constraints ("relations") over tuples of variables, and a solver that
//! finds assignments satisfying every constraint. Three layers do the work:
//!
//! - **[`Domain`]**: a lattice-like value-set algebra with universal, empty,
//!   discrete and singleton variants.
//! - **[`Space`]** and **[`Relation`]**: the current admissible values per
//!   variable, and named constraints that can prune a space to hyper-arc
//!   consistency via a worklist fixed point
//!   ([`pruned_space_for_all`]).
//! - **[`SolverEngine`]**: depth-first backtracking search over the pruned
//!   space, with pluggable variable-selection and value-ordering heuristics.
//!
//! # Example: a chain of order constraints
//!
//! Solving `x == 5`, `x < y`, `y < z` over the domain `{0..=9}`:
//!
//! ```
//! use vincula::solver::domain::Domain;
//! use vincula::solver::engine::{pruned_space_for_all, SolverEngine};
//! use vincula::solver::relation::Relation;
//! use vincula::solver::variable::VariableRegistry;
//!
//! let mut registry = VariableRegistry::new();
//! let x = registry.variable("x", Domain::discrete(0..10i64))?;
//! let y = registry.variable("y", Domain::discrete(0..10i64))?;
//! let z = registry.variable("z", Domain::discrete(0..10i64))?;
//!
//! let relations = vec![
//!     Relation::new([x.clone()], |v: &[i64]| v[0] == 5),
//!     Relation::new([x.clone(), y.clone()], |v: &[i64]| v[0] < v[1]),
//!     Relation::new([y.clone(), z.clone()], |v: &[i64]| v[0] < v[1]),
//! ];
//!
//! // Propagation alone pins x and squeezes y and z.
//! let space = pruned_space_for_all(&relations)?;
//! assert_eq!(space.get(&x), Domain::discrete([5]));
//! assert_eq!(space.get(&y), Domain::discrete([6, 7, 8, 9]));
//!
//! // The backtracking search produces a concrete assignment.
//! let (solution, _stats) = SolverEngine::default().solve(&relations)?;
//! let solution = solution.expect("the chain is satisfiable");
//! assert_eq!(solution.get(&x), Some(&5));
//! assert_eq!(solution.get(&y), Some(&6));
//! assert_eq!(solution.get(&z), Some(&7));
//! # Ok::<(), vincula::error::Error>(())
//! ```
//!
//! [`Domain`]: crate::solver::domain::Domain
//! [`Space`]: crate::solver::space::Space
//! [`Relation`]: crate::solver::relation::Relation
//! [`SolverEngine`]: crate::solver::engine::SolverEngine
//! [`pruned_space_for_all`]: crate::solver::engine::pruned_space_for_all

pub mod error;
pub mod examples;
pub mod solver;
