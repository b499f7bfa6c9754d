use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    error::Result,
    solver::{
        assignment::Assignment,
        heuristics::{
            value::{AscendingValueHeuristic, ValueOrderingHeuristic},
            variable::{MinimumRemainingValuesHeuristic, VariableSelectionHeuristic},
        },
        relation::Relation,
        space::Space,
        value::Value,
        variable::Variable,
        work_list::WorkList,
    },
};

/// Index of a relation within the slice handed to the engine.
pub type RelationId = usize;

/// Counters accumulated over one solver run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes_visited: u64,
    pub backtracks: u64,
}

/// Fixed-point constraint propagation over a set of relations.
///
/// Starts every referenced variable at its native domain and repeatedly
/// applies [`Relation::pruned_space`] until no relation can shrink the
/// working space any further. When a relation's pass changes the space,
/// every relation sharing a variable with it is re-enqueued; the relation
/// itself only re-enters through a later update. Each accepted pass
/// strictly shrinks at least one finite domain, so the loop terminates.
///
/// The result is hyper-arc consistent relative to each relation's own scope.
/// That is weaker than global consistency: an exhaustive search may still
/// find contradictions propagation cannot see.
pub fn pruned_space_for_all<V: Value>(relations: &[Relation<V>]) -> Result<Space<V>> {
    pruned_space_for_all_within(relations, &Space::new())
}

/// Same fixed point, started from the native domains narrowed by `start` —
/// the way a caller pre-fixes variables before propagation.
pub fn pruned_space_for_all_within<V: Value>(
    relations: &[Relation<V>],
    start: &Space<V>,
) -> Result<Space<V>> {
    let mut all_vars: Vec<Variable<V>> = Vec::new();
    for relation in relations {
        for var in relation.variables() {
            if !all_vars.contains(var) {
                all_vars.push(var.clone());
            }
        }
    }
    let mut space = Space::over(all_vars).intersect(start);

    let mut relations_by_var: HashMap<&Variable<V>, Vec<RelationId>> = HashMap::new();
    for (id, relation) in relations.iter().enumerate() {
        for var in relation.variables() {
            relations_by_var.entry(var).or_default().push(id);
        }
    }

    let mut worklist = WorkList::new();
    for id in 0..relations.len() {
        worklist.push_back(id);
    }

    while let Some(id) = worklist.pop_front() {
        let pruned = relations[id].pruned_space(&space)?;
        if pruned == space {
            continue;
        }
        debug!(relation = id, "pruning pass shrank the working space");
        space = pruned;

        for var in relations[id].variables() {
            if let Some(sharers) = relations_by_var.get(var) {
                for &other in sharers {
                    if other != id {
                        worklist.push_back(other);
                    }
                }
            }
        }
    }

    debug!("propagation reached a fixed point");
    Ok(space)
}

/// Backtracking solver over a propagated space.
///
/// Propagation runs once, up front; the search itself never re-propagates.
/// Depth-first branching mutates a single assignment, undoing each
/// tentative binding on every exit path.
pub struct SolverEngine<V: Value> {
    variable_heuristic: Box<dyn VariableSelectionHeuristic<V>>,
    value_heuristic: Box<dyn ValueOrderingHeuristic<V>>,
}

impl<V: Value> SolverEngine<V> {
    pub fn new(
        variable_heuristic: Box<dyn VariableSelectionHeuristic<V>>,
        value_heuristic: Box<dyn ValueOrderingHeuristic<V>>,
    ) -> Self {
        Self {
            variable_heuristic,
            value_heuristic,
        }
    }

    /// Searches for an assignment satisfying every relation.
    ///
    /// Returns `Ok((Some(assignment), stats))` on success and
    /// `Ok((None, stats))` when the search space is exhausted — an
    /// unsatisfiable constraint set is a first-class result, not an error.
    pub fn solve(
        &self,
        relations: &[Relation<V>],
    ) -> Result<(Option<Assignment<V>>, SearchStats)> {
        self.solve_within(relations, &Space::new())
    }

    /// Like [`SolverEngine::solve`], with variables pre-restricted by
    /// `start` before propagation.
    pub fn solve_within(
        &self,
        relations: &[Relation<V>],
        start: &Space<V>,
    ) -> Result<(Option<Assignment<V>>, SearchStats)> {
        let space = pruned_space_for_all_within(relations, start)?;
        let variables: Vec<Variable<V>> = space.variables().cloned().collect();

        let mut stats = SearchStats::default();
        let mut assignment = Assignment::new();
        let solution = self.search(relations, &space, &variables, &mut assignment, &mut stats)?;
        Ok((solution, stats))
    }

    fn search(
        &self,
        relations: &[Relation<V>],
        space: &Space<V>,
        variables: &[Variable<V>],
        assignment: &mut Assignment<V>,
        stats: &mut SearchStats,
    ) -> Result<Option<Assignment<V>>> {
        stats.nodes_visited += 1;

        let unassigned: Vec<Variable<V>> = variables
            .iter()
            .filter(|var| !assignment.contains(var))
            .cloned()
            .collect();

        if unassigned.is_empty() {
            // Propagation scope is local to each relation, so a total
            // assignment still gets an explicit check against all of them.
            if relations.iter().all(|relation| relation.satisfied(assignment)) {
                return Ok(Some(assignment.clone()));
            }
            return Ok(None);
        }

        let Some(variable) = self
            .variable_heuristic
            .select_variable(&unassigned, space)
        else {
            return Ok(None);
        };

        for value in self.value_heuristic.order_values(&space.get(&variable))? {
            trace!(variable = %variable, value = ?value, "branching");
            assignment.assign(&variable, value)?;
            let found = self.search(relations, space, variables, assignment, stats)?;
            assignment.unassign(&variable);
            if found.is_some() {
                return Ok(found);
            }
            stats.backtracks += 1;
        }

        Ok(None)
    }
}

impl<V: Value> Default for SolverEngine<V> {
    fn default() -> Self {
        Self::new(
            Box::new(MinimumRemainingValuesHeuristic),
            Box::new(AscendingValueHeuristic),
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::{
        domain::Domain, heuristics::value::DescendingValueHeuristic,
        variable::VariableRegistry,
    };

    struct Chain {
        x: Variable<i64>,
        y: Variable<i64>,
        z: Variable<i64>,
        relations: Vec<Relation<i64>>,
    }

    /// `x == 5`, `x < y`, `y < z`, all over `{0..=9}`.
    fn chain_problem() -> Chain {
        let _ = tracing_subscriber::fmt::try_init();

        let mut registry = VariableRegistry::new();
        let x = registry.variable("x", Domain::discrete(0..10)).unwrap();
        let y = registry.variable("y", Domain::discrete(0..10)).unwrap();
        let z = registry.variable("z", Domain::discrete(0..10)).unwrap();

        let relations = vec![
            Relation::new([x.clone()], |v: &[i64]| v[0] == 5),
            Relation::new([x.clone(), y.clone()], |v: &[i64]| v[0] < v[1]),
            Relation::new([y.clone(), z.clone()], |v: &[i64]| v[0] < v[1]),
        ];
        Chain { x, y, z, relations }
    }

    #[test]
    fn propagation_prunes_the_chain() {
        let p = chain_problem();
        let space = pruned_space_for_all(&p.relations).unwrap();

        assert_eq!(space.get(&p.x), Domain::discrete([5]));
        assert_eq!(space.get(&p.y), Domain::discrete([6, 7, 8, 9]));
        assert_eq!(space.get(&p.z), Domain::discrete([7, 8, 9]));
    }

    #[test]
    fn propagation_is_idempotent() {
        let p = chain_problem();
        let once = pruned_space_for_all(&p.relations).unwrap();
        let twice = pruned_space_for_all_within(&p.relations, &once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn pre_fixed_variables_narrow_the_fixed_point() {
        let p = chain_problem();
        let start = Space::from_domains([(p.y.clone(), Domain::Singleton(7))]);

        let space = pruned_space_for_all_within(&p.relations, &start).unwrap();
        assert_eq!(space.get(&p.x), Domain::discrete([5]));
        assert_eq!(space.get(&p.y), Domain::discrete([7]));
        assert_eq!(space.get(&p.z), Domain::discrete([8, 9]));
    }

    #[test]
    fn contradictory_relations_prune_to_empty_and_exhaust_the_search() {
        let _ = tracing_subscriber::fmt::try_init();

        let mut registry = VariableRegistry::new();
        let x: Variable<i64> = registry.variable("x", Domain::discrete(0..10)).unwrap();
        let relations = vec![
            Relation::new([x.clone()], |v: &[i64]| v[0] == 5),
            Relation::new([x.clone()], |v: &[i64]| v[0] == 6),
        ];

        let space = pruned_space_for_all(&relations).unwrap();
        assert!(!space.get(&x).is_nonempty());

        let (solution, _stats) = SolverEngine::default().solve(&relations).unwrap();
        assert_eq!(solution, None);
    }

    #[test]
    fn the_solver_finds_the_smallest_chain_solution() {
        let p = chain_problem();
        let (solution, stats) = SolverEngine::default().solve(&p.relations).unwrap();
        let solution = solution.unwrap();

        assert_eq!(solution.get(&p.x), Some(&5));
        assert_eq!(solution.get(&p.y), Some(&6));
        assert_eq!(solution.get(&p.z), Some(&7));
        assert!(p.relations.iter().all(|r| r.satisfied(&solution)));
        assert!(stats.nodes_visited > 0);
    }

    #[test]
    fn value_ordering_steers_which_solution_is_found() {
        let p = chain_problem();
        let engine = SolverEngine::new(
            Box::new(MinimumRemainingValuesHeuristic),
            Box::new(DescendingValueHeuristic),
        );
        let (solution, _stats) = engine.solve(&p.relations).unwrap();
        let solution = solution.unwrap();

        assert_eq!(solution.get(&p.x), Some(&5));
        assert_eq!(solution.get(&p.y), Some(&8));
        assert_eq!(solution.get(&p.z), Some(&9));
    }

    #[test]
    fn solving_within_a_pre_fixed_space_respects_the_pin() {
        let p = chain_problem();
        let start = Space::from_domains([(p.y.clone(), Domain::Singleton(7))]);
        let (solution, _stats) = SolverEngine::default()
            .solve_within(&p.relations, &start)
            .unwrap();
        let solution = solution.unwrap();

        assert_eq!(solution.get(&p.y), Some(&7));
        assert_eq!(solution.get(&p.z), Some(&8));
    }

    #[test]
    fn no_relations_means_the_empty_assignment_satisfies_vacuously() {
        let relations: Vec<Relation<i64>> = Vec::new();
        let (solution, _stats) = SolverEngine::default().solve(&relations).unwrap();
        assert_eq!(solution, Some(Assignment::new()));
    }

    #[test]
    fn solutions_lie_inside_the_propagated_space() {
        let p = chain_problem();
        let space = pruned_space_for_all(&p.relations).unwrap();
        let (solution, _stats) = SolverEngine::default().solve(&p.relations).unwrap();
        assert!(space.contains(&solution.unwrap()));
    }
}
