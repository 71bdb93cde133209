use marrow_core::containers::HashSet;
use marrow_core::create_statistics_struct;
use marrow_core::propagation::DomainEvents;
use marrow_core::propagation::Domains;
use marrow_core::propagation::EntailmentStatus;
use marrow_core::propagation::LocalId;
use marrow_core::propagation::Priority;
use marrow_core::propagation::PropagationContext;
use marrow_core::propagation::PropagationStatus;
use marrow_core::propagation::Propagator;
use marrow_core::propagation::PropagatorConstructor;
use marrow_core::propagation::PropagatorConstructorContext;
use marrow_core::propagation::ReadDomains;
use marrow_core::statistics::Statistic;
use marrow_core::statistics::StatisticLogger;
use marrow_core::variables::DomainId;

use super::bipartite_matching::BipartiteMatching;
use super::strongly_connected::Digraph;
use super::strongly_connected::StronglyConnectedComponents;

/// The [`PropagatorConstructor`] for the [`AllDifferentPropagator`].
#[derive(Clone, Debug)]
pub struct AllDifferentPropagatorArgs {
    pub variables: Vec<DomainId>,
}

impl PropagatorConstructor for AllDifferentPropagatorArgs {
    type PropagatorImpl = AllDifferentPropagator;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let variables: Box<[DomainId]> = self.variables.into();

        let domains = context.domains();
        let smallest = variables
            .iter()
            .map(|&variable| domains.lower_bound(variable))
            .min()
            .unwrap_or(0);
        let largest = variables
            .iter()
            .map(|&variable| domains.upper_bound(variable))
            .max()
            .unwrap_or(-1);
        let num_values = (largest as i64 - smallest as i64 + 1).max(0) as usize;

        for (index, &variable) in variables.iter().enumerate() {
            context.register(variable, DomainEvents::ANY_INT, LocalId::from(index as u32));
        }

        AllDifferentPropagator {
            matching: BipartiteMatching::new(variables.len(), smallest, num_values),
            variables,
            graph: Digraph::default(),
            components: StronglyConnectedComponents::default(),
            removals: Vec::new(),
            statistics: AllDifferentStatistics::default(),
        }
    }
}

create_statistics_struct!(AllDifferentStatistics {
    num_calls: usize,
    num_conflicts: usize,
    num_removed_values: usize,
});

/// Arc consistent propagator for `all_different(variables)`, after Régin.
///
/// A matching which covers every variable is kept between calls and repaired with augmenting
/// paths. A value can be taken by a variable iff the pair is matched, or lies on an alternating
/// cycle, or on an alternating path ending in a free value; the latter two are found with one
/// strongly connected component decomposition of the residual graph.
#[derive(Clone, Debug)]
pub struct AllDifferentPropagator {
    variables: Box<[DomainId]>,
    matching: BipartiteMatching,
    graph: Digraph,
    components: StronglyConnectedComponents,
    removals: Vec<(DomainId, i32)>,
    statistics: AllDifferentStatistics,
}

impl AllDifferentPropagator {
    fn variable_node(&self, variable: usize) -> usize {
        variable
    }

    fn value_node(&self, value: usize) -> usize {
        self.variables.len() + value
    }

    fn sink_node(&self) -> usize {
        self.variables.len() + self.matching.num_values()
    }

    /// Unmatched edges point from variables to values, matched edges from values to variables.
    /// Free values lead to the sink, which leads back to every matched value.
    fn build_residual_graph(&mut self, domains: &impl ReadDomains) {
        let mut graph = std::mem::take(&mut self.graph);
        graph.clear();

        for (index, &variable) in self.variables.iter().enumerate() {
            graph.add_node();
            let matched = self.matching.matched_value(index);
            for value in domains.values(variable) {
                let value = self.matching.index_of(value);
                if matched != Some(value) {
                    graph.add_successor(self.value_node(value));
                }
            }
        }

        for value in 0..self.matching.num_values() {
            graph.add_node();
            match self.matching.matched_variable(value) {
                Some(variable) => graph.add_successor(self.variable_node(variable)),
                None => graph.add_successor(self.sink_node()),
            }
        }

        graph.add_node();
        for value in 0..self.matching.num_values() {
            if self.matching.matched_variable(value).is_some() {
                graph.add_successor(self.value_node(value));
            }
        }

        self.graph = graph;
    }
}

impl Propagator for AllDifferentPropagator {
    fn name(&self) -> &str {
        "AllDifferent"
    }

    fn priority(&self) -> Priority {
        Priority::Quadratic
    }

    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.statistics.log(statistic_logger);
    }

    fn propagate_from_scratch(&mut self, mut context: PropagationContext) -> PropagationStatus {
        self.statistics.num_calls += 1;

        if !self.matching.repair(&self.variables, &context) {
            self.statistics.num_conflicts += 1;
            return Err(context.contradiction());
        }

        self.build_residual_graph(&context);
        let component = self.components.compute(&self.graph);

        self.removals.clear();
        for (index, &variable) in self.variables.iter().enumerate() {
            let matched = self.matching.matched_value(index);
            for value in context.values(variable) {
                let value_index = self.matching.index_of(value);
                let value_node = self.variables.len() + value_index;
                if matched != Some(value_index) && component[index] != component[value_node] {
                    self.removals.push((variable, value));
                }
            }
        }

        for &(variable, value) in self.removals.iter() {
            if context.remove(variable, value)? {
                self.statistics.num_removed_values += 1;
            }
        }

        Ok(())
    }

    fn is_entailed(&self, domains: Domains) -> EntailmentStatus {
        let mut seen: HashSet<i32> = HashSet::default();
        let mut all_fixed = true;
        for &variable in self.variables.iter() {
            match domains.fixed_value(variable) {
                Some(value) if !seen.insert(value) => return EntailmentStatus::Violated,
                Some(_) => {}
                None => all_fixed = false,
            }
        }

        if all_fixed {
            EntailmentStatus::Satisfied
        } else {
            EntailmentStatus::Undetermined
        }
    }
}

#[cfg(test)]
mod tests {
    use marrow_core::propagation::Contradiction;
    use marrow_core::testing::TestSolver;
    use marrow_core::PropagatorHandle;

    use super::*;

    fn post(
        solver: &mut TestSolver,
        variables: &[DomainId],
    ) -> Result<PropagatorHandle<AllDifferentPropagator>, Contradiction> {
        solver.new_propagator(AllDifferentPropagatorArgs {
            variables: variables.to_vec(),
        })
    }

    #[test]
    fn pigeonhole_is_a_conflict() {
        let mut solver = TestSolver::default();
        let variables = [
            solver.new_enumerated_variable(1, 2),
            solver.new_enumerated_variable(1, 2),
            solver.new_enumerated_variable(1, 2),
        ];

        let _ = post(&mut solver, &variables).expect_err("three variables share two values");
    }

    #[test]
    fn values_of_a_hall_set_are_removed_elsewhere() {
        let mut solver = TestSolver::default();
        let x = solver.new_enumerated_variable(1, 2);
        let y = solver.new_enumerated_variable(1, 2);
        let z = solver.new_enumerated_variable(1, 4);

        let _ = post(&mut solver, &[x, y, z]).expect("no conflict");

        assert_eq!(solver.values(x), vec![1, 2]);
        assert_eq!(solver.values(y), vec![1, 2]);
        assert_eq!(solver.values(z), vec![3, 4]);
    }

    #[test]
    fn removes_values_not_on_any_alternating_cycle() {
        let mut solver = TestSolver::default();
        // x = 1 is forced through y, which leaves {3} to z.
        let x = solver.new_sparse_variable(vec![1, 2]);
        let y = solver.new_sparse_variable(vec![2, 3]);
        let z = solver.new_sparse_variable(vec![2, 3]);

        let _ = post(&mut solver, &[x, y, z]).expect("no conflict");

        assert_eq!(solver.values(x), vec![1]);
        assert_eq!(solver.values(y), vec![2, 3]);
        assert_eq!(solver.values(z), vec![2, 3]);
    }

    #[test]
    fn keeps_values_which_reach_a_free_value() {
        let mut solver = TestSolver::default();
        let x = solver.new_enumerated_variable(1, 3);
        let y = solver.new_enumerated_variable(1, 3);

        let _ = post(&mut solver, &[x, y]).expect("no conflict");

        assert_eq!(solver.values(x), vec![1, 2, 3]);
        assert_eq!(solver.values(y), vec![1, 2, 3]);
    }

    #[test]
    fn assignment_is_propagated_and_undone() {
        let mut solver = TestSolver::default();
        let variables = [
            solver.new_enumerated_variable(1, 3),
            solver.new_enumerated_variable(1, 3),
            solver.new_enumerated_variable(1, 3),
        ];
        let _ = post(&mut solver, &variables).expect("no conflict");

        solver.new_checkpoint();
        let _ = solver.assign(variables[0], 2).expect("non-empty domain");
        solver.propagate_until_fixed_point().expect("no conflict");
        assert_eq!(solver.values(variables[1]), vec![1, 3]);
        assert_eq!(solver.values(variables[2]), vec![1, 3]);

        solver.new_checkpoint();
        let _ = solver.assign(variables[1], 3).expect("non-empty domain");
        solver.propagate_until_fixed_point().expect("no conflict");
        assert_eq!(solver.values(variables[2]), vec![1]);

        solver.restore_to(0);
        for &variable in variables.iter() {
            assert_eq!(solver.values(variable), vec![1, 2, 3]);
        }
    }

    #[test]
    fn entailment() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(1, 1);
        let y = solver.new_variable(2, 2);
        let z = solver.new_variable(1, 3);

        let handle = post(&mut solver, &[x, y, z]).expect("no conflict");
        let propagator = solver.get_propagator(handle).expect("valid handle");
        assert_eq!(
            propagator.is_entailed(solver.domains()),
            EntailmentStatus::Satisfied
        );
        assert_eq!(solver.values(z), vec![3]);
    }
}
