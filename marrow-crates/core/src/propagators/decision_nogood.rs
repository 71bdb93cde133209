use itertools::Itertools;

use crate::basic_types::Contradiction;
use crate::basic_types::PropagationStatus;
use crate::branching::Decision;
use crate::branching::GraphOperator;
use crate::branching::IntegerOperator;
use crate::engine::variables::Subject;
use crate::propagation::Domains;
use crate::propagation::DomainEvents;
use crate::propagation::EntailmentStatus;
use crate::propagation::GraphEvents;
use crate::propagation::LocalId;
use crate::propagation::PropagationContext;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::ReadDomains;

/// Posts a [`DecisionNogoodPropagator`].
#[derive(Clone, Debug)]
pub(crate) struct DecisionNogoodConstructor {
    pub(crate) nogoods: Vec<Vec<Decision>>,
}

impl PropagatorConstructor for DecisionNogoodConstructor {
    type PropagatorImpl = DecisionNogoodPropagator;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let subjects = self
            .nogoods
            .iter()
            .flatten()
            .map(subject_of)
            .unique()
            .collect::<Vec<_>>();

        for (index, subject) in subjects.into_iter().enumerate() {
            let local_id = LocalId::from(index as u32);
            match subject {
                Subject::Integer(variable) => {
                    context.register(variable, DomainEvents::ANY_INT, local_id)
                }
                Subject::Graph(graph) => context.register_graph(graph, GraphEvents::ANY, local_id),
            }
        }

        DecisionNogoodPropagator {
            nogoods: self.nogoods,
        }
    }
}

/// Forbids combinations of decisions which were shown to lead to failure: for every nogood at
/// least one of its decisions must be false.
///
/// Used to keep the explanations found during search after a restart.
#[derive(Clone, Debug)]
pub(crate) struct DecisionNogoodPropagator {
    nogoods: Vec<Vec<Decision>>,
}

impl Propagator for DecisionNogoodPropagator {
    fn name(&self) -> &str {
        "DecisionNogood"
    }

    fn propagate_from_scratch(&mut self, mut context: PropagationContext) -> PropagationStatus {
        for nogood in &self.nogoods {
            let mut undecided = None;
            let mut num_undecided = 0;

            for decision in nogood {
                match truth_value(context.domains(), decision) {
                    Some(true) => {}
                    Some(false) => {
                        num_undecided = usize::MAX;
                        break;
                    }
                    None => {
                        num_undecided += 1;
                        undecided = Some(*decision);
                    }
                }
            }

            match (num_undecided, undecided) {
                (0, _) => return Err(context.contradiction()),
                (1, Some(decision)) => {
                    let _ = post(&mut context, decision.negation())?;
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn is_entailed(&self, domains: Domains) -> EntailmentStatus {
        let violated = self.nogoods.iter().any(|nogood| {
            nogood
                .iter()
                .all(|decision| truth_value(domains, decision) == Some(true))
        });
        if violated {
            EntailmentStatus::Violated
        } else {
            EntailmentStatus::Undetermined
        }
    }
}

fn subject_of(decision: &Decision) -> Subject {
    match decision {
        Decision::Integer { variable, .. } => Subject::Integer(*variable),
        Decision::Graph { variable, .. } => Subject::Graph(*variable),
    }
}

/// Whether the decision holds in every, in no, or only in some assignments of the domains.
fn truth_value(domains: Domains, decision: &Decision) -> Option<bool> {
    match *decision {
        Decision::Integer {
            variable,
            operator,
            value,
        } => {
            let lower_bound = domains.lower_bound(variable);
            let upper_bound = domains.upper_bound(variable);
            match operator {
                IntegerOperator::Assign if lower_bound == value && upper_bound == value => {
                    Some(true)
                }
                IntegerOperator::Assign if !domains.contains(variable, value) => Some(false),
                IntegerOperator::Remove if !domains.contains(variable, value) => Some(true),
                IntegerOperator::Remove if lower_bound == value && upper_bound == value => {
                    Some(false)
                }
                IntegerOperator::LessOrEqual if upper_bound <= value => Some(true),
                IntegerOperator::LessOrEqual if lower_bound > value => Some(false),
                IntegerOperator::GreaterOrEqual if lower_bound >= value => Some(true),
                IntegerOperator::GreaterOrEqual if upper_bound < value => Some(false),
                _ => None,
            }
        }
        Decision::Graph { variable, operator } => {
            let envelope = domains.envelope(variable);
            let kernel = domains.kernel(variable);
            match operator {
                GraphOperator::EnforceNode(node) if kernel.contains_node(node) => Some(true),
                GraphOperator::EnforceNode(node) if !envelope.contains_node(node) => Some(false),
                GraphOperator::RemoveNode(node) if !envelope.contains_node(node) => Some(true),
                GraphOperator::RemoveNode(node) if kernel.contains_node(node) => Some(false),
                GraphOperator::EnforceEdge(from, to) if kernel.contains_edge(from, to) => {
                    Some(true)
                }
                GraphOperator::EnforceEdge(from, to) if !envelope.contains_edge(from, to) => {
                    Some(false)
                }
                GraphOperator::RemoveEdge(from, to) if !envelope.contains_edge(from, to) => {
                    Some(true)
                }
                GraphOperator::RemoveEdge(from, to) if kernel.contains_edge(from, to) => {
                    Some(false)
                }
                _ => None,
            }
        }
    }
}

fn post(context: &mut PropagationContext, decision: Decision) -> Result<bool, Contradiction> {
    match decision {
        Decision::Integer {
            variable,
            operator,
            value,
        } => match operator {
            IntegerOperator::Assign => context.assign(variable, value),
            IntegerOperator::Remove => context.remove(variable, value),
            IntegerOperator::LessOrEqual => context.set_upper_bound(variable, value),
            IntegerOperator::GreaterOrEqual => context.set_lower_bound(variable, value),
        },
        Decision::Graph { variable, operator } => match operator {
            GraphOperator::EnforceNode(node) => context.enforce_node(variable, node),
            GraphOperator::RemoveNode(node) => context.remove_node(variable, node),
            GraphOperator::EnforceEdge(from, to) => context.enforce_edge(variable, from, to),
            GraphOperator::RemoveEdge(from, to) => context.remove_edge(variable, from, to),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_solver::TestSolver;

    #[test]
    fn last_undecided_decision_is_negated() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 3);
        let y = solver.new_variable(0, 3);

        let _ = solver
            .new_propagator(DecisionNogoodConstructor {
                nogoods: vec![vec![Decision::assign(x, 1), Decision::less_or_equal(y, 1)]],
            })
            .expect("no empty domains");

        let _ = solver.assign(x, 1).expect("non-empty domain");
        solver
            .propagate_until_fixed_point()
            .expect("no empty domains");
        solver.assert_bounds(y, 2, 3);
    }

    #[test]
    fn falsified_nogood_does_nothing() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 3);
        let y = solver.new_variable(0, 3);

        let _ = solver
            .new_propagator(DecisionNogoodConstructor {
                nogoods: vec![vec![Decision::assign(x, 1), Decision::remove(y, 2)]],
            })
            .expect("no empty domains");

        let _ = solver.remove(x, 1).expect("non-empty domain");
        solver
            .propagate_until_fixed_point()
            .expect("no empty domains");
        assert!(solver.contains(y, 2));
    }

    #[test]
    fn satisfied_nogood_fails() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 3);
        let y = solver.new_variable(0, 3);

        let _ = solver
            .new_propagator(DecisionNogoodConstructor {
                nogoods: vec![vec![Decision::assign(x, 1), Decision::assign(y, 0)]],
            })
            .expect("no empty domains");

        let _ = solver.assign(x, 1).expect("non-empty domain");
        let _ = solver.assign(y, 0).expect("non-empty domain");
        assert!(solver.propagate_until_fixed_point().is_err());
    }
}
