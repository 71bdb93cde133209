use std::fmt::Display;

use crate::basic_types::Cause;
use crate::basic_types::Contradiction;
use crate::engine::variables::DomainId;
use crate::engine::variables::GraphId;
use crate::engine::Assignments;

/// How an integer decision restricts the domain of its variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntegerOperator {
    Assign,
    Remove,
    LessOrEqual,
    GreaterOrEqual,
}

/// How a graph decision restricts its variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GraphOperator {
    EnforceNode(usize),
    RemoveNode(usize),
    EnforceEdge(usize, usize),
    RemoveEdge(usize, usize),
}

/// A branching decision. The search applies it when opening a node and applies
/// [`Decision::negation`] when the decision is refuted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decision {
    Integer {
        variable: DomainId,
        operator: IntegerOperator,
        value: i32,
    },
    Graph {
        variable: GraphId,
        operator: GraphOperator,
    },
}

impl Decision {
    pub fn assign(variable: DomainId, value: i32) -> Decision {
        Decision::Integer {
            variable,
            operator: IntegerOperator::Assign,
            value,
        }
    }

    pub fn remove(variable: DomainId, value: i32) -> Decision {
        Decision::Integer {
            variable,
            operator: IntegerOperator::Remove,
            value,
        }
    }

    pub fn less_or_equal(variable: DomainId, value: i32) -> Decision {
        Decision::Integer {
            variable,
            operator: IntegerOperator::LessOrEqual,
            value,
        }
    }

    pub fn greater_or_equal(variable: DomainId, value: i32) -> Decision {
        Decision::Integer {
            variable,
            operator: IntegerOperator::GreaterOrEqual,
            value,
        }
    }

    pub fn negation(&self) -> Decision {
        match *self {
            Decision::Integer {
                variable,
                operator,
                value,
            } => match operator {
                IntegerOperator::Assign => Decision::remove(variable, value),
                IntegerOperator::Remove => Decision::assign(variable, value),
                IntegerOperator::LessOrEqual => {
                    Decision::greater_or_equal(variable, value.saturating_add(1))
                }
                IntegerOperator::GreaterOrEqual => {
                    Decision::less_or_equal(variable, value.saturating_sub(1))
                }
            },
            Decision::Graph { variable, operator } => {
                let operator = match operator {
                    GraphOperator::EnforceNode(node) => GraphOperator::RemoveNode(node),
                    GraphOperator::RemoveNode(node) => GraphOperator::EnforceNode(node),
                    GraphOperator::EnforceEdge(from, to) => GraphOperator::RemoveEdge(from, to),
                    GraphOperator::RemoveEdge(from, to) => GraphOperator::EnforceEdge(from, to),
                };
                Decision::Graph { variable, operator }
            }
        }
    }

    /// Applies the decision, returning whether anything changed.
    pub(crate) fn apply(
        &self,
        assignments: &mut Assignments,
        cause: Cause,
    ) -> Result<bool, Contradiction> {
        match *self {
            Decision::Integer {
                variable,
                operator,
                value,
            } => match operator {
                IntegerOperator::Assign => assignments.instantiate(variable, value, cause),
                IntegerOperator::Remove => assignments.remove_value(variable, value, cause),
                IntegerOperator::LessOrEqual => {
                    assignments.update_upper_bound(variable, value, cause)
                }
                IntegerOperator::GreaterOrEqual => {
                    assignments.update_lower_bound(variable, value, cause)
                }
            },
            Decision::Graph { variable, operator } => match operator {
                GraphOperator::EnforceNode(node) => assignments.enforce_node(variable, node, cause),
                GraphOperator::RemoveNode(node) => assignments.remove_node(variable, node, cause),
                GraphOperator::EnforceEdge(from, to) => {
                    assignments.enforce_edge(variable, from, to, cause)
                }
                GraphOperator::RemoveEdge(from, to) => {
                    assignments.remove_edge(variable, from, to, cause)
                }
            },
        }
    }
}

impl Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Integer {
                variable,
                operator,
                value,
            } => {
                let operator = match operator {
                    IntegerOperator::Assign => "==",
                    IntegerOperator::Remove => "!=",
                    IntegerOperator::LessOrEqual => "<=",
                    IntegerOperator::GreaterOrEqual => ">=",
                };
                write!(f, "[{variable} {operator} {value}]")
            }
            Decision::Graph { variable, operator } => match operator {
                GraphOperator::EnforceNode(node) => write!(f, "[{node} in {variable}]"),
                GraphOperator::RemoveNode(node) => write!(f, "[{node} notin {variable}]"),
                GraphOperator::EnforceEdge(from, to) => {
                    write!(f, "[({from}, {to}) in {variable}]")
                }
                GraphOperator::RemoveEdge(from, to) => {
                    write!(f, "[({from}, {to}) notin {variable}]")
                }
            },
        }
    }
}
