mod outputs;
pub(crate) mod solver;

pub mod results {
    //! Contains the outputs of solving using the [`Solver`].
    //!
    //! We differentiate between 2 different types of results:
    //! - For a **satisfaction** problem ([`SatisfactionResult`])
    //! - For an **optimisation** problem ([`OptimisationResult`])
    //!
    //! All solutions of a satisfaction problem can be enumerated through the
    //! [`solution_iterator::SolutionIterator`].
    pub use crate::api::outputs::solution_iterator;
    pub use crate::api::outputs::OptimisationResult;
    pub use crate::api::outputs::SatisfactionResult;
    pub use crate::basic_types::GraphValue;
    pub use crate::basic_types::Solution;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod variables {
    //! Contains the variables which are used by the [`Solver`].
    //!
    //! We define 2 types of variables:
    //! - Integer variables ([`DomainId`]) - These can be created using
    //!   [`Solver::new_bounded_integer`] when creating a variable with the domain between a
    //!   lower-bound and an upper-bound or using [`Solver::new_sparse_integer`] when creating a
    //!   variable with holes in the domain.
    //! - Graph variables ([`GraphId`]) - These are bounded by a kernel of mandatory nodes and edges
    //!   and an envelope of possible ones, and are created using [`Solver::new_graph_variable`].
    pub use crate::engine::graph::GraphView;
    pub use crate::engine::trailed::SetType;
    pub use crate::engine::variables::DomainId;
    pub use crate::engine::variables::GraphId;
    pub use crate::engine::variables::Subject;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod options {
    //! Contains the options which can be passed to the [`Solver`].
    //!
    //! These influence the following aspects:
    //! - The restart strategy of the solver
    //! - Backjumping and the nogoods recorded before a restart
    //! - The seed of the random generator used by the branchers
    pub use crate::basic_types::sequence_generators::CutoffSequenceType;
    pub use crate::engine::restarts::RestartCriterion;
    pub use crate::engine::restarts::RestartOptions;
    pub use crate::engine::LearningOptions;
    pub use crate::engine::SatisfactionSolverOptions as SolverOptions;
    pub use crate::optimisation::ObjectiveStrategy;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod termination {
    //! Contains the conditions which are used to determine when the [`Solver`] should terminate
    //! even when the state of the satisfaction/optimisation problem is unknown.
    //!
    //! The main [`TerminationCondition`] is a condition which is polled by the [`Solver`] during
    //! the search process. It indicates when the [`Solver`] should stop, even if no definitive
    //! conclusions have been made.
    //!
    //! The most common example would be [`TimeBudget`], which terminates the [`Solver`] whenever
    //! the time budget is exceeded.
    pub use crate::engine::termination::Combinator;
    pub use crate::engine::termination::FailBudget;
    pub use crate::engine::termination::Indefinite;
    pub use crate::engine::termination::NodeBudget;
    pub use crate::engine::termination::TerminationCondition;
    pub use crate::engine::termination::TimeBudget;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod restarts {
    //! Contains the policies which decide when the search goes back to the root.
    //!
    //! The [`Restarter`] is configured through
    //! [`RestartOptions`](crate::options::RestartOptions); its cutoffs are produced by one of the
    //! [`sequence_generators`].
    pub use crate::basic_types::sequence_generators;
    pub use crate::engine::restarts::ForceRestartBeforeCut;
    pub use crate::engine::restarts::NoRestarts;
    pub use crate::engine::restarts::RestartPolicy;
    pub use crate::engine::restarts::Restarter;
    pub use crate::engine::restarts::SearchProgress;
}

pub mod search {
    //! Contains the search loop of the [`Solver`] and the ways to observe it.
    pub use crate::basic_types::CSPSolverExecutionFlag;
    pub use crate::engine::CSPSolverState;
    pub use crate::engine::ConstraintSatisfactionSolver;
    pub use crate::engine::SearchMonitor;
    pub use crate::engine::SearchStatus;
    pub use crate::engine::SolverStatistics;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod testing {
    //! Contains a harness which drives propagators by hand, to unit test them outside of search.
    pub use crate::engine::test_solver::TestSolver;
}

#[doc(hidden)]
pub mod asserts {
    pub use crate::marrow_assert_advanced;
    pub use crate::marrow_assert_eq_simple;
    pub use crate::marrow_assert_extreme;
    pub use crate::marrow_assert_moderate;
    pub use crate::marrow_assert_simple;
    pub use crate::marrow_asserts::MARROW_ASSERT_ADVANCED;
    pub use crate::marrow_asserts::MARROW_ASSERT_EXTREME;
    pub use crate::marrow_asserts::MARROW_ASSERT_LEVEL_DEFINITION;
    pub use crate::marrow_asserts::MARROW_ASSERT_MODERATE;
    pub use crate::marrow_asserts::MARROW_ASSERT_SIMPLE;
}
