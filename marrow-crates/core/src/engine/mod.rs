mod assignments;
pub mod constraint_satisfaction_solver;
mod decision_path;
pub(crate) mod delta;
pub(crate) mod domains;
mod explanations;
pub(crate) mod graph;
pub(crate) mod notifications;
mod propagator_queue;
pub(crate) mod restarts;
mod search_monitor;
mod solver_statistics;
mod state;
pub(crate) mod termination;
pub mod test_solver;
pub(crate) mod trailed;
pub(crate) mod variables;

pub use assignments::Assignments;
pub use constraint_satisfaction_solver::CSPSolverState;
pub use constraint_satisfaction_solver::ConstraintSatisfactionSolver;
pub use constraint_satisfaction_solver::LearningOptions;
pub use constraint_satisfaction_solver::SatisfactionSolverOptions;
pub use constraint_satisfaction_solver::SearchStatus;
pub(crate) use propagator_queue::PropagatorQueue;
pub use search_monitor::SearchMonitor;
pub use solver_statistics::SolverStatistics;
pub(crate) use state::State;
