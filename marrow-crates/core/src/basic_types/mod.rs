mod constraint_operation_error;
mod contradiction;
mod csp_solver_execution_flag;
mod random;
pub mod sequence_generators;
mod solution;
mod trail;

pub use constraint_operation_error::ConstraintOperationError;
pub use contradiction::*;
pub use csp_solver_execution_flag::CSPSolverExecutionFlag;
pub use random::Random;
pub use solution::GraphValue;
pub use solution::Solution;
pub(crate) use trail::Trail;
