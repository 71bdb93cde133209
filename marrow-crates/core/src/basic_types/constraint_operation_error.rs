use thiserror::Error;

/// Errors returned when the model is extended in a way the solver cannot accept.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintOperationError {
    #[error("Adding the propagator failed because the root propagation detected infeasibility")]
    InfeasiblePropagator,
    #[error("The solver was already proven infeasible at the root")]
    InfeasibleState,
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}
