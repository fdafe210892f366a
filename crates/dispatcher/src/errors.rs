use thiserror::Error;
use ticket_desk_proto::TicketError;

use crate::Lane;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("validation error: {0}")]
    Validation(#[from] TicketError),

    #[error("VIP lane is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },

    #[error("no pending tickets to serve")]
    EmptyQueue,

    #[error("stack underflow, no resolved tickets to undo")]
    StackUnderflow,

    #[error("{0} is empty, nothing to sort")]
    EmptyContainer(Lane),

    #[error("unknown {kind} {value:?}")]
    UnknownLabel { kind: &'static str, value: String },

    #[error("branch not found: {0}")]
    BranchNotFound(String),

    #[error("branch {0} is in use")]
    BranchInUse(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("name collation data unavailable: {0}")]
    Collation(String),
}

impl DispatchError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            DispatchError::Validation(_) => "VALIDATION_ERROR",
            DispatchError::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            DispatchError::EmptyQueue => "EMPTY_QUEUE",
            DispatchError::StackUnderflow => "STACK_UNDERFLOW",
            DispatchError::EmptyContainer(_) => "EMPTY_CONTAINER",
            DispatchError::UnknownLabel { .. } => "UNKNOWN_LABEL",
            DispatchError::BranchNotFound(_) => "BRANCH_NOT_FOUND",
            DispatchError::BranchInUse(_) => "BRANCH_IN_USE",
            DispatchError::InvalidConfig(_) => "INVALID_CONFIG",
            DispatchError::Collation(_) => "COLLATION_UNAVAILABLE",
        }
    }
}
