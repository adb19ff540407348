use crate::types::{EmployeeIndex, Month};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config field '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("No employee at index {index}")]
    EmployeeNotFound { index: EmployeeIndex },

    #[error("Invariant violated at month {month}: {detail}")]
    InvariantViolation { month: Month, detail: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
