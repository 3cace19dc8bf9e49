use thiserror::Error;

/// Rejections raised before a draft is sent to the store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("position must not be empty")]
    EmptyPosition,
    #[error("salary '{0}' is not a number")]
    InvalidSalary(String),
    #[error("salary must not be negative, got {0}")]
    NegativeSalary(f64),
}
