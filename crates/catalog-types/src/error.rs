use thiserror::Error;

/// Errors produced when validating caller input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("field '{0}' must not be empty")]
    EmptyField(&'static str),

    #[error("price must be greater than zero, got {0}")]
    NonPositivePrice(f64),

    #[error("discount must be within 0..=100, got {0}")]
    DiscountOutOfRange(f64),
}
