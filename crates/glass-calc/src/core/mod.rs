//! Core calculator engine
//!
//! Everything in here is pure: operators and arithmetic, display
//! formatting, and the `(state, event) -> state` transition.

pub mod format;
mod operations;
pub mod state;

pub use operations::{apply, Operator};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Division with a zero divisor
    #[error("Cannot divide by zero")]
    DivideByZero,

    /// A digit outside `0..=9`
    #[error("Invalid digit: {0:?}")]
    InvalidDigit(String),

    /// An operator symbol outside the supported set
    #[error("Unknown operator: {0:?}")]
    UnknownOperator(String),

    /// A key or button label with no calculator meaning
    #[error("Unknown key: {0:?}")]
    UnknownKey(String),
}
