/// Faults a calculator can run into. They never reach the caller of the solver:
/// the entry point replaces the failed solution with the general fallback.
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SolverError {
    #[error("division by zero while computing {quantity}")]
    DivisionByZero { quantity: &'static str },
    #[error("non-finite value for {quantity}")]
    NonFinite { quantity: &'static str },
}

/// Divides and reports a zero divisor instead of producing inf/NaN
pub fn checked_div(numerator: f64, denominator: f64, quantity: &'static str) -> Result<f64, SolverError> {
    if denominator == 0.0 {
        return Err(SolverError::DivisionByZero { quantity });
    }
    finite(numerator / denominator, quantity)
}

pub fn finite(value: f64, quantity: &'static str) -> Result<f64, SolverError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SolverError::NonFinite { quantity })
    }
}
