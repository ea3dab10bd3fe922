//! Per-request outcome type and batch projection helpers
//!
//! `Outcome` is the unit of result reporting for one dispatched request.
//! Partial failure is the normal case for a batch: some outcomes succeed,
//! some fail, and all are returned together in input order for the caller
//! to inspect.

use crate::error::DispatchError;
use serde::{Deserialize, Serialize};

/// Result of one dispatched operation: exactly one of a success payload or
/// an error describing why the operation did not complete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Outcome<T> {
    /// Operation completed; carries the payload (e.g. response body text).
    Success(T),
    /// Operation did not complete.
    Failure(DispatchError),
}

impl<T> Outcome<T> {
    /// Check whether this outcome carries a success payload.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Check whether this outcome carries an error.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// The success payload, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// The error, if any.
    pub fn error(&self) -> Option<&DispatchError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Convert into a standard `Result`.
    pub fn into_result(self) -> Result<T, DispatchError> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(error) => Err(error),
        }
    }
}

/// Project a batch of outcomes into two parallel vectors of equal length.
///
/// `values[i]` holds the payload for a success and `T::default()` for a
/// failure; `errors[i]` is `None` for a success and the error for a failure.
/// This supports callers that want positional correlation between inputs,
/// values, and errors instead of matching on the enum directly.
pub fn unpack_outcomes<T: Default>(
    outcomes: Vec<Outcome<T>>,
) -> (Vec<T>, Vec<Option<DispatchError>>) {
    let mut values = Vec::with_capacity(outcomes.len());
    let mut errors = Vec::with_capacity(outcomes.len());

    for outcome in outcomes {
        match outcome {
            Outcome::Success(value) => {
                values.push(value);
                errors.push(None);
            }
            Outcome::Failure(error) => {
                values.push(T::default());
                errors.push(Some(error));
            }
        }
    }

    (values, errors)
}
