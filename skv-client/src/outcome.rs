//! Resolved result of an operation that needs an existing record.
//!
//! Absence is an expected outcome, not a fault, so it resolves as a value
//! instead of an `Err`. Callers that want exception-style flow can promote it
//! with [`Outcome::done_or_err`].

use skv_common::{SkvError, SkvResult};

/// `Done` with the operation's value, or `NotFound` when the endpoint held no
/// record.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Done(T),
    NotFound { endpoint: String },
}

impl<T> Outcome<T> {
    pub(crate) fn not_found(endpoint: &str) -> Self {
        Outcome::NotFound {
            endpoint: endpoint.to_string(),
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Outcome::NotFound { .. })
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Outcome::Done(value) => Some(value),
            Outcome::NotFound { .. } => None,
        }
    }

    pub fn as_ref(&self) -> Outcome<&T> {
        match self {
            Outcome::Done(value) => Outcome::Done(value),
            Outcome::NotFound { endpoint } => Outcome::NotFound {
                endpoint: endpoint.clone(),
            },
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Done(value) => Outcome::Done(f(value)),
            Outcome::NotFound { endpoint } => Outcome::NotFound { endpoint },
        }
    }

    /// Turns `NotFound` into `SkvError::NotFound`.
    pub fn done_or_err(self) -> SkvResult<T> {
        match self {
            Outcome::Done(value) => Ok(value),
            Outcome::NotFound { endpoint } => Err(SkvError::NotFound { endpoint }),
        }
    }
}
