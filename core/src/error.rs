//! Errors surfaced by community operations.
//!
//! Callers see two failure kinds for the RSVP path: the event does not exist,
//! or the store could not be read or written. Validation failures of incoming
//! payloads form a third kind. None of them is retried automatically.

use crate::ledger::LedgerError;
use crate::store::StoreError;
use thiserror::Error;

/// Failure of a service-level operation.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The addressed document does not exist.
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Kind of document, e.g. `"Event"`
        resource: &'static str,
        /// Identifier as supplied by the caller
        id: String,
    },

    /// The payload failed validation.
    #[error("{0}")]
    Validation(String),

    /// The store is unreachable or rejected the operation.
    #[error("Persistence failure: {0}")]
    Persistence(#[from] StoreError),
}

impl ServiceError {
    /// Builds a [`ServiceError::NotFound`].
    #[must_use]
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Whether this is a not-found failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<LedgerError> for ServiceError {
    fn from(err: LedgerError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = ServiceError::not_found("Event", "abc");
        assert_eq!(err.to_string(), "Event not found: abc");
        assert!(err.is_not_found());
    }

    #[test]
    fn ledger_errors_become_validation_errors() {
        let err: ServiceError = LedgerError::InvalidResponse("sure".to_string()).into();
        assert!(matches!(err, ServiceError::Validation(m) if m.contains("sure")));
    }

    #[test]
    fn store_errors_become_persistence_failures() {
        let err: ServiceError = StoreError::Unavailable("connection refused".to_string()).into();
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("connection refused"));
    }
}
