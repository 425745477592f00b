//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from store/IO errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// Trip stop list violates an ordering invariant
    #[error("invalid stop list: {0}")]
    InvalidStopList(&'static str),

    /// Service calendar window is inconsistent
    #[error("invalid calendar: {0}")]
    InvalidCalendar(&'static str),
}
