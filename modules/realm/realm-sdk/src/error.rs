//! Error types for realm calls.

use thiserror::Error;

/// Errors that can occur when calling a realm.
///
/// A rejected credential is not an error: it is reported as
/// [`AuthenticationOutcome::NotAuthenticated`](crate::AuthenticationOutcome::NotAuthenticated).
#[derive(Debug, Error)]
pub enum RealmError {
    /// The realm is configured but switched off.
    #[error("realm '{0}' is disabled")]
    Disabled(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}
