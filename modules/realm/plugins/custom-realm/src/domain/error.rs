//! Construction-time errors for the custom realm.
//!
//! Messages name keys and identities but never echo setting values, so a
//! misconfigured password cannot leak through an error report.

/// Configuration errors. Any of these aborts realm construction.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("realm name must not be empty")]
    EmptyRealmName,

    #[error("identity name must not be empty (setting '{key}')")]
    EmptyIdentityName { key: String },

    #[error("identity '{identity}' has no password")]
    MissingPassword { identity: String },

    #[error("identity '{identity}' has an empty password")]
    EmptyPassword { identity: String },

    #[error("malformed role list for identity '{identity}': {reason}")]
    MalformedRoles { identity: String, reason: String },

    #[error("unknown setting '{key}'")]
    UnknownSetting { key: String },

    #[error("invalid value for setting '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("realm type mismatch: expected '{expected}', found '{actual}'")]
    TypeMismatch {
        expected: &'static str,
        actual: String,
    },

    #[error("malformed settings document: {0}")]
    MalformedDocument(String),
}
