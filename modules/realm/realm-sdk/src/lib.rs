#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Realm SDK
//!
//! This crate provides the public API shared by authentication realms and
//! the hosts that embed them:
//!
//! - [`RealmClient`] - Realm API trait consumed by the host
//! - [`UsernamePasswordToken`] - Credential presentation handed to a realm
//! - [`AuthenticationOutcome`] / [`AuthenticatedIdentity`] - Result models
//! - [`RealmError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use realm_sdk::{AuthenticationOutcome, RealmClient, UsernamePasswordToken};
//!
//! let token = UsernamePasswordToken::new("john", "doe");
//! match realm.authenticate(token).await? {
//!     AuthenticationOutcome::Authenticated(identity) => grant(identity.roles()),
//!     AuthenticationOutcome::NotAuthenticated => try_next_realm(),
//! }
//! ```

pub mod api;
pub mod error;
pub mod models;

// Re-export main types at crate root
pub use api::RealmClient;
pub use error::RealmError;
pub use models::{AuthenticatedIdentity, AuthenticationOutcome, UsernamePasswordToken};
