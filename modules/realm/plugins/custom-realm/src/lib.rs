#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Custom Realm
//!
//! Username/password realm backed by a static identity table taken from the
//! realm's settings. Each identity has a password and an ordered list of
//! roles; a successful authentication returns the principal with those roles.
//!
//! Passwords are compared in constant time and presented secrets are wiped
//! as soon as the comparison is done. An unknown identity and a wrong
//! password produce the same `NotAuthenticated` outcome.
//!
//! ## Configuration
//!
//! ```yaml
//! realms:
//!   - name: "file_users"
//!     settings:
//!       type: custom
//!       order: 0
//!       users:
//!         john:
//!           password: "doe"
//!           roles: "user"
//!         jane:
//!           password: "test"
//!           roles: ["user", "admin"]
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let realm = CustomRealm::new(&config)?;
//! let chain: Vec<Arc<dyn RealmClient>> = vec![realm.client()];
//! ```

pub mod config;
pub mod domain;
pub mod realm;

pub use config::{REALM_TYPE, RealmConfig, RealmSettings};
pub use domain::{ConfigError, CredentialStore, extract_token};
pub use realm::CustomRealm;
