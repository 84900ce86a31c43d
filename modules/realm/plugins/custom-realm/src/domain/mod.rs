//! Domain layer for the custom realm.

pub mod client;
pub mod error;
pub mod service;
pub mod store;
pub mod token;

pub use error::ConfigError;
pub use service::Service;
pub use store::CredentialStore;
pub use token::extract_token;
