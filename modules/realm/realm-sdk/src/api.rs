//! Realm API trait.
//!
//! Hosts hold realms behind this trait and walk them in `order` until one
//! authenticates the presented credential.

use async_trait::async_trait;

use crate::error::RealmError;
use crate::models::{AuthenticationOutcome, UsernamePasswordToken};

/// Realm API trait.
///
/// ```ignore
/// let mut realms: Vec<Arc<dyn RealmClient>> = vec![custom.client()];
/// realms.sort_by_key(|r| r.order());
///
/// for realm in &realms {
///     if let AuthenticationOutcome::Authenticated(id) = realm.authenticate(token).await? {
///         return Ok(id);
///     }
/// }
/// ```
#[async_trait]
pub trait RealmClient: Send + Sync {
    /// Name the realm was configured under.
    fn realm_name(&self) -> &str;

    /// Realm implementation type (e.g. `custom`).
    fn realm_type(&self) -> &str;

    /// Position of the realm in the host's chain (lower runs first).
    fn order(&self) -> i32;

    /// Verify a username/password presentation.
    ///
    /// The token is consumed; its secret is zeroized before this returns.
    ///
    /// # Errors
    ///
    /// - `Disabled` if the realm is switched off in configuration
    /// - `Internal` for unexpected errors
    ///
    /// A wrong or unknown credential is `Ok(AuthenticationOutcome::NotAuthenticated)`.
    async fn authenticate(
        &self,
        token: UsernamePasswordToken,
    ) -> Result<AuthenticationOutcome, RealmError>;
}
