//! Credential verification for the custom realm.

use realm_sdk::{AuthenticatedIdentity, AuthenticationOutcome, UsernamePasswordToken};
use secrecy::{ExposeSecret, SecretString};
use subtle::{Choice, ConstantTimeEq};
use tracing::debug;
use zeroize::Zeroizing;

use crate::config::RealmOptions;

use super::store::CredentialStore;

// Compared against when the identity is unknown, so that path copies and
// compares as much as a wrong password does.
const DECOY_SECRET: &str = "custom-realm-decoy-secret";

/// Custom realm service.
///
/// Stateless per call: every `authenticate` is an independent read of the
/// immutable [`CredentialStore`], so the service can be shared across
/// threads as is.
#[derive(Debug)]
pub struct Service {
    realm_name: String,
    options: RealmOptions,
    store: CredentialStore,
    decoy: SecretString,
}

impl Service {
    #[must_use]
    pub fn new(realm_name: impl Into<String>, options: RealmOptions, store: CredentialStore) -> Self {
        Self {
            realm_name: realm_name.into(),
            options,
            store,
            decoy: SecretString::from(DECOY_SECRET.to_owned()),
        }
    }

    #[must_use]
    pub fn realm_name(&self) -> &str {
        &self.realm_name
    }

    #[must_use]
    pub fn options(&self) -> RealmOptions {
        self.options
    }

    #[must_use]
    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Verify a username/password token.
    ///
    /// Unknown identities and wrong secrets both yield `NotAuthenticated`
    /// after the same amount of work. The presented secret and every buffer
    /// it was copied into are zeroized before this returns, whichever way it
    /// returns.
    #[must_use]
    pub fn authenticate(&self, token: UsernamePasswordToken) -> AuthenticationOutcome {
        let (username, password) = token.into_parts();

        let entry = self.store.lookup(&username);
        let expected = entry.map_or(&self.decoy, |(secret, _)| secret);
        let known = Choice::from(u8::from(entry.is_some()));
        let matched: bool = (known
            & secrets_match(
                password.expose_secret().as_bytes(),
                expected.expose_secret().as_bytes(),
            ))
        .into();
        drop(password);

        let outcome = match entry {
            Some((_, roles)) if matched => {
                AuthenticationOutcome::Authenticated(AuthenticatedIdentity::new(
                    username.as_str(),
                    roles.to_vec(),
                ))
            }
            _ => AuthenticationOutcome::NotAuthenticated,
        };

        debug!(
            realm = %self.realm_name,
            principal = %username,
            authenticated = outcome.is_authenticated(),
            "Authentication attempt"
        );

        outcome
    }
}

/// Constant-time equality of two secrets.
///
/// Both sides are copied into zero-padded buffers of a common width (at
/// least the expected secret's length), so the byte comparison always runs
/// over the full width and the length check is folded in without branching.
/// The padded copies are wiped on drop.
fn secrets_match(presented: &[u8], expected: &[u8]) -> Choice {
    let width = presented.len().max(expected.len());
    let presented_buf = padded(presented, width);
    let expected_buf = padded(expected, width);

    presented_buf.as_slice().ct_eq(expected_buf.as_slice())
        & presented.len().ct_eq(&expected.len())
}

fn padded(secret: &[u8], width: usize) -> Zeroizing<Vec<u8>> {
    let mut buf = Zeroizing::new(vec![0u8; width]);
    buf.as_mut_slice()[..secret.len()].copy_from_slice(secret);
    buf
}
