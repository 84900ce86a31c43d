//! Domain models shared by realms and their hosts.

use secrecy::SecretString;
use serde::Serialize;

/// A username/password presentation handed to a realm.
///
/// The password is wrapped in `SecretString`: `Debug` redacts it and the
/// buffer is zeroized when the token is dropped. Realms take the token by
/// value, so the secret does not outlive the `authenticate` call.
#[derive(Debug)]
pub struct UsernamePasswordToken {
    username: String,
    password: SecretString,
}

impl UsernamePasswordToken {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Build a token around an already-wrapped secret.
    #[must_use]
    pub fn with_secret(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    /// The claimed identity name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The presented secret.
    #[must_use]
    pub fn password(&self) -> &SecretString {
        &self.password
    }

    /// Split the token into its identity name and secret.
    #[must_use]
    pub fn into_parts(self) -> (String, SecretString) {
        (self.username, self.password)
    }
}

/// Identity produced by a successful authentication.
///
/// Owned by the caller. Roles keep the order in which they were configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedIdentity {
    principal: String,
    roles: Vec<String>,
}

impl AuthenticatedIdentity {
    #[must_use]
    pub fn new(principal: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            principal: principal.into(),
            roles,
        }
    }

    /// The authenticated identity name.
    #[must_use]
    pub fn principal(&self) -> &str {
        &self.principal
    }

    /// Granted roles, in configuration order.
    #[must_use]
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Result of presenting a credential to a realm.
///
/// `NotAuthenticated` carries no cause: an unknown identity and a wrong
/// secret are reported identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationOutcome {
    Authenticated(AuthenticatedIdentity),
    NotAuthenticated,
}

impl AuthenticationOutcome {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub fn identity(&self) -> Option<&AuthenticatedIdentity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::NotAuthenticated => None,
        }
    }

    #[must_use]
    pub fn into_identity(self) -> Option<AuthenticatedIdentity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::NotAuthenticated => None,
        }
    }
}

impl From<Option<AuthenticatedIdentity>> for AuthenticationOutcome {
    fn from(identity: Option<AuthenticatedIdentity>) -> Self {
        identity.map_or(Self::NotAuthenticated, Self::Authenticated)
    }
}
