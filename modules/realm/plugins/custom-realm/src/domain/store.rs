//! Immutable identity table backing the custom realm.

use std::collections::{BTreeMap, HashMap};

use secrecy::SecretString;

use crate::config::{PASSWORD_FIELD, ROLES_FIELD, RealmSettings, SettingValue, USERS_PREFIX};

use super::ConfigError;

#[derive(Debug)]
struct UserEntry {
    password: SecretString,
    roles: Vec<String>,
}

#[derive(Default)]
struct PendingUser {
    password: Option<SecretString>,
    roles: Option<Vec<String>>,
}

/// Identity name -> (expected secret, roles), fixed at construction.
///
/// There is no way to add, remove or change an entry once the store is
/// built; a new configuration means a new store. Reads need no locking.
#[derive(Debug)]
pub struct CredentialStore {
    users: HashMap<String, UserEntry>,
}

impl CredentialStore {
    /// Build the store from the `users.<name>.password` and
    /// `users.<name>.roles` keys of a settings snapshot. Other keys are
    /// ignored here.
    ///
    /// A missing `roles` key means no roles. A single-string `roles` value is
    /// split on commas.
    ///
    /// # Errors
    ///
    /// - `EmptyIdentityName` for keys such as `users..password`
    /// - `MissingPassword` / `EmptyPassword` for identities without a usable
    ///   password; with several, the lowest identity name is reported
    /// - `MalformedRoles` for role lists with empty entries
    /// - `UnknownSetting` for any other `users.*` key
    /// - `InvalidValue` if a password is given as a list
    pub fn from_settings(settings: &RealmSettings) -> Result<Self, ConfigError> {
        // Ordered so that the reported error does not depend on hashing.
        let mut pending: BTreeMap<String, PendingUser> = BTreeMap::new();

        for (key, value) in settings.iter() {
            let Some(rest) = key.strip_prefix(USERS_PREFIX) else {
                continue;
            };
            // The field is the last segment; identity names may contain dots.
            let Some((identity, field)) = rest.rsplit_once('.') else {
                return Err(ConfigError::UnknownSetting {
                    key: key.to_owned(),
                });
            };
            if identity.is_empty() {
                return Err(ConfigError::EmptyIdentityName {
                    key: key.to_owned(),
                });
            }

            let entry = pending.entry(identity.to_owned()).or_default();
            match field {
                PASSWORD_FIELD => {
                    let password = crate::config::single(key, value)?;
                    if password.is_empty() {
                        return Err(ConfigError::EmptyPassword {
                            identity: identity.to_owned(),
                        });
                    }
                    entry.password = Some(SecretString::from(password.to_owned()));
                }
                ROLES_FIELD => entry.roles = Some(parse_roles(identity, value)?),
                _ => {
                    return Err(ConfigError::UnknownSetting {
                        key: key.to_owned(),
                    });
                }
            }
        }

        let users = pending
            .into_iter()
            .map(|(identity, user)| {
                let Some(password) = user.password else {
                    return Err(ConfigError::MissingPassword { identity });
                };
                let roles = user.roles.unwrap_or_default();
                Ok((identity, UserEntry { password, roles }))
            })
            .collect::<Result<HashMap<_, _>, _>>()?;

        Ok(Self { users })
    }

    /// Expected secret and roles for `identity`, if configured.
    #[must_use]
    pub fn lookup(&self, identity: &str) -> Option<(&SecretString, &[String])> {
        self.users
            .get(identity)
            .map(|entry| (&entry.password, entry.roles.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

fn parse_roles(identity: &str, value: &SettingValue) -> Result<Vec<String>, ConfigError> {
    let malformed = |reason: &str| ConfigError::MalformedRoles {
        identity: identity.to_owned(),
        reason: reason.to_owned(),
    };

    match value {
        SettingValue::Single(s) if s.trim().is_empty() => Ok(Vec::new()),
        SettingValue::Single(s) => s
            .split(',')
            .map(str::trim)
            .map(|role| {
                if role.is_empty() {
                    Err(malformed("empty role in comma-separated list"))
                } else {
                    Ok(role.to_owned())
                }
            })
            .collect(),
        SettingValue::List(roles) => roles
            .iter()
            .map(|role| {
                let role = role.trim();
                if role.is_empty() {
                    Err(malformed("empty role in list"))
                } else {
                    Ok(role.to_owned())
                }
            })
            .collect(),
    }
}
