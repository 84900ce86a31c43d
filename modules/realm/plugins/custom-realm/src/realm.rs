//! Custom realm construction.

use std::sync::Arc;

use realm_sdk::{AuthenticationOutcome, RealmClient, UsernamePasswordToken};
use tracing::{info, warn};

use crate::config::{REALM_TYPE, RealmConfig, RealmOptions};
use crate::domain::{ConfigError, CredentialStore, Service};

/// Custom realm.
///
/// The host builds one per configured realm of type `custom` and registers
/// [`CustomRealm::client`] in its realm chain. Construction either yields a
/// fully usable realm or a [`ConfigError`]; there is no half-built state.
#[derive(Debug, Clone)]
pub struct CustomRealm {
    service: Arc<Service>,
}

impl CustomRealm {
    pub const TYPE: &'static str = REALM_TYPE;

    /// Build the realm from its configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the realm name is empty, a realm-level
    /// setting is invalid, or any user definition is malformed.
    #[tracing::instrument(skip_all, fields(realm = %config.name))]
    pub fn new(config: &RealmConfig) -> Result<Self, ConfigError> {
        if config.name.is_empty() {
            return Err(ConfigError::EmptyRealmName);
        }

        let options = RealmOptions::from_settings(&config.settings)?;
        let store = CredentialStore::from_settings(&config.settings)?;

        if store.is_empty() {
            warn!("Custom realm has no users configured; every attempt will be rejected");
        }
        if !options.enabled {
            warn!("Custom realm is disabled");
        }

        info!(
            order = options.order,
            enabled = options.enabled,
            user_count = store.len(),
            "Custom realm initialized"
        );

        Ok(Self {
            service: Arc::new(Service::new(config.name.clone(), options, store)),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.service.realm_name()
    }

    #[must_use]
    pub fn options(&self) -> RealmOptions {
        self.service.options()
    }

    /// Verify a token directly, bypassing the `enabled` switch.
    #[must_use]
    pub fn authenticate(&self, token: UsernamePasswordToken) -> AuthenticationOutcome {
        self.service.authenticate(token)
    }

    /// Handle for the host's realm chain.
    #[must_use]
    pub fn client(&self) -> Arc<dyn RealmClient> {
        self.service.clone()
    }
}
