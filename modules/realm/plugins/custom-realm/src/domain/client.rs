//! Client implementation for the custom realm.
//!
//! Implements `RealmClient` using the domain service.

use async_trait::async_trait;
use realm_sdk::{AuthenticationOutcome, RealmClient, RealmError, UsernamePasswordToken};
use tracing::warn;

use super::service::Service;
use crate::config::REALM_TYPE;

#[async_trait]
impl RealmClient for Service {
    fn realm_name(&self) -> &str {
        Service::realm_name(self)
    }

    fn realm_type(&self) -> &str {
        REALM_TYPE
    }

    fn order(&self) -> i32 {
        self.options().order
    }

    async fn authenticate(
        &self,
        token: UsernamePasswordToken,
    ) -> Result<AuthenticationOutcome, RealmError> {
        if !self.options().enabled {
            warn!(realm = %Service::realm_name(self), "Authentication attempted against disabled realm");
            return Err(RealmError::Disabled(Service::realm_name(self).to_owned()));
        }
        Ok(self.authenticate(token))
    }
}
