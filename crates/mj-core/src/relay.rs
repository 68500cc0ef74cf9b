use crate::config::Config;
use crate::credentials::Credentials;
use crate::error::RelayError;
use crate::gateway::Gateway;
use crate::messages::{self, SendMessage};
use crate::webhooks::{self, EventSetup, RegistrationOutcome};
use mj_events::{EventRecord, EventStore, TenantKey};
use std::sync::Arc;

/// Entry point shared by every request handler.
///
/// The event store and the provider gateway never interact: store calls hold
/// a tenant lock only for local file work, and provider calls run without
/// any store lock held.
pub struct Relay<G: Gateway> {
    config: Arc<Config>,
    store: EventStore,
    gateway: G,
}

impl<G: Gateway> Relay<G> {
    pub fn new(config: Arc<Config>, store: EventStore, gateway: G) -> Self {
        Self {
            config,
            store,
            gateway,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn events(&self) -> EventsApi<'_, G> {
        EventsApi { core: self }
    }

    pub fn webhooks(&self) -> WebhooksApi<'_, G> {
        WebhooksApi { core: self }
    }

    pub fn messages(&self) -> MessagesApi<'_, G> {
        MessagesApi { core: self }
    }
}

pub struct EventsApi<'a, G: Gateway> {
    core: &'a Relay<G>,
}

impl<G: Gateway> EventsApi<'_, G> {
    pub async fn append(&self, api_key: &str, raw: &[u8]) -> Result<Vec<EventRecord>, RelayError> {
        let key = TenantKey::parse(api_key)?;
        Ok(self.core.store.append(&key, raw).await?)
    }

    pub async fn list(&self, api_key: &str) -> Result<Vec<EventRecord>, RelayError> {
        let key = TenantKey::parse(api_key)?;
        Ok(self.core.store.read(&key).await?)
    }
}

pub struct WebhooksApi<'a, G: Gateway> {
    core: &'a Relay<G>,
}

impl<G: Gateway> WebhooksApi<'_, G> {
    pub async fn setup(
        &self,
        credentials: &Credentials,
        setup: &EventSetup,
    ) -> Result<RegistrationOutcome, RelayError> {
        let outcome = webhooks::reconcile(
            &self.core.gateway,
            &self.core.config.base_url,
            credentials,
            setup,
        )
        .await?;
        Ok(outcome)
    }
}

pub struct MessagesApi<'a, G: Gateway> {
    core: &'a Relay<G>,
}

impl<G: Gateway> MessagesApi<'_, G> {
    pub async fn send(
        &self,
        credentials: &Credentials,
        message: &SendMessage,
    ) -> Result<(), RelayError> {
        messages::send(
            &self.core.gateway,
            &self.core.config.base_url,
            credentials,
            message,
        )
        .await?;
        Ok(())
    }
}
