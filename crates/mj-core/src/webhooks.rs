//! Webhook callback registration against the provider.
//!
//! The provider keys callback registrations by event type per API key and
//! only offers GET, POST and PUT, so an upsert is a check followed by a
//! create or a replace:
//!
//! - GET `…/eventcallbackurl/{type}|false`
//! - 404: POST the collection, any 2xx accepted
//! - 200: PUT the per-type resource, only 200 accepted
//! - anything else: fail without writing
//!
//! Two concurrent reconciles for the same key and event type can both see
//! 404 and both POST, or both PUT. The provider resolves that last write
//! wins, so no local locking is attempted.

use crate::credentials::Credentials;
use crate::error::WebhookError;
use crate::gateway::Gateway;
use reqwest::{Method, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use utoipa::ToSchema;

const EVENT_CALLBACK_PATH: &str = "v3/REST/eventcallbackurl";
/// Second half of the provider's per-type locator, selecting the
/// non-backup registration.
const NON_BACKUP_SUFFIX: &str = "false";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct EventSetup {
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub callback_url: String,
}

impl EventSetup {
    fn validate(&self) -> Result<(), WebhookError> {
        if self.event_type.is_empty() {
            return Err(WebhookError::InvalidInput {
                message: "EventType is mandatory".to_string(),
            });
        }
        if self.callback_url.is_empty() {
            return Err(WebhookError::InvalidInput {
                message: "CallbackUrl is mandatory".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Created,
    Updated,
}

pub fn collection_url(base_url: &str) -> Result<Url, WebhookError> {
    let base = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&base)
        .and_then(|url| url.join(EVENT_CALLBACK_PATH))
        .map_err(|err| WebhookError::InvalidUrl {
            message: err.to_string(),
        })
}

pub fn event_url(base_url: &str, event_type: &str) -> Result<Url, WebhookError> {
    let mut url = collection_url(base_url)?;
    url.path_segments_mut()
        .map_err(|()| WebhookError::InvalidUrl {
            message: format!("{base_url} cannot be a base"),
        })?
        .push(&format!("{event_type}|{NON_BACKUP_SUFFIX}"));
    Ok(url)
}

pub async fn reconcile<G: Gateway>(
    gateway: &G,
    base_url: &str,
    credentials: &Credentials,
    setup: &EventSetup,
) -> Result<RegistrationOutcome, WebhookError> {
    setup.validate()?;
    let collection = collection_url(base_url)?;
    let resource = event_url(base_url, &setup.event_type)?;

    let existing = gateway
        .call(Method::GET, resource.as_str(), None, credentials)
        .await?;
    match existing.status {
        StatusCode::NOT_FOUND => {
            let body = json!({ "EventType": setup.event_type, "Url": setup.callback_url });
            let created = gateway
                .call(Method::POST, collection.as_str(), Some(&body), credentials)
                .await?;
            if !created.status.is_success() {
                warn!(event_type = %setup.event_type, status = %created.status, "callback registration rejected");
                return Err(WebhookError::RegistrationFailed {
                    status: created.status,
                });
            }
            info!(event_type = %setup.event_type, "callback registered");
            Ok(RegistrationOutcome::Created)
        }
        StatusCode::OK => {
            let body = json!({ "Url": setup.callback_url });
            let replaced = gateway
                .call(Method::PUT, resource.as_str(), Some(&body), credentials)
                .await?;
            if replaced.status != StatusCode::OK {
                warn!(event_type = %setup.event_type, status = %replaced.status, "callback update rejected");
                return Err(WebhookError::RegistrationFailed {
                    status: replaced.status,
                });
            }
            info!(event_type = %setup.event_type, "callback updated");
            Ok(RegistrationOutcome::Updated)
        }
        status => {
            warn!(event_type = %setup.event_type, %status, "callback lookup failed");
            Err(WebhookError::RegistrationFailed { status })
        }
    }
}
