use crate::credentials::Credentials;
use crate::error::MessageError;
use crate::gateway::Gateway;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

const SEND_PATH: &str = "/v3/send/message";

/// Dashboard-side message; `Recipient` falls back to `FromEmail`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct SendMessage {
    #[serde(default)]
    pub from_email: String,
    #[serde(default)]
    pub recipient: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct ProviderMessage<'a> {
    #[serde(rename = "FromEmail")]
    from_email: &'a str,
    #[serde(rename = "Subject")]
    subject: &'a str,
    #[serde(rename = "To")]
    to: &'a str,
    #[serde(rename = "Html-part")]
    body: &'a str,
}

impl SendMessage {
    fn to_provider(&self) -> Result<ProviderMessage<'_>, MessageError> {
        if self.from_email.is_empty() {
            return Err(invalid("FromEmail is mandatory"));
        }
        let to = if self.recipient.is_empty() {
            &self.from_email
        } else {
            &self.recipient
        };
        if self.subject.is_empty() {
            return Err(invalid("Subject is mandatory"));
        }
        if self.body.is_empty() {
            return Err(invalid("Body is mandatory"));
        }
        Ok(ProviderMessage {
            from_email: &self.from_email,
            subject: &self.subject,
            to,
            body: &self.body,
        })
    }
}

pub fn send_url(base_url: &str) -> String {
    format!("{}{SEND_PATH}", base_url.trim_end_matches('/'))
}

pub async fn send<G: Gateway>(
    gateway: &G,
    base_url: &str,
    credentials: &Credentials,
    message: &SendMessage,
) -> Result<(), MessageError> {
    let outbound = message.to_provider()?;
    let body = serde_json::to_value(&outbound).map_err(|err| MessageError::Encode {
        message: err.to_string(),
    })?;
    let response = gateway
        .call(Method::POST, &send_url(base_url), Some(&body), credentials)
        .await?;
    if response.status != StatusCode::OK {
        warn!(status = %response.status, "send rejected by provider");
        return Err(MessageError::Rejected {
            status: response.status,
        });
    }
    info!(to = outbound.to, "message relayed");
    Ok(())
}

fn invalid(message: &str) -> MessageError {
    MessageError::InvalidInput {
        message: message.to_string(),
    }
}
