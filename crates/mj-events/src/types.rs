use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// One inbound provider notification as kept in a tenant's history.
///
/// `payload` is the untouched decoded body, so fields the provider adds later
/// survive a store round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct EventRecord {
    pub event_type: String,
    pub payload: Value,
}

impl EventRecord {
    pub fn new(event_type: impl Into<String>, payload: Value) -> Self {
        Self {
            event_type: event_type.into(),
            payload,
        }
    }
}
