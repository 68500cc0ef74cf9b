use crate::error::EventError;
use crate::types::EventRecord;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct Notification {
    #[serde(default)]
    event: Option<String>,
}

/// Decodes an inbound webhook body into an [`EventRecord`].
///
/// The body is parsed once into an untyped value, which is kept as the
/// payload, and read a second time for the `event` tag. A missing or null
/// tag becomes an empty string.
pub fn decode(raw: &[u8]) -> Result<EventRecord, EventError> {
    let payload: Value = serde_json::from_slice(raw).map_err(|err| EventError::MalformedPayload {
        message: err.to_string(),
    })?;
    if !payload.is_object() {
        return Err(EventError::MalformedPayload {
            message: "expected a JSON object".to_string(),
        });
    }
    let notification =
        Notification::deserialize(&payload).map_err(|err| EventError::MalformedPayload {
            message: err.to_string(),
        })?;
    Ok(EventRecord::new(
        notification.event.unwrap_or_default(),
        payload,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_event_tag_and_keeps_payload() {
        let record = decode(br#"{"event":"open","CustomerID":"42"}"#).unwrap();
        assert_eq!(record.event_type, "open");
        assert_eq!(record.payload, json!({"event": "open", "CustomerID": "42"}));
    }

    #[test]
    fn missing_event_tag_is_empty() {
        let record = decode(br#"{"MessageID":7}"#).unwrap();
        assert_eq!(record.event_type, "");
        assert_eq!(record.payload["MessageID"], 7);
    }

    #[test]
    fn null_event_tag_is_empty() {
        let record = decode(br#"{"event":null}"#).unwrap();
        assert_eq!(record.event_type, "");
    }

    #[test]
    fn unknown_fields_keep_their_order() {
        let raw = r#"{"zeta":1,"event":"bounce","alpha":{"nested":[1,2]}}"#;
        let record = decode(raw.as_bytes()).unwrap();
        assert_eq!(serde_json::to_string(&record.payload).unwrap(), raw);
    }

    #[test]
    fn rejects_invalid_json() {
        let err = decode(b"{not json").unwrap_err();
        assert!(matches!(err, EventError::MalformedPayload { .. }));
    }

    #[test]
    fn rejects_non_object_bodies() {
        for raw in [&b"[1,2]"[..], b"\"open\"", b"12"] {
            let err = decode(raw).unwrap_err();
            assert!(matches!(err, EventError::MalformedPayload { .. }));
        }
    }

    #[test]
    fn rejects_non_string_event_tag() {
        let err = decode(br#"{"event":5}"#).unwrap_err();
        assert!(matches!(err, EventError::MalformedPayload { .. }));
    }
}
