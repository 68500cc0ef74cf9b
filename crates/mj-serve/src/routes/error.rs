use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use mj_core::error::{MessageError, WebhookError};
use mj_core::RelayError;
use mj_events::EventError;
use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorEnvelope {
    #[serde(rename = "ErrorMessage")]
    pub error_message: String,
}

pub fn map_error(err: &RelayError) -> (StatusCode, Json<ErrorEnvelope>) {
    let status = match err {
        RelayError::Events(events) => map_event_error(events),
        RelayError::Auth(_) => StatusCode::UNAUTHORIZED,
        RelayError::Webhook(webhook) => map_webhook_error(webhook),
        RelayError::Message(message) => map_message_error(message),
        RelayError::UnsupportedMethod { .. } => StatusCode::METHOD_NOT_ALLOWED,
        RelayError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
    };

    if status.is_server_error() {
        error!(%status, error = %err, "request failed");
    } else {
        warn!(%status, error = %err, "request rejected");
    }

    (
        status,
        Json(ErrorEnvelope {
            error_message: err.to_string(),
        }),
    )
}

pub fn error_response(err: impl Into<RelayError>) -> Response {
    map_error(&err.into()).into_response()
}

/// Method fallback for every JSON route.
pub(crate) async fn unsupported_method(method: Method) -> Response {
    error_response(RelayError::UnsupportedMethod {
        method: method.to_string(),
    })
}

fn map_event_error(err: &EventError) -> StatusCode {
    match err {
        EventError::MalformedPayload { .. } | EventError::InvalidTenantKey => {
            StatusCode::BAD_REQUEST
        }
        EventError::StoreCorrupt { .. } | EventError::Io { .. } | EventError::Encode { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn map_webhook_error(err: &WebhookError) -> StatusCode {
    match err {
        WebhookError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        WebhookError::InvalidUrl { .. } | WebhookError::Upstream(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        WebhookError::RegistrationFailed { status } => upstream_status(*status),
    }
}

fn map_message_error(err: &MessageError) -> StatusCode {
    match err {
        MessageError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        MessageError::Encode { .. } | MessageError::Upstream(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        MessageError::Rejected { status } => upstream_status(*status),
    }
}

/// Provider failure statuses pass through; a non-error status that still
/// failed the exchange (a 3xx, or a 201 where 200 was required) becomes 502.
fn upstream_status(status: StatusCode) -> StatusCode {
    if status.is_client_error() || status.is_server_error() {
        status
    } else {
        StatusCode::BAD_GATEWAY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mj_core::error::{AuthError, GatewayError};

    #[test]
    fn client_errors_map_to_4xx() {
        let cases: Vec<(RelayError, StatusCode)> = vec![
            (
                EventError::MalformedPayload {
                    message: "eof".to_string(),
                }
                .into(),
                StatusCode::BAD_REQUEST,
            ),
            (EventError::InvalidTenantKey.into(), StatusCode::BAD_REQUEST),
            (AuthError::MissingSecret.into(), StatusCode::UNAUTHORIZED),
            (
                RelayError::UnsupportedMethod {
                    method: "PUT".to_string(),
                },
                StatusCode::METHOD_NOT_ALLOWED,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(map_error(&err).0, expected);
        }
    }

    #[test]
    fn client_error_messages_match_dashboard_text() {
        let (_, body) = map_error(&EventError::InvalidTenantKey.into());
        assert_eq!(body.error_message, "An API Key must be provided");

        let (_, body) = map_error(&RelayError::UnsupportedMethod {
            method: "PATCH".to_string(),
        });
        assert_eq!(body.error_message, "Unsupported method: PATCH");
    }

    #[test]
    fn local_and_transport_failures_map_to_500() {
        let corrupt: RelayError = EventError::StoreCorrupt {
            path: "events_a.json".to_string(),
            message: "eof".to_string(),
        }
        .into();
        let upstream: RelayError = WebhookError::Upstream(GatewayError::Unavailable {
            message: "refused".to_string(),
        })
        .into();
        let encode: RelayError = MessageError::Encode {
            message: "key must be a string".to_string(),
        }
        .into();
        assert_eq!(map_error(&corrupt).0, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(map_error(&upstream).0, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(map_error(&encode).0, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn provider_rejections_pass_status_through() {
        let err: RelayError = WebhookError::RegistrationFailed {
            status: StatusCode::FORBIDDEN,
        }
        .into();
        let (status, body) = map_error(&err);
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body.error_message, "403 Forbidden");
    }

    #[test]
    fn non_error_provider_status_becomes_bad_gateway() {
        let err: RelayError = MessageError::Rejected {
            status: StatusCode::ACCEPTED,
        }
        .into();
        assert_eq!(map_error(&err).0, StatusCode::BAD_GATEWAY);
    }
}
