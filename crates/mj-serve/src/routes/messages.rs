use crate::auth::credentials_from_headers;
use crate::routes::error::{error_response, unsupported_method, ErrorEnvelope};
use crate::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use mj_core::messages::SendMessage;
use mj_core::RelayError;
use tracing::debug;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/messages", post(send_message).fallback(unsupported_method))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/messages",
    request_body = SendMessage,
    responses(
        (status = 200, body = SendMessage),
        (status = 400, body = ErrorEnvelope),
        (status = 401, body = ErrorEnvelope),
        (status = 500, body = ErrorEnvelope)
    ),
    security(("basic_auth" = []))
)]
pub(crate) async fn send_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    debug!(payload = %String::from_utf8_lossy(&body), "message payload received");
    let message: SendMessage = match serde_json::from_slice(&body) {
        Ok(message) => message,
        Err(err) => {
            return error_response(RelayError::InvalidInput {
                message: err.to_string(),
            })
        }
    };
    let credentials = match credentials_from_headers(&headers) {
        Ok(credentials) => credentials,
        Err(err) => return error_response(err),
    };
    match state.relay.messages().send(&credentials, &message).await {
        Ok(()) => (
            [(CONTENT_TYPE, "application/json"), (CACHE_CONTROL, "no-cache")],
            body,
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}
