use crate::auth::credentials_from_headers;
use crate::routes::error::{error_response, unsupported_method, ErrorEnvelope};
use crate::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use mj_core::webhooks::EventSetup;
use mj_core::RelayError;
use mj_events::EventRecord;
use tracing::debug;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/apikey/{apikey}/events",
            get(list_events)
                .post(append_event)
                .fallback(unsupported_method),
        )
        .route(
            "/apikey/{apikey}/events/setup",
            post(setup_events).fallback(unsupported_method),
        )
        .with_state(state)
}

fn history_response(events: Vec<EventRecord>) -> Response {
    ([(CACHE_CONTROL, "no-cache")], Json(events)).into_response()
}

#[utoipa::path(
    get,
    path = "/apikey/{apikey}/events",
    params(("apikey" = String, Path, description = "Tenant API key")),
    responses(
        (status = 200, body = Vec<EventRecord>),
        (status = 400, body = ErrorEnvelope),
        (status = 500, body = ErrorEnvelope)
    )
)]
pub(crate) async fn list_events(
    State(state): State<AppState>,
    Path(api_key): Path<String>,
) -> Response {
    match state.relay.events().list(&api_key).await {
        Ok(events) => history_response(events),
        Err(err) => error_response(err),
    }
}

#[utoipa::path(
    post,
    path = "/apikey/{apikey}/events",
    params(("apikey" = String, Path, description = "Tenant API key")),
    request_body(content = Object, content_type = "application/json"),
    responses(
        (status = 200, body = Vec<EventRecord>),
        (status = 400, body = ErrorEnvelope),
        (status = 500, body = ErrorEnvelope)
    )
)]
pub(crate) async fn append_event(
    State(state): State<AppState>,
    Path(api_key): Path<String>,
    body: Bytes,
) -> Response {
    debug!(payload = %String::from_utf8_lossy(&body), "event payload received");
    match state.relay.events().append(&api_key, &body).await {
        Ok(events) => history_response(events),
        Err(err) => error_response(err),
    }
}

#[utoipa::path(
    post,
    path = "/apikey/{apikey}/events/setup",
    params(("apikey" = String, Path, description = "Tenant API key")),
    request_body = EventSetup,
    responses(
        (status = 200, body = EventSetup),
        (status = 400, body = ErrorEnvelope),
        (status = 401, body = ErrorEnvelope),
        (status = 500, body = ErrorEnvelope)
    ),
    security(("basic_auth" = []))
)]
pub(crate) async fn setup_events(
    State(state): State<AppState>,
    Path(_api_key): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    debug!(payload = %String::from_utf8_lossy(&body), "event setup payload received");
    let setup: EventSetup = match serde_json::from_slice(&body) {
        Ok(setup) => setup,
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
    match state.relay.webhooks().setup(&credentials, &setup).await {
        Ok(outcome) => {
            debug!(?outcome, event_type = %setup.event_type, "event callback reconciled");
            ([(CONTENT_TYPE, "application/json")], body).into_response()
        }
        Err(err) => error_response(err),
    }
}
