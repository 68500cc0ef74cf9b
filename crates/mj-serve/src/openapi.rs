use crate::routes::error::ErrorEnvelope;
use axum::routing::get;
use axum::{Json, Router};
use mj_core::messages::SendMessage;
use mj_core::webhooks::EventSetup;
use mj_core::Config;
use mj_events::EventRecord;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::config::get_config,
        crate::routes::events::list_events,
        crate::routes::events::append_event,
        crate::routes::events::setup_events,
        crate::routes::messages::send_message
    ),
    components(schemas(Config, EventRecord, EventSetup, SendMessage, ErrorEnvelope)),
    modifiers(&BasicAuth)
)]
struct ApiDoc;

struct BasicAuth;

impl Modify for BasicAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
            );
        }
    }
}

pub fn generate_spec() -> String {
    ApiDoc::openapi()
        .to_json()
        .unwrap_or_else(|_| "{}".to_string())
}

pub fn router() -> Router {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
