use crate::routes::error::{unsupported_method, ErrorEnvelope};
use crate::AppState;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use mj_core::Config;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/config", get(get_config).fallback(unsupported_method))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/config",
    responses(
        (status = 200, body = Config),
        (status = 405, body = ErrorEnvelope)
    )
)]
pub(crate) async fn get_config(State(state): State<AppState>) -> Json<Config> {
    Json(state.relay.config().clone())
}
