pub mod config;
pub mod error;
pub mod events;
pub mod messages;

use crate::middleware::correlation::correlation_middleware;
use crate::{openapi, AppState};
use axum::middleware;
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    let public_dir = state.relay.config().public_dir.clone();
    Router::new()
        .merge(config::router(state.clone()))
        .merge(events::router(state.clone()))
        .merge(messages::router(state))
        .merge(openapi::router())
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(correlation_middleware))
}
