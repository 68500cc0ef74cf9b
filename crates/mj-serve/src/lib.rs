pub mod auth;
pub mod middleware;
pub mod openapi;
pub mod routes;

use axum::Router;
use mj_core::{HttpGateway, Relay};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay<HttpGateway>>,
}

impl AppState {
    pub fn new(relay: Relay<HttpGateway>) -> Self {
        Self {
            relay: Arc::new(relay),
        }
    }
}

pub fn app(state: AppState) -> Router {
    routes::router(state)
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "server started");
    axum::serve(listener, app(state)).await
}
