//! Authenticated request/response access to the provider's REST API.
//!
//! No retries and no caching: one call is one HTTP exchange. Transport
//! failures come back as [`GatewayError::Unavailable`]; any HTTP status,
//! including 4xx/5xx, is a successful exchange for the caller to judge.

use crate::credentials::Credentials;
use crate::error::GatewayError;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    pub status: StatusCode,
    pub body: String,
}

pub trait Gateway: Send + Sync {
    fn call(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<GatewayResponse, GatewayError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
}

impl HttpGateway {
    pub fn new(timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mj-relay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| GatewayError::Client {
                message: err.to_string(),
            })?;
        Ok(Self { client })
    }
}

impl Gateway for HttpGateway {
    async fn call(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        credentials: &Credentials,
    ) -> Result<GatewayResponse, GatewayError> {
        let mut request = self
            .client
            .request(method.clone(), url)
            .basic_auth(credentials.api_key(), Some(credentials.api_secret()));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(unavailable)?;
        let status = response.status();
        let body = response.text().await.map_err(unavailable)?;
        debug!(%method, url, %status, "upstream response");
        Ok(GatewayResponse { status, body })
    }
}

fn unavailable(err: reqwest::Error) -> GatewayError {
    GatewayError::Unavailable {
        message: err.to_string(),
    }
}
