use mj_events::EventError;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read the config file ({path}): {message}")]
    Read { path: String, message: String },
    #[error("unable to parse the config file ({path}): {message}")]
    Parse { path: String, message: String },
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("API key is mandatory")]
    MissingKey,
    #[error("API secret is mandatory")]
    MissingSecret,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("unable to build HTTP client: {message}")]
    Client { message: String },
    #[error("upstream unavailable: {message}")]
    Unavailable { message: String },
}

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("error while building event url: {message}")]
    InvalidUrl { message: String },
    #[error("{status}")]
    RegistrationFailed { status: StatusCode },
    #[error(transparent)]
    Upstream(#[from] GatewayError),
}

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("unable to encode message: {message}")]
    Encode { message: String },
    #[error("{status}")]
    Rejected { status: StatusCode },
    #[error(transparent)]
    Upstream(#[from] GatewayError),
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Events(#[from] EventError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Webhook(#[from] WebhookError),
    #[error(transparent)]
    Message(#[from] MessageError),
    #[error("Unsupported method: {method}")]
    UnsupportedMethod { method: String },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}
