use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("malformed payload: {message}")]
    MalformedPayload { message: String },
    #[error("An API Key must be provided")]
    InvalidTenantKey,
    #[error("unable to decode events from data file ({path}): {message}")]
    StoreCorrupt { path: String, message: String },
    #[error("data file access failed ({path}): {message}")]
    Io { path: String, message: String },
    #[error("unable to encode events: {message}")]
    Encode { message: String },
}
