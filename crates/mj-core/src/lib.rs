pub mod config;
pub mod credentials;
pub mod error;
pub mod gateway;
pub mod messages;
pub mod relay;
pub mod webhooks;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::config::Config;
pub use crate::credentials::Credentials;
pub use crate::error::RelayError;
pub use crate::gateway::{Gateway, GatewayResponse, HttpGateway};
pub use crate::relay::Relay;
