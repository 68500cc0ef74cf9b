use crate::error::AuthError;
use std::fmt;

/// Provider API key pair, forwarded as HTTP basic auth on every upstream call.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
}

impl Credentials {
    /// Both halves are mandatory.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Result<Self, AuthError> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();
        if api_secret.is_empty() {
            return Err(AuthError::MissingSecret);
        }
        if api_key.is_empty() {
            return Err(AuthError::MissingKey);
        }
        Ok(Self {
            api_key,
            api_secret,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}
