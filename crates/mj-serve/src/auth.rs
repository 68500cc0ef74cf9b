use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use mj_core::error::AuthError;
use mj_core::Credentials;

/// Reads provider credentials from an `Authorization: Basic` header.
///
/// A missing or undecodable header counts as an empty pair, so it is rejected
/// by the same mandatory-field checks as blank halves.
pub fn credentials_from_headers(headers: &HeaderMap) -> Result<Credentials, AuthError> {
    let (api_key, api_secret) = basic_pair(headers).unwrap_or_default();
    Credentials::new(api_key, api_secret)
}

fn basic_pair(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = String::from_utf8(STANDARD.decode(encoded.trim()).ok()?).ok()?;
    let (api_key, api_secret) = decoded.split_once(':')?;
    Some((api_key.to_string(), api_secret.to_string()))
}
