use crate::error::EventError;
use std::fmt;

const FILE_PREFIX: &str = "events_";
const FILE_SUFFIX: &str = ".json";

/// A tenant API key reduced to a filesystem-safe base name.
///
/// Joining characters (` &_=+:`) become `-`, anything that is not an ASCII
/// alphanumeric, `-` or `.` is dropped, and runs of `-` collapse. The result
/// never contains a path separator, so the data file named from it always
/// lands directly inside the store directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantKey(String);

impl TenantKey {
    pub fn parse(raw: &str) -> Result<Self, EventError> {
        let sanitized = sanitize_base_name(raw);
        if sanitized.is_empty() {
            return Err(EventError::InvalidTenantKey);
        }
        Ok(Self(sanitized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> String {
        format!("{FILE_PREFIX}{}{FILE_SUFFIX}", self.0)
    }
}

impl fmt::Display for TenantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn sanitize_base_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.trim().chars() {
        let mapped = match ch {
            ' ' | '&' | '_' | '=' | '+' | ':' => '-',
            c if c.is_ascii_alphanumeric() || c == '-' || c == '.' => c,
            _ => continue,
        };
        if mapped == '-' && out.ends_with('-') {
            continue;
        }
        out.push(mapped);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_api_key_is_unchanged() {
        let key = TenantKey::parse("3f1c9a0b7e").unwrap();
        assert_eq!(key.as_str(), "3f1c9a0b7e");
        assert_eq!(key.file_name(), "events_3f1c9a0b7e.json");
    }

    #[test]
    fn traversal_collapses_to_base_name() {
        let key = TenantKey::parse("../../etc").unwrap();
        assert_eq!(key.as_str(), "....etc");
        assert!(!key.file_name().contains('/'));
    }

    #[test]
    fn separators_are_removed() {
        let key = TenantKey::parse(r"..\..\windows/system32").unwrap();
        assert!(!key.as_str().contains('/'));
        assert!(!key.as_str().contains('\\'));
        assert_eq!(key.as_str(), "....windowssystem32");
    }

    #[test]
    fn joining_characters_become_single_dash() {
        let key = TenantKey::parse("a _b+=c").unwrap();
        assert_eq!(key.as_str(), "a-b-c");
    }

    #[test]
    fn empty_after_sanitizing_is_rejected() {
        for raw in ["", "   ", "///", "%%"] {
            assert!(matches!(
                TenantKey::parse(raw),
                Err(EventError::InvalidTenantKey)
            ));
        }
    }
}
