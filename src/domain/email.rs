use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

use super::ValidationError;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

const MAX_LEN: usize = 254;

/// A syntactically valid, lower-cased email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let normalized = raw.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(ValidationError::new("email", "Email is required"));
        }

        if normalized.len() > MAX_LEN || !EMAIL_RE.is_match(&normalized) {
            return Err(ValidationError::new("email", "Email address is invalid"));
        }

        Ok(Self(normalized))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_case_and_whitespace() {
        let email = Email::parse("  Ana.Perez@Campus.EDU ").unwrap();
        assert_eq!(email.as_str(), "ana.perez@campus.edu");
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(Email::parse("").is_err());
        assert!(Email::parse("no-at-sign").is_err());
        assert!(Email::parse("two@@campus.edu").is_err());
        assert!(Email::parse("space in@campus.edu").is_err());
        assert!(Email::parse("nodot@campus").is_err());
    }

    #[test]
    fn test_error_names_field() {
        let err = Email::parse("bad").unwrap_err();
        assert_eq!(err.field, "email");
    }
}
