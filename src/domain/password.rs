use std::fmt;

use super::ValidationError;

/// Upper bound keeps Argon2 input size sane.
const MAX_LEN: usize = 128;

/// A plaintext password that passed the length policy.
///
/// The policy is a minimum character count only; there are no complexity rules.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    pub fn parse(raw: &str, min_len: usize) -> Result<Self, ValidationError> {
        Self::parse_field(raw, min_len, "password")
    }

    /// Same as [`Password::parse`] but reports errors against `field`.
    pub fn parse_field(
        raw: &str,
        min_len: usize,
        field: &'static str,
    ) -> Result<Self, ValidationError> {
        let len = raw.chars().count();

        if len < min_len {
            return Err(ValidationError::new(
                field,
                format!("Password must be at least {min_len} characters"),
            ));
        }

        if len > MAX_LEN {
            return Err(ValidationError::new(
                field,
                format!("Password must be at most {MAX_LEN} characters"),
            ));
        }

        Ok(Self(raw.to_string()))
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}
