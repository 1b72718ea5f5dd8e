use std::str::FromStr;

use super::ApiError;
use crate::domain::UnknownVariant;

pub fn validate_id(id: i32, field: &str) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::field(
            field,
            format!("Invalid {field}: {id}. ID must be a positive integer"),
        ));
    }
    Ok(id)
}

/// Parses one of the closed text enumerations, reporting failures against `field`.
pub fn parse_enum<T>(raw: &str, field: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = UnknownVariant>,
{
    raw.parse::<T>()
        .map_err(|e| ApiError::field(field, capitalize(&e.to_string())))
}

pub fn parse_enum_list<T>(raw: &[String], field: &str) -> Result<Vec<T>, ApiError>
where
    T: FromStr<Err = UnknownVariant>,
{
    raw.iter().map(|r| parse_enum(r, field)).collect()
}

pub fn require_non_empty<'a>(value: &'a str, field: &str) -> Result<&'a str, ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::field(field, format!("{field} is required")));
    }
    Ok(value)
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DietQuality, ReportStatus, Role};

    #[test]
    fn test_validate_id() {
        assert!(validate_id(1, "id").is_ok());
        assert!(validate_id(0, "id").is_err());
        assert!(validate_id(-4, "facilityId").is_err());
    }

    #[test]
    fn test_parse_enum() {
        let status: ReportStatus = parse_enum("in_progress", "status").unwrap();
        assert_eq!(status, ReportStatus::InProgress);

        match parse_enum::<DietQuality>("awful", "dietQuality") {
            Err(ApiError::ValidationError { field, message }) => {
                assert_eq!(field.as_deref(), Some("dietQuality"));
                assert!(message.starts_with("Unknown diet quality"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_parse_enum_list() {
        let roles: Vec<Role> =
            parse_enum_list(&["admin".to_string(), "wellness".to_string()], "roles").unwrap();
        assert_eq!(roles, vec![Role::Admin, Role::Wellness]);
        assert!(parse_enum_list::<Role>(&["root".to_string()], "roles").is_err());
    }

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("x", "email").is_ok());
        assert!(require_non_empty("  ", "email").is_err());
    }
}
