//! Field validators shared by the registration, account and donation forms.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::MIN_PASSWORD_LENGTH;
use crate::errors::ValidationError;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("valid email regex")
});

static ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 \-]{1,8}[A-Za-z0-9]$").expect("valid zip regex"));

/// Trims `value` and rejects it when empty or longer than `max_len` characters.
pub fn required_text(
    field: &str,
    value: &str,
    max_len: usize,
) -> std::result::Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field.to_string()));
    }
    if trimmed.chars().count() > max_len {
        return Err(ValidationError::field(
            field,
            format!("must be at most {max_len} characters"),
        ));
    }
    Ok(trimmed.to_string())
}

/// Normalises an email address to trimmed lower case and checks its shape.
pub fn normalize_email(field: &str, value: &str) -> std::result::Result<String, ValidationError> {
    let email = value.trim().to_lowercase();
    if email.is_empty() {
        return Err(ValidationError::MissingField(field.to_string()));
    }
    if !EMAIL_RE.is_match(&email) {
        return Err(ValidationError::field(field, "enter a valid email address"));
    }
    Ok(email)
}

/// Checks password strength and that the confirmation repeats it.
pub fn validate_new_password(
    field: &str,
    password: &str,
    confirmation: &str,
) -> std::result::Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::MissingField(field.to_string()));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::field(
            field,
            format!("must contain at least {MIN_PASSWORD_LENGTH} characters"),
        ));
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::field(field, "cannot be entirely numeric"));
    }
    if password != confirmation {
        return Err(ValidationError::field(field, "passwords do not match"));
    }
    Ok(())
}

/// Accepts 9 to 15 digits, optionally separated by spaces or hyphens and
/// prefixed with `+`. Returns the trimmed input.
pub fn validate_phone(field: &str, value: &str) -> std::result::Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field.to_string()));
    }
    let body = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if !body
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
    {
        return Err(ValidationError::field(field, "enter a valid phone number"));
    }
    let digits = body.chars().filter(|c| c.is_ascii_digit()).count();
    if !(9..=15).contains(&digits) {
        return Err(ValidationError::field(field, "must contain 9 to 15 digits"));
    }
    Ok(trimmed.to_string())
}

pub fn validate_zip_code(field: &str, value: &str) -> std::result::Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field.to_string()));
    }
    if !ZIP_RE.is_match(trimmed) {
        return Err(ValidationError::field(field, "enter a valid postal code"));
    }
    Ok(trimmed.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_trims() {
        assert_eq!(required_text("city", "  Kraków ", 50).unwrap(), "Kraków");
        assert_eq!(
            required_text("city", "   ", 50),
            Err(ValidationError::MissingField("city".into()))
        );
        assert!(required_text("city", "abcdef", 5).is_err());
    }

    #[test]
    fn test_email_normalisation() {
        assert_eq!(
            normalize_email("email", " Jan.Kowalski@Example.COM ").unwrap(),
            "jan.kowalski@example.com"
        );
        assert!(normalize_email("email", "not-an-email").is_err());
        assert!(normalize_email("email", "a@b").is_err());
        assert!(normalize_email("email", "").is_err());
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_new_password("password", "s3cret-pass", "s3cret-pass").is_ok());
        assert!(validate_new_password("password", "short", "short").is_err());
        assert!(validate_new_password("password", "12345678", "12345678").is_err());
        let err = validate_new_password("password", "s3cret-pass", "s3cret-pasS").unwrap_err();
        assert_eq!(err.field_name(), Some("password"));
    }

    #[test]
    fn test_phone_numbers() {
        assert_eq!(validate_phone("phone", "+48 600-100-200").unwrap(), "+48 600-100-200");
        assert!(validate_phone("phone", "600100200").is_ok());
        assert!(validate_phone("phone", "12345").is_err());
        assert!(validate_phone("phone", "600a100200").is_err());
        assert!(validate_phone("phone", "++48600100200").is_err());
    }

    #[test]
    fn test_zip_codes() {
        assert_eq!(validate_zip_code("zip", "31-042").unwrap(), "31-042");
        assert_eq!(validate_zip_code("zip", "sw1a 1aa").unwrap(), "SW1A 1AA");
        assert!(validate_zip_code("zip", "-").is_err());
        assert!(validate_zip_code("zip", "12345678901").is_err());
    }
}
