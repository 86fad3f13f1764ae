//! Field validators for registration and edit flows

use lazy_static::lazy_static;
use regex::Regex;

use super::errors::RegistryError;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    static ref PHONE_RE: Regex = Regex::new(r"^\+?\d{9,15}$").unwrap();
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Document numbers are opaque but must be non-empty and space-free.
pub fn is_valid_document_number(document_number: &str) -> bool {
    !document_number.is_empty() && !document_number.contains(' ')
}

pub fn require_email(email: &str) -> Result<(), RegistryError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(RegistryError::Validation(format!(
            "invalid email address: {email}"
        )))
    }
}

pub fn require_phone(phone: &str) -> Result<(), RegistryError> {
    if is_valid_phone(phone) {
        Ok(())
    } else {
        Err(RegistryError::Validation(format!(
            "invalid phone number: {phone}"
        )))
    }
}

pub fn require_document_number(document_number: &str) -> Result<(), RegistryError> {
    if is_valid_document_number(document_number) {
        Ok(())
    } else {
        Err(RegistryError::Validation(
            "invalid document number".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("jan.kowalski@example.org"));
        assert!(is_valid_email("a@b.co"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("no-at-sign.example.org"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("spaces in@example.org"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_valid_phones() {
        assert!(is_valid_phone("+48123456789"));
        assert!(is_valid_phone("123456789"));
        assert!(is_valid_phone("123456789012345"));
    }

    #[test]
    fn test_invalid_phones() {
        assert!(!is_valid_phone("12345678")); // too short
        assert!(!is_valid_phone("1234567890123456")); // too long
        assert!(!is_valid_phone("12 345 67 89"));
        assert!(!is_valid_phone("abc123456789"));
    }

    #[test]
    fn test_document_numbers() {
        assert!(is_valid_document_number("90010112345"));
        assert!(!is_valid_document_number(""));
        assert!(!is_valid_document_number("900 101 12345"));
    }
}
