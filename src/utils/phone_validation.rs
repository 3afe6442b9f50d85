//! Phone number validation

use once_cell::sync::Lazy;
use regex::Regex;

/// E.164-ish shape after separator stripping: optional +, 2 to 15 digits
static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{2,15}$").expect("phone validation regex is valid"));

/// Validate a dialable phone number
///
/// Accepts international (+14155551234) and national (4155551234) forms,
/// tolerating space, dash, dot, and parenthesis separators.
pub fn validate_phone_number(number: &str) -> bool {
    let normalized: String = number
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect();
    PHONE_REGEX.is_match(&normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_international_numbers() {
        assert!(validate_phone_number("+14155551234"));
        assert!(validate_phone_number("+442071838750"));
    }

    #[test]
    fn test_accepts_national_numbers() {
        assert!(validate_phone_number("4155551234"));
    }

    #[test]
    fn test_accepts_common_separators() {
        assert!(validate_phone_number("+1 415 555 1234"));
        assert!(validate_phone_number("+1-415-555-1234"));
        assert!(validate_phone_number("(415) 555-1234"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(!validate_phone_number(""));
        assert!(!validate_phone_number("abc123"));
        assert!(!validate_phone_number("+"));
        assert!(!validate_phone_number("5"));
        assert!(!validate_phone_number("+1234567890123456"));
    }
}
