//! Per-keystroke feedback for the NIK search box.

use crate::search::MIN_SEARCH_LENGTH;

/// The two indicators shown under the search box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Feedback {
    /// Text is non-empty and contains only digits.
    pub is_all_digits: bool,
    /// Text is all digits and at least the minimum search length.
    pub meets_min_length: bool,
}

/// Feedback for `text` using the default minimum length.
pub fn validate(text: &str) -> Feedback {
    validate_with(text, MIN_SEARCH_LENGTH)
}

/// Feedback for `text` with an explicit minimum length.
///
/// Empty text is not an error while typing, but it is never reported as a valid number either.
pub fn validate_with(text: &str, min_length: usize) -> Feedback {
    let is_all_digits = !text.is_empty() && is_digits(text);
    Feedback {
        is_all_digits,
        meets_min_length: is_all_digits && text.len() >= min_length,
    }
}

/// ASCII digits only. The empty string passes; callers check emptiness themselves.
pub(crate) fn is_digits(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_digits() {
        assert_eq!(
            validate("123"),
            Feedback {
                is_all_digits: true,
                meets_min_length: false
            }
        );
    }

    #[test]
    fn test_full_length_digits() {
        assert_eq!(
            validate("12345678"),
            Feedback {
                is_all_digits: true,
                meets_min_length: true
            }
        );
    }

    #[test]
    fn test_non_digit() {
        assert_eq!(validate("12a"), Feedback::default());
    }

    #[test]
    fn test_empty_is_not_reported_valid() {
        assert_eq!(validate(""), Feedback::default());
    }

    #[test]
    fn test_whitespace_counts_as_non_digit() {
        assert!(!validate(" 123").is_all_digits);
    }

    #[test]
    fn test_custom_min_length() {
        assert!(validate_with("1234", 4).meets_min_length);
        assert!(!validate_with("123", 4).meets_min_length);
    }

    #[test]
    fn test_unicode_digits_are_rejected() {
        // Arabic-Indic digits are numeric but not ASCII
        assert!(!validate("١٢٣").is_all_digits);
    }
}
