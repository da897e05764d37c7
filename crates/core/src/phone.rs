//! Mobile number normalisation.
//!
//! Customers type numbers with spaces, dashes and country prefixes. The
//! booking form accepts anything that reduces to exactly ten digits; SMS
//! providers need E.164, so national numbers get the `+91` prefix.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Number of digits in a national mobile number.
pub const MOBILE_DIGITS: usize = 10;

/// Country calling code prepended when converting to E.164.
pub const DEFAULT_COUNTRY_CODE: &str = "91";

static NON_DIGIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\D").expect("valid regex"));

/// Remove every non-digit character.
pub fn strip_non_digits(raw: &str) -> String {
    NON_DIGIT_RE.replace_all(raw, "").into_owned()
}

/// Validate a booking mobile number, returning its ten normalised digits.
///
/// Formatting noise (spaces, dashes, brackets) is ignored. Anything that
/// does not reduce to exactly [`MOBILE_DIGITS`] digits is rejected with
/// [`CoreError::InvalidPhoneFormat`].
pub fn normalize_mobile(raw: &str) -> Result<String, CoreError> {
    let digits = strip_non_digits(raw);
    if digits.len() != MOBILE_DIGITS {
        return Err(CoreError::InvalidPhoneFormat(format!(
            "mobile must contain exactly {MOBILE_DIGITS} digits, got {}",
            digits.len()
        )));
    }
    Ok(digits)
}

/// Convert a user-supplied number into E.164 for SMS delivery.
///
/// - Already prefixed with `+`: digits are kept as-is.
/// - Ten digits: the default country code is prepended.
/// - Twelve digits starting with the country code: `+` is prepended.
///
/// Returns `None` when the number cannot be interpreted.
pub fn to_e164(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let digits = strip_non_digits(trimmed);
    if digits.is_empty() {
        return None;
    }

    if trimmed.starts_with('+') {
        return (digits.len() >= 8 && digits.len() <= 15).then(|| format!("+{digits}"));
    }

    match digits.len() {
        MOBILE_DIGITS => Some(format!("+{DEFAULT_COUNTRY_CODE}{digits}")),
        12 if digits.starts_with(DEFAULT_COUNTRY_CODE) => Some(format!("+{digits}")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn formatting_noise_is_stripped() {
        assert_eq!(normalize_mobile("98765-43210 ").unwrap(), "9876543210");
        assert_eq!(normalize_mobile("(987) 654 3210").unwrap(), "9876543210");
    }

    #[test]
    fn short_number_is_invalid_phone_format() {
        assert_matches!(
            normalize_mobile("12345"),
            Err(CoreError::InvalidPhoneFormat(_))
        );
    }

    #[test]
    fn long_number_is_invalid_phone_format() {
        assert_matches!(
            normalize_mobile("+91 98765 43210"),
            Err(CoreError::InvalidPhoneFormat(_))
        );
    }

    #[test]
    fn e164_prefixes_national_numbers() {
        assert_eq!(to_e164("98765 43210").as_deref(), Some("+919876543210"));
        assert_eq!(to_e164("919876543210").as_deref(), Some("+919876543210"));
        assert_eq!(to_e164("+1 415 555 0100").as_deref(), Some("+14155550100"));
    }

    #[test]
    fn e164_rejects_garbage() {
        assert_eq!(to_e164(""), None);
        assert_eq!(to_e164("call me"), None);
        assert_eq!(to_e164("12345"), None);
    }
}
