//! Field-level input validation helpers.
//!
//! Handlers collect every offending field into a [`FieldErrors`] and turn it
//! into a single [`CoreError::Validation`] so clients see all problems at once.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Domain used for synthetic addresses when a customer gave no email.
///
/// Addresses on this domain are never "real": no customer-facing email is
/// rendered or sent to them.
pub const PLACEHOLDER_EMAIL_DOMAIN: &str = "booking.ascend.local";

/// Maximum accepted length for free-text fields (names, messages).
pub const MAX_TEXT_LEN: usize = 5000;

/// Accumulates `field: problem` pairs.
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<(String, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem with `field`.
    pub fn add(&mut self, field: &str, problem: impl Into<String>) {
        self.errors.push((field.to_string(), problem.into()));
    }

    /// Record `field` as missing when `value` is empty or whitespace.
    pub fn require(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "is required");
        } else if value.len() > MAX_TEXT_LEN {
            self.add(field, format!("must be at most {MAX_TEXT_LEN} characters"));
        }
    }

    /// Record `field` when `value` is present but not a valid email address.
    pub fn email(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "is required");
        } else if !is_valid_email(value) {
            self.add(field, "must be a valid email address");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Names of the offending fields, in the order they were recorded.
    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|(f, _)| f.as_str()).collect()
    }

    /// `Ok(())` when nothing was recorded, otherwise a combined
    /// [`CoreError::Validation`] such as `"fullName is required; amount must be positive"`.
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.errors.is_empty() {
            return Ok(());
        }
        let message = self
            .errors
            .iter()
            .map(|(field, problem)| format!("{field} {problem}"))
            .collect::<Vec<_>>()
            .join("; ");
        Err(CoreError::Validation(message))
    }
}

/// Syntactic email check.
pub fn is_valid_email(value: &str) -> bool {
    value.trim().validate_email()
}

/// Build the synthetic address used when a booking has no email.
pub fn placeholder_email(mobile_digits: &str) -> String {
    format!("{mobile_digits}@{PLACEHOLDER_EMAIL_DOMAIN}")
}

/// Whether customer-facing mail may be addressed to `email`.
pub fn is_deliverable_email(email: &str) -> bool {
    is_valid_email(email)
        && !email
            .trim()
            .to_ascii_lowercase()
            .ends_with(&format!("@{PLACEHOLDER_EMAIL_DOMAIN}"))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn empty_collector_is_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn errors_are_joined_in_order() {
        let mut errors = FieldErrors::new();
        errors.require("fullName", "  ");
        errors.email("email", "nope");
        assert_eq!(errors.fields(), vec!["fullName", "email"]);
        assert_matches!(
            errors.into_result(),
            Err(CoreError::Validation(msg))
                if msg == "fullName is required; email must be a valid email address"
        );
    }

    #[test]
    fn overlong_text_is_rejected() {
        let mut errors = FieldErrors::new();
        errors.require("message", &"x".repeat(MAX_TEXT_LEN + 1));
        assert!(!errors.is_empty());
    }

    #[test]
    fn placeholder_addresses_are_not_deliverable() {
        let placeholder = placeholder_email("9876543210");
        assert!(is_valid_email(&placeholder));
        assert!(!is_deliverable_email(&placeholder));
        assert!(is_deliverable_email("asha.rao@example.com"));
        assert!(!is_deliverable_email("not-an-email"));
    }
}
