//! Client-side checks applied before any request leaves the browser.
//!
//! Failures here are reported to the user directly and never reach the
//! network. Each error carries a translation key so the view layer can render
//! it in the active language.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use thiserror::Error;

use crate::models::RegisterRequest;

/// Optional scheme, at least one dotted domain label, optional path.
///
/// Word characters are ASCII only, matching what the shortener backend accepts.
static SHORTENABLE_URL: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"^(https?://)?([A-Za-z0-9_-]+(\.[A-Za-z0-9_-]+)+)(/[A-Za-z0-9_\-./?%&=]*)?$").ok()
});

/// Registration form fields that must be filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationField {
    /// Full name.
    Name,
    /// Login handle.
    Username,
    /// Contact email.
    Email,
    /// Initial password.
    Password,
}

impl RegistrationField {
    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Username => "username",
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

impl fmt::Display for RegistrationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A form value rejected locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The shortening input is blank.
    #[error("a link is required")]
    EmptyUrl,
    /// The shortening input does not look like a URL.
    #[error("the link is not a valid URL")]
    InvalidUrl,
    /// The recovery form was sent without an email.
    #[error("an email address is required")]
    EmailRequired,
    /// One of the new-password fields is empty.
    #[error("both password fields are required")]
    PasswordsRequired,
    /// The new password and its confirmation differ.
    #[error("the passwords do not match")]
    PasswordMismatch,
    /// The reset page was opened without a token.
    #[error("the reset link is missing its token")]
    MissingResetToken,
    /// A registration field was left empty.
    #[error("the {0} field is required")]
    MissingField(RegistrationField),
}

impl ValidationError {
    /// Key of the user-facing message in the translation bundles.
    #[must_use]
    pub const fn translation_key(self) -> &'static str {
        match self {
            Self::EmptyUrl => "validation.url_empty",
            Self::InvalidUrl => "validation.url_invalid",
            Self::EmailRequired => "validation.email_required",
            Self::PasswordsRequired => "validation.passwords_required",
            Self::PasswordMismatch => "validation.password_mismatch",
            Self::MissingResetToken => "validation.reset_token_missing",
            Self::MissingField(RegistrationField::Name) => "validation.name_required",
            Self::MissingField(RegistrationField::Username) => "validation.username_required",
            Self::MissingField(RegistrationField::Email) => "validation.email_required",
            Self::MissingField(RegistrationField::Password) => "validation.password_required",
        }
    }
}

/// Returns `true` when `input` looks like something the backend can shorten.
#[must_use]
pub fn is_shortenable_url(input: &str) -> bool {
    SHORTENABLE_URL
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(input))
}

/// Checks the shortening form input.
///
/// The input is matched as typed (no trimming) so the value sent to the
/// backend is exactly the one that was validated.
///
/// # Errors
/// [`ValidationError::EmptyUrl`] for blank input, [`ValidationError::InvalidUrl`]
/// when the pattern does not match.
pub fn validate_link_input(input: &str) -> Result<&str, ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    if !is_shortenable_url(input) {
        return Err(ValidationError::InvalidUrl);
    }
    Ok(input)
}

/// Checks the "send me a reset link" form.
///
/// # Errors
/// [`ValidationError::EmailRequired`] when the email is blank.
pub fn validate_reset_request(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    Ok(())
}

/// Checks the "choose a new password" form and returns the reset token.
///
/// Only presence and equality are checked; there are no strength rules.
///
/// # Errors
/// Presence, equality and token checks, in that order.
pub fn validate_password_reset<'a>(
    new_password: &str,
    confirmation: &str,
    token: Option<&'a str>,
) -> Result<&'a str, ValidationError> {
    if new_password.is_empty() || confirmation.is_empty() {
        return Err(ValidationError::PasswordsRequired);
    }
    if new_password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    token
        .filter(|token| !token.trim().is_empty())
        .ok_or(ValidationError::MissingResetToken)
}

/// Checks that every registration field is filled in.
///
/// # Errors
/// [`ValidationError::MissingField`] naming the first empty field.
pub fn validate_registration(request: &RegisterRequest) -> Result<(), ValidationError> {
    let fields = [
        (RegistrationField::Name, request.name.trim()),
        (RegistrationField::Username, request.username.trim()),
        (RegistrationField::Email, request.email.trim()),
        (RegistrationField::Password, request.password.as_str()),
    ];
    match fields.iter().find(|(_, value)| value.is_empty()) {
        Some((field, _)) => Err(ValidationError::MissingField(*field)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_bare_domain() {
        assert_eq!(validate_link_input("example.com"), Ok("example.com"));
    }

    #[test]
    fn test_accepts_scheme_and_path() {
        for url in [
            "http://example.com",
            "https://www.example.com.br/path/to?page=1&q=%20x",
            "https://sub-domain.example.io/a_b-c.html",
        ] {
            assert!(is_shortenable_url(url), "{url} should be accepted");
        }
    }

    #[test]
    fn test_rejects_strings_without_domain_label() {
        for input in [
            "not a url",
            "localhost",
            "http://localhost",
            "https://",
            "example.",
            ".com",
            "ftp://example.com",
            "example .com",
        ] {
            assert_eq!(
                validate_link_input(input),
                Err(ValidationError::InvalidUrl),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_non_ascii_labels() {
        assert!(!is_shortenable_url("café.com.br"));
    }

    #[test]
    fn test_blank_input_is_empty_error() {
        assert_eq!(validate_link_input(""), Err(ValidationError::EmptyUrl));
        assert_eq!(validate_link_input("   "), Err(ValidationError::EmptyUrl));
    }

    #[test]
    fn test_surrounding_whitespace_is_not_trimmed() {
        assert_eq!(validate_link_input(" example.com"), Err(ValidationError::InvalidUrl));
    }

    #[test]
    fn test_reset_request_requires_email() {
        assert_eq!(validate_reset_request(""), Err(ValidationError::EmailRequired));
        assert_eq!(
            ValidationError::EmailRequired.translation_key(),
            "validation.email_required"
        );
        assert!(validate_reset_request("ana@example.com").is_ok());
    }

    #[test]
    fn test_password_reset_checks_in_order() {
        assert_eq!(
            validate_password_reset("", "x", Some("tok")),
            Err(ValidationError::PasswordsRequired)
        );
        assert_eq!(
            validate_password_reset("abc", "abd", None),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(
            validate_password_reset("abc", "abc", None),
            Err(ValidationError::MissingResetToken)
        );
        assert_eq!(
            validate_password_reset("abc", "abc", Some(" ")),
            Err(ValidationError::MissingResetToken)
        );
        assert_eq!(validate_password_reset("abc", "abc", Some("tok")), Ok("tok"));
    }

    #[test]
    fn test_registration_reports_first_missing_field() {
        let mut request = RegisterRequest {
            name: "Ana".to_string(),
            username: String::new(),
            email: String::new(),
            password: "x".to_string(),
        };
        assert_eq!(
            validate_registration(&request),
            Err(ValidationError::MissingField(RegistrationField::Username))
        );

        request.username = "ana".to_string();
        request.email = "ana@example.com".to_string();
        assert!(validate_registration(&request).is_ok());
    }

    #[test]
    fn test_missing_field_message() {
        let error = ValidationError::MissingField(RegistrationField::Email);
        assert_eq!(error.to_string(), "the email field is required");
    }
}
