//! Password strength and confirmation checks.

use super::rules::{
    MIN_PASSWORD_LENGTH, contains_digit, contains_lowercase, contains_non_alphanumeric,
    contains_uppercase, has_min_length, is_blank,
};
use crate::auth::error::PasswordError;

/// Ordered composition rules. Composition failures are reported before the
/// length failure so the user fixes character classes first.
const PASSWORD_RULES: [(fn(&str) -> bool, PasswordError); 5] = [
    (contains_lowercase, PasswordError::NotContainsLowercase),
    (contains_uppercase, PasswordError::NotContainsUppercase),
    (contains_non_alphanumeric, PasswordError::NotContainNonAlphaNum),
    (contains_digit, PasswordError::NotContainsDigit),
    (has_password_length, PasswordError::TooShort),
];

fn has_password_length(value: &str) -> bool {
    has_min_length(value, MIN_PASSWORD_LENGTH)
}

/// Validates a password candidate.
///
/// Rules run in this order and stop at the first failure: not blank,
/// lowercase letter, uppercase letter, non-alphanumeric character, digit,
/// at least eight characters.
///
/// # Errors
///
/// Returns the [`PasswordError`] for the first rule the candidate breaks.
///
/// # Examples
///
/// ```
/// use flexchat::auth::{PasswordError, validate_password};
///
/// assert_eq!(validate_password("Abcdef1!"), Ok("Abcdef1!"));
/// assert_eq!(validate_password("Abcde1!"), Err(PasswordError::TooShort));
/// ```
pub fn validate_password(candidate: &str) -> Result<&str, PasswordError> {
    if is_blank(candidate) {
        return Err(PasswordError::EmptyOrBlank);
    }
    PASSWORD_RULES
        .iter()
        .find(|(rule, _)| !rule(candidate))
        .map_or(Ok(candidate), |(_, error)| Err(*error))
}

/// Checks the confirmation field against the password field.
///
/// The confirmation is treated as the field in error, so a mismatch is
/// reported as [`PasswordError::ConfirmationPasswordNotTheSameWithPassword`].
/// Returns the confirmation unchanged on success.
///
/// # Errors
///
/// Returns [`PasswordError::ConfirmationPasswordNotTheSameWithPassword`]
/// when the two values differ.
pub fn validate_confirmation_password<'a>(
    password: &str,
    confirmation: &'a str,
) -> Result<&'a str, PasswordError> {
    if password == confirmation {
        Ok(confirmation)
    } else {
        Err(PasswordError::ConfirmationPasswordNotTheSameWithPassword)
    }
}

/// Checks the password field against the confirmation field.
///
/// The password is treated as the field in error, so a mismatch is reported
/// as [`PasswordError::PasswordNotTheSameWithConfirmationPassword`].
/// Returns the password unchanged on success.
///
/// # Errors
///
/// Returns [`PasswordError::PasswordNotTheSameWithConfirmationPassword`]
/// when the two values differ.
pub fn validate_password_matches_confirmation<'a>(
    password: &'a str,
    confirmation: &str,
) -> Result<&'a str, PasswordError> {
    if password == confirmation {
        Ok(password)
    } else {
        Err(PasswordError::PasswordNotTheSameWithConfirmationPassword)
    }
}
