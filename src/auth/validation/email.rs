//! Email address validation.

use std::sync::LazyLock;

use regex::Regex;

use super::rules::is_blank;
use crate::auth::error::EmailError;

/// Address grammar: a local part of allowed symbols, `@`, then a domain of
/// at least two dot-separated labels, each starting alphanumerically.
const EMAIL_PATTERN: &str = concat!(
    r"^[a-zA-Z0-9+._%\-]{1,256}",
    r"@",
    r"[a-zA-Z0-9][a-zA-Z0-9\-]{0,64}",
    r"(\.[a-zA-Z0-9][a-zA-Z0-9\-]{0,25})+$",
);

#[expect(
    clippy::expect_used,
    reason = "the pattern is a compile-time literal exercised by unit tests"
)]
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern must compile"));

/// Validates an email candidate.
///
/// Rules run in order and stop at the first failure:
/// 1. not empty or blank,
/// 2. matches the address grammar.
///
/// No trimming or case folding is applied; on success the input slice is
/// returned unchanged.
///
/// # Errors
///
/// Returns [`EmailError::EmptyOrBlank`] or [`EmailError::NotValidEmail`].
///
/// # Examples
///
/// ```
/// use flexchat::auth::{EmailError, validate_email};
///
/// assert_eq!(validate_email("bob@mail.example.org"), Ok("bob@mail.example.org"));
/// assert_eq!(validate_email("bob@localhost"), Err(EmailError::NotValidEmail));
/// assert_eq!(validate_email("  "), Err(EmailError::EmptyOrBlank));
/// ```
pub fn validate_email(candidate: &str) -> Result<&str, EmailError> {
    if is_blank(candidate) {
        return Err(EmailError::EmptyOrBlank);
    }
    if !EMAIL_REGEX.is_match(candidate) {
        return Err(EmailError::NotValidEmail);
    }
    Ok(candidate)
}
