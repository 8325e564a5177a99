//! Validation error taxonomy for credentials.
//!
//! Every variant carries a fixed message and nothing else; callers surface
//! the message verbatim. `message()` is the only place the text lives and
//! `Display` writes it unchanged.

use std::fmt;

use thiserror::Error;

/// Reasons an email candidate is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum EmailError {
    /// The candidate is empty or contains only whitespace.
    EmptyOrBlank,

    /// The candidate does not match the email address grammar.
    NotValidEmail,
}

impl EmailError {
    /// Returns the user-facing message for this error.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::EmptyOrBlank => "Email should not be empty or blank",
            Self::NotValidEmail => "Email should be in valid format",
        }
    }
}

/// Reasons a password candidate is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum PasswordError {
    /// Shorter than the minimum length.
    TooShort,

    /// No decimal digit present.
    NotContainsDigit,

    /// No uppercase letter present.
    NotContainsUppercase,

    /// No lowercase letter present.
    NotContainsLowercase,

    /// No character that is neither a letter nor a digit.
    NotContainNonAlphaNum,

    /// The candidate is empty or contains only whitespace.
    EmptyOrBlank,

    /// The password field disagrees with the confirmation field.
    PasswordNotTheSameWithConfirmationPassword,

    /// The confirmation field disagrees with the password field.
    ConfirmationPasswordNotTheSameWithPassword,
}

impl PasswordError {
    /// Returns the user-facing message for this error.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::TooShort => "Password should be at least more than or equal to 8 characters",
            Self::NotContainsDigit => "Password should be at least have 1 digit number",
            Self::NotContainsUppercase => "Password should be at least have 1 letter uppercase",
            Self::NotContainsLowercase => "Password should be at least have 1 letter lowercase",
            Self::NotContainNonAlphaNum => {
                "Password should be at least have 1 character non alpha numeric"
            }
            Self::EmptyOrBlank => "Password should not be empty or blank",
            Self::PasswordNotTheSameWithConfirmationPassword => {
                "Password not the same with confirmation password"
            }
            Self::ConfirmationPasswordNotTheSameWithPassword => {
                "Confirmation password not the same with password"
            }
        }
    }
}

impl fmt::Display for EmailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl fmt::Display for PasswordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
