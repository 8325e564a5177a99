//! Tests that each error's display text is its user-facing message.

use crate::auth::{EmailError, PasswordError};
use rstest::rstest;

#[rstest]
#[case(EmailError::EmptyOrBlank)]
#[case(EmailError::NotValidEmail)]
fn email_error_display_matches_message(#[case] error: EmailError) {
    assert_eq!(error.to_string(), error.message());
}

#[rstest]
#[case(EmailError::EmptyOrBlank, "Email should not be empty or blank")]
#[case(EmailError::NotValidEmail, "Email should be in valid format")]
fn email_error_messages_are_exact(#[case] error: EmailError, #[case] expected: &str) {
    assert_eq!(error.message(), expected);
}

#[rstest]
#[case(PasswordError::TooShort)]
#[case(PasswordError::NotContainsDigit)]
#[case(PasswordError::NotContainsUppercase)]
#[case(PasswordError::NotContainsLowercase)]
#[case(PasswordError::NotContainNonAlphaNum)]
#[case(PasswordError::EmptyOrBlank)]
#[case(PasswordError::PasswordNotTheSameWithConfirmationPassword)]
#[case(PasswordError::ConfirmationPasswordNotTheSameWithPassword)]
fn password_error_display_matches_message(#[case] error: PasswordError) {
    assert_eq!(error.to_string(), error.message());
}

#[rstest]
#[case(
    PasswordError::TooShort,
    "Password should be at least more than or equal to 8 characters"
)]
#[case(
    PasswordError::NotContainsDigit,
    "Password should be at least have 1 digit number"
)]
#[case(
    PasswordError::NotContainsUppercase,
    "Password should be at least have 1 letter uppercase"
)]
#[case(
    PasswordError::NotContainsLowercase,
    "Password should be at least have 1 letter lowercase"
)]
#[case(
    PasswordError::NotContainNonAlphaNum,
    "Password should be at least have 1 character non alpha numeric"
)]
#[case(PasswordError::EmptyOrBlank, "Password should not be empty or blank")]
#[case(
    PasswordError::PasswordNotTheSameWithConfirmationPassword,
    "Password not the same with confirmation password"
)]
#[case(
    PasswordError::ConfirmationPasswordNotTheSameWithPassword,
    "Confirmation password not the same with password"
)]
fn password_error_messages_are_exact(#[case] error: PasswordError, #[case] expected: &str) {
    assert_eq!(error.message(), expected);
}

#[test]
fn length_message_names_the_minimum() {
    assert!(PasswordError::TooShort.message().contains('8'));
}
