//! Credential validation for sign-in and registration forms.
//!
//! Email and password candidates are checked against ordered rule chains
//! before they are handed to the authentication collaborator. Each chain
//! stops at the first violated rule and reports it as a closed error
//! variant whose `Display` is the message shown to the user.
//!
//! # Example
//!
//! ```
//! use flexchat::auth::{PasswordError, validate_email, validate_password};
//!
//! assert_eq!(validate_email("alice@example.com"), Ok("alice@example.com"));
//! assert_eq!(validate_password("abcdefg1"), Err(PasswordError::NotContainsUppercase));
//! ```

pub mod error;
pub mod validation;

pub use error::{EmailError, PasswordError};
pub use validation::{
    validate_confirmation_password, validate_email, validate_password,
    validate_password_matches_confirmation,
};

#[cfg(test)]
mod tests;
