//! Ordered, short-circuiting credential rule chains.
//!
//! Validators never normalise their input: a successful check hands back
//! the same string slice it was given.

pub mod email;
pub mod password;
pub mod rules;

pub use email::validate_email;
pub use password::{
    validate_confirmation_password, validate_password, validate_password_matches_confirmation,
};
