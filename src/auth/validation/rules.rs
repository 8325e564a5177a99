//! Character-level predicates shared by the credential validators.

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Returns `true` when the value is empty or whitespace-only.
#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Returns `true` when the value contains a lowercase letter.
#[must_use]
pub fn contains_lowercase(value: &str) -> bool {
    value.chars().any(char::is_lowercase)
}

/// Returns `true` when the value contains an uppercase letter.
#[must_use]
pub fn contains_uppercase(value: &str) -> bool {
    value.chars().any(char::is_uppercase)
}

/// Returns `true` when the value contains a numeric character.
#[must_use]
pub fn contains_digit(value: &str) -> bool {
    value.chars().any(char::is_numeric)
}

/// Returns `true` when the value contains a character that is neither a
/// letter nor a digit (punctuation, symbols, whitespace).
#[must_use]
pub fn contains_non_alphanumeric(value: &str) -> bool {
    value.chars().any(|c| !c.is_alphanumeric())
}

/// Returns `true` when the value has at least `min` characters.
///
/// Length is counted in Unicode scalar values, not bytes.
#[must_use]
pub fn has_min_length(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}
