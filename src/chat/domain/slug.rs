//! Derived conversation keys.

/// Computes the dedup slug for a set of participant names.
///
/// Names are lowercased, sorted, and joined with a comma, so the same set
/// of people always yields the same slug regardless of input order or case.
///
/// # Examples
///
/// ```
/// use flexchat::chat::domain::conversation_slug;
///
/// assert_eq!(conversation_slug(["Bob", "alice"]), "alice,bob");
/// assert_eq!(conversation_slug(["alice", "BOB"]), conversation_slug(["bob", "Alice"]));
/// ```
#[must_use]
pub fn conversation_slug<I>(names: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut lowered: Vec<String> = names
        .into_iter()
        .map(|name| name.as_ref().to_lowercase())
        .collect();
    lowered.sort_unstable();
    lowered.join(",")
}

/// Computes the default display name for a conversation: participant names
/// in the given order, separated by a single space.
#[must_use]
pub fn conversation_display_name<I>(names: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| name.as_ref().to_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
