use std::borrow::Cow;

use crate::errors::RequestError;

/// Characters with a special meaning inside a `LIKE ... ESCAPE '\'` pattern.
const LIKE_METACHARACTERS: [char; 3] = ['\\', '%', '_'];

/// Parses a path or query value as a strictly positive integer.
///
/// Only ASCII digits are accepted: signs, whitespace, decimals and the empty
/// string are all rejected, as is zero.
pub fn parse_positive_int(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<i64>().ok().filter(|value| *value > 0)
}

/// Escapes a filter value so that it matches literally inside
/// `LIKE ? ESCAPE '\'`.
pub fn escape_like_pattern(value: &str) -> Cow<'_, str> {
    if !value.chars().any(|c| LIKE_METACHARACTERS.contains(&c)) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        if LIKE_METACHARACTERS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}

/// A required request body field must be present and not blank.
pub fn require_field(value: Option<String>) -> Result<String, RequestError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(RequestError::BadRequest("Bad request: missing field")),
    }
}
