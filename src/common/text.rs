//! Text manipulation utilities

/// Capitalizes the first character of a string
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Strips one pair of matching surrounding double or single quotes.
///
/// Returns `None` unless the whole expression is a single literal: an
/// unescaped delimiter inside (`"a" + "b"`) or an escaped closing quote
/// rejects it.
pub fn unquote(s: &str) -> Option<&str> {
    let s = s.trim();
    let quote = s.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    if s.len() < 2 || !s.ends_with(quote) {
        return None;
    }

    let inner = &s[1..s.len() - 1];
    let mut escaped = false;
    for c in inner.chars() {
        match c {
            '\\' if !escaped => escaped = true,
            c if c == quote && !escaped => return None,
            _ => escaped = false,
        }
    }
    (!escaped).then_some(inner)
}
