//! Explicit depth counting over source characters.
//!
//! Delimiters inside string literals, text blocks, char literals and
//! comments are ignored. All delimiters are ASCII, so byte scanning never
//! splits a multi-byte character.

/// Index of the delimiter closing the one at `open_index`.
///
/// `open_index` must point at `{`, `(` or `[`. Only that delimiter kind is
/// counted. Returns `None` when the block never closes.
pub fn matching_close(text: &str, open_index: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let open = *bytes.get(open_index)?;
    let close = match open {
        b'{' => b'}',
        b'(' => b')',
        b'[' => b']',
        _ => return None,
    };

    let mut depth = 0usize;
    let mut i = open_index;
    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                i = skip_string(bytes, i)?;
                continue;
            }
            b'\'' => {
                i = skip_char_literal(bytes, i);
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = skip_line_comment(bytes, i);
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = skip_block_comment(bytes, i)?;
                continue;
            }
            b if b == open => depth += 1,
            b if b == close => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Byte range `(open, close)` of the first `{ ... }` block at or after `from`.
pub fn find_block(text: &str, from: usize) -> Option<(usize, usize)> {
    let open = from + text.get(from..)?.find('{')?;
    let close = matching_close(text, open)?;
    Some((open, close))
}

/// Text strictly between the parenthesis at `open_index` and its match.
pub fn balanced_args(text: &str, open_index: usize) -> Option<&str> {
    if text.as_bytes().get(open_index) != Some(&b'(') {
        return None;
    }
    let close = matching_close(text, open_index)?;
    Some(&text[open_index + 1..close])
}

/// Split on `separator` at nesting depth zero, trimming each part.
pub fn split_top_level(text: &str, separator: u8) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                i = skip_string(bytes, i).unwrap_or(bytes.len());
                continue;
            }
            b'(' | b'[' | b'{' | b'<' => depth += 1,
            b')' | b']' | b'}' | b'>' => depth -= 1,
            b if b == separator && depth <= 0 => {
                parts.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    let tail = text[start..].trim();
    if !tail.is_empty() || !parts.is_empty() {
        parts.push(tail);
    }
    parts
}

/// Index just past the string literal starting at `start`.
fn skip_string(bytes: &[u8], start: usize) -> Option<usize> {
    if bytes[start..].starts_with(b"\"\"\"") {
        let body = start + 3;
        let end = bytes[body..].windows(3).position(|w| w == b"\"\"\"")?;
        return Some(body + end + 3);
    }

    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i + 1),
            // plain string literals cannot span lines
            b'\n' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

fn skip_char_literal(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    let limit = (start + 12).min(bytes.len());
    while i < limit {
        match bytes[i] {
            b'\\' => i += 2,
            b'\'' => return i + 1,
            b'\n' => break,
            _ => i += 1,
        }
    }
    start + 1
}

fn skip_line_comment(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map(|offset| start + offset + 1)
        .unwrap_or(bytes.len())
}

fn skip_block_comment(bytes: &[u8], start: usize) -> Option<usize> {
    let body = start + 2;
    let end = bytes.get(body..)?.windows(2).position(|w| w == b"*/")?;
    Some(body + end + 2)
}
