//! Text escaping utilities (RFC 5545 §3.3.11, RFC 6868).

/// Escapes text for TEXT values.
///
/// Escapes: backslash, semicolon, comma, and newlines.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 10);
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            ';' => result.push_str("\\;"),
            ',' => result.push_str("\\,"),
            '\n' => result.push_str("\\n"),
            _ => result.push(c),
        }
    }
    result
}

/// Unescapes an iCalendar TEXT value.
///
/// Exact inverse of [`escape_text`]. The scan is single-pass, so `\\n` yields
/// a backslash followed by `n` and never a newline. `\N` is accepted as a
/// newline; unknown escapes are kept verbatim.
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some('n' | 'N') => {
                    chars.next();
                    result.push('\n');
                }
                Some(&next) if matches!(next, ',' | ';' | '\\') => {
                    chars.next();
                    result.push(next);
                }
                _ => result.push(c),
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Splits a raw (still escaped) value on separators that are not escaped.
///
/// The returned slices keep their escapes; unescape each part separately.
#[must_use]
pub fn split_unescaped(s: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
        } else if c == separator {
            parts.push(&s[start..i]);
            start = i + c.len_utf8();
        }
    }

    parts.push(&s[start..]);
    parts
}

/// Escapes a parameter value if needed.
///
/// Returns the value quoted if it contains special characters.
#[must_use]
pub fn escape_param_value(s: &str) -> String {
    if needs_quoting(s) {
        // Use caret encoding for special chars inside quotes (RFC 6868)
        let mut result = String::with_capacity(s.len() + 10);
        result.push('"');
        for c in s.chars() {
            match c {
                '^' => result.push_str("^^"),
                '\n' => result.push_str("^n"),
                '"' => result.push_str("^'"),
                _ => result.push(c),
            }
        }
        result.push('"');
        result
    } else {
        s.to_string()
    }
}

/// Checks if a parameter value needs quoting.
fn needs_quoting(s: &str) -> bool {
    s.chars()
        .any(|c| matches!(c, ':' | ';' | ',' | '"' | '\n' | '^'))
}
