//! Content line folding (RFC 5545 §3.1, RFC 6350 §3.2).

/// Maximum line length in octets (not including CRLF).
const MAX_LINE_OCTETS: usize = 75;

/// Folds a content line to comply with the 75-octet limit.
///
/// The first physical line holds up to 75 octets; every continuation line is
/// a single space followed by up to 74 octets. Lines are joined with CRLF and
/// no trailing line break is added. UTF-8 sequences are never split.
#[must_use]
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut result = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut payload_len = 0;
    let mut first_segment = true;

    for c in line.chars() {
        let char_len = c.len_utf8();

        // Account for continuation prefix on subsequent lines
        let effective_max = if first_segment {
            MAX_LINE_OCTETS
        } else {
            MAX_LINE_OCTETS - 1
        };

        if payload_len + char_len > effective_max {
            result.push_str("\r\n ");
            payload_len = 0;
            first_segment = false;
        }

        result.push(c);
        payload_len += char_len;
    }

    result
}

/// Splits input into logical lines, merging folded continuations.
///
/// Handles both CRLF and bare LF line endings. A physical line starting with
/// SPACE or HTAB continues the previous logical line; the single whitespace
/// character is removed. Empty lines are dropped. Each logical line carries
/// the 1-based number of the physical line it starts on.
#[must_use]
pub fn logical_lines(input: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (i, raw_line) in input.split('\n').enumerate() {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        if line.is_empty() {
            continue;
        }

        if line.starts_with([' ', '\t'])
            && let Some((_, prev)) = lines.last_mut()
        {
            prev.push_str(&line[1..]);
        } else {
            lines.push((i + 1, line.to_string()));
        }
    }

    lines
}

/// Unfolds a document, returning its logical lines joined by CRLF.
#[must_use]
pub fn unfold_lines(input: &str) -> String {
    logical_lines(input)
        .into_iter()
        .map(|(_, line)| line)
        .collect::<Vec<_>>()
        .join("\r\n")
}
