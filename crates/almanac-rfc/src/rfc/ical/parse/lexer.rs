//! Content line lexer for iCalendar (RFC 5545 §3.1).

use crate::rfc::error::ParseError;
use crate::rfc::text::{ContentLine, logical_lines};

/// Splits input into logical lines, merging folded continuations.
///
/// Lines without a `:` are treated as continuations of the previous line,
/// which recovers descriptions broken by producers that forget to fold.
#[must_use]
pub fn split_lines(input: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (line_num, line) in logical_lines(input) {
        if !line.contains(':')
            && let Some((_, prev)) = lines.last_mut()
        {
            prev.push_str(&line);
        } else {
            lines.push((line_num, line));
        }
    }

    lines
}

/// Tokenizes a whole document into numbered content lines.
pub fn tokenize(input: &str) -> impl Iterator<Item = (usize, Result<ContentLine, ParseError>)> {
    split_lines(input)
        .into_iter()
        .map(|(line_num, line)| (line_num, ContentLine::parse(&line, line_num)))
}
