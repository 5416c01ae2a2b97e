//! Content line lexer for vCard (RFC 6350 §3.2).
//!
//! The whole input is unfolded before any block is detected, so a folded
//! `BEGIN:VCARD` is still recognized.

use crate::rfc::error::ParseError;
use crate::rfc::text::{ContentLine, logical_lines};

/// Tokenizes a whole document into numbered content lines.
pub fn tokenize(input: &str) -> impl Iterator<Item = (usize, Result<ContentLine, ParseError>)> {
    logical_lines(input)
        .into_iter()
        .map(|(line_num, line)| (line_num, ContentLine::parse(&line, line_num)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfolds_before_tokenizing() {
        let input = "BEGIN:VC\r\n ARD\r\nitem1.EMAIL;TYPE=work:a@exa\r\n\tmple.com\r\nEND:VCARD\r\n";
        let lines: Vec<_> = tokenize(input)
            .map(|(n, line)| (n, line.unwrap()))
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].1.value, "VCARD");
        assert_eq!(lines[1].0, 3);
        assert_eq!(lines[1].1.group.as_deref(), Some("item1"));
        assert_eq!(lines[1].1.value, "a@example.com");
    }

    #[test]
    fn lines_without_separator_are_errors() {
        let tokens: Vec<_> = tokenize("BEGIN:VCARD\nnot a property\n").collect();
        assert!(tokens[0].1.is_ok());
        assert!(tokens[1].1.is_err());
    }
}
