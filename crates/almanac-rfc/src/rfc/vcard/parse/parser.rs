//! vCard document parser (RFC 6350).
//!
//! Scans `BEGIN:VCARD` / `END:VCARD` blocks. A card without `FN` is dropped
//! with an error; every other problem is reported and the card is kept.

use super::builder::ContactBuilder;
use super::lexer::tokenize;
use crate::rfc::error::{ParseError, ParseErrorKind};
use crate::rfc::text::ContentLine;
use crate::rfc::vcard::core::ParsedContact;

const NO_CONTACTS: &str = "No contacts found in file";

/// Result of [`parse_vcard_file`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VCardParseResult {
    pub contacts: Vec<ParsedContact>,
    /// All problems, ordered by line.
    pub errors: Vec<ParseError>,
}

/// Parses every `VCARD` block of a document.
///
/// A document without any block yields exactly one error,
/// `"No contacts found in file"`, and no contacts.
#[must_use]
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse_vcard_file(input: &str) -> VCardParseResult {
    tracing::debug!("Parsing vCard document");

    let mut parser = Parser::default();
    for (line_num, token) in tokenize(input) {
        match token {
            Ok(line) => parser.feed(&line, line_num),
            Err(err) => {
                tracing::debug!(line = line_num, "Malformed content line");
                parser.result.errors.push(err);
            }
        }
    }
    let blocks = parser.blocks;
    let result = parser.finish();

    if blocks == 0 {
        tracing::warn!("No VCARD blocks in input");
        return VCardParseResult {
            contacts: Vec::new(),
            errors: vec![ParseError::no_records(NO_CONTACTS)],
        };
    }

    tracing::debug!(
        contacts = result.contacts.len(),
        errors = result.errors.len(),
        "vCard document parsed"
    );
    result
}

#[derive(Default)]
struct Parser {
    open: Option<ContactBuilder>,
    result: VCardParseResult,
    blocks: usize,
}

impl Parser {
    fn feed(&mut self, line: &ContentLine, line_num: usize) {
        let is_vcard = line.value.trim().eq_ignore_ascii_case("VCARD");
        match line.name.as_str() {
            "BEGIN" if is_vcard => self.begin(line_num),
            "END" if is_vcard => self.end(line_num),
            _ => match &mut self.open {
                Some(builder) => builder.apply(line, line_num, &mut self.result.errors),
                None => tracing::trace!(line = line_num, "Ignoring line outside a card"),
            },
        }
    }

    fn begin(&mut self, line_num: usize) {
        if let Some(unclosed) = self.open.take() {
            self.unterminated(&unclosed, line_num);
        }
        self.blocks += 1;
        self.open = Some(ContactBuilder::new(line_num));
    }

    fn end(&mut self, line_num: usize) {
        let Some(builder) = self.open.take() else {
            tracing::debug!(line = line_num, "END:VCARD outside a card");
            return;
        };
        if let Some(contact) = builder.finish(&mut self.result.errors) {
            self.result.contacts.push(contact);
        }
    }

    fn unterminated(&mut self, builder: &ContactBuilder, line_num: usize) {
        tracing::warn!(line = line_num, "Dropping unterminated VCARD");
        self.result.errors.push(ParseError::new(
            ParseErrorKind::UnterminatedBlock,
            line_num,
            format!(
                "VCARD block opened on line {} was not closed",
                builder.begin_line()
            ),
        ));
    }

    fn finish(mut self) -> VCardParseResult {
        if let Some(unclosed) = self.open.take() {
            let line = unclosed.begin_line();
            self.unterminated(&unclosed, line);
        }
        self.result.errors.sort_by_key(|err| err.line);
        self.result
    }
}
