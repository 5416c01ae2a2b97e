//! Content line output shared by the iCalendar and vCard generators.

use super::content_line::{ContentLine, Parameter};
use super::escape::escape_text;
use super::fold::fold_line;

/// Accumulates folded, CRLF-terminated content lines.
#[derive(Debug, Default)]
pub struct LineWriter {
    out: String,
}

impl LineWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a content line whose value is already in on-wire form.
    pub fn line(&mut self, line: &ContentLine) {
        self.out.push_str(&fold_line(&line.to_string()));
        self.out.push_str("\r\n");
    }

    /// Writes `NAME:value` without escaping the value.
    pub fn raw(&mut self, name: &str, value: &str) {
        self.line(&ContentLine::new(name, value));
    }

    /// Writes a TEXT property, escaping the value.
    pub fn text(&mut self, name: &str, value: &str) {
        self.line(&ContentLine::new(name, escape_text(value)));
    }

    /// Writes a TEXT property when present.
    pub fn text_opt(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.text(name, value);
        }
    }

    /// Writes a TEXT property with parameters.
    pub fn text_with(&mut self, name: &str, params: Vec<Parameter>, value: &str) {
        let mut line = ContentLine::new(name, escape_text(value));
        line.params = params;
        self.line(&line);
    }

    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }
}
