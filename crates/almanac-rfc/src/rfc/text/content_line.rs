//! Content line tokenizer shared by the iCalendar and vCard lexers.
//!
//! Format: `[group "."] name *(";" param) ":" value` where
//! `param = param-name "=" param-value *("," param-value)`.

use std::fmt;

use super::escape::escape_param_value;
use crate::rfc::error::{ParseError, ParseErrorKind};

/// A property parameter with one or more values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name (uppercase).
    pub name: String,
    /// Parameter values with quoting and caret escapes removed.
    pub values: Vec<String>,
}

impl Parameter {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: vec![value.into()],
        }
    }

    #[must_use]
    pub fn with_values(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// First value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Case-insensitive membership test.
    #[must_use]
    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v.eq_ignore_ascii_case(value))
    }
}

/// One logical (unfolded) content line.
///
/// `value` is the on-wire form; TEXT unescaping is left to the caller since it
/// depends on the property's value type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// vCard property group (`item1` in `item1.EMAIL`).
    pub group: Option<String>,
    /// Property name (uppercase).
    pub name: String,
    pub params: Vec<Parameter>,
    pub value: String,
}

impl ContentLine {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            group: None,
            name: name.into(),
            params: Vec::new(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn with_param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    /// Finds a parameter by name (case-insensitive).
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&Parameter> {
        self.params
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// First value of the named parameter.
    #[must_use]
    pub fn param_value(&self, name: &str) -> Option<&str> {
        self.param(name).and_then(Parameter::value)
    }

    /// All values of every parameter with this name.
    pub fn param_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.params
            .iter()
            .filter(move |p| p.name.eq_ignore_ascii_case(name))
            .flat_map(|p| p.values.iter().map(String::as_str))
    }

    /// Tokenizes a logical line.
    ///
    /// A parameter without `=` (vCard 2.1 `TEL;WORK:...`) is read as a
    /// `TYPE` value.
    ///
    /// ## Errors
    /// Returns a [`ParseErrorKind::MalformedLine`] error if the line has no
    /// value separator, an invalid name, or an unclosed quoted parameter.
    pub fn parse(line: &str, line_num: usize) -> Result<Self, ParseError> {
        let malformed =
            |message: &str| ParseError::new(ParseErrorKind::MalformedLine, line_num, message);

        let name_end = line
            .find([';', ':'])
            .ok_or_else(|| malformed("line has no ':' separator"))?;
        let full_name = &line[..name_end];
        if !is_valid_name(full_name, true) {
            return Err(malformed("invalid property name"));
        }

        let (group, name) = match full_name.rsplit_once('.') {
            Some((group, name)) => (Some(group.to_string()), name),
            None => (None, full_name),
        };
        if name.is_empty() || group.as_deref() == Some("") {
            return Err(malformed("invalid property name"));
        }

        let bytes = line.as_bytes();
        let mut pos = name_end;
        let mut params = Vec::new();
        while bytes.get(pos) == Some(&b';') {
            let (param, next) = parse_parameter(line, pos + 1, line_num)?;
            params.push(param);
            pos = next;
        }

        Ok(Self {
            group,
            name: name.to_ascii_uppercase(),
            params,
            value: line[pos + 1..].to_string(),
        })
    }
}

impl fmt::Display for ContentLine {
    /// Writes the unfolded on-wire form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(group) = &self.group {
            write!(f, "{group}.")?;
        }
        f.write_str(&self.name)?;
        for param in &self.params {
            write!(f, ";{}=", param.name)?;
            for (i, value) in param.values.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                f.write_str(&escape_param_value(value))?;
            }
        }
        write!(f, ":{}", self.value)
    }
}

fn is_valid_name(name: &str, allow_group: bool) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || (allow_group && c == '.'))
}

/// Parses one parameter starting at `start`.
///
/// Returns the parameter and the index of the `;` or `:` that follows it.
fn parse_parameter(
    line: &str,
    start: usize,
    line_num: usize,
) -> Result<(Parameter, usize), ParseError> {
    let malformed =
        |message: &str| ParseError::new(ParseErrorKind::MalformedLine, line_num, message);
    let bytes = line.as_bytes();

    let name_end = line[start..]
        .find(['=', ';', ':', ','])
        .map_or(line.len(), |offset| start + offset);
    let name = &line[start..name_end];
    if !is_valid_name(name, false) {
        return Err(malformed("invalid parameter name"));
    }

    match bytes.get(name_end) {
        Some(b'=') => {}
        Some(b';' | b':') => return Ok((Parameter::new("TYPE", name), name_end)),
        _ => return Err(malformed("line has no ':' separator")),
    }

    let mut pos = name_end + 1;
    let mut values = Vec::new();
    loop {
        let (value, next) = parse_param_value(line, pos, line_num)?;
        values.push(value);
        pos = next;
        match bytes.get(pos) {
            Some(b',') => pos += 1,
            Some(b';' | b':') => {
                return Ok((
                    Parameter::with_values(name.to_ascii_uppercase(), values),
                    pos,
                ));
            }
            Some(_) => return Err(malformed("unexpected character after quoted parameter")),
            None => return Err(malformed("line has no ':' separator")),
        }
    }
}

/// Parses a (possibly quoted) parameter value starting at `start`.
fn parse_param_value(
    line: &str,
    start: usize,
    line_num: usize,
) -> Result<(String, usize), ParseError> {
    if line.as_bytes().get(start) == Some(&b'"') {
        let body_start = start + 1;
        let close = line[body_start..].find('"').ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::MalformedLine,
                line_num,
                "unclosed quoted parameter value",
            )
        })?;
        let body = &line[body_start..body_start + close];
        return Ok((decode_caret(body), body_start + close + 1));
    }

    let end = line[start..]
        .find([',', ';', ':'])
        .map_or(line.len(), |offset| start + offset);
    Ok((line[start..end].to_string(), end))
}

/// Decodes RFC 6868 caret escapes (`^^`, `^n`, `^'`).
fn decode_caret(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '^' {
            result.push(c);
            continue;
        }
        match chars.peek() {
            Some('^') => {
                chars.next();
                result.push('^');
            }
            Some('n' | 'N') => {
                chars.next();
                result.push('\n');
            }
            Some('\'') => {
                chars.next();
                result.push('"');
            }
            _ => result.push('^'),
        }
    }
    result
}
