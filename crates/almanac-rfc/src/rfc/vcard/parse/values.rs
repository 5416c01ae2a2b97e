//! vCard property value parsers.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveDate;

use crate::error::{RfcError, RfcResult};
use crate::rfc::text::{ContentLine, parse_date_lenient, split_unescaped};
use crate::rfc::validation::{Sex, TelephoneType};
use crate::rfc::vcard::core::{Gender, PostalAddress, StructuredName};

/// Preference values outside this range are ignored (RFC 6350 §5.3).
const PREF_RANGE: std::ops::RangeInclusive<u32> = 1..=100;

/// `TYPE` values that carry no classification of their own.
const IGNORED_TYPES: [&str; 2] = ["pref", "internet"];

/// Unescapes a vCard text value.
///
/// Same escapes as iCalendar TEXT, plus `\:` which vCard 3 producers emit.
#[must_use]
pub fn unescape_value(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.peek() {
            Some('n' | 'N') => {
                chars.next();
                result.push('\n');
            }
            Some(&next) if matches!(next, ',' | ';' | ':' | '\\') => {
                chars.next();
                result.push(next);
            }
            _ => result.push(c),
        }
    }

    result
}

/// Unescaped value. A present but empty property stays empty.
#[must_use]
pub fn text(line: &ContentLine) -> String {
    unescape_value(&line.value)
}

/// [`text`], `None` when blank.
#[must_use]
pub fn non_blank(line: &ContentLine) -> Option<String> {
    let value = text(line);
    (!value.trim().is_empty()).then_some(value)
}

/// Splits a comma-separated list (`NICKNAME`, `CATEGORIES`), dropping blanks.
#[must_use]
pub fn text_list(raw: &str) -> Vec<String> {
    split_unescaped(raw, ',')
        .into_iter()
        .map(|part| unescape_value(part).trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Splits a structured value on unescaped `;` into exactly `N` unescaped
/// components; missing trailing components are empty.
fn components<const N: usize>(raw: &str) -> [String; N] {
    let parts = split_unescaped(raw, ';');
    std::array::from_fn(|i| {
        parts
            .get(i)
            .map(|part| unescape_value(part).trim().to_string())
            .unwrap_or_default()
    })
}

/// Parses `N` (family;given;additional;prefix;suffix).
///
/// Returns `None` when every component is empty.
#[must_use]
pub fn structured_name(raw: &str) -> Option<StructuredName> {
    let [family, given, additional, prefix, suffix] = components::<5>(raw);
    let name = StructuredName {
        family,
        given,
        additional,
        prefix,
        suffix,
    };
    (!name.is_empty()).then_some(name)
}

/// Parses `ADR` (pobox;ext;street;locality;region;postal;country).
#[must_use]
pub fn postal_address(raw: &str, types: Vec<String>) -> PostalAddress {
    let [po_box, extended, street, locality, region, postal_code, country] = components::<7>(raw);
    PostalAddress {
        po_box,
        extended,
        street,
        locality,
        region,
        postal_code,
        country,
        types,
    }
}

/// Parses `ORG` into the organization name and its units.
#[must_use]
pub fn organization(raw: &str) -> (Option<String>, Vec<String>) {
    let mut parts = split_unescaped(raw, ';')
        .into_iter()
        .map(|part| unescape_value(part).trim().to_string());
    let name = parts.next().filter(|name| !name.is_empty());
    let units = parts.filter(|unit| !unit.is_empty()).collect();
    (name, units)
}

/// Parses `GENDER` (sex;identity).
///
/// ## Errors
/// Returns an error if the sex component is not one of `M F O N U`.
pub fn gender(raw: &str) -> RfcResult<Gender> {
    let [sex, identity] = components::<2>(raw);
    let sex = if sex.is_empty() {
        None
    } else {
        Some(sex.parse::<Sex>()?)
    };
    Ok(Gender {
        sex,
        identity: (!identity.is_empty()).then_some(identity),
    })
}

/// Parses `BDAY` / `ANNIVERSARY` into a calendar date.
///
/// Any time part is dropped.
///
/// ## Errors
/// Returns an error for dates without a year (`--0415`) and for values that
/// are not a complete date.
pub fn contact_date(raw: &str) -> RfcResult<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.starts_with("--") {
        return Err(RfcError::InvalidDate(format!(
            "'{trimmed}' has no year"
        )));
    }
    let date_part = trimmed
        .split(['T', 't'])
        .next()
        .unwrap_or(trimmed);
    let parsed = parse_date_lenient(date_part, None);
    match (parsed.value, parsed.issue) {
        (Some(value), None) => Ok(value.date()),
        (_, Some(issue)) => Err(RfcError::InvalidDate(issue)),
        (None, None) => Err(RfcError::InvalidDate(trimmed.to_string())),
    }
}

/// Lowercase `TYPE` values in order, without `pref` and `internet`.
#[must_use]
pub fn types(line: &ContentLine) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in line.param_values("TYPE").flat_map(|v| v.split(',')) {
        let value = value.trim().to_ascii_lowercase();
        if !value.is_empty() && !IGNORED_TYPES.contains(&value.as_str()) && !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

/// [`types`] for `TEL`, with legacy spellings such as `mobile` mapped to
/// their RFC 6350 form. Unknown values are kept as written.
#[must_use]
pub fn phone_types(line: &ContentLine) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in types(line) {
        let value = TelephoneType::parse(&value).map_or(value, |t| t.as_str().to_string());
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

/// Preference of a repeatable property; `TYPE=pref` counts as `PREF=1`.
///
/// ## Errors
/// Returns an error if `PREF` is not an integer in `1..=100`.
pub fn preference(line: &ContentLine) -> RfcResult<Option<u32>> {
    if let Some(raw) = line.param_value("PREF") {
        let pref: u32 = raw
            .trim()
            .parse()
            .map_err(|e| RfcError::ParseError(format!("PREF '{raw}' is not an integer: {e}")))?;
        if !PREF_RANGE.contains(&pref) {
            return Err(RfcError::ValidationError(format!(
                "PREF {pref} is outside 1..=100"
            )));
        }
        return Ok(Some(pref));
    }
    let legacy = line
        .param_values("TYPE")
        .flat_map(|v| v.split(','))
        .any(|v| v.trim().eq_ignore_ascii_case("pref"));
    Ok(legacy.then_some(1))
}

/// Index of the most preferred entry: lowest value, first on ties.
#[must_use]
pub fn primary_index(preferences: &[Option<u32>]) -> Option<usize> {
    preferences
        .iter()
        .enumerate()
        .filter_map(|(i, pref)| pref.map(|pref| (i, pref)))
        .min_by_key(|&(_, pref)| pref)
        .map(|(i, _)| i)
}

/// Removes a URI scheme (any case) from a value.
#[must_use]
pub fn strip_scheme<'a>(value: &'a str, scheme: &str) -> &'a str {
    let trimmed = value.trim();
    match trimmed.get(..scheme.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(scheme) => trimmed[scheme.len()..].trim(),
        _ => trimmed,
    }
}

/// Reads `PHOTO`, turning vCard 3 inline data into a `data:` URI.
///
/// ## Errors
/// Returns an error if inline data is not valid base64.
pub fn photo(line: &ContentLine) -> RfcResult<String> {
    let inline = line
        .param_value("ENCODING")
        .is_some_and(|v| v.eq_ignore_ascii_case("b") || v.eq_ignore_ascii_case("BASE64"));
    if !inline {
        return Ok(line.value.trim().to_string());
    }

    let data: String = line.value.split_whitespace().collect();
    STANDARD
        .decode(data.as_bytes())
        .map_err(|e| RfcError::ParseError(format!("invalid base64 photo: {e}")))?;

    let media_type = match line.param_value("TYPE").map(str::trim) {
        Some(t) if t.contains('/') => t.to_ascii_lowercase(),
        Some(t) if !t.is_empty() => format!("image/{}", t.to_ascii_lowercase()),
        _ => "application/octet-stream".to_string(),
    };
    Ok(format!("data:{media_type};base64,{data}"))
}
