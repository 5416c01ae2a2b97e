//! Property value interpretation for iCalendar content lines.
//!
//! Each helper takes a tokenized [`ContentLine`] and returns either the typed
//! value or a message for the builder to record as a [`ParseError`].
//!
//! [`ParseError`]: crate::rfc::ParseError

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rrule::{RRule, Unvalidated};

use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::core::{AlarmTrigger, Attachment, AttachmentSource};
use crate::rfc::text::{
    ContentLine, DateValue, LenientDate, parse_date_lenient, parse_duration, split_unescaped,
    unescape_text,
};
use crate::rfc::validation::TriggerRelation;

/// Removes a `mailto:` scheme (any case) from a calendar address.
#[must_use]
pub fn strip_mailto(value: &str) -> &str {
    let trimmed = value.trim();
    match trimmed.get(..7) {
        Some(scheme) if scheme.eq_ignore_ascii_case("mailto:") => &trimmed[7..],
        _ => trimmed,
    }
}

/// Unescaped TEXT value. A present but empty property stays empty.
#[must_use]
pub fn text_value(line: &ContentLine) -> String {
    unescape_text(&line.value)
}

/// [`text_value`], `None` when blank. For properties with a fallback.
#[must_use]
pub fn non_blank_text(line: &ContentLine) -> Option<String> {
    let text = text_value(line);
    (!text.trim().is_empty()).then_some(text)
}

/// Splits a comma-separated TEXT list, dropping empty entries.
#[must_use]
pub fn text_list(raw: &str) -> Vec<String> {
    split_unescaped(raw, ',')
        .into_iter()
        .map(|part| unescape_text(part).trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

fn is_date_typed(line: &ContentLine) -> bool {
    line.param_value("VALUE")
        .is_some_and(|v| v.eq_ignore_ascii_case("DATE"))
}

/// Parses one DATE or DATE-TIME value of the line, honoring `TZID` and
/// `VALUE=DATE`.
#[must_use]
pub fn date_value(line: &ContentLine, raw: &str) -> LenientDate {
    let mut parsed = parse_date_lenient(raw, line.param_value("TZID"));
    if is_date_typed(line) {
        parsed.value = parsed.value.map(|v| DateValue::Date(v.date()));
    }
    parsed
}

/// Parses every value of a multi-valued date property (`RDATE`, `EXDATE`).
///
/// `PERIOD` values contribute their start.
#[must_use]
pub fn date_list(line: &ContentLine) -> Vec<LenientDate> {
    line.value
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            let start = part.split_once('/').map_or(part, |(start, _)| start);
            date_value(line, start)
        })
        .collect()
}

/// Parses an integer and checks it against an inclusive range.
///
/// ## Errors
/// Returns an error if the value is not an integer within `min..=max`.
pub fn bounded_int(raw: &str, min: i64, max: i64) -> RfcResult<i64> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|e| RfcError::ParseError(format!("'{raw}' is not an integer: {e}")))?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(RfcError::ValidationError(format!(
            "{value} is outside {min}..={max}"
        )))
    }
}

/// Parses an integer and checks it with a range predicate.
///
/// ## Errors
/// Returns an error if the value is not an integer or `valid` rejects it.
pub fn checked_int(raw: &str, valid: fn(i64) -> bool) -> RfcResult<i64> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|e| RfcError::ParseError(format!("'{raw}' is not an integer: {e}")))?;
    if valid(value) {
        Ok(value)
    } else {
        Err(RfcError::ValidationError(format!("{value} is out of range")))
    }
}

/// Parses a `TRIGGER` value.
///
/// ## Errors
/// Returns an error if the value is neither a duration nor a date-time.
pub fn trigger(line: &ContentLine) -> RfcResult<AlarmTrigger> {
    let absolute = line
        .param_value("VALUE")
        .is_some_and(|v| v.eq_ignore_ascii_case("DATE-TIME"));

    if !absolute && let Ok(offset_seconds) = parse_duration(&line.value) {
        let related = line
            .param_value("RELATED")
            .and_then(TriggerRelation::parse)
            .unwrap_or(TriggerRelation::Start);
        return Ok(AlarmTrigger::Relative {
            offset_seconds,
            related,
        });
    }

    let parsed = parse_date_lenient(&line.value, None);
    match (parsed.value, parsed.issue) {
        (Some(value), None) => Ok(AlarmTrigger::Absolute {
            at: value.to_utc(),
        }),
        _ => Err(RfcError::InvalidDuration(line.value.clone())),
    }
}

/// Parses an `ATTACH` value (URI or inline base64).
///
/// ## Errors
/// Returns an error if an inline payload is not valid base64.
pub fn attachment(line: &ContentLine) -> RfcResult<Attachment> {
    let inline = line
        .param_value("ENCODING")
        .is_some_and(|v| v.eq_ignore_ascii_case("BASE64"))
        || line
            .param_value("VALUE")
            .is_some_and(|v| v.eq_ignore_ascii_case("BINARY"));

    let source = if inline {
        let compact: String = line.value.split_whitespace().collect();
        let bytes = STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| RfcError::ParseError(format!("invalid base64 attachment: {e}")))?;
        AttachmentSource::Inline(bytes)
    } else {
        AttachmentSource::Uri(line.value.trim().to_string())
    };

    Ok(Attachment {
        source,
        format_type: line.param_value("FMTTYPE").map(str::to_string),
    })
}

/// Checks an `RRULE` value against RFC 5545 §3.3.10.
///
/// ## Errors
/// Returns an error describing why the rule was rejected.
pub fn validate_rrule(raw: &str) -> RfcResult<()> {
    raw.trim()
        .parse::<RRule<Unvalidated>>()
        .map(|_| ())
        .map_err(|e| RfcError::InvalidRecurrence(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn line(raw: &str) -> ContentLine {
        ContentLine::parse(raw, 1).unwrap()
    }

    #[test]
    fn strip_mailto_any_case() {
        assert_eq!(strip_mailto("mailto:a@b.c"), "a@b.c");
        assert_eq!(strip_mailto("MAILTO:a@b.c"), "a@b.c");
        assert_eq!(strip_mailto("a@b.c"), "a@b.c");
    }

    #[test]
    fn text_list_splits_on_unescaped_commas() {
        assert_eq!(
            text_list("Work,Personal\\, private, ,Travel"),
            vec!["Work", "Personal, private", "Travel"]
        );
    }

    #[test]
    fn value_date_forces_date_only() {
        let parsed = date_value(&line("DTSTART;VALUE=DATE:20240115"), "20240115");
        assert_eq!(
            parsed.value,
            Some(DateValue::Date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()))
        );
    }

    #[test]
    fn date_list_reads_periods() {
        let values = date_list(&line(
            "RDATE;VALUE=PERIOD:20240101T090000Z/PT1H,20240102T090000Z/PT1H",
        ));
        assert_eq!(values.len(), 2);
        assert!(values.iter().all(|v| v.value.is_some()));
    }

    #[test]
    fn trigger_forms() {
        assert_eq!(
            trigger(&line("TRIGGER:-PT15M")).unwrap(),
            AlarmTrigger::Relative {
                offset_seconds: -900,
                related: TriggerRelation::Start
            }
        );
        assert_eq!(
            trigger(&line("TRIGGER;RELATED=END:PT5M")).unwrap(),
            AlarmTrigger::Relative {
                offset_seconds: 300,
                related: TriggerRelation::End
            }
        );
        assert!(matches!(
            trigger(&line("TRIGGER;VALUE=DATE-TIME:20240115T093000Z")).unwrap(),
            AlarmTrigger::Absolute { .. }
        ));
        assert!(trigger(&line("TRIGGER:soon")).is_err());
    }

    #[test]
    fn inline_attachment_is_decoded() {
        let parsed = attachment(&line(
            "ATTACH;FMTTYPE=text/plain;ENCODING=BASE64;VALUE=BINARY:aGVsbG8=",
        ))
        .unwrap();
        assert_eq!(parsed.source, AttachmentSource::Inline(b"hello".to_vec()));
        assert_eq!(parsed.format_type.as_deref(), Some("text/plain"));
        assert!(attachment(&line("ATTACH;ENCODING=BASE64:!!!")).is_err());
    }

    #[test]
    fn bounded_int_checks_range() {
        assert_eq!(bounded_int("5", 0, 9).unwrap(), 5);
        assert!(bounded_int("10", 0, 9).is_err());
        assert!(bounded_int("high", 0, 9).is_err());
        assert_eq!(checked_int(" 7 ", |v| v < 10).unwrap(), 7);
        assert!(checked_int("12", |v| v < 10).is_err());
    }

    #[test]
    fn rrule_validation() {
        assert!(validate_rrule("FREQ=WEEKLY;BYDAY=MO,WE").is_ok());
        assert!(validate_rrule("FREQ=SOMETIMES").is_err());
    }
}
