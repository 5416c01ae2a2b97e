//! DATE and DATE-TIME values (RFC 5545 §3.3.4-5, RFC 6350 §4.3).
//!
//! Date-only values are calendar dates and stay [`NaiveDate`]s; timestamps
//! are instants and are normalized to UTC on parse.
//!
//! ## Lenient parse policy
//!
//! Real-world producers emit truncated or decorated values. [`parse_date_lenient`]
//! returns the best value it can recover together with an `issue` describing
//! anything it had to guess. Callers turn that issue into a parse error entry,
//! so degraded values are always reported. When nothing usable is left the
//! value is `None`; the parser never substitutes the current time.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RfcError, RfcResult};

/// A date-only value or a UTC instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DateValue {
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
}

impl DateValue {
    #[must_use]
    pub const fn is_date_only(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// Returns the calendar date of the value (UTC date for instants).
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Date(date) => *date,
            Self::DateTime(dt) => dt.date_naive(),
        }
    }

    /// Returns the value as an instant; dates map to midnight UTC.
    #[must_use]
    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            Self::Date(date) => date.and_time(NaiveTime::MIN).and_utc(),
            Self::DateTime(dt) => *dt,
        }
    }

    /// Shifts the value by a signed number of seconds.
    ///
    /// Dates move by whole days (the duration is truncated to days).
    #[must_use]
    pub fn checked_add_seconds(&self, seconds: i64) -> Option<Self> {
        match self {
            Self::Date(date) => {
                let days = TimeDelta::try_days(seconds / 86_400)?;
                date.checked_add_signed(days).map(Self::Date)
            }
            Self::DateTime(dt) => {
                let delta = TimeDelta::try_seconds(seconds)?;
                dt.checked_add_signed(delta).map(Self::DateTime)
            }
        }
    }
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<DateTime<Utc>> for DateValue {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }
}

/// Formats an instant as `YYYYMMDDTHHMMSSZ`.
#[must_use]
pub fn format_date_utc(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Formats a calendar date as `YYYYMMDD`.
#[must_use]
pub fn format_date_only(date: &NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Formats a [`DateValue`] in its packed form.
#[must_use]
pub fn format_date_value(value: &DateValue) -> String {
    match value {
        DateValue::Date(date) => format_date_only(date),
        DateValue::DateTime(dt) => format_date_utc(dt),
    }
}

/// Outcome of a lenient date parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LenientDate {
    /// Recovered value, if any.
    pub value: Option<DateValue>,
    /// Description of what had to be guessed or dropped.
    pub issue: Option<String>,
}

impl LenientDate {
    fn exact(value: DateValue) -> Self {
        Self {
            value: Some(value),
            issue: None,
        }
    }

    fn failed(issue: impl Into<String>) -> Self {
        Self {
            value: None,
            issue: Some(issue.into()),
        }
    }
}

/// Parses a date or date-time leniently.
///
/// Accepts packed `YYYYMMDD[THHMMSS[Z]]`, extended `YYYY-MM-DD[THH:MM:SS[Z]]`
/// and RFC 3339 values with offsets. `tzid` names the IANA zone of a local
/// time; times without `Z` or a known zone are read as UTC.
#[must_use]
pub fn parse_date_lenient(raw: &str, tzid: Option<&str>) -> LenientDate {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return LenientDate::failed("empty date value");
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return LenientDate::exact(DateValue::DateTime(dt.with_timezone(&Utc)));
    }

    let compact: String = trimmed
        .chars()
        .filter(|c| !matches!(c, '-' | ':'))
        .collect();
    let (date_part, time_part) = match compact.find(['T', 't']) {
        Some(pos) => (&compact[..pos], Some(&compact[pos + 1..])),
        None => (compact.as_str(), None),
    };

    let Some(date) = parse_packed_date(date_part) else {
        return LenientDate::failed(format!("unrecognized date '{trimmed}'"));
    };

    let mut issue =
        (date_part.len() > 8).then(|| format!("ignored trailing characters in '{trimmed}'"));

    let Some(time_part) = time_part else {
        return LenientDate {
            value: Some(DateValue::Date(date)),
            issue,
        };
    };

    let (time_digits, is_utc) = match time_part.strip_suffix(['Z', 'z']) {
        Some(stripped) => (stripped, true),
        None => (time_part, false),
    };
    let time_digits = time_digits
        .split_once('.')
        .map_or(time_digits, |(whole, _)| whole);

    let time = parse_packed_time(time_digits).unwrap_or_else(|| {
        issue.get_or_insert_with(|| format!("invalid time in '{trimmed}', using midnight"));
        NaiveTime::MIN
    });
    let naive = date.and_time(time);

    if is_utc {
        return LenientDate {
            value: Some(DateValue::DateTime(naive.and_utc())),
            issue,
        };
    }

    let utc = match tzid {
        Some(tzid) => resolve_zoned(naive, tzid, &mut issue),
        None => naive.and_utc(),
    };

    LenientDate {
        value: Some(DateValue::DateTime(utc)),
        issue,
    }
}

/// Parses a date or date-time strictly.
///
/// ## Errors
/// Returns an error if the value is not an exact date or date-time.
pub fn parse_date_value(raw: &str, tzid: Option<&str>) -> RfcResult<DateValue> {
    let parsed = parse_date_lenient(raw, tzid);
    match (parsed.value, parsed.issue) {
        (_, Some(issue)) => Err(RfcError::InvalidDate(issue)),
        (Some(value), None) => Ok(value),
        (None, None) => Err(RfcError::InvalidDate(raw.to_string())),
    }
}

/// Parses the leading `YYYYMMDD` of a packed date.
fn parse_packed_date(s: &str) -> Option<NaiveDate> {
    let digits = s.get(..8)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = digits[0..4].parse().ok()?;
    let month = digits[4..6].parse().ok()?;
    let day = digits[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses `HHMMSS` or `HHMM` (leap seconds clamp to 59).
fn parse_packed_time(s: &str) -> Option<NaiveTime> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (hour, minute, second) = match s.len() {
        4 => (s[0..2].parse().ok()?, s[2..4].parse().ok()?, 0),
        6 => (
            s[0..2].parse().ok()?,
            s[2..4].parse().ok()?,
            s[4..6].parse::<u32>().ok()?,
        ),
        _ => return None,
    };
    NaiveTime::from_hms_opt(hour, minute, second.min(59))
}

/// Converts a local time in the named zone to UTC.
fn resolve_zoned(naive: NaiveDateTime, tzid: &str, issue: &mut Option<String>) -> DateTime<Utc> {
    let name = tzid.trim().trim_matches('"');
    match name.parse::<chrono_tz::Tz>() {
        Ok(tz) => {
            if let Some(local) = tz.from_local_datetime(&naive).earliest() {
                local.with_timezone(&Utc)
            } else {
                issue.get_or_insert_with(|| {
                    format!("local time {naive} does not exist in '{name}', read as UTC")
                });
                naive.and_utc()
            }
        }
        Err(_) => {
            issue.get_or_insert_with(|| format!("unknown time zone '{name}', read as UTC"));
            naive.and_utc()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateValue {
        DateValue::DateTime(Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap())
    }

    #[test]
    fn format_forms() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        assert_eq!(format_date_utc(&dt), "20240115T100000Z");
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(format_date_only(&date), "20240115");
    }

    #[test]
    fn parse_packed_utc() {
        assert_eq!(
            parse_date_value("20240115T100000Z", None).unwrap(),
            utc(2024, 1, 15, 10, 0, 0)
        );
    }

    #[test]
    fn parse_date_only() {
        let value = parse_date_value("20240115", None).unwrap();
        assert!(value.is_date_only());
        assert_eq!(value.date(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn parse_extended_forms() {
        assert_eq!(
            parse_date_value("2024-01-15T10:00:00Z", None).unwrap(),
            utc(2024, 1, 15, 10, 0, 0)
        );
        assert_eq!(
            parse_date_value("2024-01-15T11:00:00+01:00", None).unwrap(),
            utc(2024, 1, 15, 10, 0, 0)
        );
        assert!(parse_date_value("1985-04-12", None).unwrap().is_date_only());
    }

    #[test]
    fn parse_with_tzid() {
        // New York is UTC-5 in January
        assert_eq!(
            parse_date_value("20240115T100000", Some("America/New_York")).unwrap(),
            utc(2024, 1, 15, 15, 0, 0)
        );
    }

    #[test]
    fn floating_time_reads_as_utc() {
        assert_eq!(
            parse_date_value("20240115T100000", None).unwrap(),
            utc(2024, 1, 15, 10, 0, 0)
        );
    }

    #[test]
    fn unknown_zone_is_reported() {
        let parsed = parse_date_lenient("20240115T100000", Some("Eastern Standard Time"));
        assert_eq!(parsed.value, Some(utc(2024, 1, 15, 10, 0, 0)));
        assert!(parsed.issue.unwrap().contains("unknown time zone"));
    }

    #[test]
    fn bad_time_degrades_to_midnight() {
        let parsed = parse_date_lenient("20240115T25XX00Z", None);
        assert_eq!(parsed.value, Some(utc(2024, 1, 15, 0, 0, 0)));
        assert!(parsed.issue.is_some());
        assert!(parse_date_value("20240115T25XX00Z", None).is_err());
    }

    #[test]
    fn garbage_yields_no_value() {
        let parsed = parse_date_lenient("soon", None);
        assert!(parsed.value.is_none());
        assert!(parsed.issue.is_some());

        let short = parse_date_lenient("2024", None);
        assert!(short.value.is_none());
    }

    #[test]
    fn add_seconds_to_dates_and_times() {
        let date = DateValue::Date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(
            date.checked_add_seconds(86_400),
            Some(DateValue::Date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()))
        );
        assert_eq!(
            utc(2024, 1, 15, 10, 0, 0).checked_add_seconds(3600),
            Some(utc(2024, 1, 15, 11, 0, 0))
        );
    }

    #[test]
    fn serde_contract() {
        let json = serde_json::to_string(&utc(2024, 1, 15, 10, 0, 0)).unwrap();
        assert_eq!(json, r#"{"type":"date_time","value":"2024-01-15T10:00:00Z"}"#);
    }
}
