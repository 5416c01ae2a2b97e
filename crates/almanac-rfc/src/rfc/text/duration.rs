//! DURATION values (RFC 5545 §3.3.6), held as signed seconds.

use crate::error::{RfcError, RfcResult};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;

/// Parses a DURATION value into signed seconds.
///
/// Format: `[+|-]P[nW]` or `[+|-]P[nD][T[nH][nM][nS]]`. Week and day/time
/// components may be mixed, as some producers do.
///
/// ## Errors
/// Returns an error if the string is not a valid duration.
pub fn parse_duration(s: &str) -> RfcResult<i64> {
    let invalid = || RfcError::InvalidDuration(s.to_string());
    let trimmed = s.trim();

    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let rest = rest.strip_prefix(['P', 'p']).ok_or_else(invalid)?;

    let mut total: i64 = 0;
    let mut number: Option<i64> = None;
    let mut in_time = false;
    let mut any_component = false;
    let mut time_component = false;

    for c in rest.chars() {
        if let Some(digit) = c.to_digit(10) {
            let current = number.unwrap_or(0);
            number = Some(
                current
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(i64::from(digit)))
                    .ok_or_else(invalid)?,
            );
            continue;
        }

        let unit = match (c.to_ascii_uppercase(), in_time) {
            ('T', false) if number.is_none() => {
                in_time = true;
                continue;
            }
            ('W', false) => WEEK,
            ('D', false) => DAY,
            ('H', true) => HOUR,
            ('M', true) => MINUTE,
            ('S', true) => 1,
            _ => return Err(invalid()),
        };

        let value = number.take().ok_or_else(invalid)?;
        total = value
            .checked_mul(unit)
            .and_then(|part| total.checked_add(part))
            .ok_or_else(invalid)?;
        any_component = true;
        time_component |= in_time;
    }

    if number.is_some() || !any_component || (in_time && !time_component) {
        return Err(invalid());
    }

    Ok(if negative { -total } else { total })
}

/// Formats signed seconds as a DURATION value.
///
/// Whole weeks use the `PnW` form; everything else uses `PnDTnHnMnS` with
/// zero components omitted. Zero is `PT0S`.
#[must_use]
pub fn format_duration(seconds: i64) -> String {
    if seconds == 0 {
        return "PT0S".to_string();
    }

    let sign = if seconds < 0 { "-" } else { "" };
    let mut remaining = seconds.unsigned_abs();

    let (week, day, hour, minute) = (
        WEEK.unsigned_abs(),
        DAY.unsigned_abs(),
        HOUR.unsigned_abs(),
        MINUTE.unsigned_abs(),
    );

    if remaining % week == 0 {
        return format!("{sign}P{}W", remaining / week);
    }

    let mut out = format!("{sign}P");
    let days = remaining / day;
    remaining %= day;
    if days > 0 {
        out.push_str(&format!("{days}D"));
    }

    if remaining > 0 {
        out.push('T');
        let hours = remaining / hour;
        let minutes = remaining % hour / minute;
        let secs = remaining % minute;
        if hours > 0 {
            out.push_str(&format!("{hours}H"));
        }
        if minutes > 0 {
            out.push_str(&format!("{minutes}M"));
        }
        if secs > 0 {
            out.push_str(&format!("{secs}S"));
        }
    }

    out
}
