//! Document builders shared by the integration tests.

use chrono::{DateTime, TimeZone, Utc};

/// Wraps component blocks into a `VCALENDAR`.
pub fn calendar(blocks: &[String]) -> String {
    let mut out = String::from("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Test//Test//EN\r\n");
    for block in blocks {
        out.push_str(block);
    }
    out.push_str("END:VCALENDAR\r\n");
    out
}

/// A `VEVENT` from `start` to `end` (`YYYYMMDDTHHMMSSZ`).
pub fn vevent(uid: &str, summary: &str, start: &str, end: &str) -> String {
    format!(
        "BEGIN:VEVENT\r\nUID:{uid}\r\nDTSTAMP:20240101T000000Z\r\nSUMMARY:{summary}\r\n\
DTSTART:{start}\r\nDTEND:{end}\r\nEND:VEVENT\r\n"
    )
}

pub fn vtodo(uid: &str, summary: &str) -> String {
    format!("BEGIN:VTODO\r\nUID:{uid}\r\nDTSTAMP:20240101T000000Z\r\nSUMMARY:{summary}\r\nEND:VTODO\r\n")
}

/// A `VCARD` holding the given content lines.
pub fn vcard(lines: &[&str]) -> String {
    let mut out = String::from("BEGIN:VCARD\r\nVERSION:4.0\r\n");
    for line in lines {
        out.push_str(line);
        out.push_str("\r\n");
    }
    out.push_str("END:VCARD\r\n");
    out
}

/// Fixed generation time so documents compare byte for byte.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub fn instant(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
}
