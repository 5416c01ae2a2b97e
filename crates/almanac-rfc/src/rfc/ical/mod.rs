//! iCalendar (RFC 5545) codec for `VEVENT` and `VTODO`.
//!
//! ## Structure
//!
//! - [`core`]: event, task and child record types
//! - [`parse`]: block-scoped parser producing records plus parse errors
//! - [`build`]: `VCALENDAR` generator
//!
//! ## Usage
//!
//! ```
//! use almanac_rfc::rfc::ical::parse::parse_ics_content;
//!
//! let ics = "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nUID:1\r\nSUMMARY:Meeting\r\n\
//!            DTSTART:20240115T100000Z\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
//! let parsed = parse_ics_content(ics);
//! assert_eq!(parsed.events[0].title, "Meeting");
//! assert!(parsed.errors.is_empty());
//! ```

pub mod build;
pub mod core;
pub mod parse;

#[cfg(test)]
mod tests;

pub use build::{CalendarExport, TaskListExport, generate_ics_file, generate_todo_file};
pub use core::{ParsedEvent, ParsedTask};
pub use parse::{
    parse_calendar, parse_calendar_with, parse_ics_content, parse_ics_content_with,
    parse_todo_file, parse_todo_file_with,
};
