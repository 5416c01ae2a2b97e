//! iCalendar parsing (RFC 5545).
//!
//! - `lexer`: logical line splitting and tokenizing
//! - `property`: property name dispatch
//! - `values`: typed property values
//! - `builder`: per-block accumulators
//! - `parser`: the block state machine

mod builder;
mod lexer;
mod parser;
mod property;
mod values;

pub use builder::ComponentKind;
pub use parser::{
    CalendarParseResult, IcsParseResult, TodoParseResult, parse_calendar, parse_calendar_with,
    parse_ics_content, parse_ics_content_with, parse_todo_file, parse_todo_file_with,
};
pub use values::{strip_mailto, validate_rrule};
