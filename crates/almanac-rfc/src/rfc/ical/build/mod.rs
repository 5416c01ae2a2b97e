//! iCalendar generation (RFC 5545).
//!
//! Every text value is escaped and every content line folded on its own;
//! optional properties are omitted rather than written empty.

mod serializer;

pub use serializer::{
    CalendarExport, CollectionExport, TaskListExport, generate_ics_file, generate_ics_file_at,
    generate_todo_file, generate_todo_file_at,
};
