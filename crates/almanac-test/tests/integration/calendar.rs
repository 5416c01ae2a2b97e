//! iCalendar parse/generate through the public API.

use almanac_test::rfc::rfc::ParseErrorKind;
use almanac_test::rfc::rfc::ical::build::{
    CalendarExport, TaskListExport, generate_ics_file_at, generate_todo_file_at,
};
use almanac_test::rfc::rfc::ical::{ParsedEvent, parse_ics_content, parse_todo_file};
use almanac_test::rfc::rfc::options::GeneratorOptions;
use almanac_test::rfc::rfc::text::{
    DateValue, escape_text, fold_line, unescape_text, unfold_lines,
};
use proptest::prelude::*;

use super::helpers::{calendar, fixed_now, instant, vevent, vtodo};

#[test_log::test]
fn simple_event_scenario() {
    let ics = "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nUID:1\r\nSUMMARY:Meeting\r\n\
DTSTART:20240115T100000Z\r\nDTEND:20240115T110000Z\r\nEND:VEVENT\r\nEND:VCALENDAR";
    let parsed = parse_ics_content(ics);

    assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
    assert_eq!(parsed.events.len(), 1);
    let event = &parsed.events[0];
    assert_eq!(event.title, "Meeting");
    assert_eq!(event.start, DateValue::DateTime(instant(15, 10)));
    assert_eq!(event.end, DateValue::DateTime(instant(15, 11)));
}

#[test]
fn calendar_without_components_is_an_error() {
    let empty = calendar(&[]);

    let events = parse_ics_content(&empty);
    assert!(events.events.is_empty());
    assert_eq!(events.errors.len(), 1);
    assert_eq!(events.errors[0].kind, ParseErrorKind::NoRecords);
    assert!(events.errors[0].message.starts_with("No events found"));

    let tasks = parse_todo_file(&empty);
    assert!(tasks.tasks.is_empty());
    assert_eq!(tasks.errors.len(), 1);
    assert!(tasks.errors[0].message.starts_with("No tasks found"));
}

#[test]
fn events_file_is_not_a_task_list() {
    let ics = calendar(&[vevent("e1", "Only an event", "20240115T100000Z", "20240115T110000Z")]);
    let tasks = parse_todo_file(&ics);
    assert!(tasks.tasks.is_empty());
    assert_eq!(tasks.errors[0].kind, ParseErrorKind::NoRecords);
}

#[test_log::test]
fn parsed_documents_survive_regeneration() {
    let ics = calendar(&[
        vevent("e1", "Planning\\, part 1", "20240115T100000Z", "20240115T110000Z"),
        vevent("e2", "Review", "20240116T090000Z", "20240116T093000Z"),
    ]);
    let first = parse_ics_content(&ics);
    assert!(first.errors.is_empty(), "{:?}", first.errors);

    let export = CalendarExport {
        name: "Work",
        records: &first.events,
    };
    let generated = generate_ics_file_at(&export, &GeneratorOptions::default(), fixed_now());
    let second = parse_ics_content(&generated);

    assert!(second.errors.is_empty(), "{:?}", second.errors);
    assert_eq!(second.calendar_name.as_deref(), Some("Work"));
    assert_eq!(second.events, first.events);
    assert_eq!(second.events[0].title, "Planning, part 1");
}

#[test]
fn task_lists_survive_regeneration() {
    let ics = calendar(&[vtodo("t1", "Water plants"), vtodo("t2", "Pay rent")]);
    let first = parse_todo_file(&ics);

    let export = TaskListExport {
        name: "Home",
        records: &first.tasks,
    };
    let generated = generate_todo_file_at(&export, &GeneratorOptions::default(), fixed_now());
    let second = parse_todo_file(&generated);
    assert_eq!(second.tasks, first.tasks);
    assert_eq!(second.list_name.as_deref(), Some("Home"));
}

#[test]
fn generated_output_is_crlf_folded_and_escaped() {
    let mut event = ParsedEvent::new(
        "Quarterly planning; budget, hiring",
        DateValue::DateTime(instant(15, 10)),
    );
    event.uid = Some("fold-1".to_string());
    event.description = Some("x".repeat(200));

    let generated = generate_ics_file_at(
        &CalendarExport {
            name: "Long",
            records: std::slice::from_ref(&event),
        },
        &GeneratorOptions::default(),
        fixed_now(),
    );

    assert!(generated.ends_with("END:VCALENDAR\r\n"));
    assert!(!generated.replace("\r\n", "").contains('\n'));
    assert!(generated.split("\r\n").all(|line| line.len() <= 75));
    assert!(generated.contains("SUMMARY:Quarterly planning\\; budget\\, hiring\r\n"));
    assert!(generated.contains("DTSTAMP:20240601T120000Z\r\n"));

    let reparsed = parse_ics_content(&generated);
    assert_eq!(reparsed.events[0], event);
}

proptest! {
    #[test]
    fn unescape_inverts_escape(s in any::<String>()) {
        prop_assert_eq!(unescape_text(&escape_text(&s)), s);
    }

    #[test]
    fn unfold_inverts_fold(s in "[^\r\n]{0,300}") {
        prop_assert_eq!(unfold_lines(&fold_line(&s)), s);
    }
}
