//! iCalendar document parser (RFC 5545).
//!
//! Scans a document block by block. Problems are collected into the result's
//! `errors` list; a broken block never prevents the others from parsing.

use super::builder::{AlarmBuilder, ComponentBuilder, ComponentKind};
use super::lexer::tokenize;
use super::values::text_value;
use crate::rfc::error::{ParseError, ParseErrorKind};
use crate::rfc::ical::core::{ParsedEvent, ParsedTask};
use crate::rfc::options::GeneratorOptions;
use crate::rfc::text::ContentLine;

const NO_EVENTS: &str = "No events found in calendar file";
const NO_TASKS: &str = "No tasks found in file";
const NO_RECORDS: &str = "No events or tasks found in calendar file";

/// Everything read from one iCalendar document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalendarParseResult {
    /// `X-WR-CALNAME`.
    pub calendar_name: Option<String>,
    pub events: Vec<ParsedEvent>,
    pub tasks: Vec<ParsedTask>,
    /// All problems, ordered by line.
    pub errors: Vec<ParseError>,
    /// `VEVENT` blocks seen, including dropped ones.
    pub event_blocks: usize,
    /// `VTODO` blocks seen, including dropped ones.
    pub task_blocks: usize,
}

/// Result of [`parse_ics_content`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IcsParseResult {
    pub calendar_name: Option<String>,
    pub events: Vec<ParsedEvent>,
    pub errors: Vec<ParseError>,
}

/// Result of [`parse_todo_file`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoParseResult {
    pub list_name: Option<String>,
    pub tasks: Vec<ParsedTask>,
    pub errors: Vec<ParseError>,
}

/// Parses every `VEVENT` and `VTODO` in a document.
///
/// A document without any such block yields a single
/// [`ParseErrorKind::NoRecords`] error.
#[must_use]
pub fn parse_calendar(input: &str) -> CalendarParseResult {
    parse_calendar_with(input, &GeneratorOptions::default())
}

/// [`parse_calendar`] with explicit options for generated UIDs.
#[must_use]
pub fn parse_calendar_with(input: &str, options: &GeneratorOptions) -> CalendarParseResult {
    let mut result = scan(input, options).result;
    if result.event_blocks + result.task_blocks == 0 {
        tracing::warn!("No VEVENT or VTODO blocks in input");
        result.errors = vec![ParseError::no_records(NO_RECORDS)];
    }
    result
}

/// Parses the events of a calendar file.
///
/// A file without any `VEVENT` block yields exactly one error,
/// `"No events found in calendar file"`, and no events.
#[must_use]
pub fn parse_ics_content(input: &str) -> IcsParseResult {
    parse_ics_content_with(input, &GeneratorOptions::default())
}

/// [`parse_ics_content`] with explicit options for generated UIDs.
///
/// Problems inside `VTODO` blocks are not reported.
#[must_use]
pub fn parse_ics_content_with(input: &str, options: &GeneratorOptions) -> IcsParseResult {
    let Scan { result, scopes } = scan(input, options);
    let errors = if result.event_blocks == 0 {
        vec![ParseError::no_records(NO_EVENTS)]
    } else {
        errors_outside_of(result.errors, scopes, ComponentKind::Task)
    };
    IcsParseResult {
        calendar_name: result.calendar_name,
        events: result.events,
        errors,
    }
}

/// Parses the tasks of a to-do file.
///
/// A file without any `VTODO` block yields exactly one error,
/// `"No tasks found in file"`, and no tasks.
#[must_use]
pub fn parse_todo_file(input: &str) -> TodoParseResult {
    parse_todo_file_with(input, &GeneratorOptions::default())
}

/// [`parse_todo_file`] with explicit options for generated UIDs.
///
/// Problems inside `VEVENT` blocks are not reported.
#[must_use]
pub fn parse_todo_file_with(input: &str, options: &GeneratorOptions) -> TodoParseResult {
    let Scan { result, scopes } = scan(input, options);
    let errors = if result.task_blocks == 0 {
        vec![ParseError::no_records(NO_TASKS)]
    } else {
        errors_outside_of(result.errors, scopes, ComponentKind::Event)
    };
    TodoParseResult {
        list_name: result.calendar_name,
        tasks: result.tasks,
        errors,
    }
}

/// A parsed document plus, for each error, the block it was raised in.
struct Scan {
    result: CalendarParseResult,
    /// Parallel to `result.errors`; `None` for document-level problems.
    scopes: Vec<Option<ComponentKind>>,
}

#[tracing::instrument(skip(input, options), fields(input_len = input.len()))]
fn scan(input: &str, options: &GeneratorOptions) -> Scan {
    tracing::debug!("Parsing iCalendar document");

    let mut parser = Parser::new(options);
    for (line_num, token) in tokenize(input) {
        let scope = parser.scope();
        match token {
            Ok(line) => parser.feed(&line, line_num),
            Err(err) => {
                tracing::debug!(line = line_num, "Malformed content line");
                parser.result.errors.push(err);
            }
        }
        parser.tag(scope);
    }
    let scan = parser.finish();

    tracing::debug!(
        events = scan.result.events.len(),
        tasks = scan.result.tasks.len(),
        errors = scan.result.errors.len(),
        "iCalendar document parsed"
    );
    scan
}

fn errors_outside_of(
    errors: Vec<ParseError>,
    scopes: Vec<Option<ComponentKind>>,
    excluded: ComponentKind,
) -> Vec<ParseError> {
    errors
        .into_iter()
        .zip(scopes)
        .filter(|(_, scope)| *scope != Some(excluded))
        .map(|(err, _)| err)
        .collect()
}

/// Where the scanner currently is.
enum State {
    Outside,
    Component {
        builder: Box<ComponentBuilder>,
        alarm: Option<AlarmBuilder>,
    },
}

struct Parser<'a> {
    options: &'a GeneratorOptions,
    state: State,
    /// Names of unknown components being skipped, innermost last.
    skipping: Vec<String>,
    result: CalendarParseResult,
    scopes: Vec<Option<ComponentKind>>,
}

impl<'a> Parser<'a> {
    fn new(options: &'a GeneratorOptions) -> Self {
        Self {
            options,
            state: State::Outside,
            skipping: Vec::new(),
            result: CalendarParseResult::default(),
            scopes: Vec::new(),
        }
    }

    /// Kind of the block currently open.
    fn scope(&self) -> Option<ComponentKind> {
        match &self.state {
            State::Outside => None,
            State::Component { builder, .. } => Some(builder.kind()),
        }
    }

    /// Attributes errors pushed since the last call to `scope`.
    fn tag(&mut self, scope: Option<ComponentKind>) {
        self.scopes.resize(self.result.errors.len(), scope);
    }

    fn feed(&mut self, line: &ContentLine, line_num: usize) {
        let block = line.value.trim().to_ascii_uppercase();

        if !self.skipping.is_empty() {
            match line.name.as_str() {
                "BEGIN" => self.skipping.push(block),
                "END" => {
                    if let Some(pos) = self.skipping.iter().rposition(|name| *name == block) {
                        self.skipping.truncate(pos);
                    }
                }
                _ => {}
            }
            return;
        }

        match line.name.as_str() {
            "BEGIN" => self.begin(&block, line_num),
            "END" => self.end(&block, line_num),
            _ => self.property(line, line_num),
        }
    }

    fn begin(&mut self, block: &str, line_num: usize) {
        let kind = ComponentKind::from_block_name(block);

        match (&mut self.state, kind) {
            (State::Outside, Some(kind)) => self.open(kind, line_num),
            (State::Outside, None) if block == "VCALENDAR" => {}
            (State::Component { alarm, .. }, None) if block == "VALARM" && alarm.is_none() => {
                *alarm = Some(AlarmBuilder::new(line_num));
            }
            (State::Component { builder, .. }, Some(kind)) => {
                let open = builder.kind();
                self.unterminated(open, line_num);
                self.open(kind, line_num);
            }
            _ => {
                tracing::trace!(component = block, "Skipping component");
                self.skipping.push(block.to_string());
            }
        }
    }

    fn end(&mut self, block: &str, line_num: usize) {
        let state = std::mem::replace(&mut self.state, State::Outside);
        match state {
            State::Outside => {}
            State::Component {
                mut builder,
                alarm: Some(alarm),
            } if block == "VALARM" => {
                if let Some(alarm) = alarm.finish(&mut self.result.errors) {
                    builder.push_alarm(alarm);
                }
                self.state = State::Component {
                    builder,
                    alarm: None,
                };
            }
            State::Component { builder, alarm } => {
                if ComponentKind::from_block_name(block) == Some(builder.kind()) {
                    if alarm.is_some() {
                        self.result.errors.push(ParseError::new(
                            ParseErrorKind::UnterminatedBlock,
                            line_num,
                            "VALARM was not closed before the end of its parent",
                        ));
                    }
                    self.close(*builder);
                } else if block == "VCALENDAR" {
                    self.unterminated(builder.kind(), line_num);
                } else {
                    self.result.errors.push(ParseError::new(
                        ParseErrorKind::MalformedLine,
                        line_num,
                        format!("unexpected END:{block} inside {}", builder.kind().block_name()),
                    ));
                    self.state = State::Component { builder, alarm };
                }
            }
        }
    }

    fn property(&mut self, line: &ContentLine, line_num: usize) {
        match &mut self.state {
            State::Outside => {
                if line.name == "X-WR-CALNAME" {
                    self.result.calendar_name = Some(text_value(line));
                }
            }
            State::Component {
                alarm: Some(alarm), ..
            } => alarm.apply(line, line_num, &mut self.result.errors),
            State::Component { builder, .. } => {
                builder.apply(line, line_num, &mut self.result.errors);
            }
        }
    }

    fn open(&mut self, kind: ComponentKind, line_num: usize) {
        match kind {
            ComponentKind::Event => self.result.event_blocks += 1,
            ComponentKind::Task => self.result.task_blocks += 1,
        }
        self.state = State::Component {
            builder: Box::new(ComponentBuilder::new(kind, line_num)),
            alarm: None,
        };
    }

    fn close(&mut self, builder: ComponentBuilder) {
        match builder.kind() {
            ComponentKind::Event => {
                if let Some(event) = builder.finish_event(self.options, &mut self.result.errors) {
                    self.result.events.push(event);
                }
            }
            ComponentKind::Task => {
                let task = builder.finish_task(self.options);
                self.result.tasks.push(task);
            }
        }
    }

    /// Drops the open block; it never reached its `END:`.
    fn unterminated(&mut self, kind: ComponentKind, line_num: usize) {
        tracing::warn!(line = line_num, block = kind.block_name(), "Dropping unterminated block");
        self.result.errors.push(ParseError::new(
            ParseErrorKind::UnterminatedBlock,
            line_num,
            format!("{} block was not closed", kind.block_name()),
        ));
        self.state = State::Outside;
    }

    fn finish(mut self) -> Scan {
        let scope = self.scope();
        if let State::Component { builder, .. } = &self.state {
            let (kind, line) = (builder.kind(), builder.begin_line());
            self.unterminated(kind, line);
        }
        self.tag(scope);

        let mut tagged: Vec<_> = std::mem::take(&mut self.result.errors)
            .into_iter()
            .zip(self.scopes)
            .collect();
        tagged.sort_by_key(|(err, _)| err.line);
        let (errors, scopes): (Vec<_>, Vec<_>) = tagged.into_iter().unzip();
        self.result.errors = errors;
        Scan {
            result: self.result,
            scopes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::text::DateValue;
    use chrono::{TimeZone, Utc};

    fn utc(h: u32) -> DateValue {
        DateValue::DateTime(Utc.with_ymd_and_hms(2024, 1, 15, h, 0, 0).unwrap())
    }

    #[test_log::test]
    fn simple_event() {
        let input = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\nUID:1\r\nSUMMARY:Meeting\r\nDTSTART:20240115T100000Z\r\nDTEND:20240115T110000Z\r\nEND:VEVENT\r\nEND:VCALENDAR";
        let result = parse_ics_content(input);
        assert!(result.errors.is_empty(), "{:?}", result.errors);
        assert_eq!(result.events.len(), 1);
        let event = &result.events[0];
        assert_eq!(event.uid.as_deref(), Some("1"));
        assert_eq!(event.title, "Meeting");
        assert_eq!(event.start, utc(10));
        assert_eq!(event.end, utc(11));
    }

    #[test]
    fn no_blocks_is_an_error() {
        let input = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n";
        let events = parse_ics_content(input);
        assert!(events.events.is_empty());
        assert_eq!(events.errors.len(), 1);
        assert_eq!(events.errors[0].kind, ParseErrorKind::NoRecords);
        assert_eq!(events.errors[0].message, NO_EVENTS);

        let tasks = parse_todo_file(input);
        assert_eq!(tasks.errors.len(), 1);
        assert_eq!(tasks.errors[0].message, NO_TASKS);
    }

    #[test]
    fn empty_and_garbage_input() {
        for input in ["", "not a calendar at all", "\r\n\r\n"] {
            let result = parse_ics_content(input);
            assert!(result.events.is_empty());
            assert_eq!(result.errors.len(), 1);
            assert_eq!(result.errors[0].kind, ParseErrorKind::NoRecords);
        }
    }

    #[test]
    fn tasks_only_file_has_no_events() {
        let input = "BEGIN:VCALENDAR\r\nBEGIN:VTODO\r\nSUMMARY:Buy milk\r\nEND:VTODO\r\nEND:VCALENDAR";
        assert_eq!(parse_ics_content(input).errors[0].message, NO_EVENTS);
        let tasks = parse_todo_file(input);
        assert!(tasks.errors.is_empty());
        assert_eq!(tasks.tasks[0].title, "Buy milk");
    }

    #[test]
    fn bad_block_does_not_abort_others() {
        let input = "BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\nSUMMARY:No start\r\nEND:VEVENT\r\n\
BEGIN:VEVENT\r\nSUMMARY:Fine\r\nDTSTART;VALUE=DATE:20240115\r\nEND:VEVENT\r\n\
END:VCALENDAR";
        let result = parse_ics_content(input);
        assert_eq!(result.events.len(), 1);
        assert_eq!(result.events[0].title, "Fine");
        assert!(result.events[0].start.is_date_only());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].kind, ParseErrorKind::MissingProperty);
        assert_eq!(result.errors[0].line, 2);
    }

    #[test]
    fn vtimezone_is_skipped() {
        let input = "BEGIN:VCALENDAR\r\n\
BEGIN:VTIMEZONE\r\nTZID:America/New_York\r\nBEGIN:STANDARD\r\nDTSTART:19701101T020000\r\nEND:STANDARD\r\nEND:VTIMEZONE\r\n\
BEGIN:VEVENT\r\nUID:tz\r\nDTSTART;TZID=America/New_York:20240115T100000\r\nEND:VEVENT\r\n\
END:VCALENDAR";
        let result = parse_ics_content(input);
        assert!(result.errors.is_empty(), "{:?}", result.errors);
        assert_eq!(result.events[0].start, utc(15));
        assert_eq!(result.events[0].title, "Untitled Event");
    }

    #[test]
    fn unterminated_blocks_are_dropped() {
        let input = "BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\nUID:a\r\nDTSTART:20240115T100000Z\r\n\
BEGIN:VEVENT\r\nUID:b\r\nDTSTART:20240115T110000Z\r\nEND:VEVENT\r\n\
BEGIN:VTODO\r\nUID:c\r\n";
        let result = parse_calendar(input);
        assert_eq!(result.events.len(), 1);
        assert_eq!(result.events[0].uid.as_deref(), Some("b"));
        assert!(result.tasks.is_empty());
        let unterminated: Vec<_> = result
            .errors
            .iter()
            .filter(|e| e.kind == ParseErrorKind::UnterminatedBlock)
            .collect();
        assert_eq!(unterminated.len(), 2);
    }

    #[test]
    fn alarms_and_attendees() {
        let input = "BEGIN:VCALENDAR\r\nX-WR-CALNAME:Work\r\n\
BEGIN:VEVENT\r\nUID:x\r\nDTSTART:20240115T100000Z\r\nSUMMARY:Review\r\n\
ORGANIZER;CN=Boss:mailto:boss@example.com\r\n\
ATTENDEE;CN=\"Doe, Jane\";ROLE=REQ-PARTICIPANT;PARTSTAT=ACCEPTED;RSVP=TRUE:MAILTO:jane@example.com\r\n\
BEGIN:VALARM\r\nACTION:DISPLAY\r\nTRIGGER:-PT15M\r\nEND:VALARM\r\n\
BEGIN:VALARM\r\nACTION:AUDIO\r\nEND:VALARM\r\n\
END:VEVENT\r\nEND:VCALENDAR";
        let result = parse_ics_content(input);
        assert_eq!(result.calendar_name.as_deref(), Some("Work"));
        let event = &result.events[0];
        assert_eq!(event.organizer.as_ref().unwrap().email, "boss@example.com");
        let attendee = &event.attendees[0];
        assert_eq!(attendee.name.as_deref(), Some("Doe, Jane"));
        assert_eq!(attendee.email, "jane@example.com");
        assert!(attendee.rsvp);
        assert_eq!(event.alarms.len(), 1);
        assert_eq!(event.alarms[0].description.as_deref(), Some("Review"));
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains("TRIGGER"));
    }

    #[test]
    fn lowercase_block_names_and_bare_lf() {
        let input = "begin:vcalendar\nbegin:vtodo\nsummary:Lower\nstatus:in-progress\nend:vtodo\nend:vcalendar\n";
        let result = parse_todo_file(input);
        assert!(result.errors.is_empty(), "{:?}", result.errors);
        assert_eq!(
            result.tasks[0].status,
            Some(crate::rfc::validation::TaskStatus::InProcess)
        );
    }

    #[test]
    fn errors_stay_with_their_record_kind() {
        let input = "BEGIN:VCALENDAR\r\nX;=bad:v\r\n\
BEGIN:VEVENT\r\nSUMMARY:No start\r\nEND:VEVENT\r\n\
BEGIN:VTODO\r\nSUMMARY:Chore\r\nPRIORITY:12\r\nEND:VTODO\r\n\
END:VCALENDAR\r\n";
        let lines = |errors: &[ParseError]| errors.iter().map(|e| e.line).collect::<Vec<_>>();

        assert_eq!(lines(&parse_calendar(input).errors), vec![2, 3, 8]);

        let events = parse_ics_content(input);
        assert_eq!(lines(&events.errors), vec![2, 3]);
        assert_eq!(events.errors[0].kind, ParseErrorKind::MalformedLine);
        assert_eq!(events.errors[1].kind, ParseErrorKind::MissingProperty);

        let tasks = parse_todo_file(input);
        assert_eq!(lines(&tasks.errors), vec![2, 8]);
        assert_eq!(tasks.errors[1].kind, ParseErrorKind::InvalidValue);
    }

    #[test]
    fn unterminated_block_error_belongs_to_its_kind() {
        let input = "BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\nUID:e\r\nDTSTART:20240115T100000Z\r\nEND:VEVENT\r\n\
BEGIN:VTODO\r\nUID:t\r\n";
        assert!(parse_ics_content(input).errors.is_empty());
        let tasks = parse_todo_file(input);
        assert_eq!(tasks.errors.len(), 1);
        assert_eq!(tasks.errors[0].kind, ParseErrorKind::UnterminatedBlock);
    }

    #[test]
    fn generated_uids_are_flagged() {
        let input = "BEGIN:VCALENDAR\r\nBEGIN:VTODO\r\nSUMMARY:a\r\nEND:VTODO\r\n\
BEGIN:VTODO\r\nUID:kept\r\nEND:VTODO\r\nEND:VCALENDAR";
        let tasks = parse_todo_file(input).tasks;
        assert!(tasks[0].uid_generated);
        assert!(tasks[0].uid.is_some());
        assert!(!tasks[1].uid_generated);
        assert_eq!(tasks[1].uid.as_deref(), Some("kept"));
    }

    #[test]
    fn generated_uid_uses_configured_domain() {
        let options = GeneratorOptions {
            uid_domain: "import.example".to_string(),
            ..GeneratorOptions::default()
        };
        let input = "BEGIN:VCALENDAR\r\nBEGIN:VTODO\r\nEND:VTODO\r\nEND:VCALENDAR";
        let result = parse_calendar_with(input, &options);
        assert!(result.tasks[0].uid.as_ref().unwrap().ends_with("@import.example"));

        let events = parse_ics_content_with(
            "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nDTSTART:20240115T100000Z\r\nEND:VEVENT\r\nEND:VCALENDAR",
            &options,
        );
        assert!(events.events[0].uid.as_ref().unwrap().ends_with("@import.example"));
        assert!(parse_todo_file_with(input, &options).tasks[0].uid_generated);
    }
}
