//! Accumulators for `VEVENT` / `VTODO` / `VALARM` blocks.
//!
//! A builder collects one field per content line and is converted into an
//! immutable record at `END:`, where required-field checks and defaults run.

use almanac_core::constants::{UNTITLED_EVENT, UNTITLED_TASK};

use super::property::PropertyKind;
use super::values::{
    attachment, bounded_int, checked_int, date_list, date_value, strip_mailto, text_list,
    non_blank_text, text_value, trigger, validate_rrule,
};
use crate::rfc::error::{ParseError, ParseErrorKind};
use crate::rfc::ical::core::{
    Alarm, AlarmTrigger, Attachment, Attendee, Organizer, ParsedEvent, ParsedTask, Relation,
};
use crate::rfc::options::GeneratorOptions;
use crate::rfc::text::{ContentLine, DateValue, GeoPoint, parse_duration, parse_geo};
use crate::rfc::validation::{
    AlarmAction, Classification, EventStatus, ParticipantRole, ParticipationStatus, RelationType,
    TaskStatus, Transparency, is_valid_percent_complete, is_valid_priority,
};

/// Block types that produce records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Event,
    Task,
}

impl ComponentKind {
    /// Maps a `BEGIN:`/`END:` value to a record block.
    #[must_use]
    pub fn from_block_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("VEVENT") {
            Some(Self::Event)
        } else if name.eq_ignore_ascii_case("VTODO") {
            Some(Self::Task)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn block_name(self) -> &'static str {
        match self {
            Self::Event => "VEVENT",
            Self::Task => "VTODO",
        }
    }
}

/// Collected fields of one `VEVENT` or `VTODO`.
#[derive(Debug)]
pub struct ComponentBuilder {
    kind: ComponentKind,
    begin_line: usize,
    uid: Option<String>,
    sequence: u32,
    summary: Option<String>,
    description: Option<String>,
    location: Option<String>,
    url: Option<String>,
    comment: Option<String>,
    start: Option<DateValue>,
    end: Option<DateValue>,
    due: Option<DateValue>,
    duration_seconds: Option<i64>,
    completed: Option<DateValue>,
    created: Option<DateValue>,
    last_modified: Option<DateValue>,
    event_status: Option<EventStatus>,
    task_status: Option<TaskStatus>,
    classification: Option<Classification>,
    transparency: Option<Transparency>,
    priority: Option<u8>,
    percent_complete: Option<u8>,
    organizer: Option<Organizer>,
    attendees: Vec<Attendee>,
    alarms: Vec<Alarm>,
    categories: Vec<String>,
    attachments: Vec<Attachment>,
    relations: Vec<Relation>,
    geo: Option<GeoPoint>,
    rrule: Option<String>,
    rdates: Vec<DateValue>,
    exdates: Vec<DateValue>,
}

impl ComponentBuilder {
    #[must_use]
    pub fn new(kind: ComponentKind, begin_line: usize) -> Self {
        Self {
            kind,
            begin_line,
            uid: None,
            sequence: 0,
            summary: None,
            description: None,
            location: None,
            url: None,
            comment: None,
            start: None,
            end: None,
            due: None,
            duration_seconds: None,
            completed: None,
            created: None,
            last_modified: None,
            event_status: None,
            task_status: None,
            classification: None,
            transparency: None,
            priority: None,
            percent_complete: None,
            organizer: None,
            attendees: Vec::new(),
            alarms: Vec::new(),
            categories: Vec::new(),
            attachments: Vec::new(),
            relations: Vec::new(),
            geo: None,
            rrule: None,
            rdates: Vec::new(),
            exdates: Vec::new(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ComponentKind {
        self.kind
    }

    #[must_use]
    pub const fn begin_line(&self) -> usize {
        self.begin_line
    }

    pub fn push_alarm(&mut self, alarm: Alarm) {
        self.alarms.push(alarm);
    }

    /// Applies one content line; problems are appended to `errors`.
    pub fn apply(&mut self, line: &ContentLine, line_num: usize, errors: &mut Vec<ParseError>) {
        let invalid = |message: String| ParseError::invalid_value(line_num, message);

        match PropertyKind::from_name(&line.name) {
            PropertyKind::Uid => self.uid = non_blank_text(line).map(|uid| uid.trim().to_string()),
            PropertyKind::Sequence => match bounded_int(&line.value, 0, i64::from(u32::MAX)) {
                Ok(value) => self.sequence = u32::try_from(value).unwrap_or_default(),
                Err(e) => errors.push(invalid(format!("SEQUENCE: {e}"))),
            },
            PropertyKind::Summary => self.summary = non_blank_text(line),
            PropertyKind::Description => self.description = Some(text_value(line)),
            PropertyKind::Location => self.location = Some(text_value(line)),
            PropertyKind::Comment => self.comment = Some(text_value(line)),
            PropertyKind::Url => {
                let url = line.value.trim();
                self.url = (!url.is_empty()).then(|| url.to_string());
            }
            PropertyKind::DtStart => self.start = read_date(line, line_num, errors),
            PropertyKind::DtEnd => self.end = read_date(line, line_num, errors),
            PropertyKind::Due => self.due = read_date(line, line_num, errors),
            PropertyKind::Completed => self.completed = read_date(line, line_num, errors),
            PropertyKind::Created => self.created = read_date(line, line_num, errors),
            PropertyKind::LastModified => self.last_modified = read_date(line, line_num, errors),
            PropertyKind::Duration => match parse_duration(&line.value) {
                Ok(seconds) => self.duration_seconds = Some(seconds),
                Err(e) => errors.push(invalid(format!("DURATION: {e}"))),
            },
            PropertyKind::Status => self.apply_status(&line.value, line_num, errors),
            PropertyKind::Class => match Classification::parse(&line.value) {
                Some(class) => self.classification = Some(class),
                None => errors.push(invalid(format!("CLASS: unknown value '{}'", line.value))),
            },
            PropertyKind::Transp => match Transparency::parse(&line.value) {
                Some(transp) => self.transparency = Some(transp),
                None => errors.push(invalid(format!("TRANSP: unknown value '{}'", line.value))),
            },
            PropertyKind::Priority => match checked_int(&line.value, is_valid_priority) {
                Ok(value) => self.priority = u8::try_from(value).ok(),
                Err(e) => errors.push(invalid(format!("PRIORITY: {e}"))),
            },
            PropertyKind::PercentComplete => {
                match checked_int(&line.value, is_valid_percent_complete) {
                    Ok(value) => self.percent_complete = u8::try_from(value).ok(),
                    Err(e) => errors.push(invalid(format!("PERCENT-COMPLETE: {e}"))),
                }
            }
            PropertyKind::Organizer | PropertyKind::Attendee => {
                self.apply_address(line, line_num, errors);
            }
            PropertyKind::Categories => self.categories.extend(text_list(&line.value)),
            PropertyKind::Attach => match attachment(line) {
                Ok(attach) => self.attachments.push(attach),
                Err(e) => errors.push(invalid(format!("ATTACH: {e}"))),
            },
            PropertyKind::RelatedTo => {
                if let Some(uid) = non_blank_text(line) {
                    let rel_type = line
                        .param_value("RELTYPE")
                        .and_then(RelationType::parse)
                        .unwrap_or(RelationType::Parent);
                    self.relations.push(Relation {
                        uid: uid.trim().to_string(),
                        rel_type,
                    });
                }
            }
            PropertyKind::Geo => match parse_geo(&line.value) {
                Ok(geo) => self.geo = Some(geo),
                Err(e) => errors.push(invalid(format!("GEO: {e}"))),
            },
            PropertyKind::RRule => {
                if let Err(e) = validate_rrule(&line.value) {
                    errors.push(invalid(format!("RRULE: {e}")));
                }
                self.rrule = Some(line.value.trim().to_string());
            }
            PropertyKind::RDate => read_date_list(line, line_num, errors, &mut self.rdates),
            PropertyKind::ExDate => read_date_list(line, line_num, errors, &mut self.exdates),
            PropertyKind::DtStamp
            | PropertyKind::Action
            | PropertyKind::Trigger
            | PropertyKind::Repeat
            | PropertyKind::Unknown => {
                tracing::trace!(property = %line.name, "Ignoring property");
            }
        }
    }

    fn apply_address(&mut self, line: &ContentLine, line_num: usize, errors: &mut Vec<ParseError>) {
        let email = strip_mailto(&line.value);
        if email.is_empty() {
            errors.push(ParseError::invalid_value(
                line_num,
                format!("{}: empty address", line.name),
            ));
        } else if line.name == "ORGANIZER" {
            self.organizer = Some(Organizer {
                name: common_name(line),
                email: email.to_string(),
            });
        } else {
            self.attendees.push(read_attendee(line, email));
        }
    }

    fn apply_status(&mut self, raw: &str, line_num: usize, errors: &mut Vec<ParseError>) {
        let recognized = match self.kind {
            ComponentKind::Event => {
                self.event_status = EventStatus::parse(raw);
                self.event_status.is_some()
            }
            ComponentKind::Task => {
                self.task_status = TaskStatus::parse(raw);
                self.task_status.is_some()
            }
        };
        if !recognized {
            errors.push(ParseError::invalid_value(
                line_num,
                format!("STATUS: unknown {} value '{raw}'", self.kind.block_name()),
            ));
        }
    }

    fn title(&self) -> String {
        let fallback = match self.kind {
            ComponentKind::Event => UNTITLED_EVENT,
            ComponentKind::Task => UNTITLED_TASK,
        };
        self.summary
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Gives alarms without their required text the record title.
    fn fill_alarm_text(alarms: &mut [Alarm], title: &str) {
        for alarm in alarms {
            match alarm.action {
                AlarmAction::Display => {
                    alarm
                        .description
                        .get_or_insert_with(|| title.to_string());
                }
                AlarmAction::Email => {
                    alarm.summary.get_or_insert_with(|| title.to_string());
                    alarm
                        .description
                        .get_or_insert_with(|| title.to_string());
                }
                AlarmAction::Audio => {}
            }
        }
    }

    /// Converts the builder into an event.
    ///
    /// Returns `None` (with an error appended) when no usable `DTSTART` was
    /// read. `end` falls back to `DTSTART + DURATION`, then to `DTSTART`.
    pub fn finish_event(
        mut self,
        options: &GeneratorOptions,
        errors: &mut Vec<ParseError>,
    ) -> Option<ParsedEvent> {
        let title = self.title();
        let Some(start) = self.start else {
            tracing::warn!(line = self.begin_line, "Dropping VEVENT without DTSTART");
            errors.push(ParseError::missing_property(
                self.begin_line,
                format!("event '{title}' is missing a usable DTSTART property"),
            ));
            return None;
        };

        let end = self
            .end
            .or_else(|| {
                self.duration_seconds
                    .and_then(|seconds| start.checked_add_seconds(seconds))
            })
            .unwrap_or(start);

        Self::fill_alarm_text(&mut self.alarms, &title);

        Some(ParsedEvent {
            uid_generated: self.uid.is_none(),
            uid: Some(self.uid.unwrap_or_else(|| options.generate_uid())),
            sequence: self.sequence,
            title,
            description: self.description,
            location: self.location,
            url: self.url,
            comment: self.comment,
            start,
            end,
            created: self.created,
            last_modified: self.last_modified,
            status: self.event_status,
            classification: self.classification,
            transparency: self.transparency,
            priority: self.priority,
            organizer: self.organizer,
            attendees: self.attendees,
            alarms: self.alarms,
            categories: self.categories,
            attachments: self.attachments,
            relations: self.relations,
            geo: self.geo,
            rrule: self.rrule,
            rdates: self.rdates,
            exdates: self.exdates,
        })
    }

    /// Converts the builder into a task.
    ///
    /// `due` falls back to `DTSTART + DURATION` when only those are present.
    #[must_use]
    pub fn finish_task(mut self, options: &GeneratorOptions) -> ParsedTask {
        let title = self.title();
        let due = self.due.or_else(|| {
            self.start
                .zip(self.duration_seconds)
                .and_then(|(start, seconds)| start.checked_add_seconds(seconds))
        });

        Self::fill_alarm_text(&mut self.alarms, &title);

        ParsedTask {
            uid_generated: self.uid.is_none(),
            uid: Some(self.uid.unwrap_or_else(|| options.generate_uid())),
            sequence: self.sequence,
            title,
            description: self.description,
            location: self.location,
            url: self.url,
            comment: self.comment,
            start: self.start,
            due,
            completed: self.completed,
            created: self.created,
            last_modified: self.last_modified,
            status: self.task_status,
            classification: self.classification,
            priority: self.priority,
            percent_complete: self.percent_complete,
            organizer: self.organizer,
            attendees: self.attendees,
            alarms: self.alarms,
            categories: self.categories,
            attachments: self.attachments,
            relations: self.relations,
            geo: self.geo,
            rrule: self.rrule,
            rdates: self.rdates,
            exdates: self.exdates,
        }
    }
}

/// Collected fields of one `VALARM`.
#[derive(Debug)]
pub struct AlarmBuilder {
    begin_line: usize,
    action: Option<AlarmAction>,
    trigger: Option<AlarmTrigger>,
    summary: Option<String>,
    description: Option<String>,
    attendees: Vec<String>,
    repeat: Option<u32>,
    duration_seconds: Option<i64>,
}

impl AlarmBuilder {
    #[must_use]
    pub const fn new(begin_line: usize) -> Self {
        Self {
            begin_line,
            action: None,
            trigger: None,
            summary: None,
            description: None,
            attendees: Vec::new(),
            repeat: None,
            duration_seconds: None,
        }
    }

    pub fn apply(&mut self, line: &ContentLine, line_num: usize, errors: &mut Vec<ParseError>) {
        let invalid = |message: String| ParseError::invalid_value(line_num, message);

        match PropertyKind::from_name(&line.name) {
            PropertyKind::Action => match AlarmAction::parse(&line.value) {
                Some(action) => self.action = Some(action),
                None => errors.push(invalid(format!(
                    "ACTION: unsupported alarm action '{}'",
                    line.value
                ))),
            },
            PropertyKind::Trigger => match trigger(line) {
                Ok(trigger) => self.trigger = Some(trigger),
                Err(e) => errors.push(invalid(format!("TRIGGER: {e}"))),
            },
            PropertyKind::Summary => self.summary = Some(text_value(line)),
            PropertyKind::Description => self.description = Some(text_value(line)),
            PropertyKind::Attendee => {
                let email = strip_mailto(&line.value);
                if !email.is_empty() {
                    self.attendees.push(email.to_string());
                }
            }
            PropertyKind::Repeat => match bounded_int(&line.value, 0, i64::from(u32::MAX)) {
                Ok(value) => self.repeat = u32::try_from(value).ok(),
                Err(e) => errors.push(invalid(format!("REPEAT: {e}"))),
            },
            PropertyKind::Duration => match parse_duration(&line.value) {
                Ok(seconds) => self.duration_seconds = Some(seconds),
                Err(e) => errors.push(invalid(format!("DURATION: {e}"))),
            },
            _ => tracing::trace!(property = %line.name, "Ignoring alarm property"),
        }
    }

    /// Converts the builder into an alarm, or `None` (with an error appended)
    /// when `ACTION` or `TRIGGER` is missing.
    pub fn finish(self, errors: &mut Vec<ParseError>) -> Option<Alarm> {
        let (Some(action), Some(trigger)) = (self.action, self.trigger) else {
            let missing = if self.action.is_none() {
                "ACTION"
            } else {
                "TRIGGER"
            };
            tracing::warn!(line = self.begin_line, missing, "Dropping VALARM");
            errors.push(ParseError::missing_property(
                self.begin_line,
                format!("alarm is missing required {missing} property"),
            ));
            return None;
        };

        Some(Alarm {
            action,
            trigger,
            summary: self.summary,
            description: self.description,
            attendees: self.attendees,
            repeat: self.repeat,
            duration_seconds: self.duration_seconds,
        })
    }
}

fn common_name(line: &ContentLine) -> Option<String> {
    line.param_value("CN")
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

fn read_attendee(line: &ContentLine, email: &str) -> Attendee {
    Attendee {
        name: common_name(line),
        email: email.to_string(),
        role: line.param_value("ROLE").and_then(ParticipantRole::parse),
        status: line
            .param_value("PARTSTAT")
            .and_then(ParticipationStatus::parse),
        rsvp: line
            .param_value("RSVP")
            .is_some_and(|v| v.eq_ignore_ascii_case("TRUE")),
    }
}

fn read_date(
    line: &ContentLine,
    line_num: usize,
    errors: &mut Vec<ParseError>,
) -> Option<DateValue> {
    let parsed = date_value(line, &line.value);
    if let Some(issue) = parsed.issue {
        errors.push(ParseError::new(
            ParseErrorKind::InvalidValue,
            line_num,
            format!("{}: {issue}", line.name),
        ));
    }
    parsed.value
}

fn read_date_list(
    line: &ContentLine,
    line_num: usize,
    errors: &mut Vec<ParseError>,
    into: &mut Vec<DateValue>,
) {
    for parsed in date_list(line) {
        if let Some(issue) = parsed.issue {
            errors.push(ParseError::invalid_value(
                line_num,
                format!("{}: {issue}", line.name),
            ));
        }
        into.extend(parsed.value);
    }
}
