//! `VCALENDAR` generation for event calendars and task lists.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};

use almanac_core::constants::ICALENDAR_VERSION;

use crate::rfc::ical::core::{
    Alarm, AlarmTrigger, Attachment, AttachmentSource, Attendee, Organizer, ParsedEvent,
    ParsedTask, Relation,
};
use crate::rfc::options::GeneratorOptions;
use crate::rfc::text::{
    ContentLine, DateValue, GeoPoint, LineWriter, Parameter, escape_text, format_date_utc,
    format_date_value, format_duration,
};
use crate::rfc::validation::{
    AlarmAction, Classification, EventStatus, TaskStatus, Transparency, TriggerRelation,
};

/// A named collection of records to export.
#[derive(Debug, Clone, Copy)]
pub struct CollectionExport<'a, T> {
    /// Written as `X-WR-CALNAME`.
    pub name: &'a str,
    pub records: &'a [T],
}

pub type CalendarExport<'a> = CollectionExport<'a, ParsedEvent>;
pub type TaskListExport<'a> = CollectionExport<'a, ParsedTask>;

/// Generates a calendar file with the default options and the current time.
#[must_use]
pub fn generate_ics_file(export: &CalendarExport<'_>) -> String {
    generate_ics_file_at(export, &GeneratorOptions::default(), Utc::now())
}

/// Generates a calendar file; `now` becomes every record's `DTSTAMP`.
#[must_use]
#[tracing::instrument(skip(export, options), fields(records = export.records.len()))]
pub fn generate_ics_file_at(
    export: &CalendarExport<'_>,
    options: &GeneratorOptions,
    now: DateTime<Utc>,
) -> String {
    let mut w = LineWriter::new();
    write_header(&mut w, export.name, options);
    for event in export.records {
        write_event(&mut w, event, options, now);
    }
    w.raw("END", "VCALENDAR");
    tracing::debug!("Generated calendar");
    w.finish()
}

/// Generates a task list file with the default options and the current time.
#[must_use]
pub fn generate_todo_file(export: &TaskListExport<'_>) -> String {
    generate_todo_file_at(export, &GeneratorOptions::default(), Utc::now())
}

/// Generates a task list file; `now` becomes every record's `DTSTAMP`.
#[must_use]
#[tracing::instrument(skip(export, options), fields(records = export.records.len()))]
pub fn generate_todo_file_at(
    export: &TaskListExport<'_>,
    options: &GeneratorOptions,
    now: DateTime<Utc>,
) -> String {
    let mut w = LineWriter::new();
    write_header(&mut w, export.name, options);
    for task in export.records {
        write_task(&mut w, task, options, now);
    }
    w.raw("END", "VCALENDAR");
    tracing::debug!("Generated task list");
    w.finish()
}

fn write_header(w: &mut LineWriter, name: &str, options: &GeneratorOptions) {
    w.raw("BEGIN", "VCALENDAR");
    w.raw("VERSION", ICALENDAR_VERSION);
    w.text("PRODID", &options.product_id);
    w.raw("CALSCALE", "GREGORIAN");
    w.text("X-WR-CALNAME", name);
}

fn write_event(w: &mut LineWriter, event: &ParsedEvent, options: &GeneratorOptions, now: DateTime<Utc>) {
    w.raw("BEGIN", "VEVENT");
    write_identity(w, event.uid.as_deref(), event.sequence, options, now);
    w.text("SUMMARY", &event.title);
    w.text_opt("DESCRIPTION", event.description.as_deref());
    w.text_opt("LOCATION", event.location.as_deref());
    write_url(w, event.url.as_deref());
    w.text_opt("COMMENT", event.comment.as_deref());
    write_date(w, "DTSTART", &event.start);
    write_date(w, "DTEND", &event.end);
    write_date_opt(w, "CREATED", event.created.as_ref());
    write_date_opt(w, "LAST-MODIFIED", event.last_modified.as_ref());
    write_enum(w, "STATUS", event.status.map(EventStatus::as_str));
    write_enum(w, "CLASS", event.classification.map(Classification::as_str));
    write_enum(w, "TRANSP", event.transparency.map(Transparency::as_str));
    write_number(w, "PRIORITY", event.priority);
    write_people(w, event.organizer.as_ref(), &event.attendees);
    write_children(
        w,
        &Children {
            categories: &event.categories,
            attachments: &event.attachments,
            relations: &event.relations,
            geo: event.geo.as_ref(),
            rrule: event.rrule.as_deref(),
            rdates: &event.rdates,
            exdates: &event.exdates,
        },
    );
    write_alarms(w, &event.alarms, &event.title);
    w.raw("END", "VEVENT");
}

fn write_task(w: &mut LineWriter, task: &ParsedTask, options: &GeneratorOptions, now: DateTime<Utc>) {
    w.raw("BEGIN", "VTODO");
    write_identity(w, task.uid.as_deref(), task.sequence, options, now);
    w.text("SUMMARY", &task.title);
    w.text_opt("DESCRIPTION", task.description.as_deref());
    w.text_opt("LOCATION", task.location.as_deref());
    write_url(w, task.url.as_deref());
    w.text_opt("COMMENT", task.comment.as_deref());
    write_date_opt(w, "DTSTART", task.start.as_ref());
    write_date_opt(w, "DUE", task.due.as_ref());
    write_date_opt(w, "COMPLETED", task.completed.as_ref());
    write_date_opt(w, "CREATED", task.created.as_ref());
    write_date_opt(w, "LAST-MODIFIED", task.last_modified.as_ref());
    write_enum(w, "STATUS", task.status.map(TaskStatus::as_str));
    write_enum(w, "CLASS", task.classification.map(Classification::as_str));
    write_number(w, "PRIORITY", task.priority);
    write_number(w, "PERCENT-COMPLETE", task.percent_complete);
    write_people(w, task.organizer.as_ref(), &task.attendees);
    write_children(
        w,
        &Children {
            categories: &task.categories,
            attachments: &task.attachments,
            relations: &task.relations,
            geo: task.geo.as_ref(),
            rrule: task.rrule.as_deref(),
            rdates: &task.rdates,
            exdates: &task.exdates,
        },
    );
    write_alarms(w, &task.alarms, &task.title);
    w.raw("END", "VTODO");
}

/// `UID`, `DTSTAMP` and `SEQUENCE`, which every block carries.
fn write_identity(
    w: &mut LineWriter,
    uid: Option<&str>,
    sequence: u32,
    options: &GeneratorOptions,
    now: DateTime<Utc>,
) {
    match uid.filter(|uid| !uid.trim().is_empty()) {
        Some(uid) => w.text("UID", uid),
        None => w.text("UID", &options.generate_uid()),
    }
    w.raw("DTSTAMP", &format_date_utc(&now));
    w.raw("SEQUENCE", &sequence.to_string());
}

fn write_url(w: &mut LineWriter, url: Option<&str>) {
    if let Some(url) = url {
        w.raw("URL", url);
    }
}

fn write_enum(w: &mut LineWriter, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        w.raw(name, value);
    }
}

fn write_number(w: &mut LineWriter, name: &str, value: Option<u8>) {
    if let Some(value) = value {
        w.raw(name, &value.to_string());
    }
}

fn date_line(name: &str, value: &DateValue) -> ContentLine {
    let line = ContentLine::new(name, format_date_value(value));
    if value.is_date_only() {
        line.with_param(Parameter::new("VALUE", "DATE"))
    } else {
        line
    }
}

fn write_date(w: &mut LineWriter, name: &str, value: &DateValue) {
    w.line(&date_line(name, value));
}

fn write_date_opt(w: &mut LineWriter, name: &str, value: Option<&DateValue>) {
    if let Some(value) = value {
        write_date(w, name, value);
    }
}

fn mailto(email: &str) -> String {
    format!("mailto:{email}")
}

fn write_people(w: &mut LineWriter, organizer: Option<&Organizer>, attendees: &[Attendee]) {
    if let Some(organizer) = organizer {
        let mut line = ContentLine::new("ORGANIZER", mailto(&organizer.email));
        if let Some(name) = &organizer.name {
            line = line.with_param(Parameter::new("CN", name.as_str()));
        }
        w.line(&line);
    }

    for attendee in attendees {
        let mut line = ContentLine::new("ATTENDEE", mailto(&attendee.email));
        if let Some(name) = &attendee.name {
            line = line.with_param(Parameter::new("CN", name.as_str()));
        }
        if let Some(role) = attendee.role {
            line = line.with_param(Parameter::new("ROLE", role.as_str()));
        }
        if let Some(status) = attendee.status {
            line = line.with_param(Parameter::new("PARTSTAT", status.as_str()));
        }
        if attendee.rsvp {
            line = line.with_param(Parameter::new("RSVP", "TRUE"));
        }
        w.line(&line);
    }
}

/// Multi-valued and recurrence properties shared by both block types.
struct Children<'a> {
    categories: &'a [String],
    attachments: &'a [Attachment],
    relations: &'a [Relation],
    geo: Option<&'a GeoPoint>,
    rrule: Option<&'a str>,
    rdates: &'a [DateValue],
    exdates: &'a [DateValue],
}

fn write_children(w: &mut LineWriter, children: &Children<'_>) {
    if !children.categories.is_empty() {
        let joined = children
            .categories
            .iter()
            .map(|c| escape_text(c))
            .collect::<Vec<_>>()
            .join(",");
        w.raw("CATEGORIES", &joined);
    }

    for attachment in children.attachments {
        w.line(&attachment_line(attachment));
    }

    for relation in children.relations {
        let mut line = ContentLine::new("RELATED-TO", escape_text(&relation.uid));
        line = line.with_param(Parameter::new("RELTYPE", relation.rel_type.as_str()));
        w.line(&line);
    }

    if let Some(geo) = children.geo {
        w.raw("GEO", &geo.to_ical());
    }
    if let Some(rrule) = children.rrule {
        w.raw("RRULE", rrule);
    }
    for rdate in children.rdates {
        write_date(w, "RDATE", rdate);
    }
    for exdate in children.exdates {
        write_date(w, "EXDATE", exdate);
    }
}

fn attachment_line(attachment: &Attachment) -> ContentLine {
    let mut line = match &attachment.source {
        AttachmentSource::Uri(uri) => ContentLine::new("ATTACH", uri.as_str()),
        AttachmentSource::Inline(bytes) => ContentLine::new("ATTACH", STANDARD.encode(bytes)),
    };
    if let Some(format_type) = &attachment.format_type {
        line = line.with_param(Parameter::new("FMTTYPE", format_type.as_str()));
    }
    if matches!(attachment.source, AttachmentSource::Inline(_)) {
        line = line
            .with_param(Parameter::new("ENCODING", "BASE64"))
            .with_param(Parameter::new("VALUE", "BINARY"));
    }
    line
}

/// Writes `VALARM` blocks; text the action requires falls back to `title`.
fn write_alarms(w: &mut LineWriter, alarms: &[Alarm], title: &str) {
    for alarm in alarms {
        w.raw("BEGIN", "VALARM");
        w.raw("ACTION", alarm.action.as_str());
        w.line(&trigger_line(&alarm.trigger));

        let needs_summary = alarm.action == AlarmAction::Email;
        let needs_description = matches!(alarm.action, AlarmAction::Display | AlarmAction::Email);
        match (&alarm.summary, needs_summary) {
            (Some(summary), _) => w.text("SUMMARY", summary),
            (None, true) => w.text("SUMMARY", title),
            (None, false) => {}
        }
        match (&alarm.description, needs_description) {
            (Some(description), _) => w.text("DESCRIPTION", description),
            (None, true) => w.text("DESCRIPTION", title),
            (None, false) => {}
        }

        for attendee in &alarm.attendees {
            w.raw("ATTENDEE", &mailto(attendee));
        }
        if let Some(repeat) = alarm.repeat {
            w.raw("REPEAT", &repeat.to_string());
        }
        if let Some(seconds) = alarm.duration_seconds {
            w.raw("DURATION", &format_duration(seconds));
        }
        w.raw("END", "VALARM");
    }
}

fn trigger_line(trigger: &AlarmTrigger) -> ContentLine {
    match trigger {
        AlarmTrigger::Relative {
            offset_seconds,
            related,
        } => {
            let line = ContentLine::new("TRIGGER", format_duration(*offset_seconds));
            if *related == TriggerRelation::End {
                line.with_param(Parameter::new("RELATED", "END"))
            } else {
                line
            }
        }
        AlarmTrigger::Absolute { at } => ContentLine::new("TRIGGER", format_date_utc(at))
            .with_param(Parameter::new("VALUE", "DATE-TIME")),
    }
}
