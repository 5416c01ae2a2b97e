use serde::{Deserialize, Serialize};

use super::component::{Alarm, Attachment, Attendee, Organizer, Relation};
use crate::rfc::text::{DateValue, GeoPoint};
use crate::rfc::validation::{Classification, EventStatus, Transparency};

/// One `VEVENT`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedEvent {
    pub uid: Option<String>,
    /// Set when the parser made up `uid` because the source had none.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub uid_generated: bool,
    pub sequence: u32,
    /// `SUMMARY`.
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Option<String>,
    pub comment: Option<String>,
    pub start: DateValue,
    /// Equals `start` when the source had neither `DTEND` nor `DURATION`.
    pub end: DateValue,
    pub created: Option<DateValue>,
    pub last_modified: Option<DateValue>,
    pub status: Option<EventStatus>,
    pub classification: Option<Classification>,
    pub transparency: Option<Transparency>,
    pub priority: Option<u8>,
    pub organizer: Option<Organizer>,
    pub attendees: Vec<Attendee>,
    pub alarms: Vec<Alarm>,
    pub categories: Vec<String>,
    pub attachments: Vec<Attachment>,
    pub relations: Vec<Relation>,
    pub geo: Option<GeoPoint>,
    /// Raw `RRULE` value.
    pub rrule: Option<String>,
    pub rdates: Vec<DateValue>,
    pub exdates: Vec<DateValue>,
}

impl ParsedEvent {
    /// Creates an event with every optional field absent and `end == start`.
    #[must_use]
    pub fn new(title: impl Into<String>, start: DateValue) -> Self {
        Self {
            uid: None,
            uid_generated: false,
            sequence: 0,
            title: title.into(),
            description: None,
            location: None,
            url: None,
            comment: None,
            start,
            end: start,
            created: None,
            last_modified: None,
            status: None,
            classification: None,
            transparency: None,
            priority: None,
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
}
