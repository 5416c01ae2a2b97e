use serde::{Deserialize, Serialize};

use super::component::{Alarm, Attachment, Attendee, Organizer, Relation};
use crate::rfc::text::{DateValue, GeoPoint};
use crate::rfc::validation::{Classification, TaskStatus};

/// One `VTODO`.
///
/// No ordering between `start`, `due` and `completed` is enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedTask {
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
    pub start: Option<DateValue>,
    pub due: Option<DateValue>,
    pub completed: Option<DateValue>,
    pub created: Option<DateValue>,
    pub last_modified: Option<DateValue>,
    pub status: Option<TaskStatus>,
    pub classification: Option<Classification>,
    pub priority: Option<u8>,
    pub percent_complete: Option<u8>,
    pub organizer: Option<Organizer>,
    pub attendees: Vec<Attendee>,
    pub alarms: Vec<Alarm>,
    pub categories: Vec<String>,
    pub attachments: Vec<Attachment>,
    pub relations: Vec<Relation>,
    pub geo: Option<GeoPoint>,
    pub rrule: Option<String>,
    pub rdates: Vec<DateValue>,
    pub exdates: Vec<DateValue>,
}

impl ParsedTask {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            uid: None,
            uid_generated: false,
            sequence: 0,
            title: title.into(),
            description: None,
            location: None,
            url: None,
            comment: None,
            start: None,
            due: None,
            completed: None,
            created: None,
            last_modified: None,
            status: None,
            classification: None,
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
}
