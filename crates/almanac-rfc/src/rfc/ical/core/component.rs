//! Child values shared by `VEVENT` and `VTODO` records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rfc::validation::{
    AlarmAction, ParticipantRole, ParticipationStatus, RelationType, TriggerRelation,
};

/// `ORGANIZER` with the `mailto:` scheme removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organizer {
    /// `CN` parameter.
    pub name: Option<String>,
    pub email: String,
}

/// `ATTENDEE` with the `mailto:` scheme removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    /// `CN` parameter.
    pub name: Option<String>,
    pub email: String,
    pub role: Option<ParticipantRole>,
    pub status: Option<ParticipationStatus>,
    pub rsvp: bool,
}

impl Attendee {
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: email.into(),
            role: None,
            status: None,
            rsvp: false,
        }
    }
}

/// When an alarm fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlarmTrigger {
    /// Signed offset from the start or end of the parent.
    Relative {
        offset_seconds: i64,
        related: TriggerRelation,
    },
    Absolute { at: DateTime<Utc> },
}

/// A `VALARM` sub-component.
///
/// `DISPLAY` alarms carry a description and `EMAIL` alarms a summary and a
/// description; the parser fills missing text from the parent's title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alarm {
    pub action: AlarmAction,
    pub trigger: AlarmTrigger,
    pub summary: Option<String>,
    pub description: Option<String>,
    /// Recipient addresses of an `EMAIL` alarm.
    pub attendees: Vec<String>,
    pub repeat: Option<u32>,
    /// Delay between repetitions.
    pub duration_seconds: Option<i64>,
}

impl Alarm {
    #[must_use]
    pub fn new(action: AlarmAction, trigger: AlarmTrigger) -> Self {
        Self {
            action,
            trigger,
            summary: None,
            description: None,
            attendees: Vec::new(),
            repeat: None,
            duration_seconds: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AttachmentSource {
    Uri(String),
    /// Decoded `ENCODING=BASE64` payload.
    Inline(Vec<u8>),
}

/// `ATTACH` property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub source: AttachmentSource,
    /// `FMTTYPE` parameter (MIME type).
    pub format_type: Option<String>,
}

/// `RELATED-TO` property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub uid: String,
    pub rel_type: RelationType,
}
