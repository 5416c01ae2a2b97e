//! Records that can take part in duplicate detection.

use serde::{Deserialize, Serialize};

use almanac_rfc::rfc::ical::{ParsedEvent, ParsedTask};
use almanac_rfc::rfc::vcard::ParsedContact;

/// A field as seen by the key builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Present(&'a str),
    /// The record type has the field but this record left it empty.
    Missing,
    /// The record type has no such field (an event has no email).
    NotApplicable,
}

impl<'a> FieldValue<'a> {
    /// `Missing` when blank.
    #[must_use]
    pub fn text(value: &'a str) -> Self {
        if value.trim().is_empty() {
            Self::Missing
        } else {
            Self::Present(value)
        }
    }

    /// First entry of a list; the rest are not consulted.
    #[must_use]
    pub fn first(values: &'a [String]) -> Self {
        values.first().map_or(Self::Missing, |value| Self::text(value))
    }
}

/// Identity fields of a record.
pub trait DuplicateCandidate {
    fn uid(&self) -> Option<&str>;

    fn name(&self) -> FieldValue<'_>;

    fn primary_email(&self) -> FieldValue<'_> {
        FieldValue::NotApplicable
    }

    fn phone(&self) -> FieldValue<'_> {
        FieldValue::NotApplicable
    }
}

impl<T: DuplicateCandidate + ?Sized> DuplicateCandidate for &T {
    fn uid(&self) -> Option<&str> {
        (**self).uid()
    }

    fn name(&self) -> FieldValue<'_> {
        (**self).name()
    }

    fn primary_email(&self) -> FieldValue<'_> {
        (**self).primary_email()
    }

    fn phone(&self) -> FieldValue<'_> {
        (**self).phone()
    }
}

/// Records carrying a caller-assigned identifier.
pub trait Identified {
    fn id(&self) -> &str;
}

/// Contact projection used for identity comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateCheckContact {
    pub id: String,
    #[serde(default)]
    pub uid: Option<String>,
    pub name: String,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub phones: Vec<String>,
}

impl DuplicateCheckContact {
    /// Projects a parsed contact; emails and phones keep their order.
    #[must_use]
    pub fn from_parsed(id: impl Into<String>, contact: &ParsedContact) -> Self {
        Self {
            id: id.into(),
            uid: contact.uid.clone(),
            name: contact.formatted_name.clone(),
            emails: contact.emails.iter().map(|e| e.address.clone()).collect(),
            phones: contact.phones.iter().map(|p| p.number.clone()).collect(),
        }
    }
}

/// Event projection used for identity comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateCheckEvent {
    pub id: String,
    #[serde(default)]
    pub uid: Option<String>,
    pub name: String,
}

impl DuplicateCheckEvent {
    /// Projects a parsed event; a UID the parser made up is left out.
    #[must_use]
    pub fn from_parsed(id: impl Into<String>, event: &ParsedEvent) -> Self {
        Self {
            id: id.into(),
            uid: event.uid().map(str::to_string),
            name: event.title.clone(),
        }
    }
}

/// Task projection used for identity comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateCheckTask {
    pub id: String,
    #[serde(default)]
    pub uid: Option<String>,
    pub name: String,
}

impl DuplicateCheckTask {
    #[must_use]
    pub fn from_parsed(id: impl Into<String>, task: &ParsedTask) -> Self {
        Self {
            id: id.into(),
            uid: task.uid().map(str::to_string),
            name: task.title.clone(),
        }
    }
}

impl DuplicateCandidate for DuplicateCheckContact {
    fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    fn name(&self) -> FieldValue<'_> {
        FieldValue::text(&self.name)
    }

    fn primary_email(&self) -> FieldValue<'_> {
        FieldValue::first(&self.emails)
    }

    fn phone(&self) -> FieldValue<'_> {
        FieldValue::first(&self.phones)
    }
}

impl DuplicateCandidate for DuplicateCheckEvent {
    fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    fn name(&self) -> FieldValue<'_> {
        FieldValue::text(&self.name)
    }
}

impl DuplicateCandidate for DuplicateCheckTask {
    fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    fn name(&self) -> FieldValue<'_> {
        FieldValue::text(&self.name)
    }
}

impl Identified for DuplicateCheckContact {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for DuplicateCheckEvent {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for DuplicateCheckTask {
    fn id(&self) -> &str {
        &self.id
    }
}

// Parsed records are compared directly during import and merge.

impl DuplicateCandidate for ParsedContact {
    fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    fn name(&self) -> FieldValue<'_> {
        FieldValue::text(&self.formatted_name)
    }

    fn primary_email(&self) -> FieldValue<'_> {
        self.emails
            .first()
            .map_or(FieldValue::Missing, |email| FieldValue::text(&email.address))
    }

    fn phone(&self) -> FieldValue<'_> {
        self.phones
            .first()
            .map_or(FieldValue::Missing, |phone| FieldValue::text(&phone.number))
    }
}

impl DuplicateCandidate for ParsedEvent {
    fn uid(&self) -> Option<&str> {
        self.uid.as_deref().filter(|_| !self.uid_generated)
    }

    fn name(&self) -> FieldValue<'_> {
        FieldValue::text(&self.title)
    }
}

impl DuplicateCandidate for ParsedTask {
    fn uid(&self) -> Option<&str> {
        self.uid.as_deref().filter(|_| !self.uid_generated)
    }

    fn name(&self) -> FieldValue<'_> {
        FieldValue::text(&self.title)
    }
}
