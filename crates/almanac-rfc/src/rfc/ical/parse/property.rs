//! Static property-name dispatch table.

/// Properties the component and alarm builders understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Uid,
    Sequence,
    Summary,
    Description,
    Location,
    Url,
    Comment,
    DtStart,
    DtEnd,
    Due,
    Duration,
    Completed,
    Created,
    LastModified,
    DtStamp,
    Status,
    Class,
    Transp,
    Priority,
    PercentComplete,
    Organizer,
    Attendee,
    Categories,
    Attach,
    RelatedTo,
    Geo,
    RRule,
    RDate,
    ExDate,
    Action,
    Trigger,
    Repeat,
    Unknown,
}

impl PropertyKind {
    /// Looks up an (uppercase) property name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "UID" => Self::Uid,
            "SEQUENCE" => Self::Sequence,
            "SUMMARY" => Self::Summary,
            "DESCRIPTION" => Self::Description,
            "LOCATION" => Self::Location,
            "URL" => Self::Url,
            "COMMENT" => Self::Comment,
            "DTSTART" => Self::DtStart,
            "DTEND" => Self::DtEnd,
            "DUE" => Self::Due,
            "DURATION" => Self::Duration,
            "COMPLETED" => Self::Completed,
            "CREATED" => Self::Created,
            "LAST-MODIFIED" => Self::LastModified,
            "DTSTAMP" => Self::DtStamp,
            "STATUS" => Self::Status,
            "CLASS" => Self::Class,
            "TRANSP" => Self::Transp,
            "PRIORITY" => Self::Priority,
            "PERCENT-COMPLETE" => Self::PercentComplete,
            "ORGANIZER" => Self::Organizer,
            "ATTENDEE" => Self::Attendee,
            "CATEGORIES" => Self::Categories,
            "ATTACH" => Self::Attach,
            "RELATED-TO" => Self::RelatedTo,
            "GEO" => Self::Geo,
            "RRULE" => Self::RRule,
            "RDATE" => Self::RDate,
            "EXDATE" => Self::ExDate,
            "ACTION" => Self::Action,
            "TRIGGER" => Self::Trigger,
            "REPEAT" => Self::Repeat,
            _ => Self::Unknown,
        }
    }
}
