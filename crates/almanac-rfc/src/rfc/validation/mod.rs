//! RFC-defined value sets used by the codecs.
//!
//! Each set is a closed enum with its RFC spelling, a case-insensitive
//! `parse` that also accepts the legacy spellings real producers emit, and an
//! `is_valid_*` predicate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RfcError;

macro_rules! rfc_value_set {
    (
        $(#[$meta:meta])*
        enum $Name:ident {
            $(
                $(#[$vmeta:meta])*
                $Variant:ident => $kw:literal $(| $alias:literal)*
            ),+ $(,)?
        }

        fn $predicate:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $Name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $kw $(, alias = $alias)*)]
                $Variant,
            )+
        }

        impl $Name {
            /// Every member in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$Variant),+];

            /// The canonical spelling written by the generators.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$Variant => $kw,)+
                }
            }

            /// Case-insensitive lookup accepting legacy spellings.
            #[must_use]
            pub fn parse(value: &str) -> Option<Self> {
                let value = value.trim();
                $(
                    if value.eq_ignore_ascii_case($kw) $(|| value.eq_ignore_ascii_case($alias))* {
                        return Some(Self::$Variant);
                    }
                )+
                None
            }
        }

        impl fmt::Display for $Name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $Name {
            type Err = RfcError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::parse(value).ok_or_else(|| {
                    RfcError::ValidationError(format!(
                        "'{value}' is not a valid {}",
                        stringify!($Name)
                    ))
                })
            }
        }

        #[must_use]
        pub fn $predicate(value: &str) -> bool {
            $Name::parse(value).is_some()
        }
    };
}

rfc_value_set! {
    /// VEVENT `STATUS` (RFC 5545 §3.8.1.11).
    enum EventStatus {
        Tentative => "TENTATIVE",
        Confirmed => "CONFIRMED",
        Cancelled => "CANCELLED" | "CANCELED",
    }

    fn is_valid_event_status;
}

rfc_value_set! {
    /// VTODO `STATUS` (RFC 5545 §3.8.1.11).
    enum TaskStatus {
        NeedsAction => "NEEDS-ACTION" | "NEEDS_ACTION",
        InProcess => "IN-PROCESS" | "IN_PROCESS" | "IN-PROGRESS" | "IN_PROGRESS",
        Completed => "COMPLETED",
        Cancelled => "CANCELLED" | "CANCELED",
    }

    fn is_valid_task_status;
}

rfc_value_set! {
    /// `CLASS` (RFC 5545 §3.8.1.3).
    enum Classification {
        Public => "PUBLIC",
        Private => "PRIVATE",
        Confidential => "CONFIDENTIAL",
    }

    fn is_valid_classification;
}

rfc_value_set! {
    /// `TRANSP` (RFC 5545 §3.8.2.7).
    enum Transparency {
        Opaque => "OPAQUE",
        Transparent => "TRANSPARENT",
    }

    fn is_valid_transparency;
}

rfc_value_set! {
    /// `ROLE` parameter (RFC 5545 §3.2.16).
    enum ParticipantRole {
        Chair => "CHAIR",
        RequiredParticipant => "REQ-PARTICIPANT" | "REQ_PARTICIPANT",
        OptionalParticipant => "OPT-PARTICIPANT" | "OPT_PARTICIPANT",
        NonParticipant => "NON-PARTICIPANT" | "NON_PARTICIPANT",
    }

    fn is_valid_participant_role;
}

rfc_value_set! {
    /// `PARTSTAT` parameter (RFC 5545 §3.2.12).
    enum ParticipationStatus {
        NeedsAction => "NEEDS-ACTION" | "NEEDS_ACTION",
        Accepted => "ACCEPTED",
        Declined => "DECLINED",
        Tentative => "TENTATIVE",
        Delegated => "DELEGATED",
        Completed => "COMPLETED",
        InProcess => "IN-PROCESS" | "IN_PROCESS",
    }

    fn is_valid_participation_status;
}

rfc_value_set! {
    /// VALARM `ACTION` (RFC 5545 §3.8.6.1).
    enum AlarmAction {
        Audio => "AUDIO",
        Display => "DISPLAY",
        Email => "EMAIL",
    }

    fn is_valid_alarm_action;
}

rfc_value_set! {
    /// `RELTYPE` parameter (RFC 5545 §3.2.15).
    enum RelationType {
        Parent => "PARENT",
        Child => "CHILD",
        Sibling => "SIBLING",
    }

    fn is_valid_relation_type;
}

rfc_value_set! {
    /// `RELATED` parameter on `TRIGGER` (RFC 5545 §3.2.14).
    enum TriggerRelation {
        Start => "START",
        End => "END",
    }

    fn is_valid_trigger_relation;
}

rfc_value_set! {
    /// vCard `KIND` (RFC 6350 §6.1.4).
    enum ContactKind {
        Individual => "individual",
        Group => "group",
        Org => "org" | "organization",
        Location => "location",
    }

    fn is_valid_contact_kind;
}

rfc_value_set! {
    /// Sex component of vCard `GENDER` (RFC 6350 §6.2.7).
    enum Sex {
        Male => "M",
        Female => "F",
        Other => "O",
        NotApplicable => "N",
        Unknown => "U",
    }

    fn is_valid_sex;
}

rfc_value_set! {
    /// `TYPE` values registered for vCard `TEL` (RFC 6350 §6.4.1).
    enum TelephoneType {
        Text => "text",
        Voice => "voice",
        Fax => "fax",
        Cell => "cell" | "mobile",
        Video => "video",
        Pager => "pager",
        TextPhone => "textphone",
        Work => "work",
        Home => "home",
    }

    fn is_valid_telephone_type;
}

/// `PRIORITY` range (RFC 5545 §3.8.1.9).
#[must_use]
pub fn is_valid_priority(value: i64) -> bool {
    (0..=9).contains(&value)
}

/// `PERCENT-COMPLETE` range (RFC 5545 §3.8.1.8).
#[must_use]
pub fn is_valid_percent_complete(value: i64) -> bool {
    (0..=100).contains(&value)
}
