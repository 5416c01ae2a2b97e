//! iCalendar record types (RFC 5545).
//!
//! Records are plain values: the parser builds them once at `END:` and
//! nothing in the codecs mutates them afterwards.

mod component;
mod event;
mod task;

pub use component::{
    Alarm, AlarmTrigger, Attachment, AttachmentSource, Attendee, Organizer, Relation,
};
pub use event::ParsedEvent;
pub use task::ParsedTask;
