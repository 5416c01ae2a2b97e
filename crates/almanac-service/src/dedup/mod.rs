//! Duplicate detection for contacts, events and tasks.
//!
//! Records are compared through an [`IdentityKey`] built from the fields a
//! [`DuplicateDetectionConfig`] enables:
//!
//! - a non-empty UID is decisive when `use_uid` is set
//! - otherwise name, first email and phone (digits only) must all match
//!   for every enabled field
//! - a record lacking any enabled field never collides
//!
//! [`DuplicateDetectionConfig`]: almanac_core::types::DuplicateDetectionConfig

mod candidate;
mod engine;
mod key;

pub use candidate::{
    DuplicateCandidate, DuplicateCheckContact, DuplicateCheckEvent, DuplicateCheckTask,
    FieldValue, Identified,
};
pub use engine::{
    DeduplicationResult, DuplicateMatch, Original, deduplicate, deduplicate_contacts,
    deduplicate_events, deduplicate_tasks, duplicate_ids, find_duplicates_against_existing,
};
pub use key::{IdentityKey, normalize_email, normalize_name, normalize_phone};
