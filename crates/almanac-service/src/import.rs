//! Import of a document into an existing collection.
//!
//! The document is parsed, then every record is classified against the
//! collection's identity projections. Records already present, or repeated
//! earlier in the same document, are skipped.

use serde::Serialize;

use almanac_core::types::DuplicateDetectionConfig;
use almanac_rfc::rfc::ParseError;
use almanac_rfc::rfc::ical::{ParsedEvent, ParsedTask, parse_ics_content_with, parse_todo_file_with};
use almanac_rfc::rfc::options::GeneratorOptions;
use almanac_rfc::rfc::vcard::{ParsedContact, parse_vcard_file};

use crate::dedup::{
    DuplicateCandidate, DuplicateCheckContact, DuplicateCheckEvent, DuplicateCheckTask,
    DuplicateMatch, find_duplicates_against_existing,
};

/// What an import would add.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportOutcome<T> {
    /// Records to store, in document order.
    pub accepted: Vec<T>,
    /// Records matching the collection or an earlier record of the document.
    pub skipped: Vec<DuplicateMatch<T>>,
    /// Parse problems; an import with both records and errors is a partial success.
    pub errors: Vec<ParseError>,
}

impl<T> ImportOutcome<T> {
    fn classify<E: DuplicateCandidate>(
        records: Vec<T>,
        errors: Vec<ParseError>,
        existing: &[E],
        config: &DuplicateDetectionConfig,
    ) -> Self
    where
        T: DuplicateCandidate,
    {
        let partition = find_duplicates_against_existing(records, existing, config);
        tracing::info!(
            accepted = partition.unique.len(),
            skipped = partition.duplicates.len(),
            errors = errors.len(),
            "Import classified"
        );
        Self {
            accepted: partition.unique,
            skipped: partition.duplicates,
            errors,
        }
    }

    /// Returns whether parsing reported anything.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// ## Summary
/// Parses a calendar file and keeps the events not yet in `existing`.
///
/// UIDs made up for events that had none are not used for matching.
#[must_use]
#[tracing::instrument(skip(text, existing, config, options), fields(input_len = text.len(), existing = existing.len()))]
pub fn import_events(
    text: &str,
    existing: &[DuplicateCheckEvent],
    config: &DuplicateDetectionConfig,
    options: &GeneratorOptions,
) -> ImportOutcome<ParsedEvent> {
    let parsed = parse_ics_content_with(text, options);
    ImportOutcome::classify(parsed.events, parsed.errors, existing, config)
}

/// ## Summary
/// Parses a to-do file and keeps the tasks not yet in `existing`.
#[must_use]
#[tracing::instrument(skip(text, existing, config, options), fields(input_len = text.len(), existing = existing.len()))]
pub fn import_tasks(
    text: &str,
    existing: &[DuplicateCheckTask],
    config: &DuplicateDetectionConfig,
    options: &GeneratorOptions,
) -> ImportOutcome<ParsedTask> {
    let parsed = parse_todo_file_with(text, options);
    ImportOutcome::classify(parsed.tasks, parsed.errors, existing, config)
}

/// ## Summary
/// Parses a vCard file and keeps the contacts not yet in `existing`.
#[must_use]
#[tracing::instrument(skip(text, existing, config), fields(input_len = text.len(), existing = existing.len()))]
pub fn import_contacts(
    text: &str,
    existing: &[DuplicateCheckContact],
    config: &DuplicateDetectionConfig,
) -> ImportOutcome<ParsedContact> {
    let parsed = parse_vcard_file(text);
    ImportOutcome::classify(parsed.contacts, parsed.errors, existing, config)
}
