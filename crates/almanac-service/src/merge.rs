//! Merging several documents of one kind into a single document.
//!
//! Inputs are parsed in order and concatenated; the first occurrence of
//! every identity wins and later ones are dropped before generation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use almanac_core::types::{CollectionKind, DuplicateDetectionConfig};
use almanac_rfc::rfc::ParseError;
use almanac_rfc::rfc::ical::build::{
    CalendarExport, TaskListExport, generate_ics_file_at, generate_todo_file_at,
};
use almanac_rfc::rfc::ical::{parse_ics_content_with, parse_todo_file_with};
use almanac_rfc::rfc::options::GeneratorOptions;
use almanac_rfc::rfc::vcard::{generate_vcard_file_at, parse_vcard_file};

use crate::dedup::{DuplicateCandidate, deduplicate};
use crate::error::{ServiceError, ServiceResult};

/// A parse problem of one merge input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputError {
    /// Position of the input, starting at 0.
    pub input: usize,
    pub error: ParseError,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "input {}: {}", self.input, self.error)
    }
}

/// The merged document and what went into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeOutcome {
    pub content: String,
    /// Records written to `content`.
    pub record_count: usize,
    /// Records dropped as duplicates of an earlier one.
    pub duplicate_count: usize,
    pub errors: Vec<InputError>,
}

/// ## Summary
/// Merges calendar files into one calendar called `name`.
///
/// ## Errors
/// Returns an error if `inputs` is empty.
#[tracing::instrument(skip(inputs, config, options), fields(inputs = inputs.len()))]
pub fn merge_calendars(
    name: &str,
    inputs: &[&str],
    config: &DuplicateDetectionConfig,
    options: &GeneratorOptions,
) -> ServiceResult<MergeOutcome> {
    merge_calendars_at(name, inputs, config, options, Utc::now())
}

/// [`merge_calendars`] with an explicit generation time.
///
/// ## Errors
/// Returns an error if `inputs` is empty.
pub fn merge_calendars_at(
    name: &str,
    inputs: &[&str],
    config: &DuplicateDetectionConfig,
    options: &GeneratorOptions,
    now: DateTime<Utc>,
) -> ServiceResult<MergeOutcome> {
    let merged = collect(CollectionKind::Calendar, inputs, config, |text| {
        let parsed = parse_ics_content_with(text, options);
        (parsed.events, parsed.errors)
    })?;
    let export = CalendarExport {
        name,
        records: &merged.records,
    };
    let content = generate_ics_file_at(&export, options, now);
    Ok(merged.into_outcome(content))
}

/// ## Summary
/// Merges to-do files into one task list called `name`.
///
/// ## Errors
/// Returns an error if `inputs` is empty.
#[tracing::instrument(skip(inputs, config, options), fields(inputs = inputs.len()))]
pub fn merge_task_lists(
    name: &str,
    inputs: &[&str],
    config: &DuplicateDetectionConfig,
    options: &GeneratorOptions,
) -> ServiceResult<MergeOutcome> {
    merge_task_lists_at(name, inputs, config, options, Utc::now())
}

/// [`merge_task_lists`] with an explicit generation time.
///
/// ## Errors
/// Returns an error if `inputs` is empty.
pub fn merge_task_lists_at(
    name: &str,
    inputs: &[&str],
    config: &DuplicateDetectionConfig,
    options: &GeneratorOptions,
    now: DateTime<Utc>,
) -> ServiceResult<MergeOutcome> {
    let merged = collect(CollectionKind::TaskList, inputs, config, |text| {
        let parsed = parse_todo_file_with(text, options);
        (parsed.tasks, parsed.errors)
    })?;
    let export = TaskListExport {
        name,
        records: &merged.records,
    };
    let content = generate_todo_file_at(&export, options, now);
    Ok(merged.into_outcome(content))
}

/// ## Summary
/// Merges vCard files into one address book.
///
/// ## Errors
/// Returns an error if `inputs` is empty.
#[tracing::instrument(skip(inputs, config, options), fields(inputs = inputs.len()))]
pub fn merge_address_books(
    inputs: &[&str],
    config: &DuplicateDetectionConfig,
    options: &GeneratorOptions,
) -> ServiceResult<MergeOutcome> {
    merge_address_books_at(inputs, config, options, Utc::now())
}

/// [`merge_address_books`] with an explicit generation time, used as the
/// `REV` of contacts that have none.
///
/// ## Errors
/// Returns an error if `inputs` is empty.
pub fn merge_address_books_at(
    inputs: &[&str],
    config: &DuplicateDetectionConfig,
    options: &GeneratorOptions,
    now: DateTime<Utc>,
) -> ServiceResult<MergeOutcome> {
    let merged = collect(CollectionKind::AddressBook, inputs, config, |text| {
        let parsed = parse_vcard_file(text);
        (parsed.contacts, parsed.errors)
    })?;
    let content = generate_vcard_file_at(&merged.records, options, now);
    Ok(merged.into_outcome(content))
}

struct Merged<T> {
    records: Vec<T>,
    duplicate_count: usize,
    errors: Vec<InputError>,
}

impl<T> Merged<T> {
    fn into_outcome(self, content: String) -> MergeOutcome {
        tracing::info!(
            records = self.records.len(),
            duplicates = self.duplicate_count,
            errors = self.errors.len(),
            "Merged documents"
        );
        MergeOutcome {
            content,
            record_count: self.records.len(),
            duplicate_count: self.duplicate_count,
            errors: self.errors,
        }
    }
}

fn collect<T, F>(
    kind: CollectionKind,
    inputs: &[&str],
    config: &DuplicateDetectionConfig,
    parse: F,
) -> ServiceResult<Merged<T>>
where
    T: DuplicateCandidate,
    F: Fn(&str) -> (Vec<T>, Vec<ParseError>),
{
    if inputs.is_empty() {
        return Err(ServiceError::NothingToMerge(kind));
    }

    let mut records = Vec::new();
    let mut errors = Vec::new();
    for (input, &text) in inputs.iter().enumerate() {
        let (parsed, parse_errors) = parse(text);
        tracing::debug!(
            input,
            records = parsed.len(),
            errors = parse_errors.len(),
            "Parsed merge input"
        );
        records.extend(parsed);
        errors.extend(
            parse_errors
                .into_iter()
                .map(|error| InputError { input, error }),
        );
    }

    let partition = deduplicate(records, config);
    Ok(Merged {
        duplicate_count: partition.duplicates.len(),
        records: partition.unique,
        errors,
    })
}
