//! Partitioning of record batches into unique records and duplicates.
//!
//! Records are scanned once, left to right. The first record carrying an
//! identity key is kept; every later record with the same key is a
//! duplicate of that first one. Records without a key are always unique.

use std::collections::HashMap;

use serde::Serialize;

use almanac_core::types::DuplicateDetectionConfig;

use super::candidate::{
    DuplicateCandidate, DuplicateCheckContact, DuplicateCheckEvent, DuplicateCheckTask,
    Identified,
};
use super::key::IdentityKey;

/// The record a duplicate was matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "in", content = "index", rename_all = "snake_case")]
pub enum Original {
    /// Index into [`DeduplicationResult::unique`].
    Unique(usize),
    /// Index into the existing records.
    Existing(usize),
}

/// A record classified as a duplicate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateMatch<T> {
    pub record: T,
    pub key: IdentityKey,
    pub original: Original,
}

/// Partition of a batch; both lists keep input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeduplicationResult<T> {
    pub unique: Vec<T>,
    pub duplicates: Vec<DuplicateMatch<T>>,
}

impl<T> DeduplicationResult<T> {
    /// Number of records that went in.
    #[must_use]
    pub fn len(&self) -> usize {
        self.unique.len() + self.duplicates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unique.is_empty() && self.duplicates.is_empty()
    }

    /// The duplicate records without their match details.
    pub fn duplicate_records(&self) -> impl Iterator<Item = &T> {
        self.duplicates.iter().map(|dup| &dup.record)
    }
}

/// ## Summary
/// Splits records into the first occurrence of every identity and the
/// duplicates that follow it.
#[must_use]
#[tracing::instrument(skip_all)]
pub fn deduplicate<T, I>(records: I, config: &DuplicateDetectionConfig) -> DeduplicationResult<T>
where
    T: DuplicateCandidate,
    I: IntoIterator<Item = T>,
{
    partition(records, HashMap::new(), config)
}

/// ## Summary
/// Classifies new records against an existing collection.
///
/// Existing keys are known before the first new record is looked at, so a
/// new record matching any existing one is a duplicate. New records also
/// collide with each other. Existing records are never classified.
#[must_use]
#[tracing::instrument(skip_all, fields(existing = existing.len()))]
pub fn find_duplicates_against_existing<T, E, I>(
    new_records: I,
    existing: &[E],
    config: &DuplicateDetectionConfig,
) -> DeduplicationResult<T>
where
    T: DuplicateCandidate,
    E: DuplicateCandidate,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashMap::with_capacity(existing.len());
    for (index, record) in existing.iter().enumerate() {
        if let Some(key) = IdentityKey::for_record(record, config) {
            seen.entry(key).or_insert(Original::Existing(index));
        }
    }
    tracing::trace!(keys = seen.len(), "Seeded identity keys from existing records");

    partition(new_records, seen, config)
}

fn partition<T, I>(
    records: I,
    mut seen: HashMap<IdentityKey, Original>,
    config: &DuplicateDetectionConfig,
) -> DeduplicationResult<T>
where
    T: DuplicateCandidate,
    I: IntoIterator<Item = T>,
{
    let mut result = DeduplicationResult {
        unique: Vec::new(),
        duplicates: Vec::new(),
    };
    let mut keyless = 0_usize;

    for record in records {
        let Some(key) = IdentityKey::for_record(&record, config) else {
            keyless += 1;
            result.unique.push(record);
            continue;
        };
        if let Some(&original) = seen.get(&key) {
            tracing::trace!(%key, "Duplicate record");
            result.duplicates.push(DuplicateMatch {
                record,
                key,
                original,
            });
        } else {
            seen.insert(key, Original::Unique(result.unique.len()));
            result.unique.push(record);
        }
    }

    tracing::debug!(
        unique = result.unique.len(),
        duplicates = result.duplicates.len(),
        keyless,
        "Deduplicated records"
    );
    result
}

#[must_use]
pub fn deduplicate_contacts(
    records: Vec<DuplicateCheckContact>,
    config: &DuplicateDetectionConfig,
) -> DeduplicationResult<DuplicateCheckContact> {
    deduplicate(records, config)
}

#[must_use]
pub fn deduplicate_events(
    records: Vec<DuplicateCheckEvent>,
    config: &DuplicateDetectionConfig,
) -> DeduplicationResult<DuplicateCheckEvent> {
    deduplicate(records, config)
}

#[must_use]
pub fn deduplicate_tasks(
    records: Vec<DuplicateCheckTask>,
    config: &DuplicateDetectionConfig,
) -> DeduplicationResult<DuplicateCheckTask> {
    deduplicate(records, config)
}

/// Ids of the records [`deduplicate`] would classify as duplicates.
#[must_use]
pub fn duplicate_ids<T>(records: &[T], config: &DuplicateDetectionConfig) -> Vec<String>
where
    T: DuplicateCandidate + Identified,
{
    deduplicate(records, config)
        .duplicate_records()
        .map(|record| record.id().to_string())
        .collect()
}
