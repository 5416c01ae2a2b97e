//! Import and merge entry points bound to loaded settings.

use almanac_core::config::Settings;
use almanac_core::types::DuplicateDetectionConfig;
use almanac_rfc::rfc::ical::{ParsedEvent, ParsedTask};
use almanac_rfc::rfc::options::GeneratorOptions;
use almanac_rfc::rfc::vcard::ParsedContact;

use crate::dedup::{DuplicateCheckContact, DuplicateCheckEvent, DuplicateCheckTask};
use crate::error::ServiceResult;
use crate::import::{ImportOutcome, import_contacts, import_events, import_tasks};
use crate::merge::{MergeOutcome, merge_address_books, merge_calendars, merge_task_lists};

/// Dedup rules and generator options shared by every request.
///
/// ## Usage
///
/// ```ignore
/// let settings = almanac_core::config::load_config()?;
/// let service = ReconcileService::from_settings(&settings)?;
/// let outcome = service.import_contacts(&body, &existing);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReconcileService {
    dedup: DuplicateDetectionConfig,
    generator: GeneratorOptions,
}

impl ReconcileService {
    #[must_use]
    pub const fn new(dedup: DuplicateDetectionConfig, generator: GeneratorOptions) -> Self {
        Self { dedup, generator }
    }

    /// ## Summary
    /// Builds the service from the `dedup` and `codec` settings sections.
    ///
    /// ## Errors
    /// Returns an error if the codec settings cannot be used for generation.
    pub fn from_settings(settings: &Settings) -> ServiceResult<Self> {
        let generator = GeneratorOptions::from_config(&settings.codec)?;
        tracing::debug!(dedup = ?settings.dedup, "Reconcile service configured");
        Ok(Self::new(settings.dedup, generator))
    }

    #[must_use]
    pub const fn dedup_config(&self) -> &DuplicateDetectionConfig {
        &self.dedup
    }

    #[must_use]
    pub const fn generator_options(&self) -> &GeneratorOptions {
        &self.generator
    }

    #[must_use]
    pub fn import_events(
        &self,
        text: &str,
        existing: &[DuplicateCheckEvent],
    ) -> ImportOutcome<ParsedEvent> {
        import_events(text, existing, &self.dedup, &self.generator)
    }

    #[must_use]
    pub fn import_tasks(&self, text: &str, existing: &[DuplicateCheckTask]) -> ImportOutcome<ParsedTask> {
        import_tasks(text, existing, &self.dedup, &self.generator)
    }

    #[must_use]
    pub fn import_contacts(
        &self,
        text: &str,
        existing: &[DuplicateCheckContact],
    ) -> ImportOutcome<ParsedContact> {
        import_contacts(text, existing, &self.dedup)
    }

    /// ## Errors
    /// Returns an error if `inputs` is empty.
    pub fn merge_calendars(&self, name: &str, inputs: &[&str]) -> ServiceResult<MergeOutcome> {
        merge_calendars(name, inputs, &self.dedup, &self.generator)
    }

    /// ## Errors
    /// Returns an error if `inputs` is empty.
    pub fn merge_task_lists(&self, name: &str, inputs: &[&str]) -> ServiceResult<MergeOutcome> {
        merge_task_lists(name, inputs, &self.dedup, &self.generator)
    }

    /// ## Errors
    /// Returns an error if `inputs` is empty.
    pub fn merge_address_books(&self, inputs: &[&str]) -> ServiceResult<MergeOutcome> {
        merge_address_books(inputs, &self.dedup, &self.generator)
    }
}
