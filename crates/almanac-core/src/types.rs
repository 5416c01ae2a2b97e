use serde::{Deserialize, Serialize};

/// Kind of record collection an import or merge operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    Calendar,
    TaskList,
    AddressBook,
}

impl CollectionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calendar => "calendar",
            Self::TaskList => "task_list",
            Self::AddressBook => "address_book",
        }
    }

    /// Plural noun for the records this collection holds.
    #[must_use]
    pub const fn record_noun(self) -> &'static str {
        match self {
            Self::Calendar => "events",
            Self::TaskList => "tasks",
            Self::AddressBook => "contacts",
        }
    }
}

impl std::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity rules for duplicate detection.
///
/// A non-empty UID is decisive when `use_uid` is set. Otherwise every other
/// enabled field must match for two records to collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuplicateDetectionConfig {
    pub use_uid: bool,
    pub use_name: bool,
    pub use_email: bool,
    pub use_phone: bool,
}

impl Default for DuplicateDetectionConfig {
    fn default() -> Self {
        Self {
            use_uid: true,
            use_name: true,
            use_email: true,
            use_phone: false,
        }
    }
}

impl DuplicateDetectionConfig {
    /// Returns whether any field other than the UID takes part in matching.
    #[must_use]
    pub const fn has_composite_fields(&self) -> bool {
        self.use_name || self.use_email || self.use_phone
    }
}
