//! Duplicate detection and import/merge orchestration over the Almanac codecs.
//!
//! - [`dedup`]: identity keys and batch partitioning
//! - [`import`]: parse a document and classify it against a collection
//! - [`merge`]: combine documents of one kind into a single document
//! - [`service`]: the same entry points bound to loaded settings

pub mod dedup;
pub mod error;
pub mod import;
pub mod merge;
pub mod service;

pub use service::ReconcileService;
