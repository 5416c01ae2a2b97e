//! Almanac codecs and reconciliation - integration test support.
//!
//! This crate re-exports the workspace crates so integration tests can use
//! one set of paths.

#![expect(ambiguous_glob_reexports)]

pub mod component {
    // Re-export core and service modules at the component level
    pub use almanac_core::*;
    pub use almanac_service::*;
}

pub use almanac_rfc as rfc;
