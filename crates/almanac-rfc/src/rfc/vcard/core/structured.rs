//! Structured vCard values (RFC 6350).
//!
//! Components are kept as single unescaped strings; an empty string is an
//! absent component.

use serde::{Deserialize, Serialize};

use crate::rfc::validation::Sex;

/// Structured name (N property, RFC 6350 §6.2.2).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredName {
    pub family: String,
    pub given: String,
    /// Middle names.
    pub additional: String,
    /// Honorific prefixes ("Dr.").
    pub prefix: String,
    /// Honorific suffixes ("Jr.").
    pub suffix: String,
}

impl StructuredName {
    /// Creates a structured name with family and given names.
    #[must_use]
    pub fn simple(family: impl Into<String>, given: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            given: given.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components().into_iter().all(str::is_empty)
    }

    /// Components in wire order.
    #[must_use]
    pub fn components(&self) -> [&str; 5] {
        [
            &self.family,
            &self.given,
            &self.additional,
            &self.prefix,
            &self.suffix,
        ]
    }

    /// Given name followed by family name.
    #[must_use]
    pub fn display_name(&self) -> String {
        [self.given.as_str(), self.family.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Postal address (ADR property, RFC 6350 §6.3.1).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub po_box: String,
    /// Apartment or suite.
    pub extended: String,
    pub street: String,
    /// City.
    pub locality: String,
    /// State or province.
    pub region: String,
    pub postal_code: String,
    pub country: String,
    /// Lowercase `TYPE` values (`home`, `work`).
    pub types: Vec<String>,
}

impl PostalAddress {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components().into_iter().all(str::is_empty)
    }

    /// Components in wire order.
    #[must_use]
    pub fn components(&self) -> [&str; 7] {
        [
            &self.po_box,
            &self.extended,
            &self.street,
            &self.locality,
            &self.region,
            &self.postal_code,
            &self.country,
        ]
    }

    /// Formats as a single line.
    #[must_use]
    pub fn one_line(&self) -> String {
        [
            self.street.as_str(),
            self.locality.as_str(),
            self.region.as_str(),
            self.postal_code.as_str(),
            self.country.as_str(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Gender (GENDER property, RFC 6350 §6.2.7).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gender {
    pub sex: Option<Sex>,
    /// Free-form gender identity.
    pub identity: Option<String>,
}

impl Gender {
    #[must_use]
    pub const fn sex(sex: Sex) -> Self {
        Self {
            sex: Some(sex),
            identity: None,
        }
    }

    #[must_use]
    pub fn full(sex: Sex, identity: impl Into<String>) -> Self {
        Self {
            sex: Some(sex),
            identity: Some(identity.into()),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.sex.is_none() && self.identity.is_none()
    }
}
