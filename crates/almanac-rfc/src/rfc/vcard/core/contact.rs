use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::structured::{Gender, PostalAddress, StructuredName};
use crate::rfc::text::GeoPoint;
use crate::rfc::validation::ContactKind;

/// `EMAIL` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub address: String,
    /// Lowercase `TYPE` values, without `pref` and `internet`.
    pub types: Vec<String>,
    /// Set on the single most preferred entry.
    pub primary: bool,
}

impl Email {
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            types: Vec::new(),
            primary: false,
        }
    }
}

/// `TEL` entry with any `tel:` scheme removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
    pub number: String,
    pub types: Vec<String>,
    pub primary: bool,
}

impl Phone {
    #[must_use]
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            types: Vec::new(),
            primary: false,
        }
    }
}

/// `LANG` entry (a BCP 47 tag).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub tag: String,
    pub primary: bool,
}

/// One `VCARD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedContact {
    pub uid: Option<String>,
    pub kind: Option<ContactKind>,
    /// `FN`, the one property a card cannot do without.
    pub formatted_name: String,
    pub name: Option<StructuredName>,
    pub nicknames: Vec<String>,
    pub emails: Vec<Email>,
    pub phones: Vec<Phone>,
    pub addresses: Vec<PostalAddress>,
    /// First `ORG` component.
    pub organization: Option<String>,
    /// Remaining `ORG` components, most general first.
    pub organization_units: Vec<String>,
    pub title: Option<String>,
    pub role: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub anniversary: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub note: Option<String>,
    pub urls: Vec<String>,
    /// URI; vCard 3 inline photos become `data:` URIs.
    pub photo: Option<String>,
    pub categories: Vec<String>,
    pub geo: Option<GeoPoint>,
    /// `TZ` as written (zone name or UTC offset).
    pub timezone: Option<String>,
    pub languages: Vec<Language>,
    /// `REV`.
    pub revision: Option<DateTime<Utc>>,
}

impl ParsedContact {
    /// Creates a contact with only `FN` set.
    #[must_use]
    pub fn new(formatted_name: impl Into<String>) -> Self {
        Self {
            uid: None,
            kind: None,
            formatted_name: formatted_name.into(),
            name: None,
            nicknames: Vec::new(),
            emails: Vec::new(),
            phones: Vec::new(),
            addresses: Vec::new(),
            organization: None,
            organization_units: Vec::new(),
            title: None,
            role: None,
            birthday: None,
            anniversary: None,
            gender: None,
            note: None,
            urls: Vec::new(),
            photo: None,
            categories: Vec::new(),
            geo: None,
            timezone: None,
            languages: Vec::new(),
            revision: None,
        }
    }

    /// The entry marked primary, else the first one.
    #[must_use]
    pub fn preferred_email(&self) -> Option<&Email> {
        self.emails
            .iter()
            .find(|e| e.primary)
            .or_else(|| self.emails.first())
    }

    /// The entry marked primary, else the first one.
    #[must_use]
    pub fn preferred_phone(&self) -> Option<&Phone> {
        self.phones
            .iter()
            .find(|p| p.primary)
            .or_else(|| self.phones.first())
    }
}
