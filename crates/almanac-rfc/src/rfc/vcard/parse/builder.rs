//! Accumulator for one `VCARD` block.

use chrono::{DateTime, NaiveDate, Utc};

use super::property::ContactProperty;
use super::values::{
    contact_date, gender, organization, phone_types, photo, postal_address, preference,
    non_blank, primary_index, strip_scheme, structured_name, text, text_list, types,
};
use crate::rfc::error::ParseError;
use crate::rfc::text::{ContentLine, GeoPoint, parse_date_lenient, parse_geo};
use crate::rfc::validation::ContactKind;
use crate::rfc::vcard::core::{
    Email, Gender, Language, ParsedContact, Phone, PostalAddress, StructuredName,
};

/// Collected fields of one `VCARD`.
///
/// Repeatable entries keep their raw preference until [`finish`] picks the
/// primary one.
///
/// [`finish`]: ContactBuilder::finish
#[derive(Debug)]
pub struct ContactBuilder {
    begin_line: usize,
    uid: Option<String>,
    kind: Option<ContactKind>,
    formatted_name: Option<String>,
    name: Option<StructuredName>,
    nicknames: Vec<String>,
    emails: Vec<(Email, Option<u32>)>,
    phones: Vec<(Phone, Option<u32>)>,
    addresses: Vec<PostalAddress>,
    organization: Option<String>,
    organization_units: Vec<String>,
    title: Option<String>,
    role: Option<String>,
    birthday: Option<NaiveDate>,
    anniversary: Option<NaiveDate>,
    gender: Option<Gender>,
    note: Option<String>,
    urls: Vec<String>,
    photo: Option<String>,
    categories: Vec<String>,
    geo: Option<GeoPoint>,
    timezone: Option<String>,
    languages: Vec<(Language, Option<u32>)>,
    revision: Option<DateTime<Utc>>,
}

impl ContactBuilder {
    #[must_use]
    pub const fn new(begin_line: usize) -> Self {
        Self {
            begin_line,
            uid: None,
            kind: None,
            formatted_name: None,
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

    #[must_use]
    pub const fn begin_line(&self) -> usize {
        self.begin_line
    }

    /// Applies one content line; problems are appended to `errors`.
    pub fn apply(&mut self, line: &ContentLine, line_num: usize, errors: &mut Vec<ParseError>) {
        let invalid = |message: String| ParseError::invalid_value(line_num, message);

        match ContactProperty::from_name(&line.name) {
            ContactProperty::Version => {
                let version = line.value.trim();
                if !matches!(version, "3.0" | "4.0") {
                    tracing::debug!(version, "Reading vCard of unsupported version");
                }
            }
            ContactProperty::Uid => self.uid = non_blank(line).map(|uid| uid.trim().to_string()),
            ContactProperty::Kind => match ContactKind::parse(&line.value) {
                Some(kind) => self.kind = Some(kind),
                None => errors.push(invalid(format!("KIND: unknown value '{}'", line.value))),
            },
            ContactProperty::FormattedName => {
                self.formatted_name = non_blank(line).map(|name| name.trim().to_string());
            }
            ContactProperty::Name => self.name = structured_name(&line.value),
            ContactProperty::Nickname => self.nicknames.extend(text_list(&line.value)),
            ContactProperty::Email | ContactProperty::Tel | ContactProperty::Lang => {
                self.apply_preferred(line, line_num, errors);
            }
            ContactProperty::Adr => {
                let address = postal_address(&line.value, types(line));
                if address.is_empty() {
                    tracing::trace!(line = line_num, "Ignoring empty ADR");
                } else {
                    self.addresses.push(address);
                }
            }
            ContactProperty::Org => {
                (self.organization, self.organization_units) = organization(&line.value);
            }
            ContactProperty::Title => self.title = Some(text(line)),
            ContactProperty::Role => self.role = Some(text(line)),
            ContactProperty::Birthday => match contact_date(&line.value) {
                Ok(date) => self.birthday = Some(date),
                Err(e) => errors.push(invalid(format!("BDAY: {e}"))),
            },
            ContactProperty::Anniversary => match contact_date(&line.value) {
                Ok(date) => self.anniversary = Some(date),
                Err(e) => errors.push(invalid(format!("{}: {e}", line.name))),
            },
            ContactProperty::Gender => match gender(&line.value) {
                Ok(gender) if gender.is_empty() => {}
                Ok(gender) => self.gender = Some(gender),
                Err(e) => errors.push(invalid(format!("GENDER: {e}"))),
            },
            ContactProperty::Note => self.note = Some(text(line)),
            ContactProperty::Url => {
                // vCard 3 exporters escape the scheme colon (`https\://`)
                if let Some(url) = non_blank(line) {
                    self.urls.push(url.trim().to_string());
                }
            }
            ContactProperty::Photo => match photo(line) {
                Ok(uri) if uri.is_empty() => {}
                Ok(uri) => self.photo = Some(uri),
                Err(e) => errors.push(invalid(format!("PHOTO: {e}"))),
            },
            ContactProperty::Categories => self.categories.extend(text_list(&line.value)),
            ContactProperty::Geo => match parse_geo(&line.value) {
                Ok(geo) => self.geo = Some(geo),
                Err(e) => errors.push(invalid(format!("GEO: {e}"))),
            },
            ContactProperty::Timezone => self.timezone = Some(text(line).trim().to_string()),
            ContactProperty::Rev => {
                let parsed = parse_date_lenient(&line.value, None);
                if let Some(issue) = parsed.issue {
                    errors.push(invalid(format!("REV: {issue}")));
                }
                self.revision = parsed.value.map(|rev| rev.to_utc());
            }
            ContactProperty::Unknown => {
                tracing::trace!(property = %line.name, "Ignoring property");
            }
        }
    }

    /// `EMAIL`, `TEL` and `LANG`: entries that take part in primary marking.
    fn apply_preferred(&mut self, line: &ContentLine, line_num: usize, errors: &mut Vec<ParseError>) {
        let pref = preference(line).unwrap_or_else(|e| {
            errors.push(ParseError::invalid_value(
                line_num,
                format!("{}: {e}", line.name),
            ));
            Some(UNUSABLE_PREFERENCE)
        });

        let Some(value) = non_blank(line) else {
            tracing::trace!(line = line_num, property = %line.name, "Ignoring empty value");
            return;
        };

        match line.name.as_str() {
            "EMAIL" => {
                let address = strip_scheme(&value, "mailto:").to_string();
                let email = Email {
                    address,
                    types: types(line),
                    primary: false,
                };
                self.emails.push((email, pref));
            }
            "TEL" => {
                let number = strip_scheme(&value, "tel:").to_string();
                let phone = Phone {
                    number,
                    types: phone_types(line),
                    primary: false,
                };
                self.phones.push((phone, pref));
            }
            _ => {
                let language = Language {
                    tag: value.trim().to_string(),
                    primary: false,
                };
                self.languages.push((language, pref));
            }
        }
    }

    /// Converts the builder into a contact.
    ///
    /// Returns `None` (with an error appended) when the block has no `FN`.
    pub fn finish(self, errors: &mut Vec<ParseError>) -> Option<ParsedContact> {
        let Some(formatted_name) = self.formatted_name else {
            tracing::warn!(line = self.begin_line, "Dropping VCARD without FN");
            let hint = self
                .name
                .as_ref()
                .map(StructuredName::display_name)
                .or(self.uid)
                .filter(|hint| !hint.is_empty())
                .map(|hint| format!(" ('{hint}')"))
                .unwrap_or_default();
            errors.push(ParseError::missing_property(
                self.begin_line,
                format!("contact{hint} is missing required FN property"),
            ));
            return None;
        };

        Some(ParsedContact {
            uid: self.uid,
            kind: self.kind,
            formatted_name,
            name: self.name,
            nicknames: self.nicknames,
            emails: mark_primary(self.emails, |email| email.primary = true),
            phones: mark_primary(self.phones, |phone| phone.primary = true),
            addresses: self.addresses,
            organization: self.organization,
            organization_units: self.organization_units,
            title: self.title,
            role: self.role,
            birthday: self.birthday,
            anniversary: self.anniversary,
            gender: self.gender,
            note: self.note,
            urls: self.urls,
            photo: self.photo,
            categories: self.categories,
            geo: self.geo,
            timezone: self.timezone,
            languages: mark_primary(self.languages, |lang| lang.primary = true),
            revision: self.revision,
        })
    }
}

/// Rank of an entry whose `PREF` could not be read: below every valid one.
const UNUSABLE_PREFERENCE: u32 = u32::MAX;

/// Marks the single most preferred entry; none when no entry has a
/// preference.
fn mark_primary<T>(entries: Vec<(T, Option<u32>)>, mark: impl Fn(&mut T)) -> Vec<T> {
    let prefs: Vec<Option<u32>> = entries.iter().map(|(_, pref)| *pref).collect();
    let primary = primary_index(&prefs);
    entries
        .into_iter()
        .enumerate()
        .map(|(i, (mut entry, _))| {
            if Some(i) == primary {
                mark(&mut entry);
            }
            entry
        })
        .collect()
}
