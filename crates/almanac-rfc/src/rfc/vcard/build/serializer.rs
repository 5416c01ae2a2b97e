//! vCard 4.0 generation.
//!
//! Properties are written in a fixed order; absent values are omitted.

use chrono::{DateTime, Utc};

use almanac_core::constants::VCARD_VERSION;

use crate::rfc::options::GeneratorOptions;
use crate::rfc::text::{
    ContentLine, LineWriter, Parameter, escape_text, format_date_only, format_date_utc,
};
use crate::rfc::validation::Sex;
use crate::rfc::vcard::core::{Gender, ParsedContact, PostalAddress};

/// Generates a vCard file with the default options and the current time.
#[must_use]
pub fn generate_vcard_file(contacts: &[ParsedContact]) -> String {
    generate_vcard_file_at(contacts, &GeneratorOptions::default(), Utc::now())
}

/// Generates a vCard file; `now` becomes `REV` for contacts without one.
#[must_use]
#[tracing::instrument(skip(contacts, options), fields(records = contacts.len()))]
pub fn generate_vcard_file_at(
    contacts: &[ParsedContact],
    options: &GeneratorOptions,
    now: DateTime<Utc>,
) -> String {
    let mut w = LineWriter::new();
    for contact in contacts {
        write_contact(&mut w, contact, options, now);
    }
    tracing::debug!("Generated vCard file");
    w.finish()
}

fn write_contact(
    w: &mut LineWriter,
    contact: &ParsedContact,
    options: &GeneratorOptions,
    now: DateTime<Utc>,
) {
    w.raw("BEGIN", "VCARD");
    w.raw("VERSION", VCARD_VERSION);
    w.text("PRODID", &options.product_id);
    match contact.uid.as_deref().filter(|uid| !uid.trim().is_empty()) {
        Some(uid) => w.text("UID", uid),
        None => w.text("UID", &options.generate_uid()),
    }
    if let Some(kind) = contact.kind {
        w.raw("KIND", kind.as_str());
    }

    w.text("FN", &contact.formatted_name);
    if let Some(name) = &contact.name {
        w.raw("N", &structured(&name.components()));
    }
    write_list(w, "NICKNAME", &contact.nicknames);

    for email in &contact.emails {
        w.line(&typed_line("EMAIL", &email.address, &email.types, email.primary));
    }
    for phone in &contact.phones {
        w.line(&typed_line("TEL", &phone.number, &phone.types, phone.primary));
    }
    for address in &contact.addresses {
        w.line(&address_line(address));
    }

    if contact.organization.is_some() || !contact.organization_units.is_empty() {
        let mut parts = vec![contact.organization.as_deref().unwrap_or_default()];
        parts.extend(contact.organization_units.iter().map(String::as_str));
        w.raw("ORG", &structured(&parts));
    }
    w.text_opt("TITLE", contact.title.as_deref());
    w.text_opt("ROLE", contact.role.as_deref());

    if let Some(birthday) = &contact.birthday {
        w.raw("BDAY", &format_date_only(birthday));
    }
    if let Some(anniversary) = &contact.anniversary {
        w.raw("ANNIVERSARY", &format_date_only(anniversary));
    }
    if let Some(gender) = &contact.gender {
        w.raw("GENDER", &gender_value(gender));
    }

    w.text_opt("NOTE", contact.note.as_deref());
    for url in &contact.urls {
        w.raw("URL", url);
    }
    if let Some(photo) = &contact.photo {
        w.raw("PHOTO", photo);
    }
    write_list(w, "CATEGORIES", &contact.categories);
    if let Some(geo) = &contact.geo {
        w.raw("GEO", &geo.to_uri());
    }
    w.text_opt("TZ", contact.timezone.as_deref());

    for language in &contact.languages {
        w.line(&typed_line("LANG", &language.tag, &[], language.primary));
    }

    w.raw("REV", &format_date_utc(&contact.revision.unwrap_or(now)));
    w.raw("END", "VCARD");
}

/// Joins individually escaped components with `;`.
fn structured(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| escape_text(part))
        .collect::<Vec<_>>()
        .join(";")
}

fn write_list(w: &mut LineWriter, name: &str, values: &[String]) {
    if values.is_empty() {
        return;
    }
    let joined = values
        .iter()
        .map(|v| escape_text(v))
        .collect::<Vec<_>>()
        .join(",");
    w.raw(name, &joined);
}

/// A repeatable property with `TYPE` values and `PREF=1` on the primary entry.
fn typed_line(name: &str, value: &str, types: &[String], primary: bool) -> ContentLine {
    let mut line = ContentLine::new(name, escape_text(value));
    if !types.is_empty() {
        line = line.with_param(Parameter::with_values("TYPE", types.to_vec()));
    }
    if primary {
        line = line.with_param(Parameter::new("PREF", "1"));
    }
    line
}

fn address_line(address: &PostalAddress) -> ContentLine {
    let line = ContentLine::new("ADR", structured(&address.components()));
    if address.types.is_empty() {
        line
    } else {
        line.with_param(Parameter::with_values("TYPE", address.types.clone()))
    }
}

fn gender_value(gender: &Gender) -> String {
    let sex = gender.sex.map(Sex::as_str).unwrap_or_default();
    match &gender.identity {
        Some(identity) => format!("{sex};{}", escape_text(identity)),
        None => sex.to_string(),
    }
}
