//! vCard parse/generate through the public API.

use almanac_test::rfc::rfc::ParseErrorKind;
use almanac_test::rfc::rfc::options::GeneratorOptions;
use almanac_test::rfc::rfc::vcard::{generate_vcard_file_at, parse_vcard_file};

use super::helpers::{fixed_now, vcard};

#[test_log::test]
fn pref_marks_the_primary_email() {
    let vcf = vcard(&[
        "FN:John Smith",
        "EMAIL;TYPE=work:john@company.com",
        "EMAIL;TYPE=home;PREF=1:john@home.com",
    ]);
    let parsed = parse_vcard_file(&vcf);

    assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
    let emails = &parsed.contacts[0].emails;
    assert_eq!(emails.len(), 2);
    assert_eq!(emails[0].address, "john@company.com");
    assert!(!emails[0].primary);
    assert_eq!(emails[1].address, "john@home.com");
    assert!(emails[1].primary);
    assert_eq!(
        parsed.contacts[0].preferred_email().map(|e| e.address.as_str()),
        Some("john@home.com")
    );
}

#[test]
fn card_without_fn_contributes_nothing() {
    let vcf = vcard(&["N:Doe;Jane;;;", "EMAIL:jane@example.com"]);
    let parsed = parse_vcard_file(&vcf);

    assert!(parsed.contacts.is_empty());
    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.errors[0].kind, ParseErrorKind::MissingProperty);
    assert!(parsed.errors[0].message.contains("FN"));
}

#[test]
fn input_without_cards_is_an_error() {
    let parsed = parse_vcard_file("FN:Floating\r\nEMAIL:x@example.com\r\n");
    assert!(parsed.contacts.is_empty());
    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.errors[0].message, "No contacts found in file");
}

#[test]
fn partial_success_keeps_good_cards() {
    let mut vcf = vcard(&["FN:Good One", "BDAY:19900101"]);
    vcf.push_str(&vcard(&["FN:Bad Birthday", "BDAY:not-a-date"]));
    vcf.push_str(&vcard(&["EMAIL:no-name@example.com"]));

    let parsed = parse_vcard_file(&vcf);
    let names: Vec<_> = parsed.contacts.iter().map(|c| c.formatted_name.as_str()).collect();
    assert_eq!(names, vec!["Good One", "Bad Birthday"]);
    assert_eq!(parsed.contacts[1].birthday, None);

    let kinds: Vec<_> = parsed.errors.iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![ParseErrorKind::InvalidValue, ParseErrorKind::MissingProperty]);
}

#[test_log::test]
fn version_three_input_is_written_as_version_four() {
    let vcf = "BEGIN:VCARD\r\nVERSION:3.0\r\nUID:legacy-1\r\nFN:Legacy Person\r\n\
N:Person;Legacy;;;\r\nTEL;TYPE=CELL,pref:+1 555 0100\r\nEND:VCARD\r\n";
    let parsed = parse_vcard_file(vcf);
    assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);

    let generated = generate_vcard_file_at(&parsed.contacts, &GeneratorOptions::default(), fixed_now());
    assert!(generated.contains("VERSION:4.0\r\n"));
    assert!(generated.contains("TEL;TYPE=cell;PREF=1:+1 555 0100\r\n"));
    assert!(generated.contains("N:Person;Legacy;;;\r\n"));
    assert!(generated.contains("REV:20240601T120000Z\r\n"));

    let mut reparsed = parse_vcard_file(&generated);
    assert!(reparsed.errors.is_empty());
    let contact = reparsed.contacts.remove(0);
    let mut original = parsed.contacts[0].clone();
    original.revision = contact.revision;
    assert_eq!(contact, original);
}
