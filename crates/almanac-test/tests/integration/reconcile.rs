//! Import and merge flows as request handlers drive them.

use almanac_test::component::ReconcileService;
use almanac_test::component::config::{CodecConfig, LoggingConfig, Settings};
use almanac_test::component::dedup::{DuplicateCheckEvent, DuplicateCheckTask};
use almanac_test::component::types::DuplicateDetectionConfig;
use almanac_test::rfc::rfc::ParseErrorKind;
use almanac_test::rfc::rfc::ical::{parse_ics_content, parse_todo_file};
use almanac_test::rfc::rfc::vcard::parse_vcard_file;

use super::helpers::{calendar, vcard, vevent, vtodo};

fn service() -> ReconcileService {
    let settings = Settings {
        codec: CodecConfig {
            product_id: "-//Almanac Test//EN".to_string(),
            uid_domain: "test.example".to_string(),
        },
        dedup: DuplicateDetectionConfig::default(),
        logging: LoggingConfig::default(),
    };
    ReconcileService::from_settings(&settings).unwrap()
}

#[test_log::test]
fn import_skips_events_already_in_the_calendar() {
    let ics = calendar(&[
        vevent("standup-1", "Standup", "20240115T090000Z", "20240115T091500Z"),
        vevent("retro-1", "Retro", "20240119T150000Z", "20240119T160000Z"),
        vevent("retro-1", "Retro (copy)", "20240119T150000Z", "20240119T160000Z"),
    ]);
    let existing = vec![DuplicateCheckEvent {
        id: "42".to_string(),
        uid: Some("standup-1".to_string()),
        name: "Daily standup".to_string(),
    }];

    let outcome = service().import_events(&ics, &existing);
    assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
    let accepted: Vec<_> = outcome.accepted.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(accepted, vec!["Retro"]);
    let skipped: Vec<_> = outcome.skipped.iter().map(|s| s.record.title.as_str()).collect();
    assert_eq!(skipped, vec!["Standup", "Retro (copy)"]);
}

#[test]
fn import_reports_errors_alongside_accepted_contacts() {
    let mut vcf = vcard(&["FN:Kept", "EMAIL:kept@example.com"]);
    vcf.push_str(&vcard(&["EMAIL:dropped@example.com"]));

    let outcome = service().import_contacts(&vcf, &[]);
    assert_eq!(outcome.accepted.len(), 1);
    assert!(outcome.has_errors());
    assert_eq!(outcome.errors[0].kind, ParseErrorKind::MissingProperty);

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["accepted"][0]["formatted_name"], "Kept");
    assert_eq!(json["errors"][0]["kind"], "missing_property");
}

#[test]
fn import_of_tasks_without_uid_generates_one() {
    let ics = "BEGIN:VCALENDAR\r\nBEGIN:VTODO\r\nSUMMARY:No uid\r\nEND:VTODO\r\nEND:VCALENDAR\r\n";
    let existing: Vec<DuplicateCheckTask> = Vec::new();
    let outcome = service().import_tasks(ics, &existing);
    assert_eq!(outcome.accepted.len(), 1);
    let task = &outcome.accepted[0];
    assert!(task.uid_generated);
    assert!(task.uid.as_ref().unwrap().ends_with("@test.example"));

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["accepted"][0]["uid_generated"], true);
}

#[test_log::test]
fn merging_calendars_produces_one_document() {
    let work = calendar(&[
        vevent("a", "Kickoff", "20240115T100000Z", "20240115T110000Z"),
        vevent("b", "Review", "20240116T100000Z", "20240116T110000Z"),
    ]);
    let personal = calendar(&[
        vevent("b", "Review", "20240116T100000Z", "20240116T110000Z"),
        vevent("c", "Dinner", "20240116T190000Z", "20240116T210000Z"),
    ]);

    let outcome = service().merge_calendars("Everything", &[&work, &personal]).unwrap();
    assert_eq!(outcome.record_count, 3);
    assert_eq!(outcome.duplicate_count, 1);
    assert!(outcome.content.contains("PRODID:-//Almanac Test//EN\r\n"));

    let merged = parse_ics_content(&outcome.content);
    assert_eq!(merged.calendar_name.as_deref(), Some("Everything"));
    let uids: Vec<_> = merged.events.iter().filter_map(|e| e.uid.as_deref()).collect();
    assert_eq!(uids, vec!["a", "b", "c"]);
}

#[test]
fn merging_task_lists_and_address_books() {
    let one = calendar(&[vtodo("t1", "Pack"), vtodo("t2", "Travel")]);
    let two = calendar(&[vtodo("t2", "Travel"), vtodo("t3", "Unpack")]);
    let tasks = service().merge_task_lists("Trip", &[&one, &two]).unwrap();
    assert_eq!(tasks.record_count, 3);
    assert_eq!(parse_todo_file(&tasks.content).tasks.len(), 3);

    let a = vcard(&["UID:p1", "FN:Pat"]);
    let b = vcard(&["UID:p1", "FN:Patricia"]);
    let contacts = service().merge_address_books(&[&a, &b]).unwrap();
    assert_eq!(contacts.record_count, 1);
    assert_eq!(parse_vcard_file(&contacts.content).contacts[0].formatted_name, "Pat");
}

#[test]
fn merging_nothing_is_an_error() {
    assert!(service().merge_calendars("Empty", &[]).is_err());
}
