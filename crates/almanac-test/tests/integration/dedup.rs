//! Duplicate detection over projections and parsed records.

use almanac_test::component::dedup::{
    DuplicateCheckContact, DuplicateCheckEvent, DuplicateCheckTask, deduplicate,
    deduplicate_contacts, deduplicate_events, deduplicate_tasks, duplicate_ids,
    find_duplicates_against_existing,
};
use almanac_test::component::types::DuplicateDetectionConfig;
use almanac_test::rfc::rfc::vcard::parse_vcard_file;
use proptest::prelude::*;

use super::helpers::vcard;

fn contact(id: &str, uid: Option<&str>, name: &str) -> DuplicateCheckContact {
    DuplicateCheckContact {
        id: id.to_string(),
        uid: uid.map(str::to_string),
        name: name.to_string(),
        emails: vec![format!("{}@example.com", name.to_lowercase())],
        phones: Vec::new(),
    }
}

#[test_log::test]
fn uid_scenario() {
    let result = deduplicate_contacts(
        vec![
            contact("1", Some("same"), "John"),
            contact("2", Some("same"), "Johnny"),
            contact("3", Some("different"), "Jane"),
        ],
        &DuplicateDetectionConfig::default(),
    );
    let unique: Vec<_> = result.unique.iter().map(|c| c.id.as_str()).collect();
    let duplicates: Vec<_> = result.duplicate_records().map(|c| c.id.as_str()).collect();
    assert_eq!(unique, vec!["1", "3"]);
    assert_eq!(duplicates, vec!["2"]);
}

#[test]
fn config_from_json_uses_defaults_for_missing_fields() {
    let config: DuplicateDetectionConfig = serde_json::from_str(r#"{"use_uid": false}"#).unwrap();
    let records = vec![
        contact("1", Some("a"), "Jane"),
        contact("2", Some("b"), "Jane"),
    ];
    assert_eq!(duplicate_ids(&records, &config), vec!["2"]);
    assert!(duplicate_ids(&records, &DuplicateDetectionConfig::default()).is_empty());
}

#[test]
fn existing_records_are_never_classified() {
    let existing = vec![
        contact("e1", Some("x"), "A"),
        contact("e2", Some("x"), "A"),
    ];
    let new = vec![contact("n1", Some("y"), "B")];
    let result = find_duplicates_against_existing(new, &existing, &DuplicateDetectionConfig::default());
    assert_eq!(result.len(), 1);
    assert_eq!(result.unique[0].id, "n1");
}

#[test]
fn parsed_contacts_compare_against_stored_projections() {
    let vcf = format!(
        "{}{}",
        vcard(&["FN:Ana López", "EMAIL:ANA@example.com"]),
        vcard(&["FN:Bo Berg", "EMAIL:bo@example.com"])
    );
    let parsed = parse_vcard_file(&vcf);
    let stored = vec![DuplicateCheckContact {
        id: "db-7".to_string(),
        uid: None,
        name: "ana  lópez".to_string(),
        emails: vec!["ana@example.com".to_string()],
        phones: Vec::new(),
    }];

    let result = find_duplicates_against_existing(
        parsed.contacts.iter(),
        &stored,
        &DuplicateDetectionConfig::default(),
    );
    assert_eq!(result.unique.len(), 1);
    assert_eq!(result.unique[0].formatted_name, "Bo Berg");
    assert_eq!(result.duplicates[0].record.formatted_name, "Ana López");
}

#[test]
fn events_and_tasks_use_title_and_uid() {
    let events = vec![
        DuplicateCheckEvent {
            id: "1".to_string(),
            uid: None,
            name: "Dentist".to_string(),
        },
        DuplicateCheckEvent {
            id: "2".to_string(),
            uid: None,
            name: "dentist".to_string(),
        },
    ];
    assert_eq!(deduplicate_events(events, &DuplicateDetectionConfig::default()).duplicates.len(), 1);

    let tasks = vec![
        DuplicateCheckTask {
            id: "1".to_string(),
            uid: Some("t".to_string()),
            name: "One".to_string(),
        },
        DuplicateCheckTask {
            id: "2".to_string(),
            uid: Some("t".to_string()),
            name: "Two".to_string(),
        },
    ];
    let result = deduplicate_tasks(tasks, &DuplicateDetectionConfig::default());
    assert_eq!(result.unique[0].id, "1");
    assert_eq!(result.duplicates[0].record.id, "2");
}

proptest! {
    #[test]
    fn partition_sizes_add_up(
        names in proptest::collection::vec(("[a-c]{1,2}", proptest::option::of("[xy]")), 0..40),
        use_uid in any::<bool>(),
    ) {
        let records: Vec<DuplicateCheckEvent> = names
            .iter()
            .enumerate()
            .map(|(i, (name, uid))| DuplicateCheckEvent {
                id: i.to_string(),
                uid: uid.clone(),
                name: name.clone(),
            })
            .collect();
        let config = DuplicateDetectionConfig { use_uid, ..DuplicateDetectionConfig::default() };

        let result = deduplicate(records.iter(), &config);
        prop_assert_eq!(result.unique.len() + result.duplicates.len(), records.len());

        // the first record is always kept
        if let Some(first) = records.first() {
            prop_assert_eq!(&result.unique[0].id, &first.id);
        }
    }
}
