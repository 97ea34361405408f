use super::IntegrationHarness;
use forensicbase::cases::{read_events, EventType};
use forensicbase::ingestion::{hash_case_file, load_store, read_case_file};
use forensicbase::reports::{build_report, read_report, save_report};
use serde_json::json;

const CASE_FILE: &str = "\
AGATAGATAGATTTTTAGGAGG
TTAGATAGATGAATTC
3
Jane Doe 2 AGAT 5 TTTT 1
Al Smith 2 AGAT 1 GAAT 2
Zoe Zephyr 1 AGG 3
";

#[test]
fn scan_flags_purges_and_reports() {
    let harness = IntegrationHarness::new();
    let mut manager = harness.case_manager();
    let case = manager.create_case("cold case").expect("create case");

    let path = harness.write_case_file("evidence.txt", CASE_FILE);
    let case_file = read_case_file(&path).expect("read case file");
    let digest = hash_case_file(&path).expect("hash case file");
    let (mut store, summary) = load_store(&case_file);
    assert_eq!(summary.people, 3);
    assert_eq!(summary.duplicates_ignored, 0);

    store.flag_profiles_of_interest();
    assert_eq!(store.count_by_interest(true), 1);
    assert!(store.get("Doe, Jane").expect("profile").of_interest);
    assert_eq!(store.unmarked_names(), vec!["Smith, Al", "Zephyr, Zoe"]);

    let report = build_report(&case, &store, &path, digest.clone());
    let purged = store.cleanup();
    assert_eq!(purged, vec!["Smith, Al", "Zephyr, Zoe"]);
    assert_eq!(store.len(), 1);
    assert!(store.contains("Doe, Jane"));
    let report = report.with_purged(purged.clone());

    manager
        .log_event(&case, EventType::ProfilesPurged, json!({ "purged": purged }))
        .expect("log purge event");

    let report_path = save_report(&case, &report).expect("save report");
    let reloaded = read_report(&report_path).expect("read report");
    assert_eq!(reloaded.case_id, case.id);
    assert_eq!(reloaded.total_profiles, 3);
    assert_eq!(reloaded.source_digest, digest);
    assert_eq!(reloaded.flagged.len(), 1);
    assert_eq!(reloaded.flagged[0].name, "Doe, Jane");
    assert_eq!(reloaded.flagged[0].matched, 2);
    assert_eq!(reloaded.unmarked, vec!["Smith, Al", "Zephyr, Zoe"]);
    assert_eq!(reloaded.purged, vec!["Smith, Al", "Zephyr, Zoe"]);

    let events = read_events(&case).expect("read events");
    assert!(events
        .iter()
        .any(|e| e.event_type == EventType::ProfilesPurged));
}

#[test]
fn rescanning_after_purge_changes_nothing() {
    let harness = IntegrationHarness::new();
    let path = harness.write_case_file("evidence.txt", CASE_FILE);
    let case_file = read_case_file(&path).expect("read case file");
    let (mut store, _) = load_store(&case_file);

    store.flag_profiles_of_interest();
    store.cleanup();
    let remaining = store.len();

    store.flag_profiles_of_interest();
    assert!(store.cleanup().is_empty());
    assert_eq!(store.len(), remaining);
}
