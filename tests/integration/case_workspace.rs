use super::IntegrationHarness;
use forensicbase::cases::{config_file_path, load_or_default, read_events, CaseManager, EventType};

#[test]
fn create_case_persists_metadata_and_audit_trail() {
    let harness = IntegrationHarness::new();
    let mut manager = harness.case_manager();
    assert!(manager.active_case().expect("active case").is_none());

    let case = manager.create_case("Opening Night").expect("create case");
    assert_eq!(case.slug, "opening-night");
    assert!(case.case_dir.starts_with(harness.workspace_path()));
    assert!(case.case_dir.join("case.json").exists());
    assert!(case.reports_dir().exists());

    let events = read_events(&case).expect("read events");
    assert!(events
        .iter()
        .any(|e| e.event_type == EventType::CaseCreated));
    assert!(events
        .iter()
        .any(|e| e.event_type == EventType::CaseSelected));

    // A fresh manager resolves the same case as active.
    let manager = CaseManager::new().expect("manager re-init");
    let active = manager
        .active_case()
        .expect("active case")
        .expect("case should resolve");
    assert_eq!(active.id, case.id);
}

#[test]
fn config_defaults_round_trip_through_toml() {
    let harness = IntegrationHarness::new();
    let manager = harness.case_manager();
    assert!(!manager.config.ingestion.reject_duplicate_names);
    assert!(!manager.config.analysis.purge_unmarked);
    assert!(manager.config.analysis.write_report);

    forensicbase::cases::save(&manager.config).expect("save config");
    assert!(config_file_path().expect("config path").exists());
    let reloaded = load_or_default().expect("reload config");
    assert!(!reloaded.analysis.purge_unmarked);
    assert!(reloaded.analysis.write_report);
}
