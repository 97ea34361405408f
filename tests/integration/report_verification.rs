use super::IntegrationHarness;
use forensicbase::ingestion::{hash_case_file, load_store, read_case_file};
use forensicbase::reports::{build_report, read_report, save_report};

#[test]
fn recorded_digest_detects_case_file_tampering() {
    let harness = IntegrationHarness::new();
    let mut manager = harness.case_manager();
    let case = manager.create_case("provenance").expect("create case");

    let path = harness.write_case_file("evidence.txt", "ACGT\nTGCA\n1\nJane Doe 0\n");
    let case_file = read_case_file(&path).expect("read case file");
    let digest = hash_case_file(&path).expect("hash case file");
    let (mut store, _) = load_store(&case_file);
    store.flag_profiles_of_interest();

    let report = build_report(&case, &store, &path, digest.clone());
    let report_path = save_report(&case, &report).expect("save report");

    let reloaded = read_report(&report_path).expect("read report");
    assert_eq!(reloaded.source_file, path);
    assert_eq!(
        hash_case_file(&reloaded.source_file).expect("rehash"),
        reloaded.source_digest
    );

    std::fs::write(&path, "ACGT\nTGCA\n0\n").expect("tamper with case file");
    assert_ne!(hash_case_file(&path).expect("rehash"), digest);
}
