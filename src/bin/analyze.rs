use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use forensicbase::cases::{CaseManager, EventType};
use forensicbase::ingestion::{hash_case_file, load_store, read_case_file};
use forensicbase::reports::{build_report, save_report};
use serde_json::json;

fn main() -> Result<()> {
    let args = CliArgs::parse()?;
    let mut manager = CaseManager::new()?;

    let case = match &args.case_name {
        Some(name) => manager.create_case(name)?,
        None => match manager.active_case()? {
            Some(case) => case,
            None => {
                let stem = args
                    .case_file
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("unnamed-case");
                manager.create_case(stem)?
            }
        },
    };

    let case_file = read_case_file(&args.case_file)?;
    let digest = hash_case_file(&args.case_file)?;
    let (mut store, summary) = load_store(&case_file);
    if manager.config.ingestion.reject_duplicate_names && summary.duplicates_ignored > 0 {
        anyhow::bail!(
            "Case file contains {} duplicated name(s)",
            summary.duplicates_ignored
        );
    }
    manager.log_event(
        &case,
        EventType::CaseFileLoaded,
        json!({
            "file": args.case_file,
            "digest": digest,
            "people": summary.people,
            "duplicates_ignored": summary.duplicates_ignored,
        }),
    )?;
    println!(
        "Loaded {} profile(s) from {}",
        summary.people,
        args.case_file.display()
    );

    store.flag_profiles_of_interest();
    let flagged_count = store.count_by_interest(true);
    let unmarked = store.unmarked_names();
    manager.log_event(
        &case,
        EventType::ProfilesFlagged,
        json!({ "flagged": flagged_count, "unmarked": unmarked.len() }),
    )?;
    println!("{} of interest, {} unmarked", flagged_count, unmarked.len());
    for name in &unmarked {
        println!("  - {name}");
    }

    let mut report = build_report(&case, &store, &args.case_file, digest);

    let purge = args
        .purge
        .unwrap_or(manager.config.analysis.purge_unmarked);
    if purge {
        let purged = store.cleanup();
        manager.log_event(&case, EventType::ProfilesPurged, json!({ "purged": purged }))?;
        println!("Purged {} unmarked profile(s)", purged.len());
        report = report.with_purged(purged);
    }

    let write_report = args
        .write_report
        .unwrap_or(manager.config.analysis.write_report);
    if write_report {
        let path = save_report(&case, &report)?;
        manager.log_event(&case, EventType::ReportWritten, json!({ "path": path }))?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}

struct CliArgs {
    case_file: PathBuf,
    case_name: Option<String>,
    purge: Option<bool>,
    write_report: Option<bool>,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut case_file = None;
        let mut case_name = None;
        let mut purge = None;
        let mut write_report = None;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--case" => {
                    let value = args.next().context("Expected a case name after --case")?;
                    case_name = Some(value);
                }
                "--purge" => purge = Some(true),
                "--no-purge" => purge = Some(false),
                "--no-report" => write_report = Some(false),
                other if other.starts_with("--") => {
                    anyhow::bail!("Unknown flag {other}");
                }
                other => {
                    if case_file.is_some() {
                        anyhow::bail!("Unexpected extra argument {other}");
                    }
                    case_file = Some(PathBuf::from(other));
                }
            }
        }
        let case_file = case_file.context(
            "Usage: cargo run --bin analyze -- <case-file> [--case NAME] [--purge] [--no-report]",
        )?;
        Ok(Self {
            case_file,
            case_name,
            purge,
            write_report,
        })
    }
}
