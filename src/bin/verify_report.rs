use anyhow::{Context, Result};
use forensicbase::ingestion::hash_case_file;
use forensicbase::reports::read_report;
use std::env;
use std::path::PathBuf;

fn main() -> Result<()> {
    let report_arg = env::args()
        .nth(1)
        .context("Usage: cargo run --bin verify_report -- <path-to-report.json>")?;
    let report_path = PathBuf::from(report_arg);
    let report = read_report(&report_path)?;
    if !report.source_file.exists() {
        anyhow::bail!(
            "Source case file {} is missing",
            report.source_file.display()
        );
    }
    let current_digest = hash_case_file(&report.source_file)?;
    if current_digest == report.source_digest {
        println!(
            "Report {} verified: case file digest matches.",
            report_path.display()
        );
        Ok(())
    } else {
        println!("Report verification failed:");
        println!(
            "  - {} expected {}, found {}",
            report.source_file.display(),
            report.source_digest,
            current_digest
        );
        anyhow::bail!(
            "Case file {} changed since the report was generated",
            report.source_file.display()
        )
    }
}
