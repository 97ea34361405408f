//! Analysis reports written per case.
//!
//! A report captures one scan of a case file: the source provenance, the
//! interest findings with their per-motif evidence, and anything purged
//! afterwards. Reports are plain pretty-printed JSON under the case's
//! reports directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::{evaluate_profile, MotifMatch};
use crate::cases::Case;
use crate::store::ProfileStore;

/// Match evidence for one flagged profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileFinding {
    pub name: String,
    pub matched: usize,
    pub required: usize,
    pub motifs: Vec<MotifMatch>,
}

/// Report generated after scanning a case file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseReport {
    pub report_id: Uuid,
    pub case_id: Uuid,
    pub source_file: PathBuf,
    pub source_digest: String,
    pub generated_at: DateTime<Utc>,
    pub total_profiles: usize,
    pub flagged: Vec<ProfileFinding>,
    #[serde(default)]
    pub unmarked: Vec<String>,
    #[serde(default)]
    pub purged: Vec<String>,
}

impl CaseReport {
    pub fn with_purged(mut self, purged: Vec<String>) -> Self {
        self.purged = purged;
        self
    }
}

/// Builds a report from a store that has been through a flagging scan.
/// Call before any purge so the unmarked list reflects the scan outcome.
pub fn build_report(
    case: &Case,
    store: &ProfileStore,
    source_file: &Path,
    source_digest: String,
) -> CaseReport {
    let mut flagged = Vec::new();
    for (name, profile) in store.entries_in_order() {
        if !profile.of_interest {
            continue;
        }
        let outcome = evaluate_profile(
            profile,
            store.first_unknown_sequence(),
            store.second_unknown_sequence(),
        );
        flagged.push(ProfileFinding {
            name: name.to_string(),
            matched: outcome.matched,
            required: outcome.required,
            motifs: outcome.motifs,
        });
    }
    CaseReport {
        report_id: Uuid::new_v4(),
        case_id: case.id,
        source_file: source_file.to_path_buf(),
        source_digest,
        generated_at: Utc::now(),
        total_profiles: store.len(),
        flagged,
        unmarked: store.unmarked_names(),
        purged: Vec::new(),
    }
}

/// Writes the report as pretty JSON under the case's reports directory.
pub fn save_report(case: &Case, report: &CaseReport) -> Result<PathBuf> {
    let dir = case.reports_dir();
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create reports directory {}", dir.display()))?;
    let path = dir.join(format!("{}.json", report.report_id));
    fs::write(&path, serde_json::to_vec_pretty(report)?)
        .with_context(|| format!("Failed to write report {}", path.display()))?;
    Ok(path)
}

pub fn read_report(path: &Path) -> Result<CaseReport> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("Missing report {}", path.display()))?;
    let report = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid report {}", path.display()))?;
    Ok(report)
}
