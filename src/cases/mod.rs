mod config;
mod events;

pub use config::{
    config_file_path, ensure_workspace_structure, load_or_default, save, workspace_root,
    AnalysisSettings, AppConfig, LoaderSettings, WorkspacePaths,
};
pub use events::{read_events, CaseEvent, EventType};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use uuid::Uuid;

/// A forensic case: a workspace directory holding its reports and audit log.
/// The profile store itself is never persisted; only what a run produces is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub case_dir: PathBuf,
    pub created_at: DateTime<Utc>,
    pub last_active_at: Option<DateTime<Utc>>,
}

impl Case {
    pub fn events_path(&self) -> PathBuf {
        self.case_dir.join("events.jsonl")
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.case_dir.join("reports")
    }
}

/// Manages cases, configuration, and the audit log.
pub struct CaseManager {
    pub config: AppConfig,
    pub paths: WorkspacePaths,
    pub config_path: PathBuf,
}

impl CaseManager {
    pub fn new() -> Result<Self> {
        let paths = ensure_workspace_structure()?;
        let mut config = config::load_or_default()?;
        let config_path = config::config_file_path()?;

        // If no last active case, try to pick the first existing case.
        if config.last_active_case_id.is_none() {
            if let Some(first_case) = Self::discover_cases(&paths)?.first() {
                config.last_active_case_id = Some(first_case.id.to_string());
                config::save(&config)?;
            }
        }

        Ok(Self {
            config,
            paths,
            config_path,
        })
    }

    fn discover_cases(paths: &WorkspacePaths) -> Result<Vec<Case>> {
        let mut cases = Vec::new();
        if paths.cases_dir.exists() {
            for entry in fs::read_dir(&paths.cases_dir)? {
                let entry = entry?;
                if entry.file_type()?.is_dir() {
                    let metadata = entry.path().join("case.json");
                    if metadata.exists() {
                        let case: Case = serde_json::from_slice(&fs::read(&metadata)?)?;
                        cases.push(case);
                    }
                }
            }
        }
        cases.sort_by_key(|c| c.created_at);
        Ok(cases)
    }

    pub fn list_cases(&self) -> Result<Vec<Case>> {
        Self::discover_cases(&self.paths)
    }

    pub fn get_case(&self, case_id: &Uuid) -> Result<Option<Case>> {
        Ok(self.list_cases()?.into_iter().find(|c| &c.id == case_id))
    }

    pub fn create_case(&mut self, name: &str) -> Result<Case> {
        let slug = slugify(name);
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        let case_dir = self.paths.case_dir(&slug);
        fs::create_dir_all(&case_dir)?;
        let case = Case {
            id,
            name: name.to_string(),
            slug,
            case_dir,
            created_at,
            last_active_at: Some(created_at),
        };
        fs::create_dir_all(case.reports_dir())?;
        self.persist_case(&case)?;
        self.log_event(
            &case,
            EventType::CaseCreated,
            serde_json::json!({ "case_id": case.id, "name": case.name }),
        )?;
        self.set_active_case(&case.id)?;
        Ok(case)
    }

    fn persist_case(&self, case: &Case) -> Result<()> {
        let metadata_path = case.case_dir.join("case.json");
        fs::create_dir_all(&case.case_dir)?;
        fs::write(metadata_path, serde_json::to_vec_pretty(case)?)?;
        Ok(())
    }

    pub fn set_active_case(&mut self, case_id: &Uuid) -> Result<()> {
        self.config.last_active_case_id = Some(case_id.to_string());
        // update last_active_at in metadata
        if let Some(mut case) = self.get_case(case_id)? {
            case.last_active_at = Some(Utc::now());
            self.persist_case(&case)?;
            self.log_event(
                &case,
                EventType::CaseSelected,
                serde_json::json!({ "case_id": case.id, "name": case.name }),
            )?;
        }
        config::save(&self.config)?;
        Ok(())
    }

    pub fn active_case(&self) -> Result<Option<Case>> {
        match &self.config.last_active_case_id {
            Some(id) => {
                let uuid = Uuid::parse_str(id).context("Invalid last_active_case_id in config")?;
                self.get_case(&uuid)
            }
            None => Ok(None),
        }
    }

    /// Appends an audit event to the case's events.jsonl and returns its id.
    pub fn log_event(
        &self,
        case: &Case,
        event_type: EventType,
        details: serde_json::Value,
    ) -> Result<Uuid> {
        let event = CaseEvent {
            event_id: Uuid::new_v4(),
            case_id: case.id,
            event_type,
            timestamp: Utc::now(),
            details,
        };
        let path = case.events_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        file.write_all(serde_json::to_string(&event)?.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(event.event_id)
    }
}

/// Create a filesystem-safe slug from a case name.
fn slugify(name: &str) -> String {
    let mut slug = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect::<String>();
    while slug.contains("--") {
        slug = slug.replace("--", "-");
    }
    slug.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_flattens_punctuation_and_case() {
        assert_eq!(slugify("Opening Night"), "opening-night");
        assert_eq!(slugify("Case #42 -- Cold"), "case-42-cold");
        assert_eq!(slugify("--Trim--"), "trim");
    }
}
