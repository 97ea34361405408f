use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use uuid::Uuid;

use super::Case;

/// Type of case events recorded in the audit log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    CaseCreated,
    CaseSelected,
    CaseFileLoaded,
    ProfilesFlagged,
    ProfilesPurged,
    ReportWritten,
}

/// Audit event stored as JSONL under the case directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseEvent {
    pub event_id: Uuid,
    pub case_id: Uuid,
    pub event_type: EventType,
    pub timestamp: DateTime<Utc>,
    pub details: serde_json::Value,
}

/// Reads every audit event recorded for a case, oldest first.
pub fn read_events(case: &Case) -> Result<Vec<CaseEvent>> {
    let path = case.events_path();
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = fs::read_to_string(&path)?;
    let mut events = Vec::new();
    for line in data.lines().filter(|l| !l.trim().is_empty()) {
        let event: CaseEvent = serde_json::from_str(line)?;
        events.push(event);
    }
    Ok(events)
}
