use std::env;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock};

use forensicbase::cases::CaseManager;
use tempfile::TempDir;

// Tests in this binary share the FORENSICBASE_HOME environment variable, so
// each harness holds a process-wide lock for its lifetime.
static WORKSPACE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

pub struct IntegrationHarness {
    workspace: TempDir,
    _guard: MutexGuard<'static, ()>,
}

impl IntegrationHarness {
    pub fn new() -> Self {
        let guard = WORKSPACE_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let workspace = TempDir::new().expect("failed to create temp workspace");
        env::set_var("FORENSICBASE_HOME", workspace.path());
        Self {
            workspace,
            _guard: guard,
        }
    }

    pub fn workspace_path(&self) -> &Path {
        self.workspace.path()
    }

    pub fn case_manager(&self) -> CaseManager {
        CaseManager::new().expect("failed to initialize CaseManager for tests")
    }

    pub fn write_case_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.workspace.path().join(name);
        std::fs::write(&path, contents).expect("failed to write case file");
        path
    }
}

mod case_workspace;
mod end_to_end;
mod report_verification;
