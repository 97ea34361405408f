pub mod analysis;
pub mod cases;
pub mod ingestion;
pub mod models;
pub mod reports;
pub mod store;

// Re-export commonly used types for convenience.
pub use cases::{AppConfig, Case, CaseManager};
pub use models::{Profile, StrMotif};
pub use store::ProfileStore;
