//! Append-only opportunity tracker backed by a spreadsheet.

mod row;
pub mod sheets;
mod summary;

pub use row::{format_salary, TrackedApplication, TrackerRow};
pub use sheets::GoogleSheetsTracker;
pub use summary::TrackerSummary;

use async_trait::async_trait;

pub const DEFAULT_WORKSHEET: &str = "Job Applications";
pub const NEW_ROW_STATUS: &str = "📋 To Apply";
pub const TRACKER_HEADERS: [&str; 10] = [
    "Date Added",
    "Company",
    "Position",
    "Location",
    "Salary",
    "Stage",
    "Status",
    "Applied Date",
    "Notes",
    "URL",
];

/// Storage seam for tracked opportunities. Appending is the only mutation.
#[async_trait]
pub trait TrackerSheet: Send + Sync {
    /// Create the worksheet and header row when missing; existing rows are
    /// never touched.
    async fn ensure_header(&self, headers: &[&str]) -> Result<(), TrackerError>;
    async fn append_row(&self, row: &TrackerRow) -> Result<(), TrackerError>;
    async fn rows(&self) -> Result<Vec<TrackedApplication>, TrackerError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum TrackerError {
    #[error("tracker not configured: {0}")]
    NotConfigured(&'static str),
    #[error("tracker credentials rejected: {0}")]
    Credentials(String),
    #[error("tracker operation failed: {0}")]
    Backend(String),
}
