use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::workflows::screening::{JobListing, MatchDecision, ScreenedListing};

/// Single listing submitted for screening and, when it matches, tracking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitListingRequest {
    pub listing: JobListing,
    #[serde(default)]
    pub draft_email: bool,
}

/// Bulk payload as pasted by the user: JSON or CSV text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportBatchRequest {
    pub payload: String,
    #[serde(default)]
    pub draft_email: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Tracker,
    Drafting,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrackingResult {
    NotAttempted,
    Tracked { date_added: NaiveDate },
    Failed { kind: FailureKind, message: String },
}

impl TrackingResult {
    pub fn is_tracked(&self) -> bool {
        matches!(self, Self::Tracked { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DraftResult {
    Drafted { body: String },
    Failed { kind: FailureKind, message: String },
}

impl DraftResult {
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Drafted { body } => Some(body),
            Self::Failed { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionOutcome {
    pub decision: MatchDecision,
    pub tracked: TrackingResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<DraftResult>,
}

/// Collaborator failure attributed to one listing of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollaboratorFailure {
    pub listing: String,
    pub kind: FailureKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectionView {
    pub listing: String,
    pub reason: String,
}

impl From<&ScreenedListing> for RejectionView {
    fn from(entry: &ScreenedListing) -> Self {
        Self {
            listing: entry.listing.label(),
            reason: entry.decision.reason.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchImportOutcome {
    pub matched_count: usize,
    pub rejected_count: usize,
    pub tracked_count: usize,
    pub rejections: Vec<RejectionView>,
    pub failures: Vec<CollaboratorFailure>,
}
