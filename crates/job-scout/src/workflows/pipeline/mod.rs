//! Screening pipeline tying the criteria engine to the tracker and the
//! outreach drafter.
//!
//! Screening decisions are final once made: collaborator failures are
//! reported alongside the decision and never change it.

pub mod domain;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    BatchImportOutcome, CollaboratorFailure, DraftResult, FailureKind, ImportBatchRequest,
    RejectionView, SubmissionOutcome, SubmitListingRequest, TrackingResult,
};
pub use router::job_search_router;
pub use service::{JobSearchService, PipelineError};
