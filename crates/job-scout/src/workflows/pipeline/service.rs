use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use super::domain::{
    BatchImportOutcome, CollaboratorFailure, DraftResult, FailureKind, ImportBatchRequest,
    RejectionView, SubmissionOutcome, SubmitListingRequest, TrackingResult,
};
use crate::workflows::intake::{BatchImporter, IntakeError};
use crate::workflows::outreach::{CandidateProfile, DraftWriter, OutreachPrompt};
use crate::workflows::screening::{
    BatchScreening, CriteriaEngine, JobListing, MatchDecision, SearchCriteria,
};
use crate::workflows::tracker::{
    TrackerError, TrackerRow, TrackerSheet, TrackerSummary, TRACKER_HEADERS,
};

/// Service composing the criteria engine, tracker, and outreach drafter.
pub struct JobSearchService<T, D> {
    tracker: Arc<T>,
    drafts: Arc<D>,
    engine: CriteriaEngine,
    profile: CandidateProfile,
}

impl<T, D> JobSearchService<T, D>
where
    T: TrackerSheet + 'static,
    D: DraftWriter + 'static,
{
    pub fn new(tracker: Arc<T>, drafts: Arc<D>) -> Self {
        Self {
            tracker,
            drafts,
            engine: CriteriaEngine::standard(),
            profile: CandidateProfile::standard(),
        }
    }

    pub fn with_criteria(mut self, criteria: SearchCriteria) -> Self {
        self.engine = CriteriaEngine::new(criteria);
        self
    }

    pub fn engine(&self) -> &CriteriaEngine {
        &self.engine
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    pub fn screen(&self, listing: &JobListing) -> MatchDecision {
        self.engine.evaluate(listing)
    }

    /// Parse a pasted batch and partition it without touching collaborators.
    pub fn screen_batch(&self, payload: &str) -> Result<BatchScreening, PipelineError> {
        let listings = BatchImporter::from_text(payload)?;
        Ok(self.engine.filter_batch(listings))
    }

    /// Screen one listing; a match is optionally drafted, then tracked.
    pub async fn submit(&self, request: SubmitListingRequest) -> SubmissionOutcome {
        let SubmitListingRequest {
            listing,
            draft_email,
        } = request;
        let decision = self.screen(&listing);

        if !decision.is_match {
            return SubmissionOutcome {
                decision,
                tracked: TrackingResult::NotAttempted,
                draft: None,
            };
        }

        let draft = if draft_email {
            Some(self.draft(&listing).await)
        } else {
            None
        };
        let notes = draft.as_ref().and_then(DraftResult::body);

        let tracked = match self.tracker.ensure_header(&TRACKER_HEADERS).await {
            Ok(()) => self.append(&listing, notes).await,
            Err(err) => tracker_failure(&listing, &err),
        };

        SubmissionOutcome {
            decision,
            tracked,
            draft,
        }
    }

    /// Screen a pasted batch and track every match in input order.
    pub async fn import(
        &self,
        request: ImportBatchRequest,
    ) -> Result<BatchImportOutcome, PipelineError> {
        let screening = self.screen_batch(&request.payload)?;

        let mut outcome = BatchImportOutcome {
            matched_count: screening.matched_count,
            rejected_count: screening.rejected_count,
            rejections: screening.rejected.iter().map(RejectionView::from).collect(),
            ..BatchImportOutcome::default()
        };

        if screening.matched.is_empty() {
            info!(rejected = outcome.rejected_count, "batch screened with no matches");
            return Ok(outcome);
        }

        let header = self.tracker.ensure_header(&TRACKER_HEADERS).await;
        if let Err(err) = &header {
            warn!(error = %err, "tracker header unavailable; matches left untracked");
        }

        for entry in &screening.matched {
            let label = entry.listing.label();

            if let Err(err) = &header {
                outcome.failures.push(CollaboratorFailure {
                    listing: label,
                    kind: FailureKind::Tracker,
                    message: err.to_string(),
                });
                continue;
            }

            let draft = if request.draft_email {
                Some(self.draft(&entry.listing).await)
            } else {
                None
            };
            if let Some(DraftResult::Failed { kind, message }) = &draft {
                outcome.failures.push(CollaboratorFailure {
                    listing: label.clone(),
                    kind: *kind,
                    message: message.clone(),
                });
            }

            let notes = draft.as_ref().and_then(DraftResult::body);
            match self.append(&entry.listing, notes).await {
                TrackingResult::Tracked { .. } => outcome.tracked_count += 1,
                TrackingResult::Failed { kind, message } => {
                    outcome.failures.push(CollaboratorFailure {
                        listing: label,
                        kind,
                        message,
                    });
                }
                TrackingResult::NotAttempted => {}
            }
        }

        info!(
            matched = outcome.matched_count,
            rejected = outcome.rejected_count,
            tracked = outcome.tracked_count,
            failures = outcome.failures.len(),
            "batch import finished"
        );
        Ok(outcome)
    }

    pub async fn tracker_summary(&self) -> Result<TrackerSummary, PipelineError> {
        let rows = self.tracker.rows().await?;
        Ok(TrackerSummary::from_rows(&rows))
    }

    /// Draft outreach for any listing, matched or not.
    pub async fn draft(&self, listing: &JobListing) -> DraftResult {
        let prompt = OutreachPrompt::for_listing(listing, &self.profile);
        match self.drafts.draft(&prompt).await {
            Ok(body) => DraftResult::Drafted { body },
            Err(err) => {
                warn!(listing = %listing.label(), error = %err, "outreach draft failed");
                DraftResult::Failed {
                    kind: FailureKind::Drafting,
                    message: err.to_string(),
                }
            }
        }
    }

    async fn append(&self, listing: &JobListing, notes: Option<&str>) -> TrackingResult {
        let date_added = today();
        let row = TrackerRow::from_listing(&listing.dated(date_added), notes);

        match self.tracker.append_row(&row).await {
            Ok(()) => {
                info!(listing = %listing.label(), %date_added, "listing added to tracker");
                TrackingResult::Tracked { date_added }
            }
            Err(err) => tracker_failure(listing, &err),
        }
    }
}

fn tracker_failure(listing: &JobListing, err: &TrackerError) -> TrackingResult {
    warn!(listing = %listing.label(), error = %err, "failed to add listing to tracker");
    TrackingResult::Failed {
        kind: FailureKind::Tracker,
        message: err.to_string(),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Error raised by the pipeline for whole-request failures.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Tracker(#[from] TrackerError),
}
