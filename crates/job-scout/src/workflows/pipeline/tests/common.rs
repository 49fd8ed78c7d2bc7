use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::outreach::{DraftError, DraftWriter, OutreachPrompt};
use crate::workflows::pipeline::JobSearchService;
use crate::workflows::screening::JobListing;
use crate::workflows::tracker::{TrackedApplication, TrackerError, TrackerRow, TrackerSheet};

pub(super) fn matching_listing(company: &str) -> JobListing {
    JobListing {
        title: "VP of Sales".to_string(),
        company_name: company.to_string(),
        salary_min: 180_000,
        location: "Remote".to_string(),
        company_stage: "Series B".to_string(),
        company_description: "Revenue intelligence for field teams".to_string(),
        job_url: format!("https://jobs.example.com/{}", company.to_lowercase()),
    }
}

pub(super) fn rejected_listing() -> JobListing {
    JobListing {
        title: "Account Executive".to_string(),
        ..matching_listing("Smallco")
    }
}

/// Tracker fake recording header writes and appended rows.
#[derive(Default, Clone)]
pub(super) struct MemoryTracker {
    header: Arc<Mutex<Option<Vec<String>>>>,
    header_calls: Arc<Mutex<usize>>,
    rows: Arc<Mutex<Vec<TrackerRow>>>,
}

impl MemoryTracker {
    pub(super) fn header(&self) -> Option<Vec<String>> {
        self.header.lock().expect("tracker mutex poisoned").clone()
    }

    pub(super) fn header_calls(&self) -> usize {
        *self.header_calls.lock().expect("tracker mutex poisoned")
    }

    pub(super) fn appended(&self) -> Vec<TrackerRow> {
        self.rows.lock().expect("tracker mutex poisoned").clone()
    }
}

#[async_trait]
impl TrackerSheet for MemoryTracker {
    async fn ensure_header(&self, headers: &[&str]) -> Result<(), TrackerError> {
        *self.header_calls.lock().expect("tracker mutex poisoned") += 1;
        let mut guard = self.header.lock().expect("tracker mutex poisoned");
        if guard.is_none() {
            *guard = Some(headers.iter().map(|header| header.to_string()).collect());
        }
        Ok(())
    }

    async fn append_row(&self, row: &TrackerRow) -> Result<(), TrackerError> {
        self.rows
            .lock()
            .expect("tracker mutex poisoned")
            .push(row.clone());
        Ok(())
    }

    async fn rows(&self) -> Result<Vec<TrackedApplication>, TrackerError> {
        Ok(self
            .rows
            .lock()
            .expect("tracker mutex poisoned")
            .iter()
            .map(TrackedApplication::from)
            .collect())
    }
}

/// Tracker whose backend is unreachable.
pub(super) struct FailingTracker;

#[async_trait]
impl TrackerSheet for FailingTracker {
    async fn ensure_header(&self, _headers: &[&str]) -> Result<(), TrackerError> {
        Err(TrackerError::Backend("sheet unavailable".to_string()))
    }

    async fn append_row(&self, _row: &TrackerRow) -> Result<(), TrackerError> {
        Err(TrackerError::Backend("sheet unavailable".to_string()))
    }

    async fn rows(&self) -> Result<Vec<TrackedApplication>, TrackerError> {
        Err(TrackerError::Backend("sheet unavailable".to_string()))
    }
}

/// Tracker that accepts the header but refuses rows for one company.
pub(super) struct SelectiveTracker {
    pub(super) inner: MemoryTracker,
    pub(super) refuse_company: String,
}

#[async_trait]
impl TrackerSheet for SelectiveTracker {
    async fn ensure_header(&self, headers: &[&str]) -> Result<(), TrackerError> {
        self.inner.ensure_header(headers).await
    }

    async fn append_row(&self, row: &TrackerRow) -> Result<(), TrackerError> {
        if row.company == self.refuse_company {
            return Err(TrackerError::Backend("row rejected".to_string()));
        }
        self.inner.append_row(row).await
    }

    async fn rows(&self) -> Result<Vec<TrackedApplication>, TrackerError> {
        self.inner.rows().await
    }
}

#[derive(Default)]
pub(super) struct StubDrafts;

#[async_trait]
impl DraftWriter for StubDrafts {
    async fn draft(&self, prompt: &OutreachPrompt) -> Result<String, DraftError> {
        Ok(format!("Hi {} team", prompt.company_name()))
    }
}

pub(super) struct FailingDrafts;

#[async_trait]
impl DraftWriter for FailingDrafts {
    async fn draft(&self, _prompt: &OutreachPrompt) -> Result<String, DraftError> {
        Err(DraftError::Api {
            status: 529,
            message: "overloaded".to_string(),
        })
    }
}

pub(super) fn build_service() -> (JobSearchService<MemoryTracker, StubDrafts>, MemoryTracker) {
    let tracker = MemoryTracker::default();
    let service = JobSearchService::new(Arc::new(tracker.clone()), Arc::new(StubDrafts));
    (service, tracker)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&bytes).expect("json body")
}
