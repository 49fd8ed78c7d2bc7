use async_trait::async_trait;
use job_scout::config::{AppConfig, OutreachConfig, TrackerConfig};
use job_scout::workflows::outreach::{AnthropicDraftWriter, DraftError, DraftWriter, OutreachPrompt};
use job_scout::workflows::pipeline::JobSearchService;
use job_scout::workflows::tracker::sheets::HttpsConnector;
use job_scout::workflows::tracker::{
    GoogleSheetsTracker, TrackedApplication, TrackerError, TrackerRow, TrackerSheet,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

pub(crate) type PipelineService = JobSearchService<TrackerBackend, DraftBackend>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local tracker used when no spreadsheet is configured.
#[derive(Default, Clone)]
pub(crate) struct InMemoryTracker {
    header: Arc<Mutex<Option<Vec<String>>>>,
    rows: Arc<Mutex<Vec<TrackerRow>>>,
}

#[async_trait]
impl TrackerSheet for InMemoryTracker {
    async fn ensure_header(&self, headers: &[&str]) -> Result<(), TrackerError> {
        let mut guard = self.header.lock().expect("tracker mutex poisoned");
        if guard.is_none() {
            *guard = Some(headers.iter().map(|header| header.to_string()).collect());
        }
        Ok(())
    }

    async fn append_row(&self, row: &TrackerRow) -> Result<(), TrackerError> {
        let mut guard = self.rows.lock().expect("tracker mutex poisoned");
        guard.push(row.clone());
        Ok(())
    }

    async fn rows(&self) -> Result<Vec<TrackedApplication>, TrackerError> {
        let guard = self.rows.lock().expect("tracker mutex poisoned");
        Ok(guard.iter().map(TrackedApplication::from).collect())
    }
}

/// What to do when no spreadsheet is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TrackerFallback {
    /// Keep rows in process memory; only the HTTP service does this.
    InMemory,
    /// Fail up front so CLI tracking never pretends to succeed.
    Refuse,
}

pub(crate) enum TrackerBackend {
    Sheets(GoogleSheetsTracker<HttpsConnector>),
    Memory(InMemoryTracker),
    /// Sheet is configured but could not be reached; every call reports why.
    Unavailable(TrackerError),
}

impl TrackerBackend {
    pub(crate) async fn from_config(
        config: &TrackerConfig,
        fallback: TrackerFallback,
    ) -> Result<Self, TrackerError> {
        if !config.is_configured() {
            return match fallback {
                TrackerFallback::InMemory => {
                    info!("GOOGLE_SHEET_ID/GOOGLE_CREDENTIALS not set; tracking in memory");
                    Ok(Self::Memory(InMemoryTracker::default()))
                }
                TrackerFallback::Refuse => Err(TrackerError::NotConfigured(
                    "GOOGLE_SHEET_ID and GOOGLE_CREDENTIALS must be set to track listings",
                )),
            };
        }

        match GoogleSheetsTracker::connect(config).await {
            Ok(tracker) => {
                info!(worksheet = %config.worksheet, "tracking in Google Sheets");
                Ok(Self::Sheets(tracker))
            }
            Err(err) => {
                warn!(error = %err, "could not connect to Google Sheets; tracking unavailable");
                Ok(Self::Unavailable(err))
            }
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Sheets(_) => "google-sheets",
            Self::Memory(_) => "in-memory",
            Self::Unavailable(_) => "unavailable",
        }
    }
}

#[async_trait]
impl TrackerSheet for TrackerBackend {
    async fn ensure_header(&self, headers: &[&str]) -> Result<(), TrackerError> {
        match self {
            Self::Sheets(tracker) => tracker.ensure_header(headers).await,
            Self::Memory(tracker) => tracker.ensure_header(headers).await,
            Self::Unavailable(err) => Err(err.clone()),
        }
    }

    async fn append_row(&self, row: &TrackerRow) -> Result<(), TrackerError> {
        match self {
            Self::Sheets(tracker) => tracker.append_row(row).await,
            Self::Memory(tracker) => tracker.append_row(row).await,
            Self::Unavailable(err) => Err(err.clone()),
        }
    }

    async fn rows(&self) -> Result<Vec<TrackedApplication>, TrackerError> {
        match self {
            Self::Sheets(tracker) => tracker.rows().await,
            Self::Memory(tracker) => tracker.rows().await,
            Self::Unavailable(err) => Err(err.clone()),
        }
    }
}

pub(crate) enum DraftBackend {
    Anthropic(AnthropicDraftWriter),
    Disabled,
}

impl DraftBackend {
    pub(crate) fn from_config(config: &OutreachConfig) -> Self {
        match AnthropicDraftWriter::new(config) {
            Ok(writer) => {
                info!(model = %writer.model(), "outreach drafting enabled");
                Self::Anthropic(writer)
            }
            Err(DraftError::NotConfigured) => {
                info!("ANTHROPIC_API_KEY not set; outreach drafting disabled");
                Self::Disabled
            }
            Err(err) => {
                warn!(error = %err, "outreach drafting disabled");
                Self::Disabled
            }
        }
    }
}

#[async_trait]
impl DraftWriter for DraftBackend {
    async fn draft(&self, prompt: &OutreachPrompt) -> Result<String, DraftError> {
        match self {
            Self::Anthropic(writer) => writer.draft(prompt).await,
            Self::Disabled => Err(DraftError::NotConfigured),
        }
    }
}

pub(crate) async fn build_service(
    config: &AppConfig,
    fallback: TrackerFallback,
) -> Result<PipelineService, TrackerError> {
    let tracker = TrackerBackend::from_config(&config.tracker, fallback).await?;
    let drafts = DraftBackend::from_config(&config.outreach);
    Ok(JobSearchService::new(Arc::new(tracker), Arc::new(drafts)))
}

/// Service for commands that only draft; the tracker is never touched.
pub(crate) fn drafting_service(config: &AppConfig) -> PipelineService {
    let tracker = TrackerBackend::Memory(InMemoryTracker::default());
    let drafts = DraftBackend::from_config(&config.outreach);
    JobSearchService::new(Arc::new(tracker), Arc::new(drafts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use job_scout::workflows::pipeline::{
        FailureKind, ImportBatchRequest, SubmitListingRequest, TrackingResult,
    };
    use job_scout::workflows::screening::JobListing;
    use std::path::PathBuf;

    fn partial_config() -> TrackerConfig {
        TrackerConfig {
            spreadsheet_id: Some("sheet-123".to_string()),
            credentials_path: None,
            worksheet: "Job Applications".to_string(),
        }
    }

    fn matching_listing() -> JobListing {
        JobListing {
            title: "VP of Sales".to_string(),
            company_name: "Acme".to_string(),
            salary_min: 200_000,
            location: "Remote".to_string(),
            company_stage: "Series B".to_string(),
            ..JobListing::default()
        }
    }

    #[tokio::test]
    async fn unconfigured_tracker_falls_back_to_memory_for_the_server() {
        let backend = TrackerBackend::from_config(&partial_config(), TrackerFallback::InMemory)
            .await
            .expect("memory fallback");
        assert_eq!(backend.label(), "in-memory");
    }

    #[tokio::test]
    async fn unconfigured_tracker_is_refused_for_cli_tracking() {
        let result = TrackerBackend::from_config(&partial_config(), TrackerFallback::Refuse).await;
        assert!(matches!(result, Err(TrackerError::NotConfigured(_))));
    }

    #[tokio::test]
    async fn unreadable_credentials_report_tracker_failure() {
        let config = TrackerConfig {
            credentials_path: Some(PathBuf::from("./missing-service-account.json")),
            ..partial_config()
        };
        let backend = TrackerBackend::from_config(&config, TrackerFallback::InMemory)
            .await
            .expect("configured sheet yields a backend");
        assert_eq!(backend.label(), "unavailable");

        let service = JobSearchService::new(Arc::new(backend), Arc::new(DraftBackend::Disabled));
        let outcome = service
            .submit(SubmitListingRequest {
                listing: matching_listing(),
                draft_email: false,
            })
            .await;
        assert!(outcome.decision.is_match);
        assert!(matches!(
            outcome.tracked,
            TrackingResult::Failed {
                kind: FailureKind::Tracker,
                ..
            }
        ));

        let imported = service
            .import(ImportBatchRequest {
                payload: r#"[{"title": "VP of Sales", "company_name": "Acme", "salary_min": "$200,000", "location": "Remote", "company_stage": "Series B"}]"#
                    .to_string(),
                draft_email: false,
            })
            .await
            .expect("payload parses");
        assert_eq!(imported.matched_count, 1);
        assert_eq!(imported.tracked_count, 0);
        assert_eq!(imported.failures.len(), 1);
        assert_eq!(imported.failures[0].kind, FailureKind::Tracker);
        assert!(service.tracker_summary().await.is_err());
    }

    #[tokio::test]
    async fn disabled_drafts_report_not_configured() {
        let backend = DraftBackend::from_config(&OutreachConfig {
            api_key: None,
            model: "claude-test".to_string(),
        });
        let prompt = OutreachPrompt::for_listing(&JobListing::default(), &Default::default());
        assert!(matches!(
            backend.draft(&prompt).await,
            Err(DraftError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn in_memory_tracker_reads_back_rows() {
        let tracker = InMemoryTracker::default();
        let listing = JobListing {
            company_name: "Acme".to_string(),
            location: "Remote".to_string(),
            salary_min: 180_000,
            ..JobListing::default()
        };
        let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 6).expect("valid date");
        tracker
            .append_row(&TrackerRow::from_listing(&listing.dated(date), None))
            .await
            .expect("append");

        let rows = tracker.rows().await.expect("rows");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].salary, "$180,000");
        assert_eq!(rows[0].date_added, "2025-01-06");
    }
}
