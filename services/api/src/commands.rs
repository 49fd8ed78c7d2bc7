use crate::infra::{build_service, drafting_service, PipelineService, TrackerFallback};
use clap::Args;
use job_scout::config::AppConfig;
use job_scout::error::AppError;
use job_scout::workflows::intake::{normalize, BatchImporter, FieldMap, FieldValue};
use job_scout::workflows::pipeline::{
    BatchImportOutcome, DraftResult, ImportBatchRequest, PipelineError, SubmissionOutcome,
    SubmitListingRequest, TrackingResult,
};
use job_scout::workflows::screening::{
    self, BatchScreening, CriteriaEngine, JobListing, MatchDecision,
};
use job_scout::workflows::tracker::{format_salary, TrackerSummary};
use std::io::Read;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct ListingArgs {
    /// Job title, e.g. "VP of Sales"
    #[arg(long)]
    pub(crate) title: String,
    #[arg(long, default_value = "")]
    pub(crate) company: String,
    /// Minimum base salary; "$185,000" and "185000" are both accepted
    #[arg(long, default_value = "0")]
    pub(crate) salary_min: String,
    /// Location text; empty is treated as remote
    #[arg(long, default_value = "")]
    pub(crate) location: String,
    /// Company stage, e.g. "Series B" or "Growth"
    #[arg(long, default_value = "")]
    pub(crate) stage: String,
    #[arg(long, default_value = "")]
    pub(crate) description: String,
    #[arg(long, default_value = "")]
    pub(crate) url: String,
}

impl ListingArgs {
    pub(crate) fn into_listing(self) -> JobListing {
        let fields: FieldMap = [
            ("title", self.title),
            ("company_name", self.company),
            ("salary_min", self.salary_min),
            ("location", self.location),
            ("company_stage", self.stage),
            ("company_description", self.description),
            ("job_url", self.url),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), FieldValue::Text(value.trim().to_string())))
        .collect();
        normalize(&fields)
    }
}

#[derive(Args, Debug)]
pub(crate) struct ScreenArgs {
    #[command(flatten)]
    pub(crate) listing: ListingArgs,
    /// Add the listing to the tracker when it matches
    #[arg(long)]
    pub(crate) track: bool,
    /// Draft an outreach email for a matching listing (implies --track)
    #[arg(long)]
    pub(crate) draft_email: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// JSON or CSV file with one listing per record; reads stdin when omitted
    pub(crate) path: Option<PathBuf>,
    /// Add every matching listing to the tracker
    #[arg(long)]
    pub(crate) track: bool,
    /// Draft outreach for each match before tracking it (implies --track)
    #[arg(long)]
    pub(crate) draft_email: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DraftArgs {
    #[command(flatten)]
    pub(crate) listing: ListingArgs,
}

/// Sheet-backed service for commands that write to or read from the tracker.
async fn tracking_service(config: &AppConfig) -> Result<PipelineService, AppError> {
    let service = build_service(config, TrackerFallback::Refuse)
        .await
        .map_err(PipelineError::from)?;
    Ok(service)
}

pub(crate) async fn run_screen(config: &AppConfig, args: ScreenArgs) -> Result<(), AppError> {
    let ScreenArgs {
        listing,
        track,
        draft_email,
    } = args;
    let listing = listing.into_listing();

    if !(track || draft_email) {
        render_decision(&listing, &screening::evaluate(&listing));
        return Ok(());
    }

    let service = tracking_service(config).await?;
    let outcome = service
        .submit(SubmitListingRequest {
            listing: listing.clone(),
            draft_email,
        })
        .await;
    render_submission(&listing, &outcome);
    Ok(())
}

pub(crate) async fn run_import(config: &AppConfig, args: ImportArgs) -> Result<(), AppError> {
    let ImportArgs {
        path,
        track,
        draft_email,
    } = args;

    let payload = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };

    if !(track || draft_email) {
        let listings = BatchImporter::from_text(&payload).map_err(PipelineError::from)?;
        render_screening(&screening::filter_batch(listings));
        return Ok(());
    }

    let service = tracking_service(config).await?;
    let outcome = service
        .import(ImportBatchRequest {
            payload,
            draft_email,
        })
        .await?;
    render_import(&outcome);
    Ok(())
}

pub(crate) async fn run_tracker_summary(config: &AppConfig) -> Result<(), AppError> {
    let service = tracking_service(config).await?;
    let summary = service.tracker_summary().await?;
    render_summary(&summary);
    Ok(())
}

pub(crate) async fn run_draft(config: &AppConfig, args: DraftArgs) -> Result<(), AppError> {
    let listing = args.listing.into_listing();
    let service = drafting_service(config);
    match service.draft(&listing).await {
        DraftResult::Drafted { body } => println!("{body}"),
        DraftResult::Failed { message, .. } => println!("Error generating email: {message}"),
    }
    Ok(())
}

fn render_decision(listing: &JobListing, decision: &MatchDecision) {
    let verdict = if decision.is_match { "MATCH" } else { "NO MATCH" };
    println!("{verdict}: {}", listing.label());
    println!("- {}", decision.reason);
    let tier = decision
        .tier
        .unwrap_or_else(|| CriteriaEngine::standard().location_tier(&listing.location));
    println!("- Location tier: {}", tier.label());
}

fn render_submission(listing: &JobListing, outcome: &SubmissionOutcome) {
    render_decision(listing, &outcome.decision);

    if let Some(draft) = &outcome.draft {
        match draft {
            DraftResult::Drafted { body } => println!("\nDraft email:\n{body}\n"),
            DraftResult::Failed { message, .. } => {
                println!("- Email draft unavailable: {message}")
            }
        }
    }

    match &outcome.tracked {
        TrackingResult::Tracked { date_added } => println!("- Added to tracker on {date_added}"),
        TrackingResult::Failed { message, .. } => println!("- Tracker error: {message}"),
        TrackingResult::NotAttempted => {}
    }
}

fn render_screening(screening: &BatchScreening) {
    println!(
        "Screened {} listings: {} matched, {} rejected",
        screening.total(),
        screening.matched_count,
        screening.rejected_count
    );
    if !screening.matched.is_empty() {
        println!("\nMatches");
        for entry in &screening.matched {
            println!(
                "- {} | {} | {}",
                entry.listing.label(),
                format_salary(entry.listing.salary_min),
                entry.listing.location
            );
        }
    }
    if !screening.rejected.is_empty() {
        println!("\nRejected");
        for entry in &screening.rejected {
            println!("- {}: {}", entry.listing.label(), entry.decision.reason);
        }
    }
}

fn render_import(outcome: &BatchImportOutcome) {
    println!(
        "Imported batch: {} matched, {} rejected, {} added to tracker",
        outcome.matched_count, outcome.rejected_count, outcome.tracked_count
    );
    if !outcome.rejections.is_empty() {
        println!("\nRejected");
        for rejection in &outcome.rejections {
            println!("- {}: {}", rejection.listing, rejection.reason);
        }
    }
    if !outcome.failures.is_empty() {
        println!("\nFailures");
        for failure in &outcome.failures {
            println!(
                "- {} ({:?}): {}",
                failure.listing, failure.kind, failure.message
            );
        }
    }
}

fn render_summary(summary: &TrackerSummary) {
    println!("Tracker summary");
    println!("- Total opportunities: {}", summary.total);
    println!("- Applied: {}", summary.applied);
    match summary.average_salary {
        Some(average) => println!("- Average salary: {}", format_salary(average)),
        None => println!("- Average salary: n/a"),
    }
    println!("- Remote roles: {}", summary.remote);
}

#[cfg(test)]
mod tests {
    use super::*;
    use job_scout::config::{
        AppEnvironment, OutreachConfig, ServerConfig, TelemetryConfig, TrackerConfig,
    };
    use job_scout::workflows::tracker::TrackerError;

    const BATCH: &str = "title,company_name,salary_min,location,company_stage\n\
        VP of Sales,Acme,\"$200,000\",Remote,Series B\n\
        Account Executive,Globex,90000,Chicago,Seed\n";

    fn sheetless_config() -> AppConfig {
        AppConfig {
            environment: AppEnvironment::Test,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            telemetry: TelemetryConfig {
                log_level: "info".to_string(),
            },
            tracker: TrackerConfig {
                spreadsheet_id: None,
                credentials_path: None,
                worksheet: "Job Applications".to_string(),
            },
            outreach: OutreachConfig {
                api_key: None,
                model: "claude-test".to_string(),
            },
        }
    }

    fn screen_args(track: bool, draft_email: bool) -> ScreenArgs {
        ScreenArgs {
            listing: ListingArgs {
                title: "VP of Sales".to_string(),
                company: "Acme".to_string(),
                salary_min: "$200,000".to_string(),
                location: "Remote".to_string(),
                stage: "Series B".to_string(),
                ..ListingArgs::default()
            },
            track,
            draft_email,
        }
    }

    fn batch_file(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("job-scout-{}-{name}.csv", std::process::id()));
        std::fs::write(&path, BATCH).expect("write batch fixture");
        path
    }

    fn refused(result: Result<(), AppError>) -> bool {
        matches!(
            result,
            Err(AppError::Pipeline(PipelineError::Tracker(
                TrackerError::NotConfigured(_)
            )))
        )
    }

    #[tokio::test]
    async fn screening_without_tracking_needs_no_sheet() {
        let config = sheetless_config();
        run_screen(&config, screen_args(false, false))
            .await
            .expect("local screening");
    }

    #[tokio::test]
    async fn tracking_without_a_sheet_is_refused() {
        let config = sheetless_config();
        assert!(refused(run_screen(&config, screen_args(true, false)).await));
        assert!(refused(run_screen(&config, screen_args(false, true)).await));
        assert!(refused(run_tracker_summary(&config).await));
    }

    #[tokio::test]
    async fn import_screens_locally_unless_tracking() {
        let config = sheetless_config();
        let path = batch_file("screen");
        run_import(
            &config,
            ImportArgs {
                path: Some(path.clone()),
                track: false,
                draft_email: false,
            },
        )
        .await
        .expect("local batch screening");

        let tracked = run_import(
            &config,
            ImportArgs {
                path: Some(path.clone()),
                track: true,
                draft_email: false,
            },
        )
        .await;
        let _ = std::fs::remove_file(&path);
        assert!(refused(tracked));
    }

    #[tokio::test]
    async fn draft_command_runs_without_a_sheet() {
        let config = sheetless_config();
        let args = DraftArgs {
            listing: screen_args(false, false).listing,
        };
        run_draft(&config, args).await.expect("draft command reports inline");
    }

    #[test]
    fn listing_args_normalize_salary_text() {
        let listing = ListingArgs {
            title: "VP of Sales".to_string(),
            company: " Acme ".to_string(),
            salary_min: "$185,000".to_string(),
            location: "Remote".to_string(),
            ..ListingArgs::default()
        }
        .into_listing();

        assert_eq!(listing.company_name, "Acme");
        assert_eq!(listing.salary_min, 185_000);
        assert!(listing.company_stage.is_empty());
    }

    #[test]
    fn unparseable_salary_becomes_zero() {
        let listing = ListingArgs {
            title: "VP Sales".to_string(),
            salary_min: "competitive".to_string(),
            ..ListingArgs::default()
        }
        .into_listing();
        assert_eq!(listing.salary_min, 0);
    }
}
