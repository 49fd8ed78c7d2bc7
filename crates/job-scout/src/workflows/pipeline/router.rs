use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use super::domain::{DraftResult, ImportBatchRequest, SubmitListingRequest, TrackingResult};
use super::service::JobSearchService;
use crate::error::AppError;
use crate::workflows::outreach::DraftWriter;
use crate::workflows::screening::JobListing;
use crate::workflows::tracker::TrackerSheet;

/// Router exposing screening, tracking, and drafting endpoints.
pub fn job_search_router<T, D>(service: Arc<JobSearchService<T, D>>) -> Router
where
    T: TrackerSheet + 'static,
    D: DraftWriter + 'static,
{
    Router::new()
        .route("/api/v1/listings/screen", post(screen_handler::<T, D>))
        .route("/api/v1/listings", post(submit_handler::<T, D>))
        .route("/api/v1/listings/import", post(import_handler::<T, D>))
        .route("/api/v1/tracker/summary", get(summary_handler::<T, D>))
        .route("/api/v1/outreach/draft", post(draft_handler::<T, D>))
        .with_state(service)
}

pub(crate) async fn screen_handler<T, D>(
    State(service): State<Arc<JobSearchService<T, D>>>,
    Json(listing): Json<JobListing>,
) -> Response
where
    T: TrackerSheet + 'static,
    D: DraftWriter + 'static,
{
    (StatusCode::OK, Json(service.screen(&listing))).into_response()
}

pub(crate) async fn submit_handler<T, D>(
    State(service): State<Arc<JobSearchService<T, D>>>,
    Json(request): Json<SubmitListingRequest>,
) -> Response
where
    T: TrackerSheet + 'static,
    D: DraftWriter + 'static,
{
    let outcome = service.submit(request).await;
    let status = match outcome.tracked {
        TrackingResult::Tracked { .. } => StatusCode::CREATED,
        TrackingResult::Failed { .. } => StatusCode::BAD_GATEWAY,
        TrackingResult::NotAttempted => StatusCode::OK,
    };
    (status, Json(outcome)).into_response()
}

pub(crate) async fn import_handler<T, D>(
    State(service): State<Arc<JobSearchService<T, D>>>,
    Json(request): Json<ImportBatchRequest>,
) -> Response
where
    T: TrackerSheet + 'static,
    D: DraftWriter + 'static,
{
    match service.import(request).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn summary_handler<T, D>(
    State(service): State<Arc<JobSearchService<T, D>>>,
) -> Response
where
    T: TrackerSheet + 'static,
    D: DraftWriter + 'static,
{
    match service.tracker_summary().await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn draft_handler<T, D>(
    State(service): State<Arc<JobSearchService<T, D>>>,
    Json(listing): Json<JobListing>,
) -> Response
where
    T: TrackerSheet + 'static,
    D: DraftWriter + 'static,
{
    let draft = service.draft(&listing).await;
    let status = match draft {
        DraftResult::Drafted { .. } => StatusCode::OK,
        DraftResult::Failed { .. } => StatusCode::BAD_GATEWAY,
    };
    (status, Json(draft)).into_response()
}
