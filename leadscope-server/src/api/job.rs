//! Job API Handlers
//!
//! HTTP endpoints for enqueuing research jobs and inspecting their state.

use axum::{
    Json,
    extract::{Path, State},
};
use leadscope_core::domain::job::Job;
use leadscope_core::dto::job::EnrichPersonResponse;
use uuid::Uuid;

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};

/// POST /api/enrich/{person_id}
/// Queue a research job for a person
pub async fn enrich_person(
    State(state): State<AppState>,
    Path(person_id): Path<Uuid>,
) -> ApiResult<Json<EnrichPersonResponse>> {
    tracing::info!("Enrichment requested for person: {}", person_id);

    // Reject unknown people up front instead of queueing a doomed job
    if state.store.get_person(person_id).is_none() {
        return Err(ApiError::NotFound(format!("Person {} not found", person_id)));
    }

    let job = state.queue.enqueue(person_id);
    Ok(Json(EnrichPersonResponse {
        job_id: job.id,
        status: job.status,
        message: "Research job queued successfully".to_string(),
    }))
}

/// GET /api/jobs
/// List all jobs, newest first
pub async fn list_jobs(State(state): State<AppState>) -> Json<Vec<Job>> {
    tracing::debug!("Listing all jobs");
    Json(state.queue.list_jobs())
}

/// GET /api/jobs/{job_id}
/// Get one job by ID
pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> ApiResult<Json<Job>> {
    tracing::debug!("Getting job: {}", job_id);

    let job = state
        .queue
        .get_job(job_id)
        .ok_or_else(|| ApiError::NotFound(format!("Job {} not found", job_id)))?;
    Ok(Json(job))
}
