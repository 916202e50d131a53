//! API Module
//!
//! HTTP API layer for the dashboard backend.
//! Each submodule handles endpoints for a specific domain.

pub mod campaign;
pub mod company;
pub mod error;
pub mod health;
pub mod job;
pub mod person;
pub mod snippet;
pub mod sse;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::queue::JobQueue;
use crate::store::Database;

/// Shared state injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Database>,
    pub queue: Arc<JobQueue>,
    pub heartbeat_interval: Duration,
}

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/api/health", get(health::health_check))
        // Entity listings
        .route("/api/campaigns", get(campaign::list_campaigns))
        .route("/api/companies", get(company::list_companies))
        .route("/api/people", get(person::list_people))
        .route("/api/people/{person_id}", get(person::get_person))
        // Research audit trail
        .route(
            "/api/snippets/company/{company_id}",
            get(snippet::company_snippets),
        )
        .route(
            "/api/snippets/person/{person_id}",
            get(snippet::person_snippets),
        )
        // Enrichment jobs
        .route("/api/enrich/{person_id}", post(job::enrich_person))
        .route("/api/jobs", get(job::list_jobs))
        .route("/api/jobs/{job_id}", get(job::get_job))
        // Live progress feed
        .route("/api/progress-stream", get(sse::progress_stream))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
