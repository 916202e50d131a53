//! Campaign API Handlers

use axum::{Json, extract::State};
use leadscope_core::domain::campaign::Campaign;

use crate::api::AppState;

/// GET /api/campaigns
/// List all campaigns
pub async fn list_campaigns(State(state): State<AppState>) -> Json<Vec<Campaign>> {
    tracing::debug!("Listing all campaigns");
    Json(state.store.campaigns())
}
