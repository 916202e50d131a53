//! Company API Handlers

use axum::{Json, extract::State};
use leadscope_core::domain::company::Company;

use crate::api::AppState;

/// GET /api/companies
/// List all companies
pub async fn list_companies(State(state): State<AppState>) -> Json<Vec<Company>> {
    tracing::debug!("Listing all companies");
    Json(state.store.companies())
}
