//! Context Snippet API Handlers
//!
//! Read-only access to the research audit trail recorded per entity.

use axum::{
    Json,
    extract::{Path, State},
};
use leadscope_core::domain::snippet::EntityType;
use leadscope_core::dto::snippet::EntitySnippetsResponse;
use uuid::Uuid;

use crate::api::AppState;

/// GET /api/snippets/company/{company_id}
/// List the context snippets recorded for a company
pub async fn company_snippets(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> Json<EntitySnippetsResponse> {
    tracing::debug!("Listing snippets for company: {}", company_id);
    Json(EntitySnippetsResponse {
        snippets: state.store.snippets_by_entity(EntityType::Company, company_id),
    })
}

/// GET /api/snippets/person/{person_id}
/// List the context snippets recorded for a person
pub async fn person_snippets(
    State(state): State<AppState>,
    Path(person_id): Path<Uuid>,
) -> Json<EntitySnippetsResponse> {
    tracing::debug!("Listing snippets for person: {}", person_id);
    Json(EntitySnippetsResponse {
        snippets: state.store.snippets_by_entity(EntityType::Person, person_id),
    })
}
