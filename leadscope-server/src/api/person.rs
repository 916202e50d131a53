//! Person API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use leadscope_core::dto::person::{PeopleListResponse, PersonWithCompany};
use uuid::Uuid;

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};

/// GET /api/people
/// List all people joined with their companies
pub async fn list_people(State(state): State<AppState>) -> Json<PeopleListResponse> {
    tracing::debug!("Listing all people");
    Json(PeopleListResponse {
        people: state.store.people_with_companies(),
    })
}

/// GET /api/people/{person_id}
/// Get one person joined with their company
pub async fn get_person(
    State(state): State<AppState>,
    Path(person_id): Path<Uuid>,
) -> ApiResult<Json<PersonWithCompany>> {
    tracing::debug!("Getting person: {}", person_id);

    let person = state
        .store
        .get_person(person_id)
        .ok_or_else(|| ApiError::NotFound(format!("Person {} not found", person_id)))?;
    let company = state
        .store
        .get_company(person.company_id)
        .ok_or_else(|| ApiError::NotFound(format!("Company {} not found", person.company_id)))?;

    Ok(Json(PersonWithCompany { person, company }))
}
