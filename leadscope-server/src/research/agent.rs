//! Research agent
//!
//! Drives the iterate-search-extract loop for a single person/company
//! pair, bounded by a fixed iteration ceiling. Each run creates an audit
//! context snippet up front, logs every search iteration, and writes the
//! final payload plus deduplicated source URLs back when the loop ends.
//!
//! Failure semantics: unresolved person/company fails the run; a failing
//! search call only skips that iteration; shape violations in the final
//! payload are logged and never raised.

use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use leadscope_core::domain::research::{ResearchField, ResearchPayload, field_names};
use leadscope_core::domain::snippet::EntityType;

use crate::search::SearchProvider;
use crate::store::Database;

use super::{extract, schema};

/// Hard ceiling on search/extract iterations per run
pub const MAX_ITERATIONS: u32 = 3;

/// How many results per iteration are logged and mined
const TOP_RESULTS: usize = 3;

/// Errors that fail a whole research run
#[derive(Debug)]
pub enum ResearchError {
    PersonNotFound(Uuid),
    CompanyNotFound(Uuid),
}

impl fmt::Display for ResearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResearchError::PersonNotFound(id) => write!(f, "Person {id} not found"),
            ResearchError::CompanyNotFound(id) => write!(f, "Company {id} not found"),
        }
    }
}

impl std::error::Error for ResearchError {}

/// Progress report passed to the caller before each iteration's search
#[derive(Debug, Clone)]
pub struct IterationUpdate {
    pub iteration: u32,
    pub query: String,
    pub found_fields: Vec<String>,
    pub missing_fields: Vec<String>,
}

/// The iterate-search-extract orchestrator
pub struct ResearchAgent {
    store: Arc<Database>,
    search: Arc<dyn SearchProvider>,
}

impl ResearchAgent {
    pub fn new(store: Arc<Database>, search: Arc<dyn SearchProvider>) -> Self {
        Self { store, search }
    }

    /// Runs the research loop for one person
    ///
    /// Returns the accumulated payload; partial payloads are valid
    /// results. `on_progress` is invoked once per iteration, before the
    /// search, with the query about to be issued.
    pub async fn enrich_person(
        &self,
        person_id: Uuid,
        on_progress: Option<&(dyn Fn(IterationUpdate) + Send + Sync)>,
    ) -> Result<ResearchPayload, ResearchError> {
        let person = self
            .store
            .get_person(person_id)
            .ok_or(ResearchError::PersonNotFound(person_id))?;
        let company = self
            .store
            .get_company(person.company_id)
            .ok_or(ResearchError::CompanyNotFound(person.company_id))?;

        let mut payload = ResearchPayload::default();

        // Seed the domain structurally before spending any search budget:
        // the company's on-record domain wins, the email suffix is the
        // fallback.
        if let Some(domain) = company.domain.as_deref().filter(|d| !d.is_empty()) {
            payload.company_domain = Some(domain.to_string());
        } else if let Some(domain) = person.email.as_deref().and_then(schema::domain_from_email) {
            payload.company_domain = Some(domain);
        }

        let company_name = company
            .name
            .clone()
            .unwrap_or_else(|| "unknown company".to_string());

        // Audit snippet for this run; updated in place after the loop
        let snippet = self.store.create_context_snippet(
            EntityType::Company,
            company.id,
            "research",
            payload.clone(),
            Vec::new(),
        );

        let mut source_urls: Vec<String> = Vec::new();

        for iteration in 1..=MAX_ITERATIONS {
            let missing = payload.missing_fields();
            if missing.is_empty() {
                info!(
                    "Research for person {} converged after {} iteration(s)",
                    person_id,
                    iteration - 1
                );
                break;
            }

            let query = build_query(&company_name, &missing, iteration);
            debug!("Iteration {}: searching for \"{}\"", iteration, query);

            if let Some(callback) = on_progress {
                callback(IterationUpdate {
                    iteration,
                    query: query.clone(),
                    found_fields: field_names(&payload.found_fields()),
                    missing_fields: field_names(&missing),
                });
            }

            // A failing search skips this iteration, never the run
            let results = match self.search.search(&query).await {
                Ok(results) => results,
                Err(e) => {
                    warn!("Search failed in iteration {}: {:#}", iteration, e);
                    continue;
                }
            };

            let top_results: Vec<_> = results.iter().take(TOP_RESULTS).cloned().collect();
            self.store
                .create_search_log(snippet.id, iteration, &query, top_results.clone());

            let newly_found =
                extract::extract_fields(&top_results, &mut payload, &missing, &company_name);
            if !newly_found.is_empty() {
                debug!(
                    "Iteration {} extracted: {}",
                    iteration,
                    newly_found
                        .iter()
                        .map(|f| f.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }

            for result in &top_results {
                if !source_urls.contains(&result.url) {
                    source_urls.push(result.url.clone());
                }
            }
        }

        // Advisory only: a partial or oddly shaped payload still persists
        for violation in schema::validate_research_payload(&payload) {
            warn!("Payload validation for person {}: {}", person_id, violation);
        }

        self.store
            .update_context_snippet(snippet.id, payload.clone(), source_urls);

        Ok(payload)
    }
}

/// Builds the query for one iteration
///
/// Iteration 1 always issues the broad company-overview query to
/// front-load extractions; later iterations target the first missing
/// field in canonical order.
fn build_query(company_name: &str, missing: &[ResearchField], iteration: u32) -> String {
    if iteration == 1 {
        return format!("{company_name} company overview products services");
    }

    match missing.first() {
        Some(ResearchField::CompanyValueProp) => {
            format!("{company_name} value proposition mission")
        }
        Some(ResearchField::ProductNames) => {
            format!("{company_name} products features software platform")
        }
        Some(ResearchField::PricingModel) => {
            format!("{company_name} pricing plans costs subscription")
        }
        Some(ResearchField::KeyCompetitors) => {
            format!("{company_name} competitors alternatives market comparison")
        }
        Some(ResearchField::CompanyDomain) => {
            format!("{company_name} official website domain")
        }
        None => format!("{company_name} company overview products services"),
    }
}
