//! Research audit record types
//!
//! Context snippets and search logs are the append-only audit trail a
//! research run leaves behind. They are owned by the entity store and
//! outlive the in-memory job that produced them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::research::{ResearchPayload, SearchResult};

/// Which kind of entity a context snippet describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Company,
    Person,
}

/// Accumulated research context for an entity
///
/// Created once per research run and updated in place with the final
/// payload and the deduplicated set of source URLs consulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextSnippet {
    pub id: Uuid,
    pub entity_type: EntityType,
    pub entity_id: Uuid,
    pub snippet_type: String,
    pub payload: ResearchPayload,
    pub source_urls: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// One search iteration's audit record: the query issued and what came back
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchLog {
    pub id: Uuid,
    pub context_snippet_id: Uuid,
    pub iteration: u32,
    pub query: String,
    pub top_results: Vec<SearchResult>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
