//! Context snippet DTOs for the HTTP API

use serde::{Deserialize, Serialize};

use crate::domain::snippet::ContextSnippet;

/// Response listing the context snippets recorded for an entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySnippetsResponse {
    pub snippets: Vec<ContextSnippet>,
}
