//! Person domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person being researched, attached to a company
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: Uuid,
    pub company_id: Uuid,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
