//! Company domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A company targeted by an outreach campaign
///
/// Name and domain are nullable: imported prospect lists are often
/// incomplete, and the research pipeline fills gaps where it can.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub name: Option<String>,
    pub domain: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
