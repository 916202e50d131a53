//! Campaign domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An outreach campaign grouping the companies being prospected
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    pub status: CampaignStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Campaign lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Draft,
    Active,
    Completed,
}
