//! Job domain types
//!
//! A [`Job`] is one research attempt for one person. Jobs live only in
//! process memory for the life of the server; they are never deleted,
//! only transitioned through [`JobStatus`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::research::{ResearchField, field_names};

/// One research attempt for one person
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub person_id: Uuid,
    pub status: JobStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub progress: ResearchProgress,
}

/// Job lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Running,
    Completed,
    Failed,
}

/// Point-in-time snapshot of a job's research progress
///
/// This is the record broadcast to subscribers. The queue clones it at
/// every emission, so consumers always receive an owned copy that stays
/// stable even while the source job keeps mutating.
///
/// Invariant: `found_fields` and `missing_fields` partition the fixed
/// required-field set at every emission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchProgress {
    pub job_id: Uuid,
    pub person_id: Uuid,
    pub status: JobStatus,
    pub current_iteration: u32,
    pub max_iterations: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_query: Option<String>,
    pub found_fields: Vec<String>,
    pub missing_fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResearchProgress {
    /// Initial snapshot for a freshly queued job: nothing found yet
    pub fn queued(job_id: Uuid, person_id: Uuid, max_iterations: u32) -> Self {
        Self {
            job_id,
            person_id,
            status: JobStatus::Queued,
            current_iteration: 0,
            max_iterations,
            current_query: None,
            found_fields: Vec::new(),
            missing_fields: field_names(&ResearchField::REQUIRED),
            error: None,
        }
    }
}

/// Job lifecycle event published by the queue
///
/// One tagged union covering every event kind; each variant carries an
/// owned progress snapshot taken at emission time.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JobEvent {
    Queued { data: ResearchProgress },
    Progress { data: ResearchProgress },
    Completed { data: ResearchProgress },
    Failed { data: ResearchProgress },
}

impl JobEvent {
    /// The progress snapshot carried by this event
    pub fn progress(&self) -> &ResearchProgress {
        match self {
            JobEvent::Queued { data }
            | JobEvent::Progress { data }
            | JobEvent::Completed { data }
            | JobEvent::Failed { data } => data,
        }
    }
}
