//! Job DTOs for the HTTP API

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::job::JobStatus;

/// Response to an enrichment request: the job was accepted and queued
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichPersonResponse {
    pub job_id: Uuid,
    pub status: JobStatus,
    pub message: String,
}
