//! Research pipeline
//!
//! This layer turns a person into an enriched company profile:
//! - `agent`: the iterate-search-extract orchestrator
//! - `extract`: per-field heuristics over search results
//! - `schema`: advisory payload shape validation and text helpers

pub mod agent;
pub mod extract;
pub mod schema;

pub use agent::{IterationUpdate, MAX_ITERATIONS, ResearchAgent, ResearchError};
