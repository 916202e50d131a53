//! Core domain types
//!
//! This module contains the domain structures shared across Leadscope.
//! These types represent the entities being researched (campaigns,
//! companies, people), the research artifacts (context snippets, search
//! logs), and the job lifecycle types driven by the queue.

pub mod campaign;
pub mod company;
pub mod job;
pub mod person;
pub mod research;
pub mod snippet;
