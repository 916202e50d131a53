//! Leadscope Core
//!
//! Core types for the Leadscope prospect-research backend.
//!
//! This crate contains:
//! - Domain types: Core business entities (Campaign, Person, Job, etc.)
//! - DTOs: Request/response types for the HTTP API

pub mod domain;
pub mod dto;
