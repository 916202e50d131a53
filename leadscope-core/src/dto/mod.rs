//! Data Transfer Objects for the HTTP API
//!
//! This module contains the request/response types exchanged between the
//! server and its clients. DTOs are lightweight views of domain entities
//! shaped for the wire.

pub mod job;
pub mod person;
pub mod snippet;
