//! Person DTOs for the HTTP API

use serde::{Deserialize, Serialize};

use crate::domain::company::Company;
use crate::domain::person::Person;

/// A person joined with their company record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonWithCompany {
    #[serde(flatten)]
    pub person: Person,
    pub company: Company,
}

/// Response listing all people with their companies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeopleListResponse {
    pub people: Vec<PersonWithCompany>,
}
