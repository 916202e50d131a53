//! In-memory entity store
//!
//! Holds campaigns, companies, people, context snippets, and search logs
//! behind a single mutex. There is no durability: the store is seeded with
//! demo data at startup and everything lives for the life of the process.
//!
//! Lookups return cloned snapshots; the only in-place mutation is the
//! final context-snippet update at the end of a research run, which always
//! happens inside the single serial worker.

use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use leadscope_core::domain::campaign::{Campaign, CampaignStatus};
use leadscope_core::domain::company::Company;
use leadscope_core::domain::person::Person;
use leadscope_core::domain::research::{ResearchPayload, SearchResult};
use leadscope_core::domain::snippet::{ContextSnippet, EntityType, SearchLog};
use leadscope_core::dto::person::PersonWithCompany;

#[derive(Default)]
struct Tables {
    campaigns: HashMap<Uuid, Campaign>,
    companies: HashMap<Uuid, Company>,
    people: HashMap<Uuid, Person>,
    context_snippets: HashMap<Uuid, ContextSnippet>,
    search_logs: HashMap<Uuid, SearchLog>,
}

/// Thread-safe in-memory database
pub struct Database {
    tables: Mutex<Tables>,
}

impl Database {
    /// Creates an empty store (tests build their own fixtures)
    pub fn empty() -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
        }
    }

    /// Creates a store seeded with the demo campaign
    pub fn seeded() -> Self {
        let db = Self::empty();
        db.seed();
        db
    }

    fn seed(&self) {
        let campaign = self.create_campaign("Q1 2024 Outreach Campaign", CampaignStatus::Active);
        let company = self.create_company(
            campaign.id,
            Some("TechCorp Solutions".to_string()),
            Some("techcorp.com".to_string()),
        );
        self.create_person(
            company.id,
            Some("Sarah Johnson".to_string()),
            Some("sarah.johnson@techcorp.com".to_string()),
            Some("Chief Technology Officer".to_string()),
        );
        self.create_person(
            company.id,
            Some("Michael Chen".to_string()),
            Some("michael.chen@techcorp.com".to_string()),
            Some("VP of Engineering".to_string()),
        );
    }

    // =========================================================================
    // Campaigns
    // =========================================================================

    pub fn create_campaign(&self, name: &str, status: CampaignStatus) -> Campaign {
        let campaign = Campaign {
            id: Uuid::new_v4(),
            name: name.to_string(),
            status,
            created_at: chrono::Utc::now(),
        };
        let mut tables = self.tables.lock().unwrap();
        tables.campaigns.insert(campaign.id, campaign.clone());
        campaign
    }

    pub fn campaigns(&self) -> Vec<Campaign> {
        let tables = self.tables.lock().unwrap();
        let mut campaigns: Vec<_> = tables.campaigns.values().cloned().collect();
        campaigns.sort_by_key(|c| c.created_at);
        campaigns
    }

    // =========================================================================
    // Companies
    // =========================================================================

    pub fn create_company(
        &self,
        campaign_id: Uuid,
        name: Option<String>,
        domain: Option<String>,
    ) -> Company {
        let company = Company {
            id: Uuid::new_v4(),
            campaign_id,
            name,
            domain,
            created_at: chrono::Utc::now(),
        };
        let mut tables = self.tables.lock().unwrap();
        tables.companies.insert(company.id, company.clone());
        company
    }

    pub fn companies(&self) -> Vec<Company> {
        let tables = self.tables.lock().unwrap();
        let mut companies: Vec<_> = tables.companies.values().cloned().collect();
        companies.sort_by_key(|c| c.created_at);
        companies
    }

    pub fn get_company(&self, id: Uuid) -> Option<Company> {
        let tables = self.tables.lock().unwrap();
        tables.companies.get(&id).cloned()
    }

    // =========================================================================
    // People
    // =========================================================================

    pub fn create_person(
        &self,
        company_id: Uuid,
        full_name: Option<String>,
        email: Option<String>,
        title: Option<String>,
    ) -> Person {
        let person = Person {
            id: Uuid::new_v4(),
            company_id,
            full_name,
            email,
            title,
            created_at: chrono::Utc::now(),
        };
        let mut tables = self.tables.lock().unwrap();
        tables.people.insert(person.id, person.clone());
        person
    }

    pub fn get_person(&self, id: Uuid) -> Option<Person> {
        let tables = self.tables.lock().unwrap();
        tables.people.get(&id).cloned()
    }

    /// All people joined with their company records
    ///
    /// People whose company record is missing are skipped.
    pub fn people_with_companies(&self) -> Vec<PersonWithCompany> {
        let tables = self.tables.lock().unwrap();
        let mut people: Vec<_> = tables
            .people
            .values()
            .filter_map(|person| {
                tables.companies.get(&person.company_id).map(|company| PersonWithCompany {
                    person: person.clone(),
                    company: company.clone(),
                })
            })
            .collect();
        people.sort_by_key(|p| p.person.created_at);
        people
    }

    // =========================================================================
    // Context snippets
    // =========================================================================

    pub fn create_context_snippet(
        &self,
        entity_type: EntityType,
        entity_id: Uuid,
        snippet_type: &str,
        payload: ResearchPayload,
        source_urls: Vec<String>,
    ) -> ContextSnippet {
        let snippet = ContextSnippet {
            id: Uuid::new_v4(),
            entity_type,
            entity_id,
            snippet_type: snippet_type.to_string(),
            payload,
            source_urls,
            created_at: chrono::Utc::now(),
        };
        let mut tables = self.tables.lock().unwrap();
        tables.context_snippets.insert(snippet.id, snippet.clone());
        snippet
    }

    pub fn get_context_snippet(&self, id: Uuid) -> Option<ContextSnippet> {
        let tables = self.tables.lock().unwrap();
        tables.context_snippets.get(&id).cloned()
    }

    /// Replaces a snippet's payload and source URLs in place
    ///
    /// Returns false when the snippet does not exist.
    pub fn update_context_snippet(
        &self,
        id: Uuid,
        payload: ResearchPayload,
        source_urls: Vec<String>,
    ) -> bool {
        let mut tables = self.tables.lock().unwrap();
        match tables.context_snippets.get_mut(&id) {
            Some(snippet) => {
                snippet.payload = payload;
                snippet.source_urls = source_urls;
                true
            }
            None => false,
        }
    }

    pub fn snippets_by_entity(&self, entity_type: EntityType, entity_id: Uuid) -> Vec<ContextSnippet> {
        let tables = self.tables.lock().unwrap();
        let mut snippets: Vec<_> = tables
            .context_snippets
            .values()
            .filter(|s| s.entity_type == entity_type && s.entity_id == entity_id)
            .cloned()
            .collect();
        snippets.sort_by_key(|s| s.created_at);
        snippets
    }

    // =========================================================================
    // Search logs
    // =========================================================================

    pub fn create_search_log(
        &self,
        context_snippet_id: Uuid,
        iteration: u32,
        query: &str,
        top_results: Vec<SearchResult>,
    ) -> SearchLog {
        let log = SearchLog {
            id: Uuid::new_v4(),
            context_snippet_id,
            iteration,
            query: query.to_string(),
            top_results,
            created_at: chrono::Utc::now(),
        };
        let mut tables = self.tables.lock().unwrap();
        tables.search_logs.insert(log.id, log.clone());
        log
    }

    pub fn search_logs_by_snippet(&self, context_snippet_id: Uuid) -> Vec<SearchLog> {
        let tables = self.tables.lock().unwrap();
        let mut logs: Vec<_> = tables
            .search_logs
            .values()
            .filter(|l| l.context_snippet_id == context_snippet_id)
            .cloned()
            .collect();
        logs.sort_by_key(|l| l.iteration);
        logs
    }
}
