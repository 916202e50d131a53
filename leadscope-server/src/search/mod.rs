//! Mock search backend
//!
//! Deterministic stand-in for a web search API. Results come from a small
//! curated corpus keyed by query keywords, after a simulated latency.
//! Side-effect-free: the same query always returns the same results.

use async_trait::async_trait;
use std::time::Duration;

use leadscope_core::domain::research::SearchResult;

/// Search seam used by the research agent
///
/// A trait so tests can substitute failing or canned backends for the
/// default mock client.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Runs a search query and returns matching results
    async fn search(&self, query: &str) -> anyhow::Result<Vec<SearchResult>>;
}

/// One curated result set, selected when every term appears in the query
struct CannedResults {
    terms: &'static [&'static str],
    results: &'static [(&'static str, &'static str, &'static str)],
}

// Entries are checked in order; more specific term sets come first so the
// broad "techcorp" set only matches overview-style queries. The product set
// keys on the "products features" phrase because the broad overview query
// also contains the bare word "products".
const CORPUS: &[CannedResults] = &[
    CannedResults {
        terms: &["techcorp", "products features"],
        results: &[
            (
                "https://techcorp.com/products",
                "TechCorp Products - CloudDeploy & MonitorPro",
                "Our flagship products include CloudDeploy for automated deployments, MonitorPro for application monitoring, and ScaleMaster for auto-scaling infrastructure.",
            ),
            (
                "https://docs.techcorp.com",
                "TechCorp Documentation",
                "Complete documentation for CloudDeploy, MonitorPro, and ScaleMaster products with API references and integration guides.",
            ),
        ],
    },
    CannedResults {
        terms: &["techcorp", "competitors"],
        results: &[
            (
                "https://industry-report.com/cloud-platforms",
                "Cloud Platform Market Analysis 2024",
                "Major competitors in the cloud infrastructure space include AWS, Google Cloud Platform, Microsoft Azure, DigitalOcean, and Heroku.",
            ),
            (
                "https://techcorp.com/vs-competition",
                "TechCorp vs Competition",
                "TechCorp differentiates from AWS and Azure through simplified deployment processes and 40% lower costs for mid-market companies.",
            ),
        ],
    },
    CannedResults {
        terms: &["techcorp", "pricing"],
        results: &[
            (
                "https://techcorp.com/pricing",
                "TechCorp Pricing - Flexible Plans",
                "Choose from our Starter ($99/month), Professional ($299/month), or Enterprise (custom pricing) plans. All plans include 24/7 support and advanced monitoring.",
            ),
        ],
    },
    CannedResults {
        terms: &["techcorp"],
        results: &[
            (
                "https://techcorp.com",
                "TechCorp Solutions - Cloud Infrastructure Platform",
                "TechCorp Solutions provides enterprise-grade cloud infrastructure and DevOps automation tools. Our platform helps companies scale their applications with 99.9% uptime guarantee.",
            ),
            (
                "https://techcorp.com/pricing",
                "TechCorp Pricing - Flexible Plans",
                "Choose from our Starter ($99/month), Professional ($299/month), or Enterprise (custom pricing) plans. All plans include 24/7 support and advanced monitoring.",
            ),
            (
                "https://techcrunch.com/techcorp-funding",
                "TechCorp Raises $50M Series B",
                "TechCorp competes with AWS, Google Cloud, and Azure in the cloud infrastructure space. Key differentiators include simplified DevOps workflows and cost optimization.",
            ),
        ],
    },
];

/// Mock search client backed by the curated corpus
pub struct MockSearchClient {
    latency: Duration,
}

impl MockSearchClient {
    /// Creates a mock client with the given simulated latency
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl SearchProvider for MockSearchClient {
    async fn search(&self, query: &str) -> anyhow::Result<Vec<SearchResult>> {
        tokio::time::sleep(self.latency).await;

        let lowered = query.to_lowercase();
        for entry in CORPUS {
            if entry.terms.iter().all(|term| lowered.contains(term)) {
                return Ok(entry
                    .results
                    .iter()
                    .map(|(url, title, snippet)| SearchResult {
                        url: url.to_string(),
                        title: title.to_string(),
                        snippet: snippet.to_string(),
                    })
                    .collect());
            }
        }

        // Generic fallback so unknown companies still get a result
        Ok(vec![SearchResult {
            url: "https://example.com".to_string(),
            title: format!("Search Result for: {query}"),
            snippet: format!("This is a mock search result for the query: {query}"),
        }])
    }
}
