//! Field extraction heuristics
//!
//! Pure keyword/pattern scans over a batch of search results. Each
//! extractor targets one research field; [`extract_fields`] runs them for
//! exactly the fields that are both missing and targeted, and never
//! overwrites a field already present in the payload.

use regex::Regex;
use std::sync::LazyLock;

use leadscope_core::domain::research::{ResearchField, ResearchPayload, SearchResult};

use super::schema;

const VALUE_PROP_MARKERS: &[&str] = &[
    "platform",
    "solution",
    "helps",
    "provides",
    "offers",
    "enables",
    "delivers",
    "specializes",
];

const PRODUCT_MARKERS: &[&str] = &[
    "product", "platform", "software", "service", "tool", "solution", "app", "api",
];

const PRICING_MARKERS: &[&str] = &[
    "$",
    "pricing",
    "plan",
    "subscription",
    "cost",
    "price",
    "tier",
    "billing",
    "free",
    "premium",
];

const COMPETITOR_MARKERS: &[&str] = &[
    "competitor",
    "alternative",
    "vs",
    "compared to",
    "similar to",
    "rival",
];

// Fixed cloud/SaaS vendor list for the competitor cross-check
const KNOWN_COMPETITORS: &[&str] = &["aws", "google cloud", "azure", "digitalocean", "heroku"];

const MAX_PRODUCTS: usize = 5;
const MAX_COMPETITORS: usize = 8;

// CamelCase tokens like "CloudDeploy"
static CAMEL_CASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]+(?:[A-Z][a-z]+)+\b").unwrap());

// Title-Case two-word tokens like "Scale Master"
static TITLE_CASE_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]+ [A-Z][a-z]+\b").unwrap());

// Quoted product names
static QUOTED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""([^"]{2,60})""#).unwrap());

// Explicit product lists: "products include X, Y and Z"
static PRODUCT_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)products include ([^.]+)").unwrap());

// Currency amounts, optionally with a billing period: "$99/month"
static PRICE_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\d+(?:\.\d{1,2})?(?:/[a-zA-Z]+)?").unwrap());

// Free-tier style phrases
static FREE_PHRASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bfree tier\b|\bfreemium\b").unwrap());

// Subscription model phrases
static SUBSCRIPTION_PHRASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bsubscription[- ]based\b").unwrap());

// Sequences of two or more capitalized words: "Google Cloud Platform"
static CAP_SEQUENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][A-Za-z]+(?: [A-Z][A-Za-z]+)+\b").unwrap());

// Host part of an http(s) URL
static URL_DOMAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://([A-Za-z0-9][A-Za-z0-9.-]*)").unwrap());

// Bare domain tokens like "techcorp.com" or "docs.techcorp.com"
static BARE_DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Za-z0-9][A-Za-z0-9-]*(?:\.[A-Za-z0-9][A-Za-z0-9-]*)*\.[A-Za-z]{2,})\b")
        .unwrap()
});

/// Attempts to fill the targeted missing fields from a batch of results
///
/// Returns the fields newly set during this call (telemetry only).
pub fn extract_fields(
    results: &[SearchResult],
    payload: &mut ResearchPayload,
    targets: &[ResearchField],
    company_name: &str,
) -> Vec<ResearchField> {
    let mut newly_found = Vec::new();

    for field in targets {
        if payload.has(*field) {
            continue;
        }

        let found = match field {
            ResearchField::CompanyValueProp => {
                if let Some(value) = extract_value_prop(results) {
                    payload.company_value_prop = Some(value);
                    true
                } else {
                    false
                }
            }
            ResearchField::ProductNames => {
                if let Some(products) = extract_products(results) {
                    payload.product_names = Some(products);
                    true
                } else {
                    false
                }
            }
            ResearchField::PricingModel => {
                if let Some(pricing) = extract_pricing(results) {
                    payload.pricing_model = Some(pricing);
                    true
                } else {
                    false
                }
            }
            ResearchField::KeyCompetitors => {
                if let Some(competitors) = extract_competitors(results, company_name) {
                    payload.key_competitors = Some(competitors);
                    true
                } else {
                    false
                }
            }
            ResearchField::CompanyDomain => {
                if let Some(domain) = extract_domain(results) {
                    payload.company_domain = Some(domain);
                    true
                } else {
                    false
                }
            }
        };

        if found {
            newly_found.push(*field);
        }
    }

    newly_found
}

/// First marker-bearing sentence across title+snippet, cleaned
fn extract_value_prop(results: &[SearchResult]) -> Option<String> {
    for result in results {
        let text = format!("{} {}", result.title, result.snippet);
        for sentence in text.split('.') {
            let lowered = sentence.to_lowercase();
            if !VALUE_PROP_MARKERS.iter().any(|m| lowered.contains(m)) {
                continue;
            }
            let mut cleaned = schema::clean_text(sentence);
            if cleaned.is_empty() {
                continue;
            }
            if !cleaned.ends_with('.') {
                cleaned.push('.');
            }
            return Some(cleaned);
        }
    }
    None
}

/// CamelCase, Title-Case pair, quoted, and explicit-list product candidates
fn extract_products(results: &[SearchResult]) -> Option<Vec<String>> {
    let mut products: Vec<String> = Vec::new();

    for result in results {
        let text = format!("{} {}", result.title, result.snippet);
        let lowered = text.to_lowercase();
        if !PRODUCT_MARKERS.iter().any(|m| lowered.contains(m)) {
            continue;
        }

        for token in CAMEL_CASE.find_iter(&text) {
            push_unique(&mut products, token.as_str());
        }
        for token in TITLE_CASE_PAIR.find_iter(&text) {
            push_unique(&mut products, token.as_str());
        }
        for cap in QUOTED.captures_iter(&text) {
            push_unique(&mut products, cap[1].trim());
        }
        if let Some(cap) = PRODUCT_LIST.captures(&text) {
            for part in cap[1].split(',') {
                for item in part.split(" and ") {
                    if let Some(name) = leading_name(item) {
                        push_unique(&mut products, name);
                    }
                }
            }
        }
    }

    products.truncate(MAX_PRODUCTS);
    (!products.is_empty()).then_some(products)
}

/// First capitalized token of an explicit-list item
///
/// List items usually carry a trailing description ("CloudDeploy for
/// automated deployments"); only the leading name token is a candidate.
fn leading_name(item: &str) -> Option<&str> {
    let name = item.trim().split_whitespace().next()?;
    name.chars()
        .next()
        .filter(|c| c.is_uppercase())
        .map(|_| name)
}

/// Literal price-pattern fragments, else the first marker sentence
fn extract_pricing(results: &[SearchResult]) -> Option<String> {
    let mut fragments: Vec<String> = Vec::new();

    for result in results {
        let text = format!("{} {}", result.title, result.snippet);
        let lowered = text.to_lowercase();
        if !PRICING_MARKERS.iter().any(|m| lowered.contains(m)) {
            continue;
        }

        for token in PRICE_AMOUNT.find_iter(&text) {
            push_unique(&mut fragments, token.as_str());
        }
        for token in FREE_PHRASE.find_iter(&text) {
            push_unique(&mut fragments, token.as_str());
        }
        for token in SUBSCRIPTION_PHRASE.find_iter(&text) {
            push_unique(&mut fragments, token.as_str());
        }
    }

    if !fragments.is_empty() {
        return Some(schema::clean_text(&fragments.join(", ")));
    }

    // No literal price pattern anywhere: fall back to the first sentence
    // mentioning pricing at all
    for result in results {
        let text = format!("{} {}", result.title, result.snippet);
        for sentence in text.split('.') {
            let lowered = sentence.to_lowercase();
            if !PRICING_MARKERS.iter().any(|m| lowered.contains(m)) {
                continue;
            }
            let cleaned = schema::clean_text(sentence);
            if !cleaned.is_empty() {
                return Some(cleaned);
            }
        }
    }

    None
}

/// Capitalized names in competitor-flavored sentences plus known-vendor hits
fn extract_competitors(results: &[SearchResult], company_name: &str) -> Option<Vec<String>> {
    let mut competitors: Vec<String> = Vec::new();
    let company_lower = company_name.to_lowercase();

    for result in results {
        let text = format!("{} {}", result.title, result.snippet);

        for sentence in text.split('.') {
            let lowered = sentence.to_lowercase();
            if !COMPETITOR_MARKERS.iter().any(|m| lowered.contains(m)) {
                continue;
            }
            for token in CAP_SEQUENCE.find_iter(sentence) {
                let name = token.as_str();
                let name_lower = name.to_lowercase();
                // Never report the subject company as its own competitor
                if company_lower.contains(&name_lower) || name_lower.contains(&company_lower) {
                    continue;
                }
                push_unique(&mut competitors, name);
            }
        }

        let lowered = text.to_lowercase();
        for vendor in KNOWN_COMPETITORS {
            if lowered.contains(vendor) {
                push_unique(&mut competitors, &title_case(vendor));
            }
        }
    }

    competitors.truncate(MAX_COMPETITORS);
    (!competitors.is_empty()).then_some(competitors)
}

/// First syntactically valid domain from URLs or bare domain tokens
fn extract_domain(results: &[SearchResult]) -> Option<String> {
    for result in results {
        let text = format!("{} {} {}", result.title, result.snippet, result.url);

        for cap in URL_DOMAIN.captures_iter(&text) {
            let host = cap[1].trim_end_matches('.');
            if schema::is_valid_domain(host) {
                return Some(host.to_string());
            }
        }
        for cap in BARE_DOMAIN.captures_iter(&text) {
            let host = &cap[1];
            if schema::is_valid_domain(host) {
                return Some(host.to_string());
            }
        }
    }
    None
}

fn push_unique(values: &mut Vec<String>, candidate: &str) {
    if !values.iter().any(|v| v == candidate) {
        values.push(candidate.to_string());
    }
}

fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(url: &str, title: &str, snippet: &str) -> SearchResult {
        SearchResult {
            url: url.to_string(),
            title: title.to_string(),
            snippet: snippet.to_string(),
        }
    }

    fn overview_results() -> Vec<SearchResult> {
        vec![
            result(
                "https://techcorp.com",
                "TechCorp Solutions - Cloud Infrastructure Platform",
                "TechCorp Solutions provides enterprise-grade cloud infrastructure and DevOps automation tools. Our platform helps companies scale their applications with 99.9% uptime guarantee.",
            ),
            result(
                "https://techcorp.com/pricing",
                "TechCorp Pricing - Flexible Plans",
                "Choose from our Starter ($99/month), Professional ($299/month), or Enterprise (custom pricing) plans.",
            ),
            result(
                "https://techcrunch.com/techcorp-funding",
                "TechCorp Raises $50M Series B",
                "TechCorp competes with AWS, Google Cloud, and Azure in the cloud infrastructure space.",
            ),
        ]
    }

    #[test]
    fn test_value_prop_takes_first_marker_sentence() {
        let mut payload = ResearchPayload::default();
        let found = extract_fields(
            &overview_results(),
            &mut payload,
            &[ResearchField::CompanyValueProp],
            "TechCorp Solutions",
        );
        assert_eq!(found, vec![ResearchField::CompanyValueProp]);

        let value_prop = payload.company_value_prop.unwrap();
        assert!(value_prop.contains("Platform") || value_prop.contains("platform"));
        assert!(value_prop.ends_with('.'));
    }

    #[test]
    fn test_products_from_camel_case_tokens() {
        let results = vec![result(
            "https://techcorp.com/products",
            "TechCorp Products - CloudDeploy & MonitorPro",
            "Our flagship products include CloudDeploy for automated deployments, MonitorPro for application monitoring, and ScaleMaster for auto-scaling infrastructure.",
        )];
        let products = extract_products(&results).unwrap();
        assert!(products.contains(&"CloudDeploy".to_string()));
        assert!(products.contains(&"MonitorPro".to_string()));
        assert!(products.contains(&"ScaleMaster".to_string()));
        assert!(products.len() <= MAX_PRODUCTS);
    }

    #[test]
    fn test_products_from_quoted_names() {
        let results = vec![result(
            "https://example.com",
            "Product launch",
            r#"The company launched its new software "Orbit Analytics" this year."#,
        )];
        let products = extract_products(&results).unwrap();
        assert!(products.contains(&"Orbit Analytics".to_string()));
    }

    #[test]
    fn test_products_skipped_without_marker_words() {
        let results = vec![result(
            "https://example.com",
            "Weather report",
            "Sunny Skies are expected across the RegionWide area today.",
        )];
        assert!(extract_products(&results).is_none());
    }

    #[test]
    fn test_pricing_prefers_literal_amounts() {
        let pricing = extract_pricing(&overview_results()).unwrap();
        assert!(pricing.contains("$99/month"));
        assert!(pricing.contains("$299/month"));
    }

    #[test]
    fn test_pricing_detects_free_tier_and_subscription_phrases() {
        let results = vec![result(
            "https://example.com/pricing",
            "Pricing",
            "A generous free tier is available; paid usage is subscription-based.",
        )];
        let pricing = extract_pricing(&results).unwrap();
        assert!(pricing.contains("free tier"));
        assert!(pricing.contains("subscription-based"));
    }

    #[test]
    fn test_pricing_falls_back_to_marker_sentence() {
        let results = vec![result(
            "https://example.com",
            "About",
            "Contact sales for pricing tailored to your team. We love infrastructure.",
        )];
        let pricing = extract_pricing(&results).unwrap();
        assert!(pricing.contains("pricing"));
        assert!(!pricing.contains("infrastructure"));
    }

    #[test]
    fn test_competitors_from_known_vendor_list() {
        let mut payload = ResearchPayload::default();
        extract_fields(
            &overview_results(),
            &mut payload,
            &[ResearchField::KeyCompetitors],
            "TechCorp Solutions",
        );
        let competitors = payload.key_competitors.unwrap();
        assert!(competitors.contains(&"Aws".to_string()));
        assert!(competitors.contains(&"Google Cloud".to_string()));
        assert!(competitors.contains(&"Azure".to_string()));
        assert!(competitors.len() <= MAX_COMPETITORS);
    }

    #[test]
    fn test_competitors_exclude_subject_company() {
        let results = vec![result(
            "https://example.com",
            "Market analysis",
            "TechCorp Solutions remains the main rival of Initech Systems in this market.",
        )];
        let competitors = extract_competitors(&results, "TechCorp Solutions").unwrap();
        assert!(competitors.contains(&"Initech Systems".to_string()));
        assert!(!competitors.iter().any(|c| c.contains("TechCorp")));
    }

    #[test]
    fn test_domain_from_url() {
        let domain = extract_domain(&overview_results()).unwrap();
        assert_eq!(domain, "techcorp.com");
    }

    #[test]
    fn test_domain_from_bare_token() {
        let results = vec![result(
            "",
            "Company profile",
            "Find them at initech.io for more details.",
        )];
        assert_eq!(extract_domain(&results).unwrap(), "initech.io");
    }

    #[test]
    fn test_domain_keeps_multi_label_hosts_intact() {
        let results = vec![result(
            "https://docs.techcorp.com/getting-started",
            "TechCorp Documentation",
            "Complete documentation with API references and integration guides.",
        )];
        assert_eq!(extract_domain(&results).unwrap(), "docs.techcorp.com");

        let results = vec![result(
            "",
            "Company profile",
            "The developer portal lives at docs.initech.io these days.",
        )];
        assert_eq!(extract_domain(&results).unwrap(), "docs.initech.io");
    }

    #[test]
    fn test_domain_rejects_invalid_candidates() {
        let results = vec![result("", "No links here", "Just plain text without any address")];
        assert!(extract_domain(&results).is_none());
    }

    #[test]
    fn test_extraction_never_overwrites_existing_fields() {
        let mut payload = ResearchPayload {
            company_domain: Some("original.com".to_string()),
            ..Default::default()
        };
        let found = extract_fields(
            &overview_results(),
            &mut payload,
            &[ResearchField::CompanyDomain],
            "TechCorp Solutions",
        );
        assert!(found.is_empty());
        assert_eq!(payload.company_domain.as_deref(), Some("original.com"));
    }

    #[test]
    fn test_extraction_ignores_untargeted_fields() {
        let mut payload = ResearchPayload::default();
        let found = extract_fields(
            &overview_results(),
            &mut payload,
            &[ResearchField::PricingModel],
            "TechCorp Solutions",
        );
        assert_eq!(found, vec![ResearchField::PricingModel]);
        assert!(payload.company_value_prop.is_none());
        assert!(payload.company_domain.is_none());
    }
}
