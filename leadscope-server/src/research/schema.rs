//! Research payload shape validation
//!
//! Advisory only: violations are reported as strings for the agent to log,
//! never raised as errors. Partial or oddly shaped payloads still persist.

use regex::Regex;
use std::sync::LazyLock;

use leadscope_core::domain::research::ResearchPayload;

// One or more alphanumeric/hyphen labels followed by an alphabetic TLD;
// labels cannot start or end with a hyphen and cap at 63 characters
static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*\.[a-zA-Z]{2,}$",
    )
    .unwrap()
});

/// Validates a payload against the field-shape rules
///
/// Returns one message per violation; empty means the payload is clean.
/// Only fields that are present are checked.
pub fn validate_research_payload(payload: &ResearchPayload) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(value_prop) = &payload.company_value_prop {
        if value_prop.len() < 10 || value_prop.len() > 500 {
            errors.push("company_value_prop must be between 10 and 500 characters".to_string());
        }
    }

    if let Some(products) = &payload.product_names {
        if products.is_empty() || products.len() > 10 {
            errors.push("product_names must have between 1 and 10 items".to_string());
        }
        for (index, name) in products.iter().enumerate() {
            if name.is_empty() || name.len() > 100 {
                errors.push(format!(
                    "product_names[{index}] must be a non-empty string with max 100 characters"
                ));
            }
        }
    }

    if let Some(pricing) = &payload.pricing_model {
        if pricing.len() < 5 || pricing.len() > 200 {
            errors.push("pricing_model must be between 5 and 200 characters".to_string());
        }
    }

    if let Some(competitors) = &payload.key_competitors {
        if competitors.is_empty() || competitors.len() > 20 {
            errors.push("key_competitors must have between 1 and 20 items".to_string());
        }
        for (index, name) in competitors.iter().enumerate() {
            if name.is_empty() || name.len() > 100 {
                errors.push(format!(
                    "key_competitors[{index}] must be a non-empty string with max 100 characters"
                ));
            }
        }
    }

    if let Some(domain) = &payload.company_domain {
        if !is_valid_domain(domain) {
            errors.push(
                "company_domain must be a valid domain name with max 100 characters".to_string(),
            );
        }
    }

    errors
}

/// Whether a string is a syntactically valid domain name
pub fn is_valid_domain(domain: &str) -> bool {
    domain.len() <= 100 && DOMAIN_RE.is_match(domain)
}

/// Collapses whitespace, strips stray characters, and caps the length
///
/// The whitelist keeps `$` and `/` so cleaned pricing fragments preserve
/// currency amounts like "$99/month".
pub fn clean_text(text: &str) -> String {
    static SQUASH_WS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
    static STRIP: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[^\w\s\-.,;:()$/]").unwrap());

    let stripped = STRIP.replace_all(text, "");
    let collapsed = SQUASH_WS.replace_all(&stripped, " ");
    let mut cleaned = collapsed.trim().to_string();
    if cleaned.len() > 500 {
        let mut cut = 500;
        while !cleaned.is_char_boundary(cut) {
            cut -= 1;
        }
        cleaned.truncate(cut);
    }
    cleaned
}

/// Extracts the domain suffix of an email address
pub fn domain_from_email(email: &str) -> Option<String> {
    let (_, domain) = email.rsplit_once('@')?;
    if domain.is_empty() {
        None
    } else {
        Some(domain.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_payload_is_valid() {
        assert!(validate_research_payload(&ResearchPayload::default()).is_empty());
    }

    #[test]
    fn test_value_prop_length_bounds() {
        let payload = ResearchPayload {
            company_value_prop: Some("too short".to_string()),
            ..Default::default()
        };
        let errors = validate_research_payload(&payload);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("company_value_prop"));

        let payload = ResearchPayload {
            company_value_prop: Some("Cloud infrastructure for scaling applications.".to_string()),
            ..Default::default()
        };
        assert!(validate_research_payload(&payload).is_empty());
    }

    #[test]
    fn test_list_bounds() {
        let payload = ResearchPayload {
            product_names: Some(vec![]),
            key_competitors: Some(vec!["x".repeat(101)]),
            ..Default::default()
        };
        let errors = validate_research_payload(&payload);
        assert!(errors.iter().any(|e| e.contains("product_names must have")));
        assert!(errors.iter().any(|e| e.contains("key_competitors[0]")));
    }

    #[test]
    fn test_domain_validation() {
        assert!(is_valid_domain("techcorp.com"));
        assert!(is_valid_domain("sub-domain.example.io"));
        assert!(is_valid_domain("docs.techcorp.com"));
        assert!(is_valid_domain("a.b.example.co"));
        assert!(!is_valid_domain("not a domain"));
        assert!(!is_valid_domain("-leading.com"));
        assert!(!is_valid_domain("trailing-.com"));
        assert!(!is_valid_domain(&format!("{}.com", "a".repeat(120))));

        let payload = ResearchPayload {
            company_domain: Some("not a domain".to_string()),
            ..Default::default()
        };
        assert_eq!(validate_research_payload(&payload).len(), 1);
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  hello   world  "), "hello world");
        assert_eq!(clean_text("plans* start @ $99/month!"), "plans start $99/month");
        assert_eq!(clean_text("a\u{a0}b\n\tc"), "a b c");
    }

    #[test]
    fn test_domain_from_email() {
        assert_eq!(
            domain_from_email("sarah.johnson@techcorp.com").as_deref(),
            Some("techcorp.com")
        );
        assert_eq!(domain_from_email("not-an-email"), None);
        assert_eq!(domain_from_email("trailing@"), None);
    }
}
