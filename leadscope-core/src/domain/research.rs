//! Research payload types
//!
//! The research pipeline converges a [`ResearchPayload`] toward having all
//! five [`ResearchField`]s populated. A field counts as found once it holds
//! a non-empty value (non-blank string, or list with at least one element).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single result returned by the search backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub url: String,
    pub title: String,
    pub snippet: String,
}

/// The accumulating research result for a company
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResearchPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_value_prop: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_competitors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_domain: Option<String>,
}

/// The fixed set of fields the research pipeline targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResearchField {
    CompanyValueProp,
    ProductNames,
    PricingModel,
    KeyCompetitors,
    CompanyDomain,
}

impl ResearchField {
    /// All required fields, in canonical order
    pub const REQUIRED: [ResearchField; 5] = [
        ResearchField::CompanyValueProp,
        ResearchField::ProductNames,
        ResearchField::PricingModel,
        ResearchField::KeyCompetitors,
        ResearchField::CompanyDomain,
    ];

    /// Wire identifier for this field
    pub fn as_str(&self) -> &'static str {
        match self {
            ResearchField::CompanyValueProp => "company_value_prop",
            ResearchField::ProductNames => "product_names",
            ResearchField::PricingModel => "pricing_model",
            ResearchField::KeyCompetitors => "key_competitors",
            ResearchField::CompanyDomain => "company_domain",
        }
    }
}

impl fmt::Display for ResearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ResearchPayload {
    /// Whether the given field holds a non-empty value
    pub fn has(&self, field: ResearchField) -> bool {
        fn filled(value: &Option<String>) -> bool {
            value.as_deref().is_some_and(|s| !s.trim().is_empty())
        }
        fn filled_list(value: &Option<Vec<String>>) -> bool {
            value.as_deref().is_some_and(|v| !v.is_empty())
        }

        match field {
            ResearchField::CompanyValueProp => filled(&self.company_value_prop),
            ResearchField::ProductNames => filled_list(&self.product_names),
            ResearchField::PricingModel => filled(&self.pricing_model),
            ResearchField::KeyCompetitors => filled_list(&self.key_competitors),
            ResearchField::CompanyDomain => filled(&self.company_domain),
        }
    }

    /// Required fields already populated, in canonical order
    pub fn found_fields(&self) -> Vec<ResearchField> {
        ResearchField::REQUIRED
            .into_iter()
            .filter(|f| self.has(*f))
            .collect()
    }

    /// Required fields still missing, in canonical order
    pub fn missing_fields(&self) -> Vec<ResearchField> {
        ResearchField::REQUIRED
            .into_iter()
            .filter(|f| !self.has(*f))
            .collect()
    }
}

/// Wire identifiers for a list of fields
pub fn field_names(fields: &[ResearchField]) -> Vec<String> {
    fields.iter().map(|f| f.as_str().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_payload_is_all_missing() {
        let payload = ResearchPayload::default();
        assert!(payload.found_fields().is_empty());
        assert_eq!(payload.missing_fields(), ResearchField::REQUIRED.to_vec());
    }

    #[test]
    fn test_blank_values_do_not_count_as_found() {
        let payload = ResearchPayload {
            company_value_prop: Some("   ".to_string()),
            product_names: Some(vec![]),
            ..Default::default()
        };
        assert!(!payload.has(ResearchField::CompanyValueProp));
        assert!(!payload.has(ResearchField::ProductNames));
    }

    #[test]
    fn test_found_and_missing_partition_required_set() {
        let payload = ResearchPayload {
            pricing_model: Some("Subscription-based".to_string()),
            key_competitors: Some(vec!["Aws".to_string()]),
            ..Default::default()
        };
        let found = payload.found_fields();
        let missing = payload.missing_fields();
        assert_eq!(found.len() + missing.len(), ResearchField::REQUIRED.len());
        for field in ResearchField::REQUIRED {
            assert_ne!(found.contains(&field), missing.contains(&field));
        }
    }

    #[test]
    fn test_field_wire_names() {
        assert_eq!(ResearchField::CompanyValueProp.as_str(), "company_value_prop");
        assert_eq!(
            field_names(&[ResearchField::ProductNames, ResearchField::CompanyDomain]),
            vec!["product_names".to_string(), "company_domain".to_string()]
        );
    }
}
