//! Service catalog models
//!
//! A `Service` is a static catalog entry: what the shop sells, how it is
//! priced, and what extra order fields it needs. The type-specific shape
//! lives in `ServiceKind` so a bundle always carries its component list and
//! a form-prep service always carries its required fields; a plain
//! conversion carries neither.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

/// Broad category of a catalog service
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Conversion,
    Ocr,
    Fax,
    Shredding,
    Bundle,
    Grievance,
    Notary,
    Legal,
    Medical,
    Financial,
}

impl Display for ServiceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let s = match self {
            ServiceType::Conversion => "conversion",
            ServiceType::Ocr => "ocr",
            ServiceType::Fax => "fax",
            ServiceType::Shredding => "shredding",
            ServiceType::Bundle => "bundle",
            ServiceType::Grievance => "grievance",
            ServiceType::Notary => "notary",
            ServiceType::Legal => "legal",
            ServiceType::Medical => "medical",
            ServiceType::Financial => "financial",
        };
        write!(f, "{}", s)
    }
}

impl ServiceType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "conversion" => Some(ServiceType::Conversion),
            "ocr" => Some(ServiceType::Ocr),
            "fax" => Some(ServiceType::Fax),
            "shredding" => Some(ServiceType::Shredding),
            "bundle" => Some(ServiceType::Bundle),
            "grievance" => Some(ServiceType::Grievance),
            "notary" => Some(ServiceType::Notary),
            "legal" => Some(ServiceType::Legal),
            "medical" => Some(ServiceType::Medical),
            "financial" => Some(ServiceType::Financial),
            _ => None,
        }
    }
}

/// How a service price scales with the order quantity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PricingUnit {
    PerFile,
    PerPage,
    Flat,
    PerMb,
}

impl Display for PricingUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let s = match self {
            PricingUnit::PerFile => "per_file",
            PricingUnit::PerPage => "per_page",
            PricingUnit::Flat => "flat",
            PricingUnit::PerMb => "per_mb",
        };
        write!(f, "{}", s)
    }
}

/// Type-specific shape of a service.
///
/// Bundles carry the ids of their component services and never nest other
/// bundles. Fax and form-prep variants carry the extra order fields they
/// require; these must be present and non-empty at order creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Conversion,
    Ocr,
    Fax { required_fields: &'static [&'static str] },
    Shredding,
    Bundle { includes: &'static [&'static str] },
    Grievance { required_fields: &'static [&'static str] },
    Notary { required_fields: &'static [&'static str] },
    Legal { required_fields: &'static [&'static str] },
    Medical { required_fields: &'static [&'static str] },
    Financial,
}

impl ServiceKind {
    pub fn service_type(&self) -> ServiceType {
        match self {
            ServiceKind::Conversion => ServiceType::Conversion,
            ServiceKind::Ocr => ServiceType::Ocr,
            ServiceKind::Fax { .. } => ServiceType::Fax,
            ServiceKind::Shredding => ServiceType::Shredding,
            ServiceKind::Bundle { .. } => ServiceType::Bundle,
            ServiceKind::Grievance { .. } => ServiceType::Grievance,
            ServiceKind::Notary { .. } => ServiceType::Notary,
            ServiceKind::Legal { .. } => ServiceType::Legal,
            ServiceKind::Medical { .. } => ServiceType::Medical,
            ServiceKind::Financial => ServiceType::Financial,
        }
    }

    /// Extra order fields this service requires, empty for most kinds.
    pub fn required_extra_fields(&self) -> &'static [&'static str] {
        match self {
            ServiceKind::Fax { required_fields }
            | ServiceKind::Grievance { required_fields }
            | ServiceKind::Notary { required_fields }
            | ServiceKind::Legal { required_fields }
            | ServiceKind::Medical { required_fields } => required_fields,
            _ => &[],
        }
    }

    /// Component service ids for bundles, empty otherwise.
    pub fn includes(&self) -> &'static [&'static str] {
        match self {
            ServiceKind::Bundle { includes } => includes,
            _ => &[],
        }
    }
}

/// A static catalog entry
#[derive(Debug, Clone)]
pub struct Service {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ServiceKind,
    pub base_price_cents: i64,
    pub unit: PricingUnit,
    pub enabled: bool,
    pub tags: &'static [&'static str],
    pub estimated_time: &'static str,
}

impl Service {
    pub fn service_type(&self) -> ServiceType {
        self.kind.service_type()
    }

    /// Required extra fields that are absent, non-string, or blank in the
    /// submitted values, in the order the service declares them.
    pub fn missing_extra_fields(&self, extra_fields: &serde_json::Value) -> Vec<String> {
        self.kind
            .required_extra_fields()
            .iter()
            .filter(|name| {
                extra_fields
                    .get(**name)
                    .and_then(|v| v.as_str())
                    .map(|v| v.trim().is_empty())
                    .unwrap_or(true)
            })
            .map(|name| name.to_string())
            .collect()
    }
}

/// Convert integer cents to a two-decimal major-unit value.
pub fn cents_to_decimal(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Service representation in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub description: String,
    /// Price in major units (e.g. 2.99)
    pub price: Decimal,
    pub base_price_cents: i64,
    pub unit: PricingUnit,
    pub enabled: bool,
    pub tags: Vec<String>,
    pub estimated_time: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requires_extra_fields: Vec<String>,
}

impl From<&Service> for ServiceResponse {
    fn from(service: &Service) -> Self {
        ServiceResponse {
            id: service.id.to_string(),
            name: service.name.to_string(),
            service_type: service.service_type(),
            description: service.description.to_string(),
            price: cents_to_decimal(service.base_price_cents),
            base_price_cents: service.base_price_cents,
            unit: service.unit,
            enabled: service.enabled,
            tags: service.tags.iter().map(|t| t.to_string()).collect(),
            estimated_time: service.estimated_time.to_string(),
            includes: service.kind.includes().iter().map(|s| s.to_string()).collect(),
            requires_extra_fields: service
                .kind
                .required_extra_fields()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cents_to_decimal_formats_two_places() {
        assert_eq!(cents_to_decimal(897).to_string(), "8.97");
        assert_eq!(cents_to_decimal(2999).to_string(), "29.99");
        assert_eq!(cents_to_decimal(100).to_string(), "1.00");
    }

    #[test]
    fn test_service_kind_accessors() {
        let bundle = ServiceKind::Bundle {
            includes: &["pdf_to_word", "ocr_pdf"],
        };
        assert_eq!(bundle.service_type(), ServiceType::Bundle);
        assert_eq!(bundle.includes(), &["pdf_to_word", "ocr_pdf"]);
        assert!(bundle.required_extra_fields().is_empty());

        let fax = ServiceKind::Fax {
            required_fields: &["fax_number"],
        };
        assert_eq!(fax.required_extra_fields(), &["fax_number"]);
        assert!(fax.includes().is_empty());
    }

    fn fax_service() -> Service {
        Service {
            id: "fax_international",
            name: "International Fax",
            description: "",
            kind: ServiceKind::Fax {
                required_fields: &["fax_number", "country_code"],
            },
            base_price_cents: 999,
            unit: PricingUnit::PerFile,
            enabled: true,
            tags: &[],
            estimated_time: "",
        }
    }

    #[test]
    fn test_missing_extra_fields_reports_absent_names_in_order() {
        let service = fax_service();
        let missing = service.missing_extra_fields(&serde_json::json!({}));
        assert_eq!(missing, vec!["fax_number", "country_code"]);
    }

    #[test]
    fn test_missing_extra_fields_rejects_blank_values() {
        let service = fax_service();

        let empty = serde_json::json!({ "fax_number": "", "country_code": "1" });
        assert_eq!(service.missing_extra_fields(&empty), vec!["fax_number"]);

        let whitespace = serde_json::json!({ "fax_number": "   ", "country_code": "1" });
        assert_eq!(service.missing_extra_fields(&whitespace), vec!["fax_number"]);

        let non_string = serde_json::json!({ "fax_number": 5551234, "country_code": "1" });
        assert_eq!(service.missing_extra_fields(&non_string), vec!["fax_number"]);
    }

    #[test]
    fn test_missing_extra_fields_empty_when_satisfied() {
        let service = fax_service();
        let values = serde_json::json!({ "fax_number": "+1 555 1234", "country_code": "1" });
        assert!(service.missing_extra_fields(&values).is_empty());

        let no_requirements = Service {
            kind: ServiceKind::Conversion,
            ..fax_service()
        };
        assert!(no_requirements
            .missing_extra_fields(&serde_json::json!({}))
            .is_empty());
    }

    #[test]
    fn test_service_type_parse_roundtrip() {
        for t in [
            ServiceType::Conversion,
            ServiceType::Ocr,
            ServiceType::Fax,
            ServiceType::Shredding,
            ServiceType::Bundle,
            ServiceType::Grievance,
            ServiceType::Notary,
            ServiceType::Legal,
            ServiceType::Medical,
            ServiceType::Financial,
        ] {
            assert_eq!(ServiceType::parse(&t.to_string()), Some(t));
        }
        assert_eq!(ServiceType::parse("unknown"), None);
    }
}
