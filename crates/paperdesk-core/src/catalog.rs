//! Static service catalog
//!
//! The catalog is defined in code and validated at construction: every
//! bundle component must reference an existing, enabled, non-bundle service.
//! Listing preserves insertion order so the storefront ordering is stable.

use std::collections::HashMap;

use crate::error::AppError;
use crate::models::{PricingUnit, Service, ServiceKind, ServiceType};

/// Filter for catalog listings. All criteria are optional and combine with AND.
#[derive(Debug, Default, Clone)]
pub struct CatalogFilter {
    pub service_type: Option<ServiceType>,
    pub tag: Option<String>,
    pub search: Option<String>,
}

/// The service catalog: insertion-ordered services with an id index.
pub struct Catalog {
    services: Vec<Service>,
    index: HashMap<&'static str, usize>,
}

impl Catalog {
    /// Build the built-in catalog. Fails if a bundle references a missing,
    /// disabled, or bundle-typed service.
    pub fn builtin() -> Result<Self, AppError> {
        Self::new(builtin_services())
    }

    pub fn new(services: Vec<Service>) -> Result<Self, AppError> {
        let mut index = HashMap::with_capacity(services.len());
        for (i, service) in services.iter().enumerate() {
            if index.insert(service.id, i).is_some() {
                return Err(AppError::Internal(format!(
                    "Duplicate service id in catalog: {}",
                    service.id
                )));
            }
        }

        for service in &services {
            for component_id in service.kind.includes() {
                let component_idx = *index.get(component_id).ok_or_else(|| {
                    AppError::Internal(format!(
                        "Bundle {} references unknown service {}",
                        service.id, component_id
                    ))
                })?;
                let component = &services[component_idx];
                if !component.enabled {
                    return Err(AppError::Internal(format!(
                        "Bundle {} references disabled service {}",
                        service.id, component_id
                    )));
                }
                if component.service_type() == ServiceType::Bundle {
                    return Err(AppError::Internal(format!(
                        "Bundle {} nests bundle {}",
                        service.id, component_id
                    )));
                }
            }
        }

        Ok(Catalog { services, index })
    }

    /// Look up a service by id, enabled or not.
    pub fn lookup(&self, id: &str) -> Option<&Service> {
        self.index.get(id).map(|&i| &self.services[i])
    }

    /// List enabled services matching the filter, in insertion order.
    pub fn list_enabled(&self, filter: &CatalogFilter) -> Vec<&Service> {
        let search = filter.search.as_deref().map(str::to_lowercase);
        let tag = filter.tag.as_deref().map(str::to_lowercase);

        self.services
            .iter()
            .filter(|s| s.enabled)
            .filter(|s| {
                filter
                    .service_type
                    .map(|t| s.service_type() == t)
                    .unwrap_or(true)
            })
            .filter(|s| {
                tag.as_deref()
                    .map(|t| s.tags.iter().any(|candidate| candidate.eq_ignore_ascii_case(t)))
                    .unwrap_or(true)
            })
            .filter(|s| {
                search
                    .as_deref()
                    .map(|q| {
                        s.name.to_lowercase().contains(q)
                            || s.description.to_lowercase().contains(q)
                            || s.tags.iter().any(|t| t.to_lowercase().contains(q))
                    })
                    .unwrap_or(true)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

fn builtin_services() -> Vec<Service> {
    use PricingUnit::{Flat, PerFile, PerPage};
    use ServiceKind as K;

    vec![
        // Conversion services
        Service {
            id: "pdf_to_word",
            name: "PDF to Word Conversion",
            description: "Extract the text layer of a PDF into an editable Word-compatible document.",
            kind: K::Conversion,
            base_price_cents: 299,
            unit: PerFile,
            enabled: true,
            tags: &["pdf", "word", "conversion", "docx"],
            estimated_time: "30 seconds",
        },
        Service {
            id: "word_to_pdf",
            name: "Word to PDF Conversion",
            description: "Convert Word documents to PDF for sharing and archiving.",
            kind: K::Conversion,
            base_price_cents: 199,
            unit: PerFile,
            enabled: true,
            tags: &["word", "pdf", "conversion", "docx"],
            estimated_time: "30 seconds",
        },
        Service {
            id: "jpg_to_pdf",
            name: "Image to PDF Conversion",
            description: "Combine JPG or PNG images into a single PDF document.",
            kind: K::Conversion,
            base_price_cents: 149,
            unit: PerFile,
            enabled: true,
            tags: &["image", "jpg", "png", "pdf", "conversion"],
            estimated_time: "20 seconds",
        },
        Service {
            id: "pdf_to_jpg",
            name: "PDF to Image Extraction",
            description: "Extract page content from a PDF as a text rendering per page.",
            kind: K::Conversion,
            base_price_cents: 199,
            unit: PerFile,
            enabled: true,
            tags: &["pdf", "image", "jpg", "extraction"],
            estimated_time: "30 seconds",
        },
        Service {
            id: "excel_to_pdf",
            name: "Excel to PDF Conversion",
            description: "Convert spreadsheets to PDF for distribution.",
            kind: K::Conversion,
            base_price_cents: 249,
            unit: PerFile,
            enabled: true,
            tags: &["excel", "pdf", "spreadsheet", "conversion"],
            estimated_time: "30 seconds",
        },
        Service {
            id: "pdf_merge",
            name: "PDF Merge",
            description: "Combine multiple PDF files into one document.",
            kind: K::Conversion,
            base_price_cents: 299,
            unit: Flat,
            enabled: true,
            tags: &["pdf", "merge", "combine"],
            estimated_time: "20 seconds",
        },
        Service {
            id: "pdf_split",
            name: "PDF Split",
            description: "Split a PDF into separate documents.",
            kind: K::Conversion,
            base_price_cents: 249,
            unit: PerFile,
            enabled: true,
            tags: &["pdf", "split", "separate"],
            estimated_time: "20 seconds",
        },
        Service {
            id: "pdf_compress",
            name: "PDF Compression",
            description: "Reduce PDF file size while keeping content intact.",
            kind: K::Conversion,
            base_price_cents: 149,
            unit: PerFile,
            enabled: true,
            tags: &["pdf", "compress", "reduce", "optimize"],
            estimated_time: "15 seconds",
        },
        Service {
            id: "pdf_rotate",
            name: "PDF Page Rotation",
            description: "Fix page orientation in scanned PDFs.",
            kind: K::Conversion,
            base_price_cents: 99,
            unit: PerFile,
            enabled: true,
            tags: &["pdf", "rotate", "orientation"],
            estimated_time: "10 seconds",
        },
        Service {
            id: "translation_prep",
            name: "Translation Prep",
            description: "Prepare documents for professional translation.",
            kind: K::Conversion,
            base_price_cents: 399,
            unit: PerFile,
            enabled: true,
            tags: &["translation", "language", "preparation"],
            estimated_time: "5 minutes",
        },
        Service {
            id: "watermark_add",
            name: "Add Watermark",
            description: "Add text watermarks to documents.",
            kind: K::Conversion,
            base_price_cents: 199,
            unit: PerFile,
            enabled: true,
            tags: &["watermark", "branding", "security"],
            estimated_time: "20 seconds",
        },
        // OCR services
        Service {
            id: "ocr_pdf",
            name: "OCR for Scanned PDFs",
            description: "Extract the searchable text layer from PDF documents.",
            kind: K::Ocr,
            base_price_cents: 399,
            unit: PerFile,
            enabled: true,
            tags: &["ocr", "pdf", "searchable", "text"],
            estimated_time: "1 minute",
        },
        Service {
            id: "ocr_image",
            name: "OCR for Images",
            description: "Extract text content from image documents.",
            kind: K::Ocr,
            base_price_cents: 349,
            unit: PerFile,
            enabled: true,
            tags: &["ocr", "image", "text", "extraction"],
            estimated_time: "1 minute",
        },
        Service {
            id: "ocr_receipt",
            name: "Receipt OCR",
            description: "Extract line items and totals from receipts.",
            kind: K::Ocr,
            base_price_cents: 249,
            unit: PerFile,
            enabled: true,
            tags: &["ocr", "receipt", "expense"],
            estimated_time: "30 seconds",
        },
        Service {
            id: "ocr_invoice",
            name: "Invoice Data Extraction",
            description: "Extract structured data from invoices.",
            kind: K::Ocr,
            base_price_cents: 399,
            unit: PerFile,
            enabled: true,
            tags: &["ocr", "invoice", "billing", "extraction"],
            estimated_time: "1 minute",
        },
        Service {
            id: "document_scan_cleanup",
            name: "Document Scan Cleanup",
            description: "Clean up and enhance scanned documents with grayscale binarization.",
            kind: K::Ocr,
            base_price_cents: 249,
            unit: PerFile,
            enabled: true,
            tags: &["scan", "cleanup", "enhance", "straighten"],
            estimated_time: "45 seconds",
        },
        // Fax services
        Service {
            id: "fax_domestic",
            name: "Domestic Fax",
            description: "Send documents by fax within the US.",
            kind: K::Fax {
                required_fields: &["fax_number"],
            },
            base_price_cents: 499,
            unit: PerFile,
            enabled: true,
            tags: &["fax", "domestic", "us"],
            estimated_time: "5 minutes",
        },
        Service {
            id: "fax_international",
            name: "International Fax",
            description: "Send documents by fax worldwide.",
            kind: K::Fax {
                required_fields: &["fax_number", "country_code"],
            },
            base_price_cents: 999,
            unit: PerFile,
            enabled: true,
            tags: &["fax", "international", "global"],
            estimated_time: "10 minutes",
        },
        Service {
            id: "fax_hipaa",
            name: "HIPAA-Compliant Fax",
            description: "Secure fax transmission for healthcare documents.",
            kind: K::Fax {
                required_fields: &["fax_number", "recipient_name"],
            },
            base_price_cents: 799,
            unit: PerFile,
            enabled: true,
            tags: &["fax", "hipaa", "healthcare", "secure"],
            estimated_time: "5 minutes",
        },
        Service {
            id: "fax_legal",
            name: "Legal Document Fax",
            description: "Priority fax service for court and legal filings.",
            kind: K::Fax {
                required_fields: &["fax_number", "case_number"],
            },
            base_price_cents: 699,
            unit: PerFile,
            enabled: true,
            tags: &["fax", "legal", "court", "priority"],
            estimated_time: "5 minutes",
        },
        // Shredding services
        Service {
            id: "secure_shred_basic",
            name: "Secure Document Shredding",
            description: "Permanently destroy uploaded files with a destruction certificate.",
            kind: K::Shredding,
            base_price_cents: 199,
            unit: PerFile,
            enabled: true,
            tags: &["shred", "delete", "secure", "certificate"],
            estimated_time: "1 minute",
        },
        Service {
            id: "secure_shred_gdpr",
            name: "GDPR-Compliant Deletion",
            description: "Destroy files with a GDPR Article 17 audit certificate.",
            kind: K::Shredding,
            base_price_cents: 399,
            unit: PerFile,
            enabled: true,
            tags: &["shred", "gdpr", "compliance", "audit"],
            estimated_time: "1 minute",
        },
        Service {
            id: "secure_shred_hipaa",
            name: "HIPAA-Compliant Deletion",
            description: "Destroy healthcare records with a HIPAA disposal certificate.",
            kind: K::Shredding,
            base_price_cents: 499,
            unit: PerFile,
            enabled: true,
            tags: &["shred", "hipaa", "healthcare", "compliance"],
            estimated_time: "1 minute",
        },
        // Bundles
        Service {
            id: "emergency_bundle_basic",
            name: "Emergency Bundle - Basic",
            description: "Priority conversion and OCR in one package.",
            kind: K::Bundle {
                includes: &["pdf_to_word", "ocr_pdf"],
            },
            base_price_cents: 1499,
            unit: Flat,
            enabled: true,
            tags: &["bundle", "emergency", "priority", "fast"],
            estimated_time: "5 minutes",
        },
        Service {
            id: "emergency_bundle_pro",
            name: "Emergency Bundle - Pro",
            description: "Complete priority document package with cleanup.",
            kind: K::Bundle {
                includes: &[
                    "pdf_to_word",
                    "word_to_pdf",
                    "ocr_pdf",
                    "document_scan_cleanup",
                ],
            },
            base_price_cents: 2999,
            unit: Flat,
            enabled: true,
            tags: &["bundle", "emergency", "premium", "complete"],
            estimated_time: "10 minutes",
        },
        Service {
            id: "legal_bundle",
            name: "Legal Document Bundle",
            description: "OCR, conversion, merge, and legal fax in one package.",
            kind: K::Bundle {
                includes: &["ocr_pdf", "pdf_to_word", "pdf_merge", "fax_legal"],
            },
            base_price_cents: 3999,
            unit: Flat,
            enabled: true,
            tags: &["bundle", "legal", "court", "complete"],
            estimated_time: "15 minutes",
        },
        Service {
            id: "medical_bundle",
            name: "Medical Records Bundle",
            description: "HIPAA-aware processing, fax, and disposal package.",
            kind: K::Bundle {
                includes: &["ocr_pdf", "pdf_to_word", "fax_hipaa", "secure_shred_hipaa"],
            },
            base_price_cents: 4499,
            unit: Flat,
            enabled: true,
            tags: &["bundle", "medical", "hipaa", "healthcare"],
            estimated_time: "15 minutes",
        },
        Service {
            id: "business_bundle",
            name: "Business Document Bundle",
            description: "Conversion suite for corporate paperwork.",
            kind: K::Bundle {
                includes: &["pdf_to_word", "word_to_pdf", "excel_to_pdf", "pdf_merge"],
            },
            base_price_cents: 2499,
            unit: Flat,
            enabled: true,
            tags: &["bundle", "business", "corporate"],
            estimated_time: "10 minutes",
        },
        // Grievance services
        Service {
            id: "grievance_report",
            name: "Grievance Report Package",
            description: "Prepare a formal grievance report for submission.",
            kind: K::Grievance {
                required_fields: &["incident_date", "authority_to_submit", "summary"],
            },
            base_price_cents: 1999,
            unit: PerFile,
            enabled: true,
            tags: &["legal", "grievance", "report", "complaint"],
            estimated_time: "15 minutes",
        },
        Service {
            id: "grievance_union",
            name: "Union Grievance Filing",
            description: "Prepare a union grievance filing with contract references.",
            kind: K::Grievance {
                required_fields: &["union_local", "incident_date", "contract_article", "summary"],
            },
            base_price_cents: 2499,
            unit: PerFile,
            enabled: true,
            tags: &["legal", "grievance", "union", "labor"],
            estimated_time: "15 minutes",
        },
        Service {
            id: "eeoc_complaint",
            name: "EEOC Complaint Prep",
            description: "Prepare documents for EEOC discrimination complaints.",
            kind: K::Grievance {
                required_fields: &[
                    "incident_date",
                    "discrimination_type",
                    "employer_name",
                    "summary",
                ],
            },
            base_price_cents: 2999,
            unit: Flat,
            enabled: true,
            tags: &["legal", "eeoc", "discrimination", "complaint"],
            estimated_time: "20 minutes",
        },
        // Legal services
        Service {
            id: "foia_request",
            name: "FOIA Request Prep",
            description: "Prepare Freedom of Information Act request documents.",
            kind: K::Legal {
                required_fields: &["agency_name", "records_description"],
            },
            base_price_cents: 1499,
            unit: Flat,
            enabled: true,
            tags: &["legal", "foia", "government", "request"],
            estimated_time: "10 minutes",
        },
        Service {
            id: "redaction_basic",
            name: "Document Redaction",
            description: "Redact sensitive information from documents.",
            kind: K::Legal { required_fields: &[] },
            base_price_cents: 599,
            unit: PerPage,
            enabled: true,
            tags: &["redaction", "privacy", "sensitive", "legal"],
            estimated_time: "1 minute per page",
        },
        Service {
            id: "contract_review_prep",
            name: "Contract Review Prep",
            description: "Prepare contracts for legal review with OCR and formatting.",
            kind: K::Legal { required_fields: &[] },
            base_price_cents: 1299,
            unit: PerFile,
            enabled: true,
            tags: &["legal", "contract", "review", "preparation"],
            estimated_time: "10 minutes",
        },
        Service {
            id: "bates_numbering",
            name: "Bates Numbering",
            description: "Apply Bates numbering to legal documents.",
            kind: K::Legal { required_fields: &[] },
            base_price_cents: 499,
            unit: PerFile,
            enabled: true,
            tags: &["legal", "bates", "numbering", "discovery"],
            estimated_time: "30 seconds",
        },
        // Notary services
        Service {
            id: "notary_acknowledgment",
            name: "Notary Acknowledgment",
            description: "Remote online notarization for acknowledgments.",
            kind: K::Notary {
                required_fields: &["signer_name", "document_type"],
            },
            base_price_cents: 2499,
            unit: PerFile,
            enabled: true,
            tags: &["notary", "acknowledgment", "remote", "ron"],
            estimated_time: "15 minutes",
        },
        Service {
            id: "notary_affidavit",
            name: "Notarized Affidavit",
            description: "Remote notarization for sworn affidavits.",
            kind: K::Notary {
                required_fields: &["affiant_name", "subject_matter"],
            },
            base_price_cents: 2999,
            unit: PerFile,
            enabled: true,
            tags: &["notary", "affidavit", "sworn", "legal"],
            estimated_time: "20 minutes",
        },
        Service {
            id: "notary_apostille_prep",
            name: "Apostille Preparation",
            description: "Prepare documents for apostille certification.",
            kind: K::Notary {
                required_fields: &["destination_country", "document_type"],
            },
            base_price_cents: 1999,
            unit: PerFile,
            enabled: true,
            tags: &["notary", "apostille", "international", "certification"],
            estimated_time: "10 minutes",
        },
        // Medical document services
        Service {
            id: "medical_records_request",
            name: "Medical Records Request",
            description: "Prepare HIPAA-compliant medical records request forms.",
            kind: K::Medical {
                required_fields: &["patient_name", "provider_name", "date_range"],
            },
            base_price_cents: 999,
            unit: PerFile,
            enabled: true,
            tags: &["medical", "hipaa", "records", "request"],
            estimated_time: "10 minutes",
        },
        Service {
            id: "medical_authorization",
            name: "Medical Authorization Form",
            description: "Generate HIPAA authorization forms for records release.",
            kind: K::Medical {
                required_fields: &["patient_name", "recipient_name"],
            },
            base_price_cents: 799,
            unit: PerFile,
            enabled: true,
            tags: &["medical", "hipaa", "authorization", "release"],
            estimated_time: "5 minutes",
        },
        Service {
            id: "medical_billing_review",
            name: "Medical Bill Review",
            description: "OCR and organize medical billing statements.",
            kind: K::Medical { required_fields: &[] },
            base_price_cents: 599,
            unit: PerFile,
            enabled: true,
            tags: &["medical", "billing", "insurance", "review"],
            estimated_time: "5 minutes",
        },
        // Financial document services
        Service {
            id: "tax_document_prep",
            name: "Tax Document Organization",
            description: "Organize and prepare tax documents for filing.",
            kind: K::Financial,
            base_price_cents: 1499,
            unit: Flat,
            enabled: true,
            tags: &["financial", "tax", "irs", "preparation"],
            estimated_time: "15 minutes",
        },
        Service {
            id: "bank_statement_ocr",
            name: "Bank Statement OCR",
            description: "Extract transaction data from bank statements.",
            kind: K::Financial,
            base_price_cents: 499,
            unit: PerFile,
            enabled: true,
            tags: &["financial", "bank", "statement", "extraction"],
            estimated_time: "30 seconds",
        },
        Service {
            id: "loan_document_prep",
            name: "Loan Application Prep",
            description: "Organize documents for loan applications.",
            kind: K::Financial,
            base_price_cents: 1999,
            unit: Flat,
            enabled: true,
            tags: &["financial", "loan", "mortgage", "application"],
            estimated_time: "20 minutes",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::builtin().expect("builtin catalog is valid")
    }

    #[test]
    fn test_builtin_catalog_validates() {
        let cat = catalog();
        assert!(cat.len() > 30);
    }

    #[test]
    fn test_lookup_known_service() {
        let cat = catalog();
        let service = cat.lookup("pdf_to_word").expect("pdf_to_word exists");
        assert_eq!(service.base_price_cents, 299);
        assert_eq!(service.unit, PricingUnit::PerFile);
        assert_eq!(service.service_type(), ServiceType::Conversion);
    }

    #[test]
    fn test_lookup_unknown_returns_none() {
        assert!(catalog().lookup("pdf_to_morse").is_none());
    }

    #[test]
    fn test_bundle_components_resolve_to_non_bundles() {
        let cat = catalog();
        for service in cat.list_enabled(&CatalogFilter {
            service_type: Some(ServiceType::Bundle),
            ..Default::default()
        }) {
            let includes = service.kind.includes();
            assert!(!includes.is_empty(), "{} has no components", service.id);
            for id in includes {
                let component = cat.lookup(id).expect("component exists");
                assert!(component.enabled);
                assert_ne!(component.service_type(), ServiceType::Bundle);
            }
        }
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let cat = catalog();
        let all = cat.list_enabled(&CatalogFilter::default());
        let conversions = cat.list_enabled(&CatalogFilter {
            service_type: Some(ServiceType::Conversion),
            ..Default::default()
        });
        // Filtered list order must be a subsequence of the full list order.
        let mut all_iter = all.iter();
        for c in &conversions {
            assert!(all_iter.any(|s| s.id == c.id));
        }
        assert_eq!(conversions.first().map(|s| s.id), Some("pdf_to_word"));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let cat = catalog();
        let upper = cat.list_enabled(&CatalogFilter {
            search: Some("HIPAA".to_string()),
            ..Default::default()
        });
        let lower = cat.list_enabled(&CatalogFilter {
            search: Some("hipaa".to_string()),
            ..Default::default()
        });
        assert!(!upper.is_empty());
        assert_eq!(
            upper.iter().map(|s| s.id).collect::<Vec<_>>(),
            lower.iter().map(|s| s.id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_tag_filter() {
        let cat = catalog();
        let shred = cat.list_enabled(&CatalogFilter {
            tag: Some("shred".to_string()),
            ..Default::default()
        });
        assert_eq!(shred.len(), 3);
        assert!(shred.iter().all(|s| s.service_type() == ServiceType::Shredding));
    }

    #[test]
    fn test_nested_bundle_rejected() {
        let services = vec![
            Service {
                id: "inner_bundle",
                name: "Inner",
                description: "",
                kind: ServiceKind::Bundle { includes: &[] },
                base_price_cents: 100,
                unit: PricingUnit::Flat,
                enabled: true,
                tags: &[],
                estimated_time: "",
            },
            Service {
                id: "outer_bundle",
                name: "Outer",
                description: "",
                kind: ServiceKind::Bundle {
                    includes: &["inner_bundle"],
                },
                base_price_cents: 200,
                unit: PricingUnit::Flat,
                enabled: true,
                tags: &[],
                estimated_time: "",
            },
        ];
        assert!(Catalog::new(services).is_err());
    }

    #[test]
    fn test_dangling_bundle_reference_rejected() {
        let services = vec![Service {
            id: "broken_bundle",
            name: "Broken",
            description: "",
            kind: ServiceKind::Bundle {
                includes: &["missing_service"],
            },
            base_price_cents: 100,
            unit: PricingUnit::Flat,
            enabled: true,
            tags: &[],
            estimated_time: "",
        }];
        assert!(Catalog::new(services).is_err());
    }
}
