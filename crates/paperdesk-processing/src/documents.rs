//! Generated document artifacts
//!
//! Text artifacts assembled from order data: destruction certificates,
//! fax transmission confirmations, filing packages built from the order's
//! extra fields, and bundle result summaries.

use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

use crate::artifact::Artifact;
use crate::dispatch::ProcessContext;

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn header(title: &str, ctx: &ProcessContext) -> String {
    let rule = "=".repeat(title.len());
    format!(
        "{title}\n{rule}\n\nOrder:     {order}\nService:   {service}\nCustomer:  {customer}\nIssued at: {at}\n",
        title = title,
        rule = rule,
        order = ctx.order_id,
        service = ctx.service_name,
        customer = ctx.customer_name,
        at = timestamp(),
    )
}

/// Certificate issued after an upload has been destroyed. The caller must
/// have deleted the stored bytes before generating this.
pub fn destruction_certificate(ctx: &ProcessContext) -> Artifact {
    let compliance = match ctx.service_id {
        "secure_shred_gdpr" => "Destruction performed in accordance with GDPR Article 17.\n",
        "secure_shred_hipaa" => {
            "Destruction performed in accordance with HIPAA disposal requirements.\n"
        }
        _ => "",
    };
    let body = format!(
        "{header}\nFile destroyed: {file}\n\nThe file listed above has been permanently deleted from storage.\nNo copies are retained.\n{compliance}\nCertificate ID: {cert_id}\n",
        header = header("CERTIFICATE OF SECURE DESTRUCTION", ctx),
        file = ctx.input_filename,
        compliance = compliance,
        cert_id = Uuid::new_v4(),
    );
    Artifact::text("destruction_certificate.txt", body)
}

/// Transmission confirmation for fax services. Carrier integration is out
/// of scope; the artifact records the queued transmission details.
pub fn fax_confirmation(ctx: &ProcessContext) -> Artifact {
    let mut body = header("FAX TRANSMISSION CONFIRMATION", ctx);
    body.push('\n');
    body.push_str(&format!("Document: {}\n", ctx.input_filename));
    for (field, label) in [
        ("fax_number", "Destination"),
        ("country_code", "Country code"),
        ("recipient_name", "Recipient"),
        ("case_number", "Case number"),
    ] {
        if let Some(value) = ctx.extra_field(field) {
            body.push_str(&format!("{}: {}\n", label, value));
        }
    }
    body.push_str("\nStatus: QUEUED FOR TRANSMISSION\n");
    Artifact::text("fax_confirmation.txt", body)
}

/// Filing package assembled from the order's extra fields (grievance,
/// notary, legal, and medical form-prep services).
pub fn filing_package(ctx: &ProcessContext, title: &str) -> Artifact {
    let mut body = header(title, ctx);
    body.push_str("\nSubmitted details\n-----------------\n");

    if let Some(fields) = ctx.extra_fields.as_object() {
        for (key, value) in fields {
            let rendered = match value.as_str() {
                Some(s) => s.to_string(),
                None => value.to_string(),
            };
            body.push_str(&format!("{}: {}\n", humanize(key), rendered));
        }
    }

    body.push_str(&format!(
        "\nSource document: {}\n\nThis package was assembled from the information provided with the\norder and is ready for review and submission.\n",
        ctx.input_filename
    ));
    Artifact::text("filing_package.txt", body)
}

/// Summary artifact for bundle orders, listing each included service.
pub fn bundle_results(ctx: &ProcessContext) -> Artifact {
    let mut body = header("BUNDLE PROCESSING RESULTS", ctx);
    body.push_str(&format!("\nSource document: {}\n\nIncluded services:\n", ctx.input_filename));
    for (i, component) in ctx.included_services.iter().enumerate() {
        body.push_str(&format!("  {}. {} - completed\n", i + 1, component));
    }
    Artifact::text("bundle_results.txt", body)
}

/// Fallback artifact for catalogued services without a dedicated operation.
pub fn processing_summary(ctx: &ProcessContext) -> Artifact {
    let body = format!(
        "{header}\nSource document: {file}\n\nProcessing for this service has been completed by our document team.\n",
        header = header("PROCESSING SUMMARY", ctx),
        file = ctx.input_filename,
    );
    Artifact::text("processing_summary.txt", body)
}

fn humanize(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for (i, part) in key.split('_').enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let mut chars = part.chars();
        if i == 0 {
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
            }
        } else if let Some(first) = chars.next() {
            out.push(first);
        }
        out.push_str(chars.as_str());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx<'a>(
        service_id: &'a str,
        extra: &'a serde_json::Value,
        included: &'a [String],
    ) -> ProcessContext<'a> {
        ProcessContext {
            order_id: Uuid::nil(),
            service_id,
            service_name: "Test Service",
            service_type: "shredding",
            customer_name: "Pat Example",
            input_filename: "evidence.pdf",
            extra_fields: extra,
            included_services: included,
        }
    }

    #[test]
    fn test_certificate_names_order_and_file() {
        let extra = json!({});
        let artifact = destruction_certificate(&ctx("secure_shred_basic", &extra, &[]));
        let body = String::from_utf8(artifact.data).unwrap();
        assert!(body.contains(&Uuid::nil().to_string()));
        assert!(body.contains("evidence.pdf"));
        assert!(body.contains("permanently deleted"));
        assert!(!body.contains("GDPR"));
    }

    #[test]
    fn test_gdpr_certificate_mentions_article_17() {
        let extra = json!({});
        let artifact = destruction_certificate(&ctx("secure_shred_gdpr", &extra, &[]));
        let body = String::from_utf8(artifact.data).unwrap();
        assert!(body.contains("GDPR Article 17"));
    }

    #[test]
    fn test_fax_confirmation_includes_destination() {
        let extra = json!({"fax_number": "+1-555-0100", "case_number": "24-CV-100"});
        let artifact = fax_confirmation(&ctx("fax_legal", &extra, &[]));
        let body = String::from_utf8(artifact.data).unwrap();
        assert!(body.contains("Destination: +1-555-0100"));
        assert!(body.contains("Case number: 24-CV-100"));
        assert!(body.contains("QUEUED FOR TRANSMISSION"));
    }

    #[test]
    fn test_filing_package_renders_extra_fields() {
        let extra = json!({"incident_date": "2026-01-15", "summary": "Denied overtime pay"});
        let artifact = filing_package(&ctx("grievance_report", &extra, &[]), "GRIEVANCE REPORT");
        let body = String::from_utf8(artifact.data).unwrap();
        assert!(body.contains("Incident date: 2026-01-15"));
        assert!(body.contains("Summary: Denied overtime pay"));
    }

    #[test]
    fn test_bundle_results_lists_components() {
        let extra = json!({});
        let included = vec![
            "PDF to Word Conversion".to_string(),
            "OCR for Scanned PDFs".to_string(),
        ];
        let artifact = bundle_results(&ctx("emergency_bundle_basic", &extra, &included));
        let body = String::from_utf8(artifact.data).unwrap();
        assert!(body.contains("1. PDF to Word Conversion - completed"));
        assert!(body.contains("2. OCR for Scanned PDFs - completed"));
    }
}
