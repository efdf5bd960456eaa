//! PDF text-layer extraction
//!
//! Extraction works on the embedded text layer of digital PDFs. Scanned
//! image-only PDFs yield little or no text; that limitation is stated in
//! the catalog descriptions.

use crate::error::ProcessError;

/// Extract the text layer from a PDF byte buffer.
pub fn extract_pdf_text(data: &[u8]) -> Result<String, ProcessError> {
    if data.is_empty() {
        return Err(ProcessError::EmptyInput);
    }
    pdf_extract::extract_text_from_mem(data)
        .map_err(|e| ProcessError::PdfExtraction(e.to_string()))
}

/// Extract PDF text, or report when the document has no usable text layer.
pub fn extract_pdf_text_or_note(data: &[u8]) -> Result<String, ProcessError> {
    let text = extract_pdf_text(data)?;
    if text.trim().is_empty() {
        Ok("[No extractable text layer found in this document]".to_string())
    } else {
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(extract_pdf_text(&[]), Err(ProcessError::EmptyInput)));
    }

    #[test]
    fn test_garbage_input_fails_cleanly() {
        let result = extract_pdf_text(b"this is not a pdf");
        assert!(matches!(result, Err(ProcessError::PdfExtraction(_))));
    }
}
