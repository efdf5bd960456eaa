use thiserror::Error;

/// Processing operation errors
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Unknown service: {0}")]
    UnknownService(String),

    #[error("Empty input file")]
    EmptyInput,

    #[error("PDF extraction failed: {0}")]
    PdfExtraction(String),

    #[error("Image decoding failed: {0}")]
    ImageDecode(String),

    #[error("Image encoding failed: {0}")]
    ImageEncode(String),

    #[error("Missing order field: {0}")]
    MissingField(String),
}
