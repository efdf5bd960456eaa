/// A processed output ready to be stored and delivered.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Customer-facing file name (e.g. "extracted_text.txt")
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl Artifact {
    pub fn text(file_name: impl Into<String>, body: String) -> Self {
        Artifact {
            file_name: file_name.into(),
            content_type: "text/plain; charset=utf-8".to_string(),
            data: body.into_bytes(),
        }
    }

    pub fn binary(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Artifact {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Extension of the artifact file name, for storage-key construction.
    pub fn extension(&self) -> &str {
        self.file_name.rsplit('.').next().unwrap_or("bin")
    }
}
