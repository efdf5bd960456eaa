//! Storage key helpers
//!
//! Customer uploads live under `uploads/{file_id}.{ext}`, processed
//! artifacts under `outputs/{order_id}_{label}.{ext}`. Extensions are
//! sanitized to lowercase alphanumerics so a hostile filename cannot
//! influence the path.

use uuid::Uuid;

const DEFAULT_EXT: &str = "bin";
const MAX_EXT_LEN: usize = 8;

/// Extract a safe lowercase extension from a client-supplied filename.
pub fn safe_extension(filename: &str) -> String {
    let ext = filename
        .rsplit('.')
        .next()
        .filter(|e| e.len() < filename.len())
        .unwrap_or(DEFAULT_EXT)
        .to_lowercase();

    if ext.is_empty()
        || ext.len() > MAX_EXT_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        DEFAULT_EXT.to_string()
    } else {
        ext
    }
}

/// Storage key for a customer upload.
pub fn upload_key(file_id: Uuid, original_filename: &str) -> String {
    format!("uploads/{}.{}", file_id, safe_extension(original_filename))
}

/// Storage key for a processed artifact.
pub fn output_key(order_id: Uuid, label: &str, extension: &str) -> String {
    format!("outputs/{}_{}.{}", order_id, label, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_extension_normal() {
        assert_eq!(safe_extension("report.PDF"), "pdf");
        assert_eq!(safe_extension("scan.jpeg"), "jpeg");
    }

    #[test]
    fn test_safe_extension_hostile_or_missing() {
        assert_eq!(safe_extension("noextension"), "bin");
        assert_eq!(safe_extension("weird.p/df"), "bin");
        assert_eq!(safe_extension("dots..."), "bin");
        assert_eq!(safe_extension("file.verylongextension"), "bin");
    }

    #[test]
    fn test_upload_key_shape() {
        let id = Uuid::new_v4();
        let key = upload_key(id, "contract.pdf");
        assert_eq!(key, format!("uploads/{}.pdf", id));
    }

    #[test]
    fn test_output_key_shape() {
        let id = Uuid::new_v4();
        let key = output_key(id, "output", "txt");
        assert_eq!(key, format!("outputs/{}_output.txt", id));
    }
}
