// Attachment storage: uploaded files live under a server-controlled
// directory and records reference them by file name only.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Reduce an uploaded file name to a safe basename: path components are
/// stripped and anything outside `[A-Za-z0-9._-]` becomes `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches('.');
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Write an uploaded file into `uploads_dir` and return the stored name the
/// record should reference. An existing file of the same name is replaced.
pub fn store_attachment(
    uploads_dir: &Path,
    original_name: &str,
    bytes: &[u8],
) -> Result<String, StoreError> {
    let file_name = sanitize_file_name(original_name);
    fs::create_dir_all(uploads_dir).map_err(|e| StoreError::Io(e.to_string()))?;
    fs::write(uploads_dir.join(&file_name), bytes).map_err(|e| StoreError::Io(e.to_string()))?;
    Ok(file_name)
}

/// Direct file-by-name lookup. Returns None for names that do not resolve
/// to a stored file; the name is sanitized again so a crafted reference
/// cannot escape the uploads directory.
pub fn attachment_path(uploads_dir: &Path, file_name: &str) -> Option<PathBuf> {
    let path = uploads_dir.join(sanitize_file_name(file_name));
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn sanitize_strips_paths_and_odd_characters() {
        assert_eq!(sanitize_file_name("logo.png"), "logo.png");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("a b?.png"), "a_b_.png");
        assert_eq!(sanitize_file_name("..."), "file");
    }

    #[test]
    fn store_and_lookup() {
        let dir = tempdir().unwrap();
        let uploads = dir.path().join("uploads");

        let stored = store_attachment(&uploads, "invoice 2025.pdf", b"pdf bytes").unwrap();
        assert_eq!(stored, "invoice_2025.pdf");

        let path = attachment_path(&uploads, &stored).unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"pdf bytes");

        assert!(attachment_path(&uploads, "missing.pdf").is_none());
    }
}
