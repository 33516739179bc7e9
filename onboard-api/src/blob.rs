//! Upload storage
//!
//! Uploaded documents are written to the uploads directory as
//! `<unix-millis>-<original-file-name>`. The returned path is what ends up
//! in the employee record.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use onboard_common::{time, Result};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Writes uploaded files below one directory
#[derive(Debug, Clone)]
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write one upload and return its stored path
    ///
    /// Never overwrites: a name already taken gets a numeric suffix after
    /// the timestamp.
    pub async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.root).await?;

        let name = sanitize_file_name(original_name);
        let stamp = time::unix_millis();

        let mut attempt = 0u32;
        loop {
            let file_name = if attempt == 0 {
                format!("{}-{}", stamp, name)
            } else {
                format!("{}-{}-{}", stamp, attempt, name)
            };
            let path = self.root.join(file_name);

            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(mut file) => {
                    file.write_all(bytes).await?;
                    file.flush().await?;
                    debug!("Stored upload {} ({} bytes)", path.display(), bytes.len());
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// Last path component of a client-supplied name, limited to a safe
/// character set
pub fn sanitize_file_name(original_name: &str) -> String {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

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

    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        "upload".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\jane\\cv.pdf"), "cv.pdf");
    }

    #[test]
    fn test_sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize_file_name("my resume (final).pdf"), "my_resume__final_.pdf");
        assert_eq!(sanitize_file_name(".hidden"), "hidden");
        assert_eq!(sanitize_file_name(""), "upload");
        assert_eq!(sanitize_file_name("..."), "upload");
    }

    #[tokio::test]
    async fn test_store_writes_bytes_with_timestamp_prefix() {
        let temp_dir = TempDir::new().unwrap();
        let blobs = BlobStore::new(temp_dir.path().join("uploads"));

        let path = blobs.store("cv.pdf", b"%PDF-1.4").await.unwrap();

        assert!(path.starts_with(blobs.root()));
        let file_name = path.file_name().unwrap().to_string_lossy().to_string();
        let (stamp, rest) = file_name.split_once('-').unwrap();
        assert!(stamp.parse::<i64>().is_ok());
        assert_eq!(rest, "cv.pdf");
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4");
    }

    #[tokio::test]
    async fn test_store_never_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let blobs = BlobStore::new(temp_dir.path().to_path_buf());

        let first = blobs.store("same.txt", b"one").await.unwrap();
        let second = blobs.store("same.txt", b"two").await.unwrap();

        assert_ne!(first, second);
        assert_eq!(std::fs::read(&first).unwrap(), b"one");
        assert_eq!(std::fs::read(&second).unwrap(), b"two");
    }
}
