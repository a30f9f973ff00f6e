use super::types::{FileKind, ResolvedFile};
use crate::utils::compute_hash;
use thiserror::Error;
use tokio::fs;
use tracing::warn;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("File not found: {label} (expected at {path})")]
    FileMissingOnDisk { label: String, path: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// What the presentation layer delivers for one resolved file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    Link {
        url: String,
    },
    Download {
        file_name: String,
        bytes: Vec<u8>,
        sha256: String,
    },
}

/// Whether the file can be delivered right now
pub fn is_available(file: &ResolvedFile) -> bool {
    file.local_path().map(|p| p.is_file()).unwrap_or(true)
}

/// Read a resolved file for delivery. Local files are read whole.
pub async fn fetch_document(file: &ResolvedFile) -> Result<Document, FetchError> {
    let path = match (file.kind, file.local_path()) {
        (FileKind::Local, Some(path)) => path,
        _ => {
            return Ok(Document::Link {
                url: file.target.clone(),
            })
        }
    };

    if !path.is_file() {
        warn!(path = %path.display(), "Resolved document is missing on disk");
        return Err(FetchError::FileMissingOnDisk {
            label: file.label.clone(),
            path: file.target.clone(),
        });
    }

    let bytes = fs::read(path).await?;
    let sha256 = compute_hash(&bytes);

    Ok(Document::Download {
        file_name: file.label.clone(),
        bytes,
        sha256,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::classify;

    #[tokio::test]
    async fn test_fetch_remote_is_link() {
        let file = classify("https://example.com/doc.pdf", std::path::Path::new("Pareceres"));
        assert!(is_available(&file));
        let doc = fetch_document(&file).await.unwrap();
        assert_eq!(
            doc,
            Document::Link {
                url: "https://example.com/doc.pdf".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_local_reads_bytes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ana.pdf"), b"hello world").unwrap();

        let file = classify("ana.pdf", dir.path());
        assert!(is_available(&file));

        match fetch_document(&file).await.unwrap() {
            Document::Download {
                file_name,
                bytes,
                sha256,
            } => {
                assert_eq!(file_name, "ana.pdf");
                assert_eq!(bytes, b"hello world");
                assert_eq!(
                    sha256,
                    "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
                );
            }
            other => panic!("Expected download, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_missing_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = classify("missing.pdf", dir.path());
        assert!(!is_available(&file));

        let err = fetch_document(&file).await.unwrap_err();
        assert!(matches!(err, FetchError::FileMissingOnDisk { ref label, .. } if label == "missing.pdf"));
    }

    #[tokio::test]
    async fn test_fetch_directory_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let file = classify("sub", dir.path());
        assert!(matches!(
            fetch_document(&file).await,
            Err(FetchError::FileMissingOnDisk { .. })
        ));
    }
}
