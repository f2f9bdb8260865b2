//! Local files staged for upload to a release.

use crate::error::{ArtifactError, Result};
use bytes::Bytes;
use std::path::{Path, PathBuf};

/// One local file to publish as a release asset
///
/// The asset name is the final segment of the path, so `dist/app.tar.gz`
/// is uploaded as `app.tar.gz`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    path: PathBuf,
    name: String,
}

/// File content ready to be sent to the upload endpoint
#[derive(Debug, Clone)]
pub struct ArtifactPayload {
    /// Raw file bytes
    pub bytes: Bytes,
    /// Size reported by the file metadata
    pub content_length: u64,
}

impl Artifact {
    /// Create an artifact from a filesystem path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        Self { path, name }
    }

    /// Path the file bytes are read from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Asset name used for upload and replace matching
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read the file content and size from disk
    ///
    /// Any IO failure is reported as [`ArtifactError::ReadFailed`] carrying
    /// this artifact's path.
    pub async fn read_payload(&self) -> Result<ArtifactPayload> {
        let metadata = tokio::fs::metadata(&self.path)
            .await
            .map_err(|source| self.read_failed(source))?;

        let content = tokio::fs::read(&self.path)
            .await
            .map_err(|source| self.read_failed(source))?;

        Ok(ArtifactPayload {
            bytes: Bytes::from(content),
            content_length: metadata.len(),
        })
    }

    fn read_failed(&self, source: std::io::Error) -> ArtifactError {
        ArtifactError::ReadFailed {
            path: self.path.clone(),
            source,
        }
    }
}

impl From<PathBuf> for Artifact {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&Path> for Artifact {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

impl From<&str> for Artifact {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReleaseError;

    #[test]
    fn test_name_is_final_segment() {
        let artifact = Artifact::new("a/b/art1.tar.gz");
        assert_eq!(artifact.name(), "art1.tar.gz");
        assert_eq!(artifact.path(), Path::new("a/b/art1.tar.gz"));
    }

    #[test]
    fn test_bare_file_name() {
        assert_eq!(Artifact::new("art2").name(), "art2");
    }

    #[cfg(windows)]
    #[test]
    fn test_windows_separator() {
        assert_eq!(Artifact::new(r"dist\win\app.exe").name(), "app.exe");
    }

    #[test]
    fn test_name_falls_back_to_path_without_final_segment() {
        assert_eq!(Artifact::new("..").name(), "..");
    }

    #[tokio::test]
    async fn test_read_payload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"artful facts").expect("write fixture");

        let payload = Artifact::new(&path).read_payload().await.expect("read");
        assert_eq!(payload.content_length, 12);
        assert_eq!(&payload.bytes[..], b"artful facts");
    }

    #[tokio::test]
    async fn test_read_payload_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing.bin");

        let err = Artifact::new(&path).read_payload().await.unwrap_err();
        match err {
            ReleaseError::Artifact(ArtifactError::ReadFailed { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
