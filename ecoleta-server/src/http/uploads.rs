//! Uploaded image storage
//!
//! Images land in a flat directory that is also served under `/uploads`.
//! Stored names are `<12 hex chars>-<original name>` so two uploads of
//! `photo.jpg` never collide.

use std::path::{Path, PathBuf};

/// Upload storage error
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("failed to write upload {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to remove upload {path}: {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create uploads directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Directory-backed image store
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the uploads directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<(), UploadError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| UploadError::CreateDir {
                path: self.dir.clone(),
                source,
            })
    }

    /// Write an image under a name from [`stored_name`].
    pub async fn save(&self, name: &str, bytes: &[u8]) -> Result<(), UploadError> {
        let path = self.dir.join(name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| UploadError::Write { path, source })?;

        tracing::debug!(file = %name, size = bytes.len(), "stored upload");
        Ok(())
    }

    /// Delete a stored image. A file that is already gone is not an error.
    pub async fn remove(&self, name: &str) -> Result<(), UploadError> {
        let path = self.dir.join(name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(UploadError::Remove { path, source }),
        }
    }
}

/// Build a unique, path-safe file name from the client's file name.
pub fn stored_name(original_name: Option<&str>) -> String {
    let prefix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}", &prefix[..12], sanitize(original_name.unwrap_or_default()))
}

/// Keep only the final path component and `[A-Za-z0-9._-]`.
fn sanitize(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "image".to_owned()
    } else {
        cleaned.to_owned()
    }
}
