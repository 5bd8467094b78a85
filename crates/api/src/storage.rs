//! Physical storage for uploaded files.

use std::path::{Path, PathBuf};

use alumni_core::uploads::UploadKind;

/// Writes uploads below `<root>/<kind directory>/`.
#[derive(Debug, Clone)]
pub struct UploadStorage {
    root: PathBuf,
}

impl UploadStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Write `data` as `file_name` in the directory for `kind`, creating it
    /// if needed. Returns the path written.
    pub async fn save(
        &self,
        kind: UploadKind,
        file_name: &str,
        data: &[u8],
    ) -> std::io::Result<PathBuf> {
        let dir = self.root.join(kind.directory());
        tokio::fs::create_dir_all(&dir).await?;
        let path = dir.join(file_name);
        tokio::fs::write(&path, data).await?;
        Ok(path)
    }

    /// Remove a previously written file. Failures are logged, not returned.
    pub async fn remove_best_effort(&self, path: &Path) {
        if let Err(e) = tokio::fs::remove_file(path).await {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove uploaded file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_creates_kind_directory() {
        let dir = tempfile::tempdir().unwrap();
        let storage = UploadStorage::new(dir.path());

        let path = storage
            .save(UploadKind::Certificate, "SERTIF_1_x.pdf", b"%PDF-1.4")
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("sertifikat").join("SERTIF_1_x.pdf"));
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"%PDF-1.4");

        storage.remove_best_effort(&path).await;
        assert!(!path.exists());
        // Second removal only logs.
        storage.remove_best_effort(&path).await;
    }
}
