use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Reads data files relative to a base directory on the local disk.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::BotError;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_relative_to_base() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("links.txt"), "a: b").unwrap();

        let storage = LocalStorage::new(temp_dir.path());
        assert_eq!(storage.read_file("links.txt").await.unwrap(), b"a: b");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());
        assert!(matches!(
            storage.read_file("file.json").await,
            Err(BotError::IoError(_))
        ));
    }
}
