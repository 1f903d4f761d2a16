use crate::core::interfaces::FileSystemService;
use crate::utils::{Result, StratumError};
use std::path::Path;
use tokio::fs;

pub struct TokioFileSystemService;

#[async_trait::async_trait]
impl FileSystemService for TokioFileSystemService {
    async fn read_file(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).await.map_err(StratumError::Io)
    }

    async fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            self.create_directory(parent).await?;
        }

        fs::write(path, content).await.map_err(StratumError::Io)
    }

    async fn create_directory(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).await.map_err(StratumError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_and_read_round_trip() {
        let fs_service = TokioFileSystemService;
        let temp_dir = tempdir().unwrap();
        let test_file = temp_dir.path().join("nested/dir/test.js");

        let content = "console.log('stratum');";
        fs_service.write_file(&test_file, content).await.unwrap();

        let read_content = fs_service.read_file(&test_file).await.unwrap();
        assert_eq!(content, read_content);
        assert!(test_file.exists());
    }

    #[tokio::test]
    async fn test_read_missing_file_is_io_error() {
        let fs_service = TokioFileSystemService;
        let temp_dir = tempdir().unwrap();

        let err = fs_service
            .read_file(&temp_dir.path().join("absent.js"))
            .await
            .unwrap_err();
        assert!(matches!(err, StratumError::Io(_)));
    }
}
