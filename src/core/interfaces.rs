use crate::core::models::*;
use crate::utils::Result;
use async_trait::async_trait;
use std::path::Path;

/// File system operations interface
#[async_trait]
pub trait FileSystemService: Send + Sync {
    async fn read_file(&self, path: &Path) -> Result<String>;
    async fn write_file(&self, path: &Path, content: &str) -> Result<()>;
    async fn create_directory(&self, path: &Path) -> Result<()>;
}

/// External optimizing compiler interface. The compiler itself is an
/// external collaborator; this seam only shapes its inputs (staged sources,
/// chunk flags, wrappers) and receives the artifact locations back.
#[async_trait]
pub trait CompilerService: Send + Sync {
    async fn compile(
        &self,
        graph: &ChunkGraph,
        wrappers: &[String],
        staged_files: &[std::path::PathBuf],
        config: &BuildConfig,
    ) -> Result<Vec<CompiledArtifact>>;
}

/// Build service interface
#[async_trait]
pub trait BuildService: Send + Sync {
    async fn build(&self, config: &BuildConfig) -> Result<BuildResult>;
}
