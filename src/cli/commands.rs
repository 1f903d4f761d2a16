use crate::core::{interfaces::*, services::*};
use crate::infrastructure::{ClosureCompilerService, TokioFileSystemService};
use crate::utils::{ConfigLoader, Logger, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "stratum")]
#[command(about = "Stratum - dependency-ordered chunk builds for compiled JS libraries")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Link, transform and compile all declared chunks
    Build {
        /// Project root (location of stratum.config.json)
        #[arg(short, long, default_value = ".")]
        root: String,
        /// Output directory for compiled artifacts
        #[arg(short, long)]
        outdir: Option<String>,
        /// Compiler optimization level override
        #[arg(long)]
        compilation_level: Option<String>,
    },
    /// Resolve and print the chunk dependency graph
    Graph {
        /// Project root (location of stratum.config.json)
        #[arg(short, long, default_value = ".")]
        root: String,
    },
    /// Show build tool information
    Info,
}

pub struct CliHandler;

impl CliHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn run(&self) -> Result<()> {
        // Initialize logging
        Logger::init();

        let cli = Cli::parse();

        match cli.command {
            Commands::Build {
                root,
                outdir,
                compilation_level,
            } => {
                self.handle_build_command(&root, outdir.as_deref(), compilation_level.as_deref())
                    .await
            }
            Commands::Graph { root } => self.handle_graph_command(&root).await,
            Commands::Info => self.handle_info_command(),
        }
    }

    async fn handle_build_command(
        &self,
        root: &str,
        outdir: Option<&str>,
        compilation_level: Option<&str>,
    ) -> Result<()> {
        let root = PathBuf::from(root);
        let file_config = ConfigLoader::load_from_file(&root)?;
        let config = ConfigLoader::merge_with_cli(file_config, root, outdir, compilation_level)?;

        Logger::build_start(
            &config.root.display().to_string(),
            &config.outdir.display().to_string(),
        );

        let service = StratumBuildService::new(
            Arc::new(TokioFileSystemService),
            Arc::new(ClosureCompilerService::new()),
        );
        let result = service.build(&config).await?;

        for artifact in &result.artifacts {
            Logger::artifact(&artifact.chunk_name, &artifact.code_path.display().to_string());
        }
        Logger::build_complete(
            result.artifacts.len(),
            result.source_files,
            result.build_time,
            &config.outdir.display().to_string(),
        );
        Ok(())
    }

    async fn handle_graph_command(&self, root: &str) -> Result<()> {
        let root = PathBuf::from(root);
        let file_config = ConfigLoader::load_from_file(&root)?;
        let config = ConfigLoader::merge_with_cli(file_config, root, None, None)?;

        let graph = resolve_graph_only(&config).await?;

        tracing::info!("📊 Chunk graph ({} source files):", graph.files.len());
        for (index, node) in graph.nodes.iter().enumerate() {
            let deps = graph
                .dependencies_of(index)
                .map(|dep| dep.definition.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            if deps.is_empty() {
                tracing::info!("  • {} ({} files)", node.definition.name, node.file_count);
            } else {
                tracing::info!(
                    "  • {} ({} files) depends on: {}",
                    node.definition.name,
                    node.file_count,
                    deps
                );
            }
        }
        Ok(())
    }

    fn handle_info_command(&self) -> Result<()> {
        tracing::info!("🔗 Stratum v{}", env!("CARGO_PKG_VERSION"));
        tracing::info!("══════════════════════════════════════");
        tracing::info!("Dependency-ordered chunk builds for compiled JS libraries");
        tracing::info!("");
        tracing::info!("🏗️  Pipeline:");
        tracing::info!("  • Chunk graph resolution via closure-calculate-chunks");
        tracing::info!("  • Cached graph fallback for restricted runtimes");
        tracing::info!("  • Universal loader wrapper per chunk (AMD / Node / browser)");
        tracing::info!("  • Line-preserving license normalization");
        tracing::info!("  • Reversible path flattening for single-scope visibility checks");
        tracing::info!("  • Debug map source restoration after compilation");

        Ok(())
    }
}

impl Default for CliHandler {
    fn default() -> Self {
        Self::new()
    }
}
