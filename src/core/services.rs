use crate::core::{interfaces::*, models::*};
use crate::infrastructure::processors::{LicenseNormalizer, PathFlattenTransform, WrapperGenerator};
use crate::infrastructure::{source_maps, ChunkGraphResolver};
use crate::utils::{Logger, Result, Timer};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

/// Main build service: links the declared chunks into a dependency graph,
/// generates their loader wrappers, stages normalized sources for the
/// external compiler and restores true paths in the emitted debug maps.
///
/// The pipeline is a strict sequence; wrapper generation needs the whole
/// resolved graph first, since a later chunk in the list may be a
/// dependency. Any failing external invocation aborts the build.
pub struct StratumBuildService {
    fs_service: Arc<dyn FileSystemService>,
    compiler: Arc<dyn CompilerService>,
}

impl StratumBuildService {
    pub fn new(fs_service: Arc<dyn FileSystemService>, compiler: Arc<dyn CompilerService>) -> Self {
        Self {
            fs_service,
            compiler,
        }
    }

    /// License-normalize and path-flatten every source file in global graph
    /// order, staging the results for the compiler. Returns the staged
    /// paths in the same order.
    async fn stage_sources(
        &self,
        graph: &ChunkGraph,
        flatten: &PathFlattenTransform,
        config: &BuildConfig,
    ) -> Result<Vec<PathBuf>> {
        let _timer = Timer::start("Source staging");
        Logger::transforming_sources(graph.files.len());

        let mut staged = Vec::with_capacity(graph.files.len());
        for file in &graph.files {
            // The live resolver reports absolute paths; the cache stores
            // them relative to the root. Normalize before flattening.
            let relative = file.strip_prefix(&config.root).unwrap_or(file);

            let content = self.fs_service.read_file(&config.root.join(relative)).await?;
            let normalized = LicenseNormalizer::normalize(&content);
            let flat = flatten.forward(relative);

            let destination = config.staging_dir.join(&flat);
            Logger::staging_file(&flat.display().to_string());
            self.fs_service.write_file(&destination, &normalized).await?;
            staged.push(destination);
        }

        Ok(staged)
    }

    /// Rewrite the "sources" references of every emitted debug map back to
    /// true nested paths.
    async fn restore_debug_maps(
        &self,
        artifacts: &[CompiledArtifact],
        flatten: &PathFlattenTransform,
    ) -> Result<()> {
        Logger::rewriting_maps(artifacts.len());

        for artifact in artifacts {
            let map_text = self.fs_service.read_file(&artifact.map_path).await?;
            let restored = source_maps::restore_map_sources(&map_text, flatten)?;
            self.fs_service.write_file(&artifact.map_path, &restored).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl BuildService for StratumBuildService {
    async fn build(&self, config: &BuildConfig) -> Result<BuildResult> {
        let build_timer = Timer::start("Build");
        let flatten = PathFlattenTransform::new(&config.flattened_area);

        Logger::resolving_graph(config.chunks.len());
        let resolver = ChunkGraphResolver::new(&config.root, &config.cache_path);
        let graph = resolver
            .compute_graph(&config.chunks, &config.manifest_path, &config.library_base_path)
            .await?;
        Logger::graph_resolved(graph.nodes.len(), graph.files.len());

        Logger::generating_wrappers(graph.nodes.len());
        let wrappers: Vec<String> = (0..graph.nodes.len())
            .map(|index| WrapperGenerator::generate(&graph, index))
            .collect();

        let staged = self.stage_sources(&graph, &flatten, config).await?;

        Logger::compiling(graph.nodes.len());
        let artifacts = self.compiler.compile(&graph, &wrappers, &staged, config).await?;

        self.restore_debug_maps(&artifacts, &flatten).await?;

        Ok(BuildResult {
            source_files: graph.files.len(),
            artifacts,
            build_time: build_timer.elapsed(),
        })
    }
}

/// Resolve the graph without building; used by the `graph` CLI command
pub async fn resolve_graph_only(config: &BuildConfig) -> Result<ChunkGraph> {
    let resolver = ChunkGraphResolver::new(&config.root, &config.cache_path);
    resolver
        .compute_graph(&config.chunks, &config.manifest_path, &config.library_base_path)
        .await
}
