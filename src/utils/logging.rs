use std::time::Instant;
use tracing::{debug, info, warn};

pub struct Logger;

impl Logger {
    pub fn init() {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "stratum=info".into()),
            )
            .with_target(false)
            .init();
    }

    pub fn build_start(root: &str, outdir: &str) {
        info!("🔗 Stratum - Chunked Library Build");
        info!("═══════════════════════════════════════");
        info!("📁 Root: {}", root);
        info!("📦 Output: {}", outdir);
    }

    pub fn resolving_graph(chunk_count: usize) {
        info!("🧮 Resolving chunk graph for {} chunks...", chunk_count);
    }

    pub fn graph_resolved(chunk_count: usize, file_count: usize) {
        info!("📊 Graph resolved: {} chunks, {} source files", chunk_count, file_count);
    }

    pub fn cache_fallback(cache_path: &str) {
        warn!("⚠️  Chunk graph tool unavailable in this runtime");
        warn!("⚠️  Falling back to cached graph at {}", cache_path);
    }

    pub fn generating_wrappers(chunk_count: usize) {
        info!("📦 Generating {} chunk wrappers...", chunk_count);
    }

    pub fn transforming_sources(file_count: usize) {
        info!("✂️  Normalizing and staging {} source files...", file_count);
    }

    pub fn staging_file(path: &str) {
        debug!("✂️  Staging: {}", path);
    }

    pub fn compiling(chunk_count: usize) {
        info!("⚙️  Compiling {} chunks...", chunk_count);
    }

    pub fn rewriting_maps(map_count: usize) {
        info!("🗺️  Restoring source paths in {} debug maps...", map_count);
    }

    pub fn build_complete(
        chunk_count: usize,
        file_count: usize,
        build_time: std::time::Duration,
        outdir: &str,
    ) {
        info!("");
        info!("📊 Build Statistics:");
        info!("  • Chunks compiled: {}", chunk_count);
        info!("  • Source files processed: {}", file_count);
        info!("  • Build time: {:.2?}", build_time);
        info!("  • Output directory: {}", outdir);
        info!("");
        info!("✅ Build completed successfully!");
    }

    pub fn artifact(chunk_name: &str, code_path: &str) {
        info!("  • {}: {}", chunk_name, code_path);
    }

    pub fn debug(msg: &str) {
        debug!("{}", msg);
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: &str) -> Self {
        debug!("⏱️  Starting: {}", name);
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        debug!("⏱️  Completed: {} in {:.2?}", self.name, self.elapsed());
    }
}
