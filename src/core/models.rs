use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One declared chunk: an independently loadable unit of compiled output
/// rooted at a single entry point.
///
/// The declared list is ordered; the first chunk is the root of the library
/// and every later chunk must (transitively) depend on it. Definitions are
/// configured once per build and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChunkDefinition {
    /// Chunk name, used for output file naming and compiler chunk flags
    pub name: String,
    /// Source file at the root of this chunk's dependency closure
    pub entry_point: PathBuf,
    /// Dotted symbol name this chunk exports (e.g. "Lib.Blocks")
    pub exports_path: String,
    /// Binding name dependents use to receive this chunk's export
    pub import_alias: String,
    /// Verbatim replacement for the default factory preamble
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factory_preamble: Option<String>,
    /// Verbatim replacement for the default factory postamble
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factory_postamble: Option<String>,
}

/// A resolved chunk: its definition plus what the graph calculation
/// assigned to it. Dependencies are indices into the declared order, which
/// keeps the graph acyclic by construction (only earlier chunks can appear).
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkNode {
    pub definition: ChunkDefinition,
    /// Number of source files the resolver attributed to this chunk
    pub file_count: usize,
    /// Indices of earlier-declared chunks this chunk depends on
    pub dependencies: Vec<usize>,
}

/// The validated dependency graph: nodes in declared order plus the global
/// ordered source file list the compiler must consume.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkGraph {
    pub nodes: Vec<ChunkNode>,
    pub files: Vec<PathBuf>,
}

impl ChunkGraph {
    /// Dependencies of the node at `index`, in resolved order
    pub fn dependencies_of(&self, index: usize) -> impl Iterator<Item = &ChunkNode> {
        self.nodes[index].dependencies.iter().map(|&dep| &self.nodes[dep])
    }
}

/// Raw output of the external graph-calculation tool, also the on-disk
/// cache format. Chunk descriptors use the tool's own temporary nicknames
/// and are mapped positionally onto the declared definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawGraph {
    /// Per-chunk descriptors: "nickname:fileCount[:dep,dep,...]"
    pub chunk: Vec<String>,
    /// Global ordered source file list
    pub js: Vec<String>,
}

/// Build configuration after config file and CLI flags are merged
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Declared chunk registry, in dependency-declaration order
    pub chunks: Vec<ChunkDefinition>,
    pub root: PathBuf,
    pub outdir: PathBuf,
    /// Where license-normalized, path-flattened sources are staged for the compiler
    pub staging_dir: PathBuf,
    /// Dependency manifest consumed by the graph-calculation tool
    pub manifest_path: PathBuf,
    /// Base path of the base library the manifest refers to
    pub library_base_path: PathBuf,
    /// On-disk chunk graph cache, written on live runs and read on fallback
    pub cache_path: PathBuf,
    /// Top-level source area flattened into a single visibility scope
    pub flattened_area: String,
    /// Suffix appended to chunk names for compiled artifacts
    pub compiled_suffix: String,
    pub compilation_level: String,
}

/// One compiled chunk artifact plus its debug map, as emitted by the
/// external compiler and post-processed by the build pipeline
#[derive(Debug, Clone)]
pub struct CompiledArtifact {
    pub chunk_name: String,
    pub code_path: PathBuf,
    pub map_path: PathBuf,
}

#[derive(Debug, Default)]
pub struct BuildResult {
    pub artifacts: Vec<CompiledArtifact>,
    pub source_files: usize,
    pub build_time: std::time::Duration,
}
