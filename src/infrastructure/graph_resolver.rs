use crate::core::models::{ChunkDefinition, ChunkGraph, ChunkNode, RawGraph};
use crate::utils::{Logger, Result, StratumError};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// External graph-calculation tool. Takes the chunk entry points in
/// declared order plus the dependency manifest and prints the raw graph
/// as JSON on stdout.
pub const GRAPH_TOOL: &str = "closure-calculate-chunks";

/// Turns the declared, ordered chunk list into a validated dependency
/// graph.
///
/// The live tool is invoked once per build; in environments where it
/// cannot run, the previously persisted raw output is consumed instead.
/// Descriptor `i` of the raw output corresponds to definition `i`; that
/// positional binding is part of the calling convention and is asserted,
/// never assumed.
pub struct ChunkGraphResolver {
    program: String,
    cache_path: PathBuf,
    root: PathBuf,
}

impl ChunkGraphResolver {
    pub fn new(root: impl Into<PathBuf>, cache_path: impl Into<PathBuf>) -> Self {
        Self {
            program: GRAPH_TOOL.to_string(),
            cache_path: cache_path.into(),
            root: root.into(),
        }
    }

    /// Override the graph tool binary (alternate install locations)
    #[allow(dead_code)] // Exposed for callers that wrap the npm binary
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Resolve the graph for the declared chunks. Runs the live tool and
    /// refreshes the on-disk cache, or falls back to the cache with a
    /// warning when the tool cannot run here.
    pub async fn compute_graph(
        &self,
        chunk_defs: &[ChunkDefinition],
        manifest_path: &Path,
        library_base_path: &Path,
    ) -> Result<ChunkGraph> {
        let raw = match self.run_graph_tool(chunk_defs, manifest_path, library_base_path).await {
            Ok(raw) => {
                self.persist_cache(&raw).await?;
                raw
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Logger::cache_fallback(&self.cache_path.display().to_string());
                self.read_cache().await?
            }
            Err(err) => {
                return Err(StratumError::Resolver(format!(
                    "failed to run {}: {}",
                    self.program, err
                )))
            }
        };

        Self::parse_raw_graph(&raw, chunk_defs)
    }

    async fn run_graph_tool(
        &self,
        chunk_defs: &[ChunkDefinition],
        manifest_path: &Path,
        library_base_path: &Path,
    ) -> std::io::Result<RawGraph> {
        let mut command = Command::new(&self.program);
        command.current_dir(&self.root);
        for def in chunk_defs {
            command.arg("--entrypoint").arg(&def.entry_point);
        }
        command.arg("--deps-file").arg(manifest_path);
        command.arg("--closure-library-base-path").arg(library_base_path);

        let output = command.output().await?;
        if !output.status.success() {
            return Err(std::io::Error::new(
                ErrorKind::Other,
                format!(
                    "{} exited with {}: {}",
                    self.program,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            ));
        }

        serde_json::from_slice(&output.stdout).map_err(|err| {
            std::io::Error::new(
                ErrorKind::Other,
                format!("{} produced unparsable output: {}", self.program, err),
            )
        })
    }

    /// Persist the raw output for runtimes where the live tool cannot run.
    /// Paths are rewritten relative to the project root so the cache stays
    /// valid across checkouts; previous contents are overwritten.
    async fn persist_cache(&self, raw: &RawGraph) -> Result<()> {
        let relativized = RawGraph {
            chunk: raw.chunk.clone(),
            js: raw.js.iter().map(|file| self.relativize(file)).collect(),
        };

        if let Some(parent) = self.cache_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(&relativized)?;
        tokio::fs::write(&self.cache_path, json).await?;
        Logger::debug(&format!("Chunk graph cached at {}", self.cache_path.display()));
        Ok(())
    }

    fn relativize(&self, file: &str) -> String {
        Path::new(file)
            .strip_prefix(&self.root)
            .map(|relative| relative.to_string_lossy().into_owned())
            .unwrap_or_else(|_| file.to_string())
    }

    async fn read_cache(&self) -> Result<RawGraph> {
        let content = tokio::fs::read_to_string(&self.cache_path)
            .await
            .map_err(|err| StratumError::cache_missing(&self.cache_path, err.to_string()))?;
        serde_json::from_str(&content)
            .map_err(|err| StratumError::cache_missing(&self.cache_path, err.to_string()))
    }

    /// Zip raw descriptors onto definitions by position and resolve each
    /// dependency nickname against the nicknames already bound to earlier
    /// chunks. Nicknames bind as descriptors are processed, so a forward
    /// reference can never resolve.
    pub fn parse_raw_graph(raw: &RawGraph, chunk_defs: &[ChunkDefinition]) -> Result<ChunkGraph> {
        if raw.chunk.len() != chunk_defs.len() {
            return Err(StratumError::graph(format!(
                "resolver returned {} chunk descriptors for {} declared chunks",
                raw.chunk.len(),
                chunk_defs.len()
            )));
        }

        let mut nicknames: HashMap<String, usize> = HashMap::new();
        let mut nodes = Vec::with_capacity(chunk_defs.len());

        for (index, (descriptor, definition)) in raw.chunk.iter().zip(chunk_defs).enumerate() {
            let (nickname, file_count, dep_nicknames) = Self::split_descriptor(descriptor)?;

            if index == 0 && !dep_nicknames.is_empty() {
                return Err(StratumError::graph(format!(
                    "first declared chunk '{}' must not have dependencies",
                    definition.name
                )));
            }
            if index > 0 && dep_nicknames.is_empty() {
                return Err(StratumError::graph(format!(
                    "chunk '{}' must depend on at least one earlier chunk",
                    definition.name
                )));
            }

            let mut dependencies = Vec::with_capacity(dep_nicknames.len());
            for dep in &dep_nicknames {
                match nicknames.get(*dep) {
                    Some(&bound) => dependencies.push(bound),
                    None => {
                        return Err(StratumError::graph(format!(
                            "dependency nickname '{}' of chunk '{}' is not bound to an earlier chunk",
                            dep, definition.name
                        )))
                    }
                }
            }

            if nicknames.insert(nickname.to_string(), index).is_some() {
                return Err(StratumError::graph(format!(
                    "resolver assigned nickname '{}' to more than one chunk",
                    nickname
                )));
            }

            nodes.push(ChunkNode {
                definition: definition.clone(),
                file_count,
                dependencies,
            });
        }

        Ok(ChunkGraph {
            nodes,
            files: raw.js.iter().map(PathBuf::from).collect(),
        })
    }

    /// Split one "nickname:fileCount[:dep,dep,...]" descriptor
    fn split_descriptor(descriptor: &str) -> Result<(&str, usize, Vec<&str>)> {
        let mut parts = descriptor.splitn(3, ':');
        let nickname = parts
            .next()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                StratumError::parse(format!("malformed chunk descriptor '{}'", descriptor))
            })?;
        let file_count = parts
            .next()
            .and_then(|count| count.parse::<usize>().ok())
            .ok_or_else(|| {
                StratumError::parse(format!("malformed chunk descriptor '{}'", descriptor))
            })?;
        let dep_nicknames = parts
            .next()
            .map(|deps| deps.split(',').filter(|dep| !dep.is_empty()).collect())
            .unwrap_or_default();

        Ok((nickname, file_count, dep_nicknames))
    }
}
