use crate::core::interfaces::CompilerService;
use crate::core::models::{BuildConfig, ChunkGraph, CompiledArtifact};
use crate::infrastructure::processors::NAMESPACE_VARIABLE;
use crate::utils::{Logger, Result, StratumError};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

/// External optimizing compiler binary
pub const COMPILER_TOOL: &str = "google-closure-compiler";

/// Shapes the compiler invocation for a resolved graph: staged sources in
/// global order, one chunk flag and one wrapper per node, and top-level
/// renaming into the shared namespace variable. The compilation itself is
/// entirely the external tool's concern.
pub struct ClosureCompilerService {
    program: String,
}

impl ClosureCompilerService {
    pub fn new() -> Self {
        Self {
            program: COMPILER_TOOL.to_string(),
        }
    }

    #[allow(dead_code)] // Exposed for callers that wrap the npm binary
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// "name:fileCount[:dep,dep,...]" chunk flag. Chunk names carry the
    /// compiled suffix so the compiler's output files land directly as
    /// `<name><suffix>.js`; dependencies use the same suffixed names.
    fn chunk_flag(graph: &ChunkGraph, index: usize, suffix: &str) -> String {
        let node = &graph.nodes[index];
        let deps = graph
            .dependencies_of(index)
            .map(|dep| format!("{}{}", dep.definition.name, suffix))
            .collect::<Vec<_>>()
            .join(",");
        if deps.is_empty() {
            format!("{}{}:{}", node.definition.name, suffix, node.file_count)
        } else {
            format!("{}{}:{}:{}", node.definition.name, suffix, node.file_count, deps)
        }
    }
}

impl Default for ClosureCompilerService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompilerService for ClosureCompilerService {
    async fn compile(
        &self,
        graph: &ChunkGraph,
        wrappers: &[String],
        staged_files: &[PathBuf],
        config: &BuildConfig,
    ) -> Result<Vec<CompiledArtifact>> {
        let mut command = Command::new(&self.program);
        command.current_dir(&config.root);
        command
            .arg("--compilation_level")
            .arg(&config.compilation_level)
            .arg("--rename_prefix_namespace")
            .arg(NAMESPACE_VARIABLE)
            .arg("--chunk_output_path_prefix")
            .arg(format!("{}/", config.outdir.display()))
            .arg("--create_source_map")
            .arg("%outname%.map");

        for file in staged_files {
            command.arg("--js").arg(file);
        }
        for (index, node) in graph.nodes.iter().enumerate() {
            command
                .arg("--chunk")
                .arg(Self::chunk_flag(graph, index, &config.compiled_suffix));
            command.arg("--chunk_wrapper").arg(format!(
                "{}{}:{}",
                node.definition.name, config.compiled_suffix, wrappers[index]
            ));
        }

        Logger::debug(&format!("Invoking {}", self.program));
        let output = command.output().await.map_err(|err| {
            StratumError::Compile(format!("failed to run {}: {}", self.program, err))
        })?;
        if !output.status.success() {
            return Err(StratumError::Compile(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(graph
            .nodes
            .iter()
            .map(|node| {
                let stem = format!("{}{}", node.definition.name, config.compiled_suffix);
                CompiledArtifact {
                    chunk_name: node.definition.name.clone(),
                    code_path: config.outdir.join(format!("{}.js", stem)),
                    map_path: config.outdir.join(format!("{}.js.map", stem)),
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{ChunkDefinition, ChunkNode};

    fn graph() -> ChunkGraph {
        let definition = |name: &str| ChunkDefinition {
            name: name.to_string(),
            entry_point: PathBuf::from(format!("{}/main.js", name)),
            exports_path: name.to_uppercase(),
            import_alias: name.to_string(),
            factory_preamble: None,
            factory_postamble: None,
        };
        ChunkGraph {
            nodes: vec![
                ChunkNode {
                    definition: definition("lib"),
                    file_count: 5,
                    dependencies: vec![],
                },
                ChunkNode {
                    definition: definition("blocks"),
                    file_count: 3,
                    dependencies: vec![0],
                },
                ChunkNode {
                    definition: definition("generators"),
                    file_count: 2,
                    dependencies: vec![0, 1],
                },
            ],
            files: vec![],
        }
    }

    #[test]
    fn test_chunk_flag_without_dependencies() {
        assert_eq!(
            ClosureCompilerService::chunk_flag(&graph(), 0, "_compressed"),
            "lib_compressed:5"
        );
    }

    #[test]
    fn test_chunk_flag_with_dependencies_uses_suffixed_names() {
        let graph = graph();
        assert_eq!(
            ClosureCompilerService::chunk_flag(&graph, 1, "_compressed"),
            "blocks_compressed:3:lib_compressed"
        );
        assert_eq!(
            ClosureCompilerService::chunk_flag(&graph, 2, ""),
            "generators:2:lib,blocks"
        );
    }
}
