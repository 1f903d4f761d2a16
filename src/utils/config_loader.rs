use crate::core::models::{BuildConfig, ChunkDefinition};
use crate::utils::{Logger, Result, StratumError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Configuration file format (stratum.config.json)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StratumConfig {
    /// Chunk registry in declaration order; the first chunk is the root
    pub chunks: Vec<ChunkDefinition>,

    /// Compiled output directory (default: "dist")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outdir: Option<String>,

    /// Staging directory for transformed sources (default: "build/transformed")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staging_dir: Option<String>,

    /// Dependency manifest handed to the graph tool (default: "build/deps.js")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_path: Option<String>,

    /// Base library path the manifest refers to (default: "closure/goog")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library_base_path: Option<String>,

    /// Chunk graph cache file (default: "scripts/chunks.json")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_path: Option<String>,

    /// Top-level source area flattened for compilation (default: "core")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flattened_area: Option<String>,

    /// Suffix for compiled artifact names (default: "_compressed")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiled_suffix: Option<String>,

    /// Compiler optimization level (default: "ADVANCED_OPTIMIZATIONS")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compilation_level: Option<String>,
}

/// Config loader that reads stratum.config.json and merges CLI overrides
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the configuration file from the project root. The chunk
    /// registry lives in this file, so a build cannot proceed without it.
    pub fn load_from_file(root: &Path) -> Result<StratumConfig> {
        let config_path = root.join("stratum.config.json");

        if !config_path.exists() {
            return Err(StratumError::config(format!(
                "no stratum.config.json found in {}",
                root.display()
            )));
        }

        Logger::debug(&format!("Loading config from {}", config_path.display()));

        let content = std::fs::read_to_string(&config_path).map_err(StratumError::Io)?;
        let config: StratumConfig = serde_json::from_str(&content).map_err(|e| {
            StratumError::config(format!("Failed to parse stratum.config.json: {}", e))
        })?;

        Ok(config)
    }

    /// Merge file config with CLI arguments (CLI takes precedence) and
    /// validate the chunk registry.
    pub fn merge_with_cli(
        file_config: StratumConfig,
        root: PathBuf,
        outdir: Option<&str>,
        compilation_level: Option<&str>,
    ) -> Result<BuildConfig> {
        Self::validate_registry(&file_config.chunks)?;

        let resolve = |value: Option<&str>, default: &str| -> PathBuf {
            let raw = value.unwrap_or(default);
            if Path::new(raw).is_absolute() {
                PathBuf::from(raw)
            } else {
                root.join(raw)
            }
        };

        Ok(BuildConfig {
            chunks: file_config.chunks,
            outdir: resolve(outdir.or(file_config.outdir.as_deref()), "dist"),
            staging_dir: resolve(file_config.staging_dir.as_deref(), "build/transformed"),
            manifest_path: resolve(file_config.manifest_path.as_deref(), "build/deps.js"),
            library_base_path: resolve(file_config.library_base_path.as_deref(), "closure/goog"),
            cache_path: resolve(file_config.cache_path.as_deref(), "scripts/chunks.json"),
            flattened_area: file_config.flattened_area.unwrap_or_else(|| "core".to_string()),
            compiled_suffix: file_config
                .compiled_suffix
                .unwrap_or_else(|| "_compressed".to_string()),
            compilation_level: compilation_level
                .map(str::to_string)
                .or(file_config.compilation_level)
                .unwrap_or_else(|| "ADVANCED_OPTIMIZATIONS".to_string()),
            root,
        })
    }

    /// Reject registries the rest of the pipeline cannot handle: an empty
    /// chunk list, duplicate chunk names, or duplicate import aliases
    /// (aliases become factory parameter names, so a collision would
    /// shadow a binding in any chunk depending on both).
    fn validate_registry(chunks: &[ChunkDefinition]) -> Result<()> {
        if chunks.is_empty() {
            return Err(StratumError::config("chunk registry is empty"));
        }

        let mut names = HashSet::new();
        let mut aliases = HashSet::new();
        for chunk in chunks {
            if !names.insert(chunk.name.as_str()) {
                return Err(StratumError::config(format!(
                    "duplicate chunk name '{}'",
                    chunk.name
                )));
            }
            if !aliases.insert(chunk.import_alias.as_str()) {
                return Err(StratumError::config(format!(
                    "duplicate import alias '{}' (chunk '{}')",
                    chunk.import_alias, chunk.name
                )));
            }
        }
        Ok(())
    }
}
