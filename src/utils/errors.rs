use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StratumError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Graph inconsistency: {0}")]
    GraphInconsistency(String),

    #[error("Chunk graph cache unavailable at {}: {reason}", .path.display())]
    CacheMissing { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Resolver error: {0}")]
    Resolver(String),

    #[error("Compiler error: {0}")]
    Compile(String),

    #[error("{0}")]
    #[allow(dead_code)] // Generic error variant for future use
    Other(String),
}

impl StratumError {
    /// Create a graph inconsistency error (fatal, aborts the build)
    pub fn graph(message: impl Into<String>) -> Self {
        Self::GraphInconsistency(message.into())
    }

    /// Create a cache-missing error for a fallback that found no usable cache
    pub fn cache_missing(path: &std::path::Path, reason: impl Into<String>) -> Self {
        Self::CacheMissing {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

pub type Result<T> = std::result::Result<T, StratumError>;

impl From<regex::Error> for StratumError {
    fn from(err: regex::Error) -> Self {
        StratumError::parse(format!("Regex error: {}", err))
    }
}

impl From<serde_json::Error> for StratumError {
    fn from(err: serde_json::Error) -> Self {
        StratumError::parse(format!("JSON error: {}", err))
    }
}

impl From<anyhow::Error> for StratumError {
    fn from(err: anyhow::Error) -> Self {
        StratumError::Other(err.to_string())
    }
}
