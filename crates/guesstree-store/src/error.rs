use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
/// Error type for reading and writing stored knowledge bases.
pub enum StoreError {
    #[error("failed to {operation} '{}': {source}", .path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid knowledge base JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid knowledge base YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("tree is {depth} levels deep; this format stores at most {limit}")]
    TooDeep { depth: usize, limit: usize },

    #[error("storage unavailable: {reason}")]
    Unavailable { reason: String },
}
