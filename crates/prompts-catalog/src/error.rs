use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read catalog file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Malformed JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template #{index} is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("Duplicate template id '{id}'")]
    DuplicateId { id: String },
}
