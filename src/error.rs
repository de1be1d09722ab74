//! Library error type

use thiserror::Error;

/// Errors raised while loading posts or rendering pages
#[derive(Debug, Error)]
pub enum BlogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("render error: {0}")]
    Render(String),

    /// The post source could not produce a post list
    #[error("unable to load posts from {location}: {reason}")]
    Source { location: String, reason: String },
}

impl BlogError {
    pub fn unavailable<L: Into<String>, R: ToString>(location: L, reason: R) -> Self {
        BlogError::Source {
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, BlogError>;
