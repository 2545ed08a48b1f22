use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LandingError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("failed to create texture for {path:?}: {reason}")]
    Texture { path: PathBuf, reason: String },

    #[error("drawing surface unavailable: {0}")]
    Surface(String),

    #[error("invalid config file {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("video recorder: {0}")]
    Recorder(String),
}

pub type Result<T> = std::result::Result<T, LandingError>;
