use std::path::PathBuf;

use thiserror::Error;

use crate::model::ModelError;

/// Everything that can stop the basecode from starting or from finishing a frame.
#[derive(Debug, Error)]
pub enum BasecodeError {
    #[error("failed to open config file {path}: {source}")]
    ConfigOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("window error: {0}")]
    Window(#[from] minifb::Error),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("failed to load texture {path}: {source}")]
    Texture {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to save screenshot {path}: {source}")]
    Screenshot {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
