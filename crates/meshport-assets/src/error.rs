use std::path::PathBuf;

/// Errors that can occur while reading assets.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(PathBuf),

    #[error("I/O error loading '{0}': {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to decode image '{0}': {1}")]
    ImageDecode(String, String),
}

/// Errors reported by a scene parser.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid glTF data: {0}")]
    Gltf(String),

    #[error("mesh '{mesh}' uses primitive mode {mode} which needs triangulation")]
    UnsupportedPrimitive { mesh: String, mode: String },

    #[error("buffer '{0}' is stored outside the scene data")]
    ExternalBuffer(String),
}

impl From<gltf::Error> for ParseError {
    fn from(e: gltf::Error) -> Self {
        ParseError::Gltf(e.to_string())
    }
}
