use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    ConfigValidation(String),

    #[error("artifact file not found: {0}")]
    ArtifactNotFound(PathBuf),

    #[error("artifact decode error: {0}")]
    ArtifactDecode(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("lookup error: {0}")]
    Lookup(String),

    #[error("github api error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, Error>;
