use thiserror::Error;

pub type Result<T> = std::result::Result<T, SpinnerError>;

#[derive(Debug, Error)]
pub enum SpinnerError {
    #[error("character map must contain at least one frame")]
    EmptyCharMap,

    #[error("frame duration must be greater than zero")]
    ZeroFrameDuration,

    #[error("unknown animation: {0}")]
    UnknownAnimation(String),

    #[error("unknown color: {0}")]
    UnknownColor(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
