use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors produced by configuration loading and parameter validation
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid parameters: {0}")]
    BadParams(String),

    #[error("failed to read config file {path}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    ConfigParse(#[from] ron::error::SpannedError),

    #[error("failed to serialize config")]
    ConfigSerialize(#[from] ron::Error),
}
