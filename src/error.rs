use thiserror::Error;

/// Domain suggestion engine error types
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Corpus contains no usable domains")]
    EmptyCorpus,

    #[error("Invalid candidate for query {0:?}: domain is empty")]
    InvalidCandidate(String),

    #[error("Invalid distance: {0}")]
    InvalidDistance(i64),

    #[error("Approximate index was not built for this engine")]
    IndexUnavailable,

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::ParseError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
