use thiserror::Error;

/// Errors raised at the fallible edges of the crate: decoding update and
/// permission documents, and loading options. The engines themselves
/// never fail.
#[derive(Error, Debug)]
pub enum MutateError {
    #[error("UNKNOWN_OPERATOR: {0}")]
    UnknownOperator(String),

    #[error("INVALID_UPDATE: {0}")]
    InvalidUpdate(String),

    #[error("INVALID_PERMISSION: {0}")]
    InvalidPermission(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("INVALID_CONFIG: {0}")]
    Config(String),
}
