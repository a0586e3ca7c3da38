use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Store errors
    #[error("store request failed: {0}")]
    Network(String),

    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    #[error("record already exists: {0}")]
    AlreadyExists(String),

    // Validation errors
    #[error("validation failed: {0}")]
    Validation(String),

    // Export errors
    #[error("storage write permission denied: {0}")]
    PermissionDenied(String),

    #[error("no entries survive the filter, nothing to render")]
    EmptyStatement,

    // Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    // Encoding errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wraps a renderer/export IO failure, promoting permission refusals to
    /// their own kind so callers can show the dismissible alert instead of a
    /// transient toast.
    pub fn from_export_io(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::PermissionDenied {
            Error::PermissionDenied(err.to_string())
        } else {
            Error::Io(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
