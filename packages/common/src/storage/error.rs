use std::fmt;

/// Errors that can occur during document storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// No document exists under the given key.
    NotFound(String),
    /// An I/O error occurred.
    Io(std::io::Error),
    /// The provided file key is malformed or contains traversal patterns.
    InvalidKey(String),
    /// The document exceeds the configured size limit.
    SizeLimitExceeded { actual: u64, limit: u64 },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(key) => write!(f, "document not found: {key}"),
            Self::Io(err) => write!(f, "storage IO error: {err}"),
            Self::InvalidKey(msg) => write!(f, "invalid file key: {msg}"),
            Self::SizeLimitExceeded { actual, limit } => {
                write!(f, "document exceeds size limit ({actual} > {limit} bytes)")
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
