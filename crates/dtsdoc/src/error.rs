use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for documentation operations.
pub type Result<T> = std::result::Result<T, DocsError>;

/// Error variants for documentation extraction, rendering and output.
#[derive(Debug, Error)]
pub enum DocsError {
    /// Failed to read or write a file.
    #[error("i/o error on '{path}': {error}")]
    Io {
        /// Path of the file or directory involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// Parsing the source file with OXC failed.
    #[error("failed to parse source '{path}': {message}")]
    Parse {
        /// Path to the source file.
        path: PathBuf,
        /// Aggregated parser error message.
        message: String,
    },

    /// Directory traversal failed.
    #[error("failed to walk '{path}': {message}")]
    Walk {
        /// Path that could not be visited.
        path: PathBuf,
        /// Description of the traversal failure.
        message: String,
    },

    /// Serializing the documentation tree failed.
    #[error("failed to serialize documentation: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Generic error variant.
    #[error("{message}")]
    Other {
        /// Human-readable error message.
        message: String,
    },
}

impl DocsError {
    /// Helper to create a parse error from multiple diagnostic strings.
    pub fn parse_error(path: PathBuf, diagnostics: &[String]) -> Self {
        let message = diagnostics.join("; ");
        Self::Parse { path, message }
    }

    /// Helper to attach a path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            error,
        }
    }
}

impl From<walkdir::Error> for DocsError {
    fn from(error: walkdir::Error) -> Self {
        let path = error.path().map(PathBuf::from).unwrap_or_default();
        match error.into_io_error() {
            Some(io) => Self::Io { path, error: io },
            None => Self::Walk {
                path,
                message: "filesystem loop detected".to_string(),
            },
        }
    }
}
