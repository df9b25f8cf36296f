use std::path::PathBuf;

/// Errors surfaced by deploy operations.
///
/// No variant is retried or recovered locally; every failure aborts the
/// current invocation and surfaces to the operator.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// The sync root does not exist. Raised before any remote call.
    #[error("source path not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),

    #[error("directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// A remote storage call failed (authentication, network, or service).
    #[error("{op} failed: {message}")]
    Storage { op: &'static str, message: String },
}

impl DeployError {
    /// Wrap a provider error from the named operation.
    pub fn storage(op: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Storage {
            op,
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DeployError>;
