use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DropletError {
    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to archive {}: {source}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported file type (only regular files and directories can be packaged): {}", path.display())]
    UnsupportedEntry { path: PathBuf },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid droplet name: {0}")]
    InvalidName(String),

    #[error("Droplet not found: {0}")]
    DropletNotFound(String),

    #[error("Store error: {0}")]
    Store(String),

    /// Failure reported by the droplet runner itself; displayed verbatim.
    #[error("{0}")]
    Remote(String),
}

pub type Result<T> = std::result::Result<T, DropletError>;
