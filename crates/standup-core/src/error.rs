//! Error types for standup-tools.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for standup operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested repository path does not exist
    #[error("Repository path does not exist: {}", .0.display())]
    InvalidRepository(PathBuf),

    /// The path exists but has no `.git` entry
    #[error("Not a git repository: {}", .0.display())]
    NotAGitRepository(PathBuf),

    /// A caller-supplied argument is malformed
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// External command exited with a non-zero status
    #[error("{program} exited with status {code}: {stderr}")]
    CommandFailed {
        program: String,
        code: i32,
        stderr: String,
    },

    /// External command did not finish in time
    #[error("{program} timed out after {seconds}s")]
    CommandTimeout { program: String, seconds: u64 },

    /// Spawning or talking to a process failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error must be reported to the caller instead of being
    /// absorbed into an empty report section.
    pub fn is_request_fatal(&self) -> bool {
        matches!(
            self,
            Error::InvalidRepository(_) | Error::NotAGitRepository(_) | Error::InvalidArgument(_)
        )
    }
}

/// Result type alias for standup operations.
pub type Result<T> = std::result::Result<T, Error>;
