//! Client error types

use std::time::Duration;

use thiserror::Error;

/// Failures invoking the external database client
///
/// The `Display` text of each variant is what ends up in the captured
/// error string of a failed call.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Script file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Client program could not be started
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error while talking to the child process
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Process did not exit within the allowed time
    #[error("Command timed out")]
    Timeout { after: Duration },
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
