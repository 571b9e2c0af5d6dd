//! Checker error types

use thiserror::Error;

/// Unexpected failures inside a checker
///
/// Ordinary assertion failures are recorded as failing test cases; these
/// errors abort the remaining assertions and surface as a single
/// "Execution Error" case.
#[derive(Error, Debug)]
pub enum CheckError {
    /// Reading the exercise script failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A setup or assertion step panicked
    #[error("panic: {0}")]
    Panic(String),
}

/// Result type for checker steps
pub type CheckResult<T> = Result<T, CheckError>;
