//! Command executor
//!
//! Every interaction with the database goes through [`SqlExecutor`], which
//! runs one query or one script and reports `(success, stdout, stderr)`.
//! [`MysqlCli`] is the implementation that shells out to the `mysql` client.

pub mod error;
mod mysql;

use std::path::Path;

pub use error::{ClientError, ClientResult};
pub use mysql::MysqlCli;

/// Captured result of a single client invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutcome {
    /// True iff the process exited with status zero
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutcome {
    /// Successful outcome with the given output
    pub fn ok(stdout: impl Into<String>) -> Self {
        ExecOutcome {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed outcome with the given error text
    pub fn failed(stderr: impl Into<String>) -> Self {
        ExecOutcome {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Stdout of a successful call, `None` otherwise
    pub fn output(&self) -> Option<&str> {
        self.success.then_some(self.stdout.as_str())
    }
}

impl From<ClientError> for ExecOutcome {
    fn from(err: ClientError) -> Self {
        ExecOutcome::failed(err.to_string())
    }
}

/// Runs SQL against the database under test
///
/// Implementations hold no state between calls. Failures never escape as
/// errors: they are folded into a failed [`ExecOutcome`].
pub trait SqlExecutor {
    /// Run a single query, optionally against `database`
    fn execute_query(&self, query: &str, database: Option<&str>) -> ExecOutcome;

    /// Feed a script file to the client, optionally against `database`
    fn execute_file(&self, path: &Path, database: Option<&str>) -> ExecOutcome;
}
