//! `mysql` command-line client executor

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};
use wait_timeout::ChildExt;

use super::error::{ClientError, ClientResult};
use super::{ExecOutcome, SqlExecutor};
use crate::config::{HarnessConfig, DEFAULT_TIMEOUT_SECS};

/// Executor that invokes the `mysql` client non-interactively
#[derive(Debug, Clone)]
pub struct MysqlCli {
    program: String,
    user: String,
    password: String,
    timeout: Duration,
}

impl MysqlCli {
    /// Create an executor for `program` with the given credentials
    pub fn new(
        program: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        MysqlCli {
            program: program.into(),
            user: user.into(),
            password: password.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create an executor from harness configuration
    pub fn from_config(config: &HarnessConfig) -> Self {
        MysqlCli::new(&config.client_program, &config.user, &config.password)
            .with_timeout(config.timeout)
    }

    /// Set the per-call timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Arguments passed before any query or script input
    ///
    /// `-u USER` is added only for a non-empty user and `-pPASSWORD` only for
    /// a non-empty password; the database comes last as a positional.
    pub fn base_args(&self, database: Option<&str>) -> Vec<String> {
        let mut args = Vec::new();
        if !self.user.is_empty() {
            args.push("-u".to_string());
            args.push(self.user.clone());
        }
        if !self.password.is_empty() {
            args.push(format!("-p{}", self.password));
        }
        if let Some(db) = database {
            args.push(db.to_string());
        }
        args
    }

    fn command(&self, database: Option<&str>) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.base_args(database));
        cmd
    }

    /// Spawn the client, wait up to the timeout and collect its output
    fn run(&self, mut cmd: Command, stdin: Stdio) -> ClientResult<ExecOutcome> {
        cmd.stdin(stdin).stdout(Stdio::piped()).stderr(Stdio::piped());

        let started = Instant::now();
        let mut child = cmd.spawn().map_err(|source| {
            warn!(program = %self.program, error = %source, "Failed to start database client");
            ClientError::Spawn {
                program: self.program.clone(),
                source,
            }
        })?;

        // Drain both pipes while waiting so a chatty client cannot block on a full pipe
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let status = match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                stop(&mut child);
                warn!(
                    program = %self.program,
                    timeout_secs = self.timeout.as_secs(),
                    "Database client timed out"
                );
                return Err(ClientError::Timeout {
                    after: self.timeout,
                });
            }
            Err(e) => {
                stop(&mut child);
                warn!(program = %self.program, error = %e, "Lost track of database client");
                return Err(ClientError::Io(e));
            }
        };

        let outcome = ExecOutcome {
            success: status.success(),
            stdout: collect(stdout),
            stderr: collect(stderr),
        };
        debug!(
            success = outcome.success,
            code = ?status.code(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Database client finished"
        );
        Ok(outcome)
    }
}

impl SqlExecutor for MysqlCli {
    fn execute_query(&self, query: &str, database: Option<&str>) -> ExecOutcome {
        debug!(query, database, "Executing query");
        let mut cmd = self.command(database);
        cmd.arg("-e").arg(query);
        self.run(cmd, Stdio::null()).unwrap_or_else(ExecOutcome::from)
    }

    fn execute_file(&self, path: &Path, database: Option<&str>) -> ExecOutcome {
        debug!(path = %path.display(), database, "Executing script");
        if !path.exists() {
            return ClientError::FileNotFound(path.display().to_string()).into();
        }
        let script = match File::open(path) {
            Ok(file) => file,
            Err(e) => return ClientError::Io(e).into(),
        };
        self.run(self.command(database), Stdio::from(script))
            .unwrap_or_else(ExecOutcome::from)
    }
}

/// Kill `child` and reap it so no zombie outlives the call
fn stop(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn collect(reader: Option<JoinHandle<String>>) -> String {
    reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}
