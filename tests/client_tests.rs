//! MysqlCli integration tests against shell-script stand-ins for `mysql`

#![cfg(unix)]

mod test_utils;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use tempfile::TempDir;

use sqlgrade::client::{MysqlCli, SqlExecutor};
use test_utils::fake_client::{fake_client, ECHO_ARGS_AND_STDIN, HANG, SYNTAX_ERROR};
use test_utils::write_script;

/// Stand-in clients, written once before any test spawns a process
struct FakeClients {
    dir: TempDir,
    echo: PathBuf,
    syntax_error: PathBuf,
    hang: PathBuf,
}

fn clients() -> &'static FakeClients {
    static CLIENTS: OnceLock<FakeClients> = OnceLock::new();
    CLIENTS.get_or_init(|| {
        let dir = TempDir::new().expect("create temp dir");
        let echo = fake_client(dir.path(), "echo-mysql", ECHO_ARGS_AND_STDIN);
        let syntax_error = fake_client(dir.path(), "failing-mysql", SYNTAX_ERROR);
        let hang = fake_client(dir.path(), "hanging-mysql", HANG);
        write_script(
            dir.path(),
            "3-force_name.sql",
            "CREATE TABLE IF NOT EXISTS force_name (id INT);\n",
        );
        FakeClients {
            dir,
            echo,
            syntax_error,
            hang,
        }
    })
}

fn cli(program: &Path, user: &str, password: &str) -> MysqlCli {
    MysqlCli::new(program.display().to_string(), user, password)
}

#[test]
fn test_query_passes_credentials_database_and_query() {
    let fakes = clients();
    let outcome =
        cli(&fakes.echo, "root", "pw").execute_query("SHOW DATABASES;", Some("hbtn_0d_2"));

    assert!(outcome.success);
    assert_eq!(
        outcome.stdout,
        "-u\nroot\n-ppw\nhbtn_0d_2\n-e\nSHOW DATABASES;\n"
    );
    assert_eq!(outcome.stderr, "");
}

#[test]
fn test_empty_credentials_are_omitted() {
    let fakes = clients();
    let outcome = cli(&fakes.echo, "", "").execute_query("SELECT 1;", None);
    assert!(outcome.success);
    assert_eq!(outcome.stdout, "-e\nSELECT 1;\n");
}

#[test]
fn test_script_is_fed_on_stdin() {
    let fakes = clients();
    let script = fakes.dir.path().join("3-force_name.sql");
    let outcome = cli(&fakes.echo, "root", "").execute_file(&script, Some("hbtn_0d_2"));

    assert!(outcome.success);
    assert_eq!(
        outcome.stdout,
        "-u\nroot\nhbtn_0d_2\nCREATE TABLE IF NOT EXISTS force_name (id INT);\n"
    );
}

#[test]
fn test_nonzero_exit_is_failure_with_stderr() {
    let fakes = clients();
    let outcome = cli(&fakes.syntax_error, "root", "").execute_query("SELEC 1;", None);

    assert!(!outcome.success);
    assert_eq!(outcome.stdout, "");
    assert!(outcome.stderr.starts_with("ERROR 1064 (42000)"));
    assert!(outcome.output().is_none());
}

#[test]
fn test_timeout_kills_client() {
    let fakes = clients();
    let client = cli(&fakes.hang, "root", "").with_timeout(Duration::from_secs(1));

    let started = Instant::now();
    let outcome = client.execute_query("SELECT SLEEP(60);", None);

    assert!(!outcome.success);
    assert_eq!(outcome.stdout, "");
    assert_eq!(outcome.stderr, "Command timed out");
    assert!(started.elapsed() < Duration::from_secs(20));
}

#[test]
fn test_missing_script_does_not_spawn() {
    let fakes = clients();
    let missing = fakes.dir.path().join("9-cities_by_state_join.sql");
    let outcome = cli(&fakes.hang, "root", "").execute_file(&missing, None);

    assert!(!outcome.success);
    assert_eq!(
        outcome.stderr,
        format!("File not found: {}", missing.display())
    );
}
