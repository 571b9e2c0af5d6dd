//! sqlgrade binary
//!
//! Usage: sqlgrade [task_number]
//!
//! Exit codes:
//!   0 - Every selected task passed
//!   1 - A task failed, or the arguments/environment were invalid

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sqlgrade::client::MysqlCli;
use sqlgrade::config::HarnessConfig;
use sqlgrade::runner::{self, Selection, USAGE};

#[derive(Parser)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Grade the SQL more-queries exercise scripts against a MySQL server")]
struct Cli {
    /// Exercise to check (0-9); all of them when omitted
    #[arg(allow_hyphen_values = true)]
    task: Option<String>,

    /// Anything after the task number is ignored
    #[arg(hide = true, allow_hyphen_values = true, trailing_var_arg = true)]
    rest: Vec<String>,
}

fn usage_error(message: impl std::fmt::Display) -> ! {
    println!("Error: {}", message);
    println!("{}", USAGE);
    std::process::exit(1);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sqlgrade=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Cli { task, rest } = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => usage_error(e.kind()),
    };
    if !rest.is_empty() {
        tracing::debug!(ignored = ?rest, "Ignoring extra arguments");
    }

    let selection = match Selection::parse(task.as_deref()) {
        Ok(selection) => selection,
        Err(e) => usage_error(e),
    };

    let config = match HarnessConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!(
        user = %config.user,
        client = %config.client_program,
        script_dir = ?config.script_dir,
        timeout_secs = config.timeout.as_secs(),
        "Loaded configuration"
    );

    let client = MysqlCli::from_config(&config);
    let summary = runner::run(selection, &client, &config.script_dir);
    std::process::exit(summary.exit_code());
}
