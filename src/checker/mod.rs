//! Task checker framework
//!
//! Each exercise implements [`TaskChecker`]; [`run_checker`] drives it
//! through a fixed lifecycle:
//!
//! ```text
//! INIT -> SETUP -> EXECUTE -> (ASSERT)* -> TEARDOWN -> REPORT
//! ```
//!
//! EXECUTE and ASSERT both happen inside `run_assertions`. A failing
//! EXECUTE records one case and returns early. An error or panic in SETUP
//! or ASSERT becomes a single "Execution Error" case. TEARDOWN runs exactly
//! once in every case.
//!
//! Setup commands that fail are not reported: they leave the database in a
//! state where the later checks fail on their own.

pub mod context;
pub mod error;
pub mod report;
pub mod script;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use tracing::{info, warn};

use crate::client::SqlExecutor;

pub use context::{CheckContext, EXECUTION_ERROR};
pub use error::{CheckError, CheckResult};
pub use report::{CheckerReport, TestCase, TestStatus};
pub use script::SqlScript;

/// One exercise's setup, assertions and teardown
pub trait TaskChecker {
    /// Exercise number (0-9)
    fn task_number(&self) -> u8;

    /// Script file name, relative to the script directory
    fn sql_file(&self) -> &'static str;

    /// Establish fixtures before the script runs
    fn setup(&self, _ctx: &mut CheckContext<'_>) -> CheckResult<()> {
        Ok(())
    }

    /// Drop fixtures and anything the script created
    fn teardown(&self, _ctx: &mut CheckContext<'_>) {}

    /// Execute the script and record every assertion
    fn run_assertions(&self, ctx: &mut CheckContext<'_>) -> CheckResult<()>;
}

/// Run one checker through its full lifecycle and print its report
pub fn run_checker(
    checker: &dyn TaskChecker,
    executor: &dyn SqlExecutor,
    script_dir: &Path,
) -> CheckerReport {
    let task = checker.task_number();
    let sql_file = checker.sql_file();
    println!("{}", report::task_banner(task, sql_file));
    info!(task, sql_file, "Running checker");

    let mut ctx = CheckContext::new(executor, script_dir, sql_file);

    let result = guarded(|| checker.setup(&mut ctx));
    let result = result.and_then(|()| guarded(|| checker.run_assertions(&mut ctx)));
    if let Err(e) = result {
        warn!(task, error = %e, "Checker aborted");
        ctx.record_error(&e);
    }

    if let Err(e) = guarded(|| {
        checker.teardown(&mut ctx);
        Ok(())
    }) {
        warn!(task, error = %e, "Teardown failed");
    }

    let report = CheckerReport::new(task, sql_file, ctx.into_cases());
    info!(task, passed = report.passed(), cases = report.cases.len(), "Checker finished");
    print!("{}", report.render());
    report
}

/// Run a step, turning a panic into a [`CheckError::Panic`]
fn guarded<F>(step: F) -> CheckResult<()>
where
    F: FnOnce() -> CheckResult<()>,
{
    match panic::catch_unwind(AssertUnwindSafe(step)) {
        Ok(result) => result,
        Err(payload) => Err(CheckError::Panic(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
