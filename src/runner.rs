//! Task selection, sequential execution and the final summary

use std::fmt::{self, Write};
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::checker::report::RULE;
use crate::checker::run_checker;
use crate::client::SqlExecutor;
use crate::tasks::{self, LAST_TASK};

/// Usage line printed after a selection error
pub const USAGE: &str = "Usage: sqlgrade [task_number]";

/// Invalid command-line task selector
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Task number must be between 0 and {last}", last = LAST_TASK)]
    OutOfRange,

    #[error("Invalid task number '{0}'")]
    Invalid(String),
}

/// Which checkers to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    All,
    Task(u8),
}

impl Selection {
    /// Parse the optional positional argument
    pub fn parse(arg: Option<&str>) -> Result<Self, SelectionError> {
        let Some(raw) = arg else {
            return Ok(Selection::All);
        };
        let task: i64 = raw
            .trim()
            .parse()
            .map_err(|_| SelectionError::Invalid(raw.to_string()))?;
        match u8::try_from(task) {
            Ok(task) if task <= LAST_TASK => Ok(Selection::Task(task)),
            _ => Err(SelectionError::OutOfRange),
        }
    }

    pub fn includes(&self, task: u8) -> bool {
        match self {
            Selection::All => true,
            Selection::Task(selected) => *selected == task,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => write!(f, "SQL More Queries - Comprehensive Task Checker"),
            Selection::Task(task) => write!(f, "SQL More Queries - Testing Task {}", task),
        }
    }
}

/// Verdict of every task that ran, in run order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub results: Vec<(u8, bool)>,
}

impl RunSummary {
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|(_, passed)| *passed).count()
    }

    pub fn all_passed(&self) -> bool {
        self.passed_count() == self.results.len()
    }

    /// 0 when every selected task passed, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\n{}", RULE);
        let _ = writeln!(out, "FINAL SUMMARY");
        let _ = writeln!(out, "{}", RULE);
        for (task, passed) in &self.results {
            let status = if *passed { "✓ PASS" } else { "✗ FAIL" };
            let _ = writeln!(out, "Task {}: {}", task, status);
        }
        let _ = writeln!(
            out,
            "\nTotal: {}/{} tasks passed",
            self.passed_count(),
            self.results.len()
        );
        let _ = writeln!(out, "{}\n", RULE);
        out
    }
}

/// Run the selected checkers one after another and print the summary
pub fn run(selection: Selection, executor: &dyn SqlExecutor, script_dir: &Path) -> RunSummary {
    println!("\n{}\n{}\n{}", RULE, selection, RULE);

    let mut summary = RunSummary::default();
    for checker in tasks::all() {
        let task = checker.task_number();
        if !selection.includes(task) {
            continue;
        }
        let report = run_checker(checker.as_ref(), executor, script_dir);
        summary.results.push((task, report.passed()));
    }

    info!(
        passed = summary.passed_count(),
        total = summary.results.len(),
        "Run complete"
    );
    print!("{}", summary.render());
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection() {
        assert_eq!(Selection::parse(None), Ok(Selection::All));
        assert_eq!(Selection::parse(Some("0")), Ok(Selection::Task(0)));
        assert_eq!(Selection::parse(Some("9")), Ok(Selection::Task(9)));
        assert_eq!(Selection::parse(Some("10")), Err(SelectionError::OutOfRange));
        assert_eq!(Selection::parse(Some("-1")), Err(SelectionError::OutOfRange));
        assert_eq!(
            Selection::parse(Some("seven")),
            Err(SelectionError::Invalid("seven".to_string()))
        );
    }

    #[test]
    fn test_selection_errors_display() {
        assert_eq!(
            SelectionError::OutOfRange.to_string(),
            "Task number must be between 0 and 9"
        );
        assert_eq!(
            SelectionError::Invalid("x".to_string()).to_string(),
            "Invalid task number 'x'"
        );
    }

    #[test]
    fn test_selection_includes() {
        assert!((0..=LAST_TASK).all(|task| Selection::All.includes(task)));
        assert!(Selection::Task(4).includes(4));
        assert!(!Selection::Task(4).includes(5));
        assert_eq!(
            Selection::Task(4).to_string(),
            "SQL More Queries - Testing Task 4"
        );
    }

    #[test]
    fn test_summary() {
        let summary = RunSummary {
            results: vec![(0, true), (1, false), (2, true)],
        };
        assert!(!summary.all_passed());
        assert_eq!(summary.exit_code(), 1);
        let text = summary.render();
        assert!(text.contains("Task 0: ✓ PASS\nTask 1: ✗ FAIL\nTask 2: ✓ PASS\n"));
        assert!(text.contains("Total: 2/3 tasks passed"));

        let clean = RunSummary {
            results: vec![(5, true)],
        };
        assert_eq!(clean.exit_code(), 0);
    }
}
