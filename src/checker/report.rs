//! Test cases and per-task reports

use std::fmt::Write;

/// Horizontal rule used by every banner
pub const RULE: &str = "============================================================";

/// Outcome marker printed in front of each case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestStatus {
    Pass,
    Fail,
}

impl TestStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            TestStatus::Pass => "✓",
            TestStatus::Fail => "✗",
        }
    }
}

/// A single recorded assertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub name: String,
    pub passed: bool,
    pub message: String,
    pub details: Option<String>,
}

impl TestCase {
    pub fn new(
        name: impl Into<String>,
        passed: bool,
        message: impl Into<String>,
        details: Option<String>,
    ) -> Self {
        TestCase {
            name: name.into(),
            passed,
            message: message.into(),
            details,
        }
    }

    pub fn status(&self) -> TestStatus {
        if self.passed {
            TestStatus::Pass
        } else {
            TestStatus::Fail
        }
    }
}

/// All cases recorded for one task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerReport {
    pub task: u8,
    pub sql_file: String,
    pub cases: Vec<TestCase>,
}

impl CheckerReport {
    pub fn new(task: u8, sql_file: impl Into<String>, cases: Vec<TestCase>) -> Self {
        CheckerReport {
            task,
            sql_file: sql_file.into(),
            cases,
        }
    }

    /// Conjunction of every case; a report without cases never passes
    pub fn passed(&self) -> bool {
        !self.cases.is_empty() && self.cases.iter().all(|c| c.passed)
    }

    pub fn failed_cases(&self) -> impl Iterator<Item = &TestCase> {
        self.cases.iter().filter(|c| !c.passed)
    }

    /// Case by name (first match)
    pub fn case(&self, name: &str) -> Option<&TestCase> {
        self.cases.iter().find(|c| c.name == name)
    }

    /// Console rendering of every case followed by the task verdict
    pub fn render(&self) -> String {
        let mut out = String::new();
        for case in &self.cases {
            let _ = writeln!(out, "\n{} {}", case.status().symbol(), case.name);
            let _ = writeln!(out, "  {}", case.message);
            if let Some(details) = &case.details {
                let _ = writeln!(out, "  Details: {}", details);
            }
        }
        let _ = writeln!(out, "\n{}", RULE);
        if self.passed() {
            let _ = writeln!(out, "✓ Task {}: ALL TESTS PASSED", self.task);
        } else {
            let _ = writeln!(out, "✗ Task {}: SOME TESTS FAILED", self.task);
        }
        let _ = writeln!(out, "{}\n", RULE);
        out
    }
}

/// Banner printed before a task starts
pub fn task_banner(task: u8, sql_file: &str) -> String {
    format!("\n{}\nTesting Task {}: {}\n{}", RULE, task, sql_file, RULE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_does_not_pass() {
        let report = CheckerReport::new(3, "3-force_name.sql", Vec::new());
        assert!(!report.passed());
        assert!(report.render().contains("SOME TESTS FAILED"));
    }

    #[test]
    fn test_passed_is_conjunction() {
        let mut report = CheckerReport::new(
            5,
            "5-unique_id.sql",
            vec![
                TestCase::new("File Existence", true, "exists", None),
                TestCase::new("SQL Execution", true, "ok", None),
            ],
        );
        assert!(report.passed());

        report.cases.push(TestCase::new(
            "Idempotency Test",
            false,
            "Script CANNOT be run multiple times without errors",
            Some("ERROR 1050 (42S01): Table 'unique_id' already exists".to_string()),
        ));
        assert!(!report.passed());
        assert_eq!(report.failed_cases().count(), 1);
        assert!(report.case("SQL Execution").unwrap().passed);
    }

    #[test]
    fn test_render() {
        let report = CheckerReport::new(
            1,
            "1-create_user.sql",
            vec![
                TestCase::new("File Existence", true, "SQL file '1-create_user.sql' exists", None),
                TestCase::new(
                    "SQL Execution",
                    false,
                    "Failed to execute SQL file",
                    Some("ERROR 1064".to_string()),
                ),
            ],
        );
        let text = report.render();
        assert!(text.contains("✓ File Existence\n  SQL file '1-create_user.sql' exists\n"));
        assert!(text.contains("✗ SQL Execution\n  Failed to execute SQL file\n  Details: ERROR 1064\n"));
        assert!(text.contains("✗ Task 1: SOME TESTS FAILED"));
    }

    #[test]
    fn test_banner() {
        let banner = task_banner(0, "0-privileges.sql");
        assert!(banner.contains("Testing Task 0: 0-privileges.sql"));
        assert!(banner.starts_with('\n'));
    }
}
