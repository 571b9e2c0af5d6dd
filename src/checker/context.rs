//! Per-run checker state and the reusable assertions
//!
//! Every `check_*` method appends exactly one [`TestCase`] and returns
//! whether it passed, so a task can decide to stop when a later check
//! would be meaningless.

use std::path::{Path, PathBuf};

use crate::client::{ExecOutcome, SqlExecutor};
use crate::inspect::{ColumnInfo, Principal, SchemaInspector, TableStructure};

use super::error::{CheckError, CheckResult};
use super::report::TestCase;
use super::script::SqlScript;

/// Name of the case recorded for unexpected errors
pub const EXECUTION_ERROR: &str = "Execution Error";

/// `yes` when `ok`, `no` otherwise
pub(crate) fn pick<'s>(ok: bool, yes: &'s str, no: &'s str) -> &'s str {
    if ok {
        yes
    } else {
        no
    }
}

/// State owned by one checker invocation
pub struct CheckContext<'a> {
    executor: &'a dyn SqlExecutor,
    inspector: SchemaInspector<'a>,
    script_path: PathBuf,
    sql_file: String,
    cases: Vec<TestCase>,
}

impl<'a> CheckContext<'a> {
    pub fn new(executor: &'a dyn SqlExecutor, script_dir: &Path, sql_file: &str) -> Self {
        CheckContext {
            executor,
            inspector: SchemaInspector::new(executor),
            script_path: script_dir.join(sql_file),
            sql_file: sql_file.to_string(),
            cases: Vec::new(),
        }
    }

    pub fn inspector(&self) -> SchemaInspector<'a> {
        self.inspector
    }

    pub fn script_path(&self) -> &Path {
        &self.script_path
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn into_cases(self) -> Vec<TestCase> {
        self.cases
    }

    /// Run an ad-hoc statement against the server
    pub fn query(&self, sql: &str) -> ExecOutcome {
        self.executor.execute_query(sql, None)
    }

    /// Run the exercise script
    pub fn run_script(&self, database: Option<&str>) -> ExecOutcome {
        self.executor.execute_file(&self.script_path, database)
    }

    pub fn read_script(&self) -> CheckResult<SqlScript> {
        Ok(SqlScript::read(&self.script_path)?)
    }

    pub fn record(
        &mut self,
        name: impl Into<String>,
        passed: bool,
        message: impl Into<String>,
        details: Option<String>,
    ) -> bool {
        self.cases.push(TestCase::new(name, passed, message, details));
        passed
    }

    pub(crate) fn record_error(&mut self, err: &CheckError) {
        self.record(
            EXECUTION_ERROR,
            false,
            format!("Error during test execution: {}", err),
            None,
        );
    }

    pub fn check_file_exists(&mut self) -> bool {
        let exists = self.script_path.exists();
        let message = if exists {
            format!("SQL file '{}' exists", self.sql_file)
        } else {
            format!("SQL file '{}' not found", self.sql_file)
        };
        self.record("File Existence", exists, message, None)
    }

    /// Execute the script; `None` means the checker must stop here
    pub fn check_execution(&mut self, database: Option<&str>) -> Option<String> {
        let outcome = self.run_script(database);
        if !outcome.success {
            self.record(
                "SQL Execution",
                false,
                "Failed to execute SQL file",
                Some(outcome.stderr),
            );
            return None;
        }
        self.record("SQL Execution", true, "SQL file executed successfully", None);
        Some(outcome.stdout)
    }

    /// Re-run the script; it must not error the second time
    pub fn check_idempotent(&mut self, database: Option<&str>) -> bool {
        let outcome = self.run_script(database);
        let ok = outcome.success;
        self.record(
            "Idempotency Test",
            ok,
            format!(
                "Script {} be run multiple times without errors",
                pick(ok, "can", "CANNOT")
            ),
            (!ok).then_some(outcome.stderr),
        )
    }

    pub fn check_user_created(&mut self, principal: &Principal) -> bool {
        let exists = self.inspector.user_exists(principal);
        self.record(
            "User Creation",
            exists,
            format!("User {} {} created", principal, pick(exists, "was", "was NOT")),
            None,
        )
    }

    pub fn check_database_created(&mut self, database: &str) -> bool {
        let exists = self.inspector.database_exists(database);
        self.record(
            "Database Creation",
            exists,
            format!(
                "Database '{}' {} created",
                database,
                pick(exists, "was", "was NOT")
            ),
            None,
        )
    }

    pub fn check_table_created(&mut self, table: &str, database: &str) -> bool {
        let exists = self.inspector.table_exists(table, Some(database));
        self.record(
            "Table Creation",
            exists,
            format!(
                "Table '{}' {} created in '{}'",
                table,
                pick(exists, "was", "was NOT"),
                database
            ),
            None,
        )
    }

    /// `DESCRIBE` the table; records a failing case only when that fails
    pub fn fetch_structure(&mut self, table: &str, database: &str) -> Option<TableStructure> {
        let structure = self.inspector.table_structure(table, Some(database));
        if structure.is_none() {
            self.record(
                "Get Table Structure",
                false,
                format!("Failed to retrieve structure for table '{}'", table),
                None,
            );
        }
        structure
    }

    pub fn check_column_exists<'s>(
        &mut self,
        structure: &'s TableStructure,
        column: &str,
    ) -> Option<&'s ColumnInfo> {
        let info = structure.column(column);
        self.record(
            format!("Column '{}' Exists", column),
            info.is_some(),
            format!(
                "Column '{}' {}",
                column,
                pick(info.is_some(), "exists", "does NOT exist")
            ),
            None,
        );
        info
    }

    pub fn check_not_null(&mut self, column: &str, info: &ColumnInfo) -> bool {
        let ok = info.is_not_null();
        self.record(
            format!("Column '{}' is NOT NULL", column),
            ok,
            format!(
                "Column '{}' {} constrained as NOT NULL",
                column,
                pick(ok, "is", "is NOT")
            ),
            (!ok).then(|| format!("Actual: {}", info.null)),
        )
    }

    /// Case-insensitive containment check on the column type
    pub fn check_type(&mut self, column: &str, info: &ColumnInfo, expected: &str) -> bool {
        let ok = info.type_contains(expected);
        let expected = expected.to_uppercase();
        self.record(
            format!("Column '{}' Type is {}", column, expected),
            ok,
            format!(
                "Column '{}' type {} {}",
                column,
                pick(ok, "is", "is NOT"),
                expected
            ),
            (!ok).then(|| format!("Actual: {}", info.data_type)),
        )
    }

    pub fn check_default(&mut self, column: &str, info: &ColumnInfo, expected: &str) -> bool {
        let ok = info.default.as_deref() == Some(expected);
        self.record(
            format!("Column '{}' DEFAULT Value is {}", column, expected),
            ok,
            format!(
                "Column '{}' default {} {}",
                column,
                pick(ok, "is", "is NOT"),
                expected
            ),
            (!ok).then(|| format!("Actual: {}", info.default.as_deref().unwrap_or("None"))),
        )
    }

    pub fn check_primary_key(&mut self, column: &str, info: &ColumnInfo) -> bool {
        let ok = info.has_key(&["PRI"]);
        self.record(
            format!("Column '{}' is PRIMARY KEY", column),
            ok,
            format!("Column '{}' {} PRIMARY KEY", column, pick(ok, "is", "is NOT")),
            (!ok).then(|| format!("Actual key type: {}", info.key)),
        )
    }

    /// A primary key also satisfies uniqueness
    pub fn check_unique(&mut self, column: &str, info: &ColumnInfo) -> bool {
        let ok = info.has_key(&["UNI", "PRI"]);
        self.record(
            format!("Column '{}' has UNIQUE Constraint", column),
            ok,
            format!(
                "Column '{}' {} UNIQUE constraint",
                column,
                pick(ok, "has", "does NOT have")
            ),
            (!ok).then(|| format!("Actual key type: {}", info.key)),
        )
    }

    pub fn check_auto_increment(&mut self, column: &str, info: &ColumnInfo) -> bool {
        let ok = info.is_auto_increment();
        self.record(
            format!("Column '{}' has AUTO_INCREMENT", column),
            ok,
            format!(
                "Column '{}' {} AUTO_INCREMENT",
                column,
                pick(ok, "has", "does NOT have")
            ),
            (!ok).then(|| format!("Actual extra: {}", info.extra.as_deref().unwrap_or("None"))),
        )
    }

    /// A statement that the schema must refuse
    pub fn check_rejected(&mut self, name: &str, what: &str, statement: &str) -> bool {
        let ok = !self.query(statement).success;
        self.record(
            name,
            ok,
            format!(
                "{} {}",
                what,
                pick(ok, "correctly fails", "INCORRECTLY succeeds")
            ),
            None,
        )
    }

    /// A statement that the schema must accept
    pub fn check_accepted(&mut self, name: &str, what: &str, statement: &str) -> bool {
        let ok = self.query(statement).success;
        self.record(
            name,
            ok,
            format!("{} {}", what, pick(ok, "succeeds", "FAILS")),
            None,
        )
    }

    /// Case-insensitive authoring check on the script text
    pub fn check_script_uses(&mut self, name: &str, script: &SqlScript, keyword: &str) -> bool {
        let ok = script.mentions(keyword);
        self.record(
            name,
            ok,
            format!("Script {} {}", pick(ok, "uses", "does NOT use"), keyword),
            None,
        )
    }
}
