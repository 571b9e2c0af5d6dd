//! Schema inspector
//!
//! Introspection and cleanup on top of a [`SqlExecutor`]. All parsing of
//! the client's tab-delimited text output lives in this module, so swapping
//! the executor for a driver-level one only touches this layer.
//!
//! Existence checks match the target name as a substring of the listing
//! output, which tolerates header lines and quoting but can report a
//! false positive when one fixture name is a prefix of another.

pub mod grants;
pub mod table;

use std::fmt;

use tracing::debug;

use crate::client::SqlExecutor;

pub use grants::{GrantList, Privilege};
pub use table::{ColumnInfo, TableStructure};

/// Default host for exercise principals
pub const LOCALHOST: &str = "localhost";

/// A database account: user name plus host pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user: String,
    pub host: String,
}

impl Principal {
    pub fn new(user: impl Into<String>, host: impl Into<String>) -> Self {
        Principal {
            user: user.into(),
            host: host.into(),
        }
    }

    /// Principal connecting from `localhost`
    pub fn local(user: impl Into<String>) -> Self {
        Principal::new(user, LOCALHOST)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'@'{}'", self.user, self.host)
    }
}

/// `db.table` when a database is given, plain `table` otherwise
pub fn qualified(table: &str, database: Option<&str>) -> String {
    match database {
        Some(db) => format!("{}.{}", db, table),
        None => table.to_string(),
    }
}

/// Introspection queries and fixture cleanup
#[derive(Clone, Copy)]
pub struct SchemaInspector<'a> {
    executor: &'a dyn SqlExecutor,
}

impl<'a> SchemaInspector<'a> {
    pub fn new(executor: &'a dyn SqlExecutor) -> Self {
        SchemaInspector { executor }
    }

    fn listing_contains(&self, query: &str, needle: &str) -> bool {
        let outcome = self.executor.execute_query(query, None);
        outcome.success && outcome.stdout.contains(needle)
    }

    pub fn user_exists(&self, principal: &Principal) -> bool {
        let query = format!(
            "SELECT User FROM mysql.user WHERE User = '{}' AND Host = '{}';",
            principal.user, principal.host
        );
        self.listing_contains(&query, &principal.user)
    }

    pub fn database_exists(&self, database: &str) -> bool {
        let query = format!("SHOW DATABASES LIKE '{}';", database);
        self.listing_contains(&query, database)
    }

    pub fn table_exists(&self, table: &str, database: Option<&str>) -> bool {
        let query = match database {
            Some(db) => format!("SHOW TABLES FROM {} LIKE '{}';", db, table),
            None => format!("SHOW TABLES LIKE '{}';", table),
        };
        self.listing_contains(&query, table)
    }

    /// Grants held by `principal`, `None` if the listing failed
    pub fn user_grants(&self, principal: &Principal) -> Option<GrantList> {
        let query = format!("SHOW GRANTS FOR {};", principal);
        let outcome = self.executor.execute_query(&query, None);
        outcome.output().map(GrantList::parse)
    }

    /// Parsed `DESCRIBE` output, `None` if the query failed
    pub fn table_structure(&self, table: &str, database: Option<&str>) -> Option<TableStructure> {
        let query = format!("DESCRIBE {};", qualified(table, database));
        let outcome = self.executor.execute_query(&query, None);
        outcome.output().map(TableStructure::parse)
    }

    /// Raw foreign-key catalog rows for `table`
    ///
    /// Returns `None` when the catalog query fails or prints nothing.
    pub fn foreign_keys(&self, table: &str, database: &str) -> Option<String> {
        let query = format!(
            "SELECT CONSTRAINT_NAME, REFERENCED_TABLE_NAME, REFERENCED_COLUMN_NAME \
             FROM INFORMATION_SCHEMA.KEY_COLUMN_USAGE \
             WHERE TABLE_SCHEMA = '{}' AND TABLE_NAME = '{}' \
             AND REFERENCED_TABLE_NAME IS NOT NULL;",
            database, table
        );
        let outcome = self.executor.execute_query(&query, None);
        outcome
            .output()
            .filter(|out| !out.is_empty())
            .map(str::to_string)
    }

    // Cleanup is fire-and-forget: the outcome is logged and discarded

    fn run_cleanup(&self, statement: &str) {
        let outcome = self.executor.execute_query(statement, None);
        debug!(statement, success = outcome.success, "Cleanup");
    }

    pub fn drop_user(&self, principal: &Principal) {
        self.run_cleanup(&format!("DROP USER IF EXISTS {};", principal));
    }

    pub fn drop_database(&self, database: &str) {
        self.run_cleanup(&format!("DROP DATABASE IF EXISTS {};", database));
    }

    pub fn drop_table(&self, table: &str, database: Option<&str>) {
        self.run_cleanup(&format!(
            "DROP TABLE IF EXISTS {};",
            qualified(table, database)
        ));
    }

    /// Delete every row of `table`
    pub fn clear_table(&self, table: &str, database: &str) {
        self.run_cleanup(&format!("DELETE FROM {}.{};", database, table));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::Path;

    use crate::client::ExecOutcome;

    /// Answers every query with the same outcome and records the queries
    struct FixedExecutor {
        outcome: ExecOutcome,
        queries: RefCell<Vec<String>>,
    }

    impl FixedExecutor {
        fn new(outcome: ExecOutcome) -> Self {
            FixedExecutor {
                outcome,
                queries: RefCell::new(Vec::new()),
            }
        }
    }

    impl SqlExecutor for FixedExecutor {
        fn execute_query(&self, query: &str, _database: Option<&str>) -> ExecOutcome {
            self.queries.borrow_mut().push(query.to_string());
            self.outcome.clone()
        }

        fn execute_file(&self, _path: &Path, _database: Option<&str>) -> ExecOutcome {
            self.outcome.clone()
        }
    }

    #[test]
    fn test_principal_display() {
        assert_eq!(Principal::local("user_0d_1").to_string(), "'user_0d_1'@'localhost'");
        assert_eq!(Principal::new("app", "%").to_string(), "'app'@'%'");
    }

    #[test]
    fn test_qualified() {
        assert_eq!(qualified("states", Some("hbtn_0d_usa")), "hbtn_0d_usa.states");
        assert_eq!(qualified("states", None), "states");
    }

    #[test]
    fn test_existence_uses_substring_match() {
        let exec = FixedExecutor::new(ExecOutcome::ok("Database (hbtn_0d_2)\nhbtn_0d_2\n"));
        let inspector = SchemaInspector::new(&exec);
        assert!(inspector.database_exists("hbtn_0d_2"));
        // A prefix of an existing name also matches
        assert!(inspector.database_exists("hbtn_0d"));
        assert!(!inspector.database_exists("hbtn_0d_usa"));
        assert_eq!(exec.queries.borrow()[0], "SHOW DATABASES LIKE 'hbtn_0d_2';");
    }

    #[test]
    fn test_existence_requires_success() {
        let exec = FixedExecutor::new(ExecOutcome {
            success: false,
            stdout: "states".to_string(),
            stderr: "ERROR 1049".to_string(),
        });
        let inspector = SchemaInspector::new(&exec);
        assert!(!inspector.table_exists("states", Some("hbtn_0d_usa")));
        assert_eq!(
            exec.queries.borrow()[0],
            "SHOW TABLES FROM hbtn_0d_usa LIKE 'states';"
        );
    }

    #[test]
    fn test_user_grants() {
        let exec = FixedExecutor::new(ExecOutcome::ok(
            "Grants for user_0d_1@localhost\nGRANT ALL PRIVILEGES ON *.* TO `user_0d_1`@`localhost`\n",
        ));
        let inspector = SchemaInspector::new(&exec);
        let grants = inspector.user_grants(&Principal::local("user_0d_1")).unwrap();
        assert_eq!(
            grants.joined(),
            "GRANT ALL PRIVILEGES ON *.* TO `user_0d_1`@`localhost`"
        );
        assert_eq!(
            exec.queries.borrow()[0],
            "SHOW GRANTS FOR 'user_0d_1'@'localhost';"
        );

        let failing = FixedExecutor::new(ExecOutcome::failed("ERROR 1141"));
        assert!(SchemaInspector::new(&failing)
            .user_grants(&Principal::local("nobody"))
            .is_none());
    }

    #[test]
    fn test_foreign_keys_empty_output() {
        let exec = FixedExecutor::new(ExecOutcome::ok(""));
        assert!(SchemaInspector::new(&exec)
            .foreign_keys("cities", "hbtn_0d_usa")
            .is_none());
    }

    #[test]
    fn test_cleanup_statements() {
        let exec = FixedExecutor::new(ExecOutcome::failed("ignored"));
        let inspector = SchemaInspector::new(&exec);
        inspector.drop_user(&Principal::local("user_0d_1"));
        inspector.drop_database("hbtn_0d_2");
        inspector.drop_table("force_name", Some("hbtn_0d_2"));
        inspector.clear_table("cities", "hbtn_0d_usa");
        assert_eq!(
            *exec.queries.borrow(),
            vec![
                "DROP USER IF EXISTS 'user_0d_1'@'localhost';",
                "DROP DATABASE IF EXISTS hbtn_0d_2;",
                "DROP TABLE IF EXISTS hbtn_0d_2.force_name;",
                "DELETE FROM hbtn_0d_usa.cities;",
            ]
        );
    }
}
