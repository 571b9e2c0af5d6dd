//! Exercise 7: `cities` table referencing `states` through a foreign key

use crate::checker::context::pick;
use crate::checker::{CheckContext, CheckResult, TaskChecker};
use crate::inspect::table::{last_line_number, numeric_lines};

use super::consecutive_pair;
use super::fixtures::{
    clear_usa_tables, create_database, create_states_table, drop_usa, drop_usa_tables, CITIES,
    STATES, USA_DB,
};

pub struct Cities;

/// Id of the first state named `name`, if the lookup succeeds
fn state_id(ctx: &CheckContext<'_>, name: &str) -> Result<u64, Option<String>> {
    let query = format!(
        "SELECT id FROM {}.{} WHERE name='{}' LIMIT 1;",
        USA_DB, STATES, name
    );
    let outcome = ctx.query(&query);
    match outcome.output().filter(|out| !out.trim().is_empty()) {
        None => Err(None),
        Some(out) => last_line_number(out).ok_or_else(|| Some(out.to_string())),
    }
}

impl Cities {
    fn check_column_layout(ctx: &mut CheckContext<'_>) -> bool {
        let Some(structure) = ctx.fetch_structure(CITIES, USA_DB) else {
            return false;
        };

        if let Some(id) = ctx.check_column_exists(&structure, "id") {
            ctx.check_primary_key("id", id);
            ctx.check_auto_increment("id", id);
            ctx.check_not_null("id", id);
        }
        if let Some(state_id) = ctx.check_column_exists(&structure, "state_id") {
            ctx.check_not_null("state_id", state_id);
            ctx.check_type("state_id", state_id, "int");
        }
        if let Some(name) = ctx.check_column_exists(&structure, "name") {
            ctx.check_not_null("name", name);
            ctx.check_type("name", name, "varchar(256)");
        }
        true
    }

    fn check_foreign_key_catalog(ctx: &mut CheckContext<'_>) {
        match ctx.inspector().foreign_keys(CITIES, USA_DB) {
            Some(rows) => {
                let references_states = rows.contains(STATES);
                let ok = references_states && rows.contains("id");
                ctx.record(
                    "FOREIGN KEY Constraint Exists",
                    ok,
                    format!(
                        "FOREIGN KEY {} referencing '{}.id'",
                        pick(references_states, "exists", "does NOT exist"),
                        STATES
                    ),
                    (!ok).then_some(rows),
                );
            }
            None => {
                ctx.record(
                    "FOREIGN KEY Constraint Check",
                    false,
                    "Failed to check FOREIGN KEY constraint",
                    None,
                );
            }
        }
    }

    fn check_foreign_key_behavior(ctx: &mut CheckContext<'_>) {
        let insert_state = format!("INSERT INTO {}.{} (name) VALUES ('California');", USA_DB, STATES);
        let inserted = ctx.query(&insert_state).success;
        let california = if inserted { state_id(ctx, "California").ok() } else { None };

        match california {
            Some(id) => {
                ctx.check_accepted(
                    "FOREIGN KEY Allows Valid Reference",
                    "Inserting city with valid state_id",
                    &format!(
                        "INSERT INTO {}.{} (state_id, name) VALUES ({}, 'San Francisco');",
                        USA_DB, CITIES, id
                    ),
                );
                ctx.check_rejected(
                    "FOREIGN KEY Rejects Invalid Reference",
                    "Inserting city with invalid state_id",
                    &format!(
                        "INSERT INTO {}.{} (state_id, name) VALUES (999, 'Invalid City');",
                        USA_DB, CITIES
                    ),
                );
            }
            None => {
                ctx.record(
                    "FOREIGN KEY Functionality Test",
                    false,
                    "Failed to insert test state for FK testing",
                    None,
                );
            }
        }
    }

    /// Returns false when the state id could not be obtained
    fn check_auto_increment_behavior(ctx: &mut CheckContext<'_>) -> bool {
        ctx.query(&format!("INSERT INTO {}.{} (name) VALUES ('Texas');", USA_DB, STATES));

        let texas = match state_id(ctx, "Texas") {
            Ok(id) => id,
            Err(None) => {
                ctx.record("Get State ID", false, "Failed to retrieve inserted state ID", None);
                return false;
            }
            Err(Some(output)) => {
                ctx.record(
                    "Parse State ID",
                    false,
                    format!("Failed to parse state ID from output: {}", output),
                    None,
                );
                return false;
            }
        };

        for (ordinal, city) in [("first", "Houston"), ("second", "Dallas")] {
            let insert = format!(
                "INSERT INTO {}.{} (state_id, name) VALUES ({}, '{}');",
                USA_DB, CITIES, texas, city
            );
            if !ctx.query(&insert).success {
                ctx.record(
                    "Insert Test",
                    false,
                    format!("Failed to insert {} test record", ordinal),
                    None,
                );
                return true;
            }
        }

        let select = format!("SELECT id FROM {}.{} ORDER BY id;", USA_DB, CITIES);
        match ctx.query(&select).output() {
            Some(stdout) => {
                let sequential = consecutive_pair(&numeric_lines(stdout));
                ctx.record(
                    "AUTO_INCREMENT Works (generates sequential ids)",
                    sequential,
                    format!(
                        "AUTO_INCREMENT {}",
                        pick(sequential, "works correctly", "does NOT work")
                    ),
                    (!sequential).then(|| stdout.to_string()),
                );
            }
            None => {
                ctx.record(
                    "AUTO_INCREMENT Test",
                    false,
                    "Failed to verify AUTO_INCREMENT",
                    None,
                );
            }
        }
        true
    }
}

impl TaskChecker for Cities {
    fn task_number(&self) -> u8 {
        7
    }

    fn sql_file(&self) -> &'static str {
        "7-cities.sql"
    }

    fn setup(&self, ctx: &mut CheckContext<'_>) -> CheckResult<()> {
        create_database(ctx, USA_DB);
        drop_usa_tables(ctx);
        create_states_table(ctx);
        Ok(())
    }

    fn teardown(&self, ctx: &mut CheckContext<'_>) {
        drop_usa(ctx);
    }

    fn run_assertions(&self, ctx: &mut CheckContext<'_>) -> CheckResult<()> {
        if !ctx.check_file_exists() || ctx.check_execution(None).is_none() {
            return Ok(());
        }
        if !ctx.check_database_created(USA_DB) || !ctx.check_table_created(CITIES, USA_DB) {
            return Ok(());
        }
        if !Self::check_column_layout(ctx) {
            return Ok(());
        }

        Self::check_foreign_key_catalog(ctx);
        Self::check_foreign_key_behavior(ctx);
        clear_usa_tables(ctx);

        let completed = Self::check_auto_increment_behavior(ctx);
        clear_usa_tables(ctx);
        if !completed {
            return Ok(());
        }

        let script = ctx.read_script()?;
        let db_guard = script.mentions("CREATE DATABASE IF NOT EXISTS");
        ctx.record(
            "Uses IF NOT EXISTS for Database",
            db_guard,
            format!(
                "Script {} IF NOT EXISTS for database creation",
                pick(db_guard, "uses", "does NOT use")
            ),
            None,
        );
        let table_guard = script.mentions("CREATE TABLE IF NOT EXISTS");
        ctx.record(
            "Uses IF NOT EXISTS for Table",
            table_guard,
            format!(
                "Script {} IF NOT EXISTS for table creation",
                pick(table_guard, "uses", "does NOT use")
            ),
            None,
        );

        ctx.check_idempotent(None);
        Ok(())
    }
}
