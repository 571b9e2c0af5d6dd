//! Exercise 6: `states` table with an auto-incrementing primary key

use crate::checker::context::pick;
use crate::checker::{CheckContext, CheckResult, TaskChecker};
use crate::inspect::table::numeric_lines;

use super::consecutive_pair;
use super::fixtures::{create_database, STATES, USA_DB};

pub struct States;

impl States {
    fn check_auto_increment_behavior(ctx: &mut CheckContext<'_>) {
        for (ordinal, state) in [("first", "California"), ("second", "Arizona")] {
            let insert = format!("INSERT INTO {}.{} (name) VALUES ('{}');", USA_DB, STATES, state);
            if !ctx.query(&insert).success {
                ctx.record(
                    "Insert Test",
                    false,
                    format!("Failed to insert {} test record", ordinal),
                    None,
                );
                return;
            }
        }

        let select = format!("SELECT id FROM {}.{} ORDER BY id;", USA_DB, STATES);
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
    }
}

impl TaskChecker for States {
    fn task_number(&self) -> u8 {
        6
    }

    fn sql_file(&self) -> &'static str {
        "6-states.sql"
    }

    fn setup(&self, ctx: &mut CheckContext<'_>) -> CheckResult<()> {
        create_database(ctx, USA_DB);
        ctx.inspector().drop_table(STATES, Some(USA_DB));
        Ok(())
    }

    fn teardown(&self, ctx: &mut CheckContext<'_>) {
        let inspector = ctx.inspector();
        inspector.drop_table(STATES, Some(USA_DB));
        inspector.drop_database(USA_DB);
    }

    fn run_assertions(&self, ctx: &mut CheckContext<'_>) -> CheckResult<()> {
        if !ctx.check_file_exists() || ctx.check_execution(None).is_none() {
            return Ok(());
        }
        if !ctx.check_table_created(STATES, USA_DB) {
            return Ok(());
        }
        let Some(structure) = ctx.fetch_structure(STATES, USA_DB) else {
            return Ok(());
        };

        if let Some(id) = ctx.check_column_exists(&structure, "id") {
            ctx.check_primary_key("id", id);
            ctx.check_auto_increment("id", id);
        }
        if let Some(name) = ctx.check_column_exists(&structure, "name") {
            ctx.check_not_null("name", name);
            ctx.check_type("name", name, "varchar(256)");
        }

        Self::check_auto_increment_behavior(ctx);

        ctx.check_rejected(
            "NOT NULL Constraint Works (INSERT with NULL name fails)",
            "Inserting NULL name",
            &format!("INSERT INTO {}.{} (id) VALUES (100);", USA_DB, STATES),
        );

        ctx.inspector().clear_table(STATES, USA_DB);
        ctx.check_idempotent(None);
        Ok(())
    }
}
