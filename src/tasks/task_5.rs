//! Exercise 5: a table whose `id` defaults to 1 and is unique

use crate::checker::{CheckContext, CheckResult, TaskChecker};

use super::fixtures::EXERCISE_DB;
use super::table_exercise;

const TABLE: &str = "unique_id";

pub struct UniqueId;

impl TaskChecker for UniqueId {
    fn task_number(&self) -> u8 {
        5
    }

    fn sql_file(&self) -> &'static str {
        "5-unique_id.sql"
    }

    fn setup(&self, ctx: &mut CheckContext<'_>) -> CheckResult<()> {
        table_exercise::prepare(ctx, TABLE);
        Ok(())
    }

    fn teardown(&self, ctx: &mut CheckContext<'_>) {
        ctx.inspector().drop_table(TABLE, Some(EXERCISE_DB));
    }

    fn run_assertions(&self, ctx: &mut CheckContext<'_>) -> CheckResult<()> {
        table_exercise::run(ctx, TABLE, |ctx, structure| {
            if let Some(id) = ctx.check_column_exists(structure, "id") {
                ctx.check_default("id", id, "1");
                ctx.check_unique("id", id);
            }
            if let Some(name) = ctx.check_column_exists(structure, "name") {
                ctx.check_type("name", name, "varchar(256)");
            }

            let first = format!(
                "INSERT INTO {}.{} (id, name) VALUES (1, 'test1');",
                EXERCISE_DB, TABLE
            );
            if !ctx.query(&first).success {
                ctx.record("Insert Test", false, "Failed to insert initial test data", None);
                return;
            }
            ctx.check_rejected(
                "UNIQUE Constraint Works (duplicate id fails)",
                "Inserting duplicate id",
                &format!(
                    "INSERT INTO {}.{} (id, name) VALUES (1, 'test2');",
                    EXERCISE_DB, TABLE
                ),
            );
        });
        Ok(())
    }
}
