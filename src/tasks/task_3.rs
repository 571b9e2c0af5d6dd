//! Exercise 3: a table whose `name` column refuses NULL

use crate::checker::{CheckContext, CheckResult, TaskChecker};

use super::fixtures::EXERCISE_DB;
use super::table_exercise;

const TABLE: &str = "force_name";

pub struct ForceName;

impl TaskChecker for ForceName {
    fn task_number(&self) -> u8 {
        3
    }

    fn sql_file(&self) -> &'static str {
        "3-force_name.sql"
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
            ctx.check_column_exists(structure, "id");
            if let Some(name) = ctx.check_column_exists(structure, "name") {
                ctx.check_not_null("name", name);
                ctx.check_type("name", name, "varchar(256)");
            }

            ctx.check_rejected(
                "NOT NULL Constraint Works (INSERT with NULL name fails)",
                "Inserting NULL name",
                &format!("INSERT INTO {}.{} (id) VALUES (1);", EXERCISE_DB, TABLE),
            );
        });
        Ok(())
    }
}
