//! Exercise 4: a table whose `id` defaults to 1

use crate::checker::context::pick;
use crate::checker::{CheckContext, CheckResult, TaskChecker};

use super::fixtures::EXERCISE_DB;
use super::table_exercise;

const TABLE: &str = "id_not_null";

pub struct NeverEmpty;

impl TaskChecker for NeverEmpty {
    fn task_number(&self) -> u8 {
        4
    }

    fn sql_file(&self) -> &'static str {
        "4-never_empty.sql"
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
            }
            if let Some(name) = ctx.check_column_exists(structure, "name") {
                ctx.check_type("name", name, "varchar(256)");
            }

            let insert = format!("INSERT INTO {}.{} (name) VALUES ('test');", EXERCISE_DB, TABLE);
            if !ctx.query(&insert).success {
                ctx.record("Insert Test", false, "Failed to insert test data", None);
                return;
            }

            let select = format!(
                "SELECT id FROM {}.{} WHERE name = 'test';",
                EXERCISE_DB, TABLE
            );
            match ctx.query(&select).output() {
                Some(stdout) => {
                    let defaulted = stdout.contains('1');
                    ctx.record(
                        "DEFAULT Value Works (id=1 when not specified)",
                        defaulted,
                        format!(
                            "Default value {}",
                            pick(defaulted, "works correctly", "does NOT work")
                        ),
                        (!defaulted).then(|| stdout.to_string()),
                    );
                }
                None => {
                    ctx.record(
                        "DEFAULT Value Works",
                        false,
                        "Failed to verify default value",
                        None,
                    );
                }
            }
        });
        Ok(())
    }
}
