//! Shared flow of the single-table exercises in `hbtn_0d_2`
//!
//! The script runs inside the exercise database. After the table-specific
//! checks the rows are deleted and the script is run a second time.

use crate::checker::CheckContext;
use crate::inspect::TableStructure;

use super::fixtures::{create_database, EXERCISE_DB};

/// Ensure the database exists and the exercise table does not
pub fn prepare(ctx: &CheckContext<'_>, table: &str) {
    create_database(ctx, EXERCISE_DB);
    ctx.inspector().drop_table(table, Some(EXERCISE_DB));
}

/// Execute, locate the table, hand its structure to `checks`, then clean up and rerun
pub fn run<F>(ctx: &mut CheckContext<'_>, table: &str, checks: F)
where
    F: FnOnce(&mut CheckContext<'_>, &TableStructure),
{
    if !ctx.check_file_exists() || ctx.check_execution(Some(EXERCISE_DB)).is_none() {
        return;
    }
    if !ctx.check_table_created(table, EXERCISE_DB) {
        return;
    }
    let Some(structure) = ctx.fetch_structure(table, EXERCISE_DB) else {
        return;
    };

    checks(ctx, &structure);

    ctx.inspector().clear_table(table, EXERCISE_DB);
    ctx.check_idempotent(Some(EXERCISE_DB));
}
