//! Exercise 2: create a database and a read-only user for it

use crate::checker::context::pick;
use crate::checker::{CheckContext, CheckResult, TaskChecker};
use crate::inspect::{Principal, Privilege};

use super::fixtures::EXERCISE_DB;

const USER: &str = "user_0d_2";

pub struct CreateReadUser;

impl CreateReadUser {
    fn cleanup(ctx: &CheckContext<'_>) {
        let inspector = ctx.inspector();
        inspector.drop_user(&Principal::local(USER));
        inspector.drop_database(EXERCISE_DB);
    }
}

impl TaskChecker for CreateReadUser {
    fn task_number(&self) -> u8 {
        2
    }

    fn sql_file(&self) -> &'static str {
        "2-create_read_user.sql"
    }

    fn setup(&self, ctx: &mut CheckContext<'_>) -> CheckResult<()> {
        Self::cleanup(ctx);
        Ok(())
    }

    fn teardown(&self, ctx: &mut CheckContext<'_>) {
        Self::cleanup(ctx);
    }

    fn run_assertions(&self, ctx: &mut CheckContext<'_>) -> CheckResult<()> {
        if !ctx.check_file_exists() || ctx.check_execution(None).is_none() {
            return Ok(());
        }

        ctx.check_database_created(EXERCISE_DB);

        let principal = Principal::local(USER);
        if !ctx.check_user_created(&principal) {
            return Ok(());
        }

        let Some(grants) = ctx.inspector().user_grants(&principal) else {
            ctx.record(
                "Get User Grants",
                false,
                format!("Failed to retrieve grants for {}", principal),
                None,
            );
            return Ok(());
        };

        let has_select = grants.has_privilege_on(Privilege::Select, EXERCISE_DB);
        ctx.record(
            "SELECT Privilege on Database",
            has_select,
            format!(
                "User {} SELECT privilege on '{}'",
                pick(has_select, "has", "does NOT have"),
                EXERCISE_DB
            ),
            (!has_select).then(|| grants.joined()),
        );

        let extra = grants.write_privileges_beyond(&[Privilege::Select]);
        let only_select = extra.is_empty();
        ctx.record(
            "Limited Privileges (Only SELECT)",
            only_select,
            format!(
                "User {} privilege",
                pick(only_select, "has only SELECT", "has MORE than SELECT")
            ),
            (!only_select).then(|| grants.joined()),
        );

        let script = ctx.read_script()?;
        let count = script.count("IF NOT EXISTS");
        ctx.record(
            "Uses IF NOT EXISTS (database and user)",
            count >= 2,
            format!(
                "Script uses IF NOT EXISTS {} time(s) (expected at least 2)",
                count
            ),
            None,
        );

        ctx.check_idempotent(None);
        Ok(())
    }
}
