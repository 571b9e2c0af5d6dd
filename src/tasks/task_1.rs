//! Exercise 1: create a user holding every privilege

use crate::checker::context::pick;
use crate::checker::{CheckContext, CheckResult, TaskChecker};
use crate::inspect::Principal;

const USER: &str = "user_0d_1";

pub struct CreateUser;

impl TaskChecker for CreateUser {
    fn task_number(&self) -> u8 {
        1
    }

    fn sql_file(&self) -> &'static str {
        "1-create_user.sql"
    }

    fn setup(&self, ctx: &mut CheckContext<'_>) -> CheckResult<()> {
        ctx.inspector().drop_user(&Principal::local(USER));
        Ok(())
    }

    fn teardown(&self, ctx: &mut CheckContext<'_>) {
        ctx.inspector().drop_user(&Principal::local(USER));
    }

    fn run_assertions(&self, ctx: &mut CheckContext<'_>) -> CheckResult<()> {
        if !ctx.check_file_exists() || ctx.check_execution(None).is_none() {
            return Ok(());
        }

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

        let has_all = grants.has_all_privileges();
        ctx.record(
            "ALL PRIVILEGES Granted",
            has_all,
            format!(
                "User {} ALL PRIVILEGES (or equivalent comprehensive privileges)",
                pick(has_all, "has", "does NOT have")
            ),
            (!has_all).then(|| grants.joined()),
        );

        let script = ctx.read_script()?;
        ctx.check_script_uses("Uses IF NOT EXISTS", &script, "IF NOT EXISTS");

        ctx.check_idempotent(None);
        Ok(())
    }
}
