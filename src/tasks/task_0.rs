//! Exercise 0: list the grants of two pre-created users

use crate::checker::context::pick;
use crate::checker::{CheckContext, CheckResult, TaskChecker};
use crate::inspect::Principal;

/// Users created by setup: name, password, privilege clause
const USERS: [(&str, &str, &str); 2] = [
    ("user_0d_1", "user_0d_1_pass", "ALL PRIVILEGES"),
    ("user_0d_2", "user_0d_2_pass", "SELECT, INSERT"),
];

pub struct ListPrivileges;

impl TaskChecker for ListPrivileges {
    fn task_number(&self) -> u8 {
        0
    }

    fn sql_file(&self) -> &'static str {
        "0-privileges.sql"
    }

    fn setup(&self, ctx: &mut CheckContext<'_>) -> CheckResult<()> {
        for (user, password, privileges) in USERS {
            let principal = Principal::local(user);
            ctx.inspector().drop_user(&principal);
            ctx.query(&format!(
                "CREATE USER {} IDENTIFIED BY '{}';",
                principal, password
            ));
            ctx.query(&format!("GRANT {} ON *.* TO {};", privileges, principal));
        }
        ctx.query("FLUSH PRIVILEGES;");
        Ok(())
    }

    fn teardown(&self, ctx: &mut CheckContext<'_>) {
        for (user, _, _) in USERS {
            ctx.inspector().drop_user(&Principal::local(user));
        }
    }

    fn run_assertions(&self, ctx: &mut CheckContext<'_>) -> CheckResult<()> {
        if !ctx.check_file_exists() {
            return Ok(());
        }
        let Some(stdout) = ctx.check_execution(None) else {
            return Ok(());
        };

        for (user, _, _) in USERS {
            let shown = stdout.contains(user);
            ctx.record(
                format!("User Grants Display ({})", user),
                shown,
                format!(
                    "Grants for {} {} displayed",
                    Principal::local(user),
                    pick(shown, "are", "are NOT")
                ),
                (!shown).then(|| stdout.clone()),
            );
        }

        let script = ctx.read_script()?;
        ctx.check_script_uses("Uses SHOW GRANTS Command", &script, "SHOW GRANTS");

        for (user, _, _) in USERS {
            let referenced = script.contains(user);
            ctx.record(
                format!("User Reference ({})", user),
                referenced,
                format!(
                    "User '{}' {} referenced in the script",
                    user,
                    pick(referenced, "is", "is NOT")
                ),
                None,
            );
        }
        Ok(())
    }
}
