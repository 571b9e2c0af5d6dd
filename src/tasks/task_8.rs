//! Exercise 8: California cities through a subquery, without JOIN

use crate::checker::context::pick;
use crate::checker::{CheckContext, CheckResult, TaskChecker};
use crate::inspect::table::{column_count, data_lines};

use super::fixtures::{drop_usa, seed_usa, STATES_RESEED, STATES_SEED, USA_DB};
use super::{check_row_count, check_sorted_by_id};

const CITIES_SEED: [(u32, &str); 8] = [
    (1, "San Francisco"),
    (1, "San Jose"),
    (2, "Phoenix"),
    (1, "Los Angeles"),
    (3, "Houston"),
    (1, "San Diego"),
    (4, "New York City"),
    (2, "Tucson"),
];

const CALIFORNIA_CITIES: [&str; 4] = ["San Francisco", "San Jose", "Los Angeles", "San Diego"];
const OTHER_CITIES: [&str; 4] = ["Phoenix", "Houston", "New York City", "Tucson"];

/// California is state 3 here, so a hard-coded `state_id = 1` finds nothing
const CITIES_RESEED: [(u32, &str); 5] = [
    (1, "Houston"),
    (2, "Phoenix"),
    (3, "Sacramento"),
    (3, "Oakland"),
    (4, "Buffalo"),
];

pub struct CitiesOfCalifornia;

impl CitiesOfCalifornia {
    fn check_script_shape(ctx: &mut CheckContext<'_>) -> CheckResult<()> {
        let script = ctx.read_script()?;

        let has_join = script.code_mentions("JOIN");
        ctx.record(
            "No JOIN Keyword Used",
            !has_join,
            format!(
                "Script {} JOIN keyword",
                pick(has_join, "INCORRECTLY uses", "does NOT use")
            ),
            has_join.then(|| "Script must use subquery instead of JOIN".to_string()),
        );

        let selects = script.code_count("SELECT");
        let nested = selects >= 2;
        ctx.record(
            "Uses Subquery",
            nested,
            format!(
                "Script {} subquery (found {} SELECT statement(s))",
                pick(nested, "uses", "does NOT use"),
                selects
            ),
            (!nested).then(|| "Script must use a subquery to find California's id".to_string()),
        );
        Ok(())
    }

    fn check_listing(ctx: &mut CheckContext<'_>, stdout: &str) {
        for city in CALIFORNIA_CITIES {
            let listed = stdout.contains(city);
            ctx.record(
                format!("California City Listed ({})", city),
                listed,
                format!("City '{}' {} in output", city, pick(listed, "is", "is NOT")),
                (!listed).then(|| stdout.to_string()),
            );
        }

        let leaked: Vec<&str> = OTHER_CITIES
            .into_iter()
            .filter(|city| stdout.contains(city))
            .collect();
        ctx.record(
            "Non-California Cities Excluded",
            leaked.is_empty(),
            format!(
                "Non-California cities {} excluded",
                pick(leaked.is_empty(), "are correctly", "are NOT")
            ),
            (!leaked.is_empty())
                .then(|| format!("Found non-CA cities in output: {}", leaked.join(", "))),
        );

        let lines = data_lines(stdout);
        check_sorted_by_id(ctx, "Results Sorted by ID (Ascending)", &lines);
        check_row_count(ctx, &lines, CALIFORNIA_CITIES.len(), stdout);

        if let Some(first) = lines.first() {
            let two_columns = column_count(first) >= 2;
            ctx.record(
                "Output Format (id and name columns)",
                two_columns,
                format!(
                    "Output {} expected format (id, name)",
                    pick(two_columns, "has", "does NOT have")
                ),
                (!two_columns).then(|| format!("First line: {}", first)),
            );
        }
    }

    fn check_reseeded(ctx: &mut CheckContext<'_>) {
        seed_usa(ctx, &STATES_RESEED, &CITIES_RESEED);

        let outcome = ctx.run_script(Some(USA_DB));
        if !outcome.success {
            ctx.record(
                "Subquery Test with Different IDs",
                false,
                "Failed to execute query with different state IDs",
                Some(outcome.stderr),
            );
            return;
        }

        let stdout = outcome.stdout;
        let found = ["Sacramento", "Oakland"].iter().all(|c| stdout.contains(c));
        let excluded = !["Houston", "Phoenix", "Buffalo"]
            .iter()
            .any(|c| stdout.contains(c));
        let ok = found && excluded;
        ctx.record(
            "Subquery Works with Different State IDs",
            ok,
            format!(
                "Query {} find California cities when state_id changes",
                pick(ok, "correctly", "does NOT")
            ),
            (!ok).then_some(stdout),
        );
    }
}

impl TaskChecker for CitiesOfCalifornia {
    fn task_number(&self) -> u8 {
        8
    }

    fn sql_file(&self) -> &'static str {
        "8-cities_of_california_subquery.sql"
    }

    fn setup(&self, ctx: &mut CheckContext<'_>) -> CheckResult<()> {
        seed_usa(ctx, &STATES_SEED, &CITIES_SEED);
        Ok(())
    }

    fn teardown(&self, ctx: &mut CheckContext<'_>) {
        drop_usa(ctx);
    }

    fn run_assertions(&self, ctx: &mut CheckContext<'_>) -> CheckResult<()> {
        if !ctx.check_file_exists() {
            return Ok(());
        }
        Self::check_script_shape(ctx)?;

        let Some(stdout) = ctx.check_execution(Some(USA_DB)) else {
            return Ok(());
        };
        Self::check_listing(ctx, &stdout);
        Self::check_reseeded(ctx);
        Ok(())
    }
}
