//! Exercise 9: every city with its state name through a single JOIN

use crate::checker::context::pick;
use crate::checker::{CheckContext, CheckResult, TaskChecker};
use crate::inspect::table::{column_count, data_lines};

use super::fixtures::{drop_usa, seed_usa, STATES_SEED, USA_DB};
use super::{check_row_count, check_sorted_by_id};

const CITIES_SEED: [(u32, &str); 8] = [
    (1, "San Francisco"),
    (1, "San Jose"),
    (2, "Phoenix"),
    (1, "Los Angeles"),
    (3, "Houston"),
    (3, "Dallas"),
    (4, "New York City"),
    (2, "Tucson"),
];

/// Cities whose row must also name their state
const PAIRINGS: [(&str, &str); 3] = [
    ("San Francisco", "California"),
    ("Phoenix", "Arizona"),
    ("Houston", "Texas"),
];

/// Rows a join without a condition would produce
const CARTESIAN_ROWS: usize = STATES_SEED.len() * CITIES_SEED.len();

/// Anything at or above this is treated as a Cartesian product
const CARTESIAN_THRESHOLD: usize = 20;

pub struct CitiesByState;

/// Names from `expected` that do not occur in `stdout`
fn missing<'n>(expected: &[&'n str], stdout: &str) -> Vec<&'n str> {
    expected
        .iter()
        .copied()
        .filter(|name| !stdout.contains(name))
        .collect()
}

impl CitiesByState {
    fn check_script_shape(ctx: &mut CheckContext<'_>) -> CheckResult<()> {
        let script = ctx.read_script()?;

        let selects = script.code_count("SELECT");
        let single = selects == 1;
        ctx.record(
            "Uses Only One SELECT Statement",
            single,
            format!("Script uses {} SELECT statement(s) (expected 1)", selects),
            (!single).then(|| "Must use only one SELECT statement".to_string()),
        );

        let has_join = script.code_mentions("JOIN");
        ctx.record(
            "Uses JOIN Keyword",
            has_join,
            format!("Script {} JOIN keyword", pick(has_join, "uses", "does NOT use")),
            (!has_join).then(|| "Script must use JOIN to combine tables".to_string()),
        );
        Ok(())
    }

    fn check_pairings(ctx: &mut CheckContext<'_>, lines: &[&str]) {
        for (city, state) in PAIRINGS {
            let Some(row) = lines.iter().find(|line| line.contains(city)) else {
                continue;
            };
            let paired = row.contains(state);
            ctx.record(
                format!("City-State Relationship ({})", city),
                paired,
                format!(
                    "{} {} correctly associated with {}",
                    city,
                    pick(paired, "is", "is NOT"),
                    state
                ),
                (!paired).then(|| row.to_string()),
            );
        }
    }

    fn check_listing(ctx: &mut CheckContext<'_>, stdout: &str) {
        let cities: Vec<&str> = CITIES_SEED.iter().map(|(_, name)| *name).collect();
        let missing_cities = missing(&cities, stdout);
        ctx.record(
            "All Cities Listed",
            missing_cities.is_empty(),
            format!(
                "All {} cities {} in output",
                cities.len(),
                pick(missing_cities.is_empty(), "are", "are NOT")
            ),
            (!missing_cities.is_empty()).then(|| format!("Missing: {}", missing_cities.join(", "))),
        );

        let missing_states = missing(&STATES_SEED, stdout);
        ctx.record(
            "State Names Displayed",
            missing_states.is_empty(),
            format!(
                "All state names {} in output",
                pick(missing_states.is_empty(), "are", "are NOT")
            ),
            (!missing_states.is_empty()).then(|| format!("Missing: {}", missing_states.join(", "))),
        );

        let lines = data_lines(stdout);
        check_sorted_by_id(ctx, "Results Sorted by cities.id (Ascending)", &lines);

        if let Some(first) = lines.first() {
            let three_columns = column_count(first) >= 3;
            ctx.record(
                "Output Format (3 columns)",
                three_columns,
                format!(
                    "Output {} expected format (cities.id, cities.name, states.name)",
                    pick(three_columns, "has", "does NOT have")
                ),
                (!three_columns).then(|| format!("Line: {}", first)),
            );
            if three_columns {
                Self::check_pairings(ctx, &lines);
            }
        }

        let rows = check_row_count(ctx, &lines, CITIES_SEED.len(), stdout);
        let not_cartesian = rows < CARTESIAN_THRESHOLD;
        ctx.record(
            "JOIN Used Correctly (Not Cartesian Product)",
            not_cartesian,
            format!("JOIN {} implemented correctly", pick(not_cartesian, "is", "is NOT")),
            (!not_cartesian).then(|| format!("{} rows; cartesian = {}", rows, CARTESIAN_ROWS)),
        );
    }
}

impl TaskChecker for CitiesByState {
    fn task_number(&self) -> u8 {
        9
    }

    fn sql_file(&self) -> &'static str {
        "9-cities_by_state_join.sql"
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
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_names() {
        let stdout = "id\tname\tname\n1\tSan Francisco\tCalifornia\n3\tPhoenix\tArizona\n";
        assert_eq!(
            missing(&["San Francisco", "Phoenix", "Houston"], stdout),
            vec!["Houston"]
        );
        assert!(missing(&["California", "Arizona"], stdout).is_empty());
    }

    #[test]
    fn test_cartesian_row_count() {
        assert_eq!(CARTESIAN_ROWS, 32);
    }
}
