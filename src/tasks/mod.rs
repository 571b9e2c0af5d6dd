//! The ten exercise checkers
//!
//! Each exercise is a unit struct implementing [`TaskChecker`]. Fixture
//! names are namespaced per exercise (`user_0d_*`, `hbtn_0d_2`,
//! `hbtn_0d_usa`) so a run never touches unrelated data on the server.

pub mod fixtures;
mod table_exercise;
mod task_0;
mod task_1;
mod task_2;
mod task_3;
mod task_4;
mod task_5;
mod task_6;
mod task_7;
mod task_8;
mod task_9;

use crate::checker::context::pick;
use crate::checker::{CheckContext, TaskChecker};
use crate::inspect::table::{is_ascending, leading_ids};

pub use task_0::ListPrivileges;
pub use task_1::CreateUser;
pub use task_2::CreateReadUser;
pub use task_3::ForceName;
pub use task_4::NeverEmpty;
pub use task_5::UniqueId;
pub use task_6::States;
pub use task_7::Cities;
pub use task_8::CitiesOfCalifornia;
pub use task_9::CitiesByState;

/// Highest exercise number
pub const LAST_TASK: u8 = 9;

/// Checker for exercise `task`, if there is one
pub fn checker_for(task: u8) -> Option<Box<dyn TaskChecker>> {
    let checker: Box<dyn TaskChecker> = match task {
        0 => Box::new(ListPrivileges),
        1 => Box::new(CreateUser),
        2 => Box::new(CreateReadUser),
        3 => Box::new(ForceName),
        4 => Box::new(NeverEmpty),
        5 => Box::new(UniqueId),
        6 => Box::new(States),
        7 => Box::new(Cities),
        8 => Box::new(CitiesOfCalifornia),
        9 => Box::new(CitiesByState),
        _ => return None,
    };
    Some(checker)
}

/// Every checker, in ascending task order
pub fn all() -> Vec<Box<dyn TaskChecker>> {
    (0..=LAST_TASK).filter_map(checker_for).collect()
}

/// Exactly two ids, the second following the first, both positive
pub(crate) fn consecutive_pair(ids: &[u64]) -> bool {
    matches!(ids, [first, second] if *first >= 1 && *second == first + 1)
}

/// Record whether the leading ids of `lines` ascend
pub(crate) fn check_sorted_by_id(ctx: &mut CheckContext<'_>, name: &str, lines: &[&str]) {
    if lines.is_empty() {
        ctx.record(
            "Results Sorted by ID",
            false,
            "No data lines found in output",
            None,
        );
        return;
    }

    let ids = leading_ids(lines);
    let sorted = is_ascending(&ids);
    let details = (!sorted).then(|| {
        let mut expected = ids.clone();
        expected.sort_unstable();
        format!("IDs in output: {:?}, Expected: {:?}", ids, expected)
    });
    ctx.record(
        name,
        sorted,
        format!(
            "Results {} sorted by cities.id in ascending order",
            pick(sorted, "are", "are NOT")
        ),
        details,
    );
}

/// Record whether the query returned `expected` rows; returns the actual count
pub(crate) fn check_row_count(
    ctx: &mut CheckContext<'_>,
    lines: &[&str],
    expected: usize,
    stdout: &str,
) -> usize {
    let actual = lines.len();
    ctx.record(
        "Correct Number of Cities",
        actual == expected,
        format!("Query returned {} cities (expected {})", actual, expected),
        (actual != expected).then(|| stdout.to_string()),
    );
    actual
}
