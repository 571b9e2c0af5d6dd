//! Rule-based fake executor
//!
//! Queries are answered by the first rule whose fragment occurs in the
//! query text; unmatched queries succeed with empty output. Script runs are
//! answered from a queue, and the last queued outcome repeats once the
//! queue is down to one entry.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use sqlgrade::client::{ExecOutcome, SqlExecutor};

/// One recorded executor call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Query {
        sql: String,
        database: Option<String>,
    },
    File {
        path: PathBuf,
        database: Option<String>,
    },
}

#[derive(Default)]
pub struct ScriptedExecutor {
    rules: Vec<(String, ExecOutcome)>,
    scripts: RefCell<VecDeque<ExecOutcome>>,
    calls: RefCell<Vec<Call>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        ScriptedExecutor::default()
    }

    /// Answer queries containing `fragment` with `outcome`
    pub fn on(mut self, fragment: &str, outcome: ExecOutcome) -> Self {
        self.rules.push((fragment.to_string(), outcome));
        self
    }

    /// Queue the outcome of the next script run
    pub fn script(self, outcome: ExecOutcome) -> Self {
        self.scripts.borrow_mut().push_back(outcome);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Text of every query, in call order
    pub fn queries(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Query { sql, .. } => Some(sql.clone()),
                Call::File { .. } => None,
            })
            .collect()
    }

    pub fn script_runs(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, Call::File { .. }))
            .count()
    }

    /// Position of the first query containing `fragment`
    pub fn position(&self, fragment: &str) -> Option<usize> {
        self.queries().iter().position(|q| q.contains(fragment))
    }

    pub fn ran(&self, fragment: &str) -> bool {
        self.position(fragment).is_some()
    }
}

impl SqlExecutor for ScriptedExecutor {
    fn execute_query(&self, query: &str, database: Option<&str>) -> ExecOutcome {
        self.calls.borrow_mut().push(Call::Query {
            sql: query.to_string(),
            database: database.map(str::to_string),
        });
        self.rules
            .iter()
            .find(|(fragment, _)| query.contains(fragment.as_str()))
            .map(|(_, outcome)| outcome.clone())
            .unwrap_or_else(|| ExecOutcome::ok(""))
    }

    fn execute_file(&self, path: &Path, database: Option<&str>) -> ExecOutcome {
        self.calls.borrow_mut().push(Call::File {
            path: path.to_path_buf(),
            database: database.map(str::to_string),
        });
        let mut scripts = self.scripts.borrow_mut();
        if scripts.len() > 1 {
            scripts.pop_front().unwrap_or_default()
        } else {
            scripts
                .front()
                .cloned()
                .unwrap_or_else(|| ExecOutcome::ok(""))
        }
    }
}
