//! sqlgrade - grading harness for MySQL exercise scripts
//!
//! Runs each exercise script through the `mysql` command-line client and
//! checks the resulting schema and data:
//! - `client`: external process execution with a timeout
//! - `inspect`: introspection queries and tab-delimited output parsing
//! - `checker`: setup/execute/assert/teardown framework and reporting
//! - `tasks`: the ten exercise checkers
//! - `runner`: task selection and the final summary

pub mod checker;
pub mod client;
pub mod config;
pub mod inspect;
pub mod runner;
pub mod tasks;
