//! Shared test utilities
//!
//! Note: clippy reports false-positive dead_code warnings because it can't
//! trace usage across test binaries. These utilities are used by multiple tests.

#![allow(dead_code)]

#[cfg(unix)]
pub mod fake_client;
pub mod scripted;

use std::fs;
use std::path::Path;

use tempfile::TempDir;

pub use scripted::{Call, ScriptedExecutor};

/// Scratch directory holding one exercise script
pub fn script_dir(sql_file: &str, contents: &str) -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    write_script(dir.path(), sql_file, contents);
    dir
}

pub fn write_script(dir: &Path, sql_file: &str, contents: &str) {
    fs::write(dir.join(sql_file), contents).expect("write script");
}

/// `DESCRIBE` output in the client's batch format
pub fn describe(rows: &[[&str; 6]]) -> String {
    let mut out = String::from("Field\tType\tNull\tKey\tDefault\tExtra\n");
    for row in rows {
        out.push_str(&row.join("\t"));
        out.push('\n');
    }
    out
}

/// Single-column listing such as `SHOW TABLES LIKE ...` prints
pub fn listing(header: &str, names: &[&str]) -> String {
    let mut out = format!("{}\n", header);
    for name in names {
        out.push_str(name);
        out.push('\n');
    }
    out
}
