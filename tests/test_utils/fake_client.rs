//! Shell-script stand-ins for the `mysql` client

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Write an executable `/bin/sh` script named `name` into `dir`
pub fn fake_client(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("write fake client");
    let mut perms = fs::metadata(&path).expect("stat fake client").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("chmod fake client");
    path
}

/// Prints its arguments one per line, then echoes stdin
pub const ECHO_ARGS_AND_STDIN: &str = r#"for arg in "$@"; do printf '%s\n' "$arg"; done
cat"#;

/// Writes to stderr and exits with status 1
pub const SYNTAX_ERROR: &str = r#"echo "ERROR 1064 (42000) at line 1: You have an error in your SQL syntax" >&2
exit 1"#;

/// Never finishes on its own
pub const HANG: &str = "exec sleep 30";
