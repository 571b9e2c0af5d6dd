//! Textual inspection of exercise scripts
//!
//! Authoring constraints ("use SHOW GRANTS", "no JOIN", "exactly one SELECT")
//! are checked on the script text itself, never by parsing SQL.

use std::fs;
use std::io;
use std::path::Path;

/// Contents of an exercise script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlScript {
    text: String,
}

impl SqlScript {
    pub fn read(path: &Path) -> io::Result<Self> {
        Ok(SqlScript::from_text(fs::read_to_string(path)?))
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        SqlScript { text: text.into() }
    }

    /// Case-sensitive substring match on the raw text
    pub fn contains(&self, needle: &str) -> bool {
        self.text.contains(needle)
    }

    /// Case-insensitive match on the raw text, comments included
    pub fn mentions(&self, keyword: &str) -> bool {
        self.text.to_uppercase().contains(&keyword.to_uppercase())
    }

    /// Case-insensitive occurrence count on the raw text, comments included
    pub fn count(&self, keyword: &str) -> usize {
        self.text
            .to_uppercase()
            .matches(&keyword.to_uppercase())
            .count()
    }

    /// Upper-cased text with `--` line comments removed
    pub fn code(&self) -> String {
        self.text
            .split('\n')
            .map(|line| line.split("--").next().unwrap_or(""))
            .collect::<Vec<_>>()
            .join("\n")
            .to_uppercase()
    }

    /// Whether `keyword` occurs outside `--` comments (case-insensitive)
    pub fn code_mentions(&self, keyword: &str) -> bool {
        self.code().contains(&keyword.to_uppercase())
    }

    /// Occurrences of `keyword` outside `--` comments (case-insensitive)
    pub fn code_count(&self, keyword: &str) -> usize {
        self.code().matches(&keyword.to_uppercase()).count()
    }
}
