//! Table structure and tabular output parsing
//!
//! The `mysql` client in batch mode prints one header line followed by one
//! tab-separated line per row. Everything here works on that shape.

/// One column as reported by `DESCRIBE`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column type, e.g. `varchar(256)`
    pub data_type: String,
    /// Nullability flag (`YES` / `NO`)
    pub null: String,
    /// Key classification (`PRI`, `UNI`, `MUL` or empty)
    pub key: String,
    pub default: Option<String>,
    pub extra: Option<String>,
}

impl ColumnInfo {
    pub fn is_not_null(&self) -> bool {
        self.null == "NO"
    }

    pub fn is_auto_increment(&self) -> bool {
        self.extra
            .as_deref()
            .is_some_and(|extra| extra.to_lowercase().contains("auto_increment"))
    }

    /// Case-insensitive substring match on the column type
    pub fn type_contains(&self, expected: &str) -> bool {
        self.data_type
            .to_lowercase()
            .contains(&expected.to_lowercase())
    }

    pub fn has_key(&self, allowed: &[&str]) -> bool {
        allowed.contains(&self.key.as_str())
    }
}

/// Columns of a table, in `DESCRIBE` order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableStructure {
    columns: Vec<(String, ColumnInfo)>,
}

impl TableStructure {
    /// Parse `DESCRIBE` output
    ///
    /// The first line is the header. Lines with fewer than four fields are
    /// skipped; the default and extra fields are optional.
    pub fn parse(output: &str) -> Self {
        let mut structure = TableStructure::default();
        for line in output.trim().lines().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            let parts: Vec<&str> = line.split('\t').collect();
            if parts.len() < 4 {
                continue;
            }
            let info = ColumnInfo {
                data_type: parts[1].to_string(),
                null: parts[2].to_string(),
                key: parts[3].to_string(),
                default: parts.get(4).map(|s| s.to_string()),
                extra: parts.get(5).map(|s| s.to_string()),
            };
            structure.insert(parts[0], info);
        }
        structure
    }

    /// Add or replace a column
    pub fn insert(&mut self, name: &str, info: ColumnInfo) {
        match self.columns.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = info,
            None => self.columns.push((name.to_string(), info)),
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, info)| info)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Result rows of a query whose first column is `id`
///
/// Drops blank lines and any line starting with `id` (the header).
pub fn data_lines(output: &str) -> Vec<&str> {
    output
        .trim()
        .split('\n')
        .filter(|line| !line.is_empty() && !line.starts_with("id"))
        .collect()
}

/// Leading numeric field of each row; rows whose first field is not a number are skipped
pub fn leading_ids(lines: &[&str]) -> Vec<u64> {
    lines
        .iter()
        .filter_map(|line| line.split('\t').next())
        .filter_map(parse_digits)
        .collect()
}

/// Every line of the output that is a bare number
pub fn numeric_lines(output: &str) -> Vec<u64> {
    output.trim().split('\n').filter_map(parse_digits).collect()
}

/// Number on the last line of the output
pub fn last_line_number(output: &str) -> Option<u64> {
    output.trim().split('\n').last().and_then(parse_digits)
}

pub fn column_count(line: &str) -> usize {
    line.split('\t').count()
}

/// True when `ids` equals its own sorted form
pub fn is_ascending(ids: &[u64]) -> bool {
    ids.windows(2).all(|pair| pair[0] <= pair[1])
}

fn parse_digits(field: &str) -> Option<u64> {
    let field = field.trim();
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
