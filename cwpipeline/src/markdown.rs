//! Minimal markdown table reader for checking model output shape.
//!
//! Only the first table in a document is read. Cells are trimmed; inline
//! formatting is kept as written.
//!
//! ```rust
//! use cwpipeline::markdown::MarkdownTable;
//!
//! let text = "Here you go:\n\n| ID | Source |\n|----|--------|\n| TC-1 | Both |\n";
//! let table = MarkdownTable::parse(text).expect("table present");
//! assert_eq!(table.headers, vec!["ID", "Source"]);
//! assert_eq!(table.column_values("source"), Some(vec!["Both"]));
//! ```

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl MarkdownTable {
    /// Returns the first table found in `text`: a header row directly followed
    /// by a delimiter row, then every contiguous pipe row after it.
    pub fn parse(text: &str) -> Option<Self> {
        let lines = text.lines().map(str::trim).collect::<Vec<_>>();

        let header_index = lines
            .windows(2)
            .position(|pair| is_pipe_row(pair[0]) && is_delimiter_row(pair[1]))?;

        let headers = split_cells(lines[header_index]);
        let rows = lines[header_index + 2..]
            .iter()
            .take_while(|line| is_pipe_row(line))
            .map(|line| split_cells(line))
            .collect();

        Some(Self { headers, rows })
    }

    /// Case-insensitive header lookup.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|header| strip_emphasis(header).eq_ignore_ascii_case(name))
    }

    pub fn column_values(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.column(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(index).map(String::as_str).unwrap_or(""))
                .collect(),
        )
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Drops bold, code and quote markers around a cell value.
pub fn strip_emphasis(cell: &str) -> &str {
    cell.trim()
        .trim_matches(|c| matches!(c, '*' | '_' | '`' | '\'' | '"'))
        .trim()
}

fn is_pipe_row(line: &str) -> bool {
    line.contains('|')
}

fn is_delimiter_row(line: &str) -> bool {
    let cells = split_cells(line);
    !cells.is_empty()
        && cells.iter().all(|cell| {
            let cell = cell.trim_matches(':');
            !cell.is_empty() && cell.chars().all(|c| c == '-')
        })
}

fn split_cells(line: &str) -> Vec<String> {
    let line = line.trim();
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = line.strip_suffix('|').unwrap_or(line);
    line.split('|').map(|cell| cell.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
Intro text.

| Test Case ID | Description | Steps | Expected Results | Source |
|:-------------|-------------|-------|------------------|-------:|
| TC-1 | Valid login | Enter credentials | Dashboard shown | **User Story** |
| TC-2 | Lockout | Fail 5 times | Account locked | Specification |

Trailing notes.";

    #[test]
    fn parses_header_and_rows_between_prose() {
        let table = MarkdownTable::parse(TABLE).expect("table");
        assert_eq!(table.headers.len(), 5);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[1][0], "TC-2");
    }

    #[test]
    fn column_lookup_is_case_insensitive() {
        let table = MarkdownTable::parse(TABLE).expect("table");
        assert_eq!(table.column("test case id"), Some(0));
        assert_eq!(table.column("SOURCE"), Some(4));
        assert_eq!(table.column("Priority"), None);
    }

    #[test]
    fn emphasis_is_stripped_from_values() {
        let table = MarkdownTable::parse(TABLE).expect("table");
        let sources = table
            .column_values("Source")
            .expect("source column")
            .into_iter()
            .map(strip_emphasis)
            .collect::<Vec<_>>();
        assert_eq!(sources, vec!["User Story", "Specification"]);
    }

    #[test]
    fn prose_without_delimiter_row_is_not_a_table() {
        assert_eq!(MarkdownTable::parse("a | b\nc | d"), None);
        assert_eq!(MarkdownTable::parse(""), None);
    }

    #[test]
    fn tables_without_outer_pipes_are_accepted() {
        let table = MarkdownTable::parse("ID | Name\n--- | ---\n1 | login").expect("table");
        assert_eq!(table.headers, vec!["ID", "Name"]);
        assert_eq!(table.rows, vec![vec!["1".to_string(), "login".to_string()]]);
    }

    #[test]
    fn short_rows_yield_empty_cells() {
        let table = MarkdownTable::parse("| ID | Source |\n|---|---|\n| TC-1 |").expect("table");
        assert_eq!(table.column_values("Source"), Some(vec![""]));
    }
}
