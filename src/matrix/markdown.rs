//! matrix::markdown
//!
//! Reads a "Section Dependencies Matrix" straight out of a Markdown table.
//!
//! The first GFM table whose header has a section column plus a depends-on
//! or enables column is used. Header matching ignores case and punctuation:
//!
//! | role       | accepted headers                                  |
//! |------------|---------------------------------------------------|
//! | section    | `Section`, `Id`, `Section Id`, `Lesson`           |
//! | depends-on | `Depends On`, `Dependencies`, `Requires`, `Prerequisites` |
//! | enables    | `Enables`, `Unlocks`                              |
//! | ordinal    | `#`, `Ordinal`, `Order`, `No`                     |
//! | title      | `Title`, `Name`                                   |
//!
//! Without an ordinal column the row position is the ordinal; with one,
//! every row needs a number. Fully blank rows are skipped, but a row with
//! content and no section id is rejected. List cells
//! split on commas; `-`, `—`, `None`, `n/a` and empty cells mean no
//! entries. Inline code is read as plain text.

use pulldown_cmark::{Event, Options, Parser, Tag};

use super::{InputFormat, Matrix, MatrixEntry, MatrixError};

#[derive(Debug, Default)]
struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

#[derive(Debug, Default)]
struct Columns {
    section: usize,
    depends_on: Option<usize>,
    enables: Option<usize>,
    ordinal: Option<usize>,
    title: Option<usize>,
}

/// Parse the first dependency table in a Markdown document.
pub fn parse(text: &str) -> Result<Matrix, MatrixError> {
    let tables = collect_tables(text);
    tracing::debug!(tables = tables.len(), "markdown tables found");

    let (table, columns) = tables
        .iter()
        .find_map(|table| columns(&table.header).map(|c| (table, c)))
        .ok_or(MatrixError::NoTable)?;

    let mut entries = Vec::with_capacity(table.rows.len());
    for (index, row) in table.rows.iter().enumerate() {
        let line = index + 1;
        if row.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        let cell = |column: Option<usize>| column.and_then(|c| row.get(c)).map(String::as_str);

        let id = cell(Some(columns.section)).unwrap_or_default().trim();
        if id.is_empty() {
            return Err(row_error(line, "empty section id".to_string()));
        }

        let ordinal = match columns.ordinal {
            Some(_) => {
                let raw = cell(columns.ordinal).unwrap_or_default().trim();
                if raw.is_empty() {
                    return Err(row_error(line, format!("section '{id}' has no ordinal")));
                }
                Some(parse_ordinal(raw, line)?)
            }
            None => None,
        };

        entries.push(MatrixEntry {
            id: id.to_string(),
            title: cell(columns.title)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            ordinal,
            depends_on: split_list(cell(columns.depends_on)),
            enables: split_list(cell(columns.enables)),
        });
    }

    Ok(Matrix { entries })
}

fn collect_tables(text: &str) -> Vec<Table> {
    let mut tables = Vec::new();
    let mut table: Option<Table> = None;
    let mut row: Vec<String> = Vec::new();
    let mut cell: Option<String> = None;

    for event in Parser::new_ext(text, Options::ENABLE_TABLES) {
        match event {
            Event::Start(Tag::Table(_)) => table = Some(Table::default()),
            Event::End(Tag::Table(_)) => tables.extend(table.take()),
            Event::Start(Tag::TableHead) | Event::Start(Tag::TableRow) => row.clear(),
            Event::End(Tag::TableHead) => {
                if let Some(t) = table.as_mut() {
                    t.header = std::mem::take(&mut row);
                }
            }
            Event::End(Tag::TableRow) => {
                if let Some(t) = table.as_mut() {
                    t.rows.push(std::mem::take(&mut row));
                }
            }
            Event::Start(Tag::TableCell) => cell = Some(String::new()),
            Event::End(Tag::TableCell) => row.extend(cell.take()),
            Event::Text(text) | Event::Code(text) => {
                if let Some(c) = cell.as_mut() {
                    c.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(c) = cell.as_mut() {
                    c.push(' ');
                }
            }
            _ => {}
        }
    }

    tables
}

fn normalize(header: &str) -> String {
    header
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '#')
        .flat_map(char::to_lowercase)
        .collect()
}

fn columns(header: &[String]) -> Option<Columns> {
    let mut section = None;
    let mut found = Columns::default();

    for (index, name) in header.iter().enumerate() {
        match normalize(name).as_str() {
            "section" | "id" | "sectionid" | "lesson" => section = section.or(Some(index)),
            "dependson" | "dependencies" | "requires" | "prerequisites" => {
                found.depends_on = found.depends_on.or(Some(index))
            }
            "enables" | "unlocks" => found.enables = found.enables.or(Some(index)),
            "#" | "ordinal" | "order" | "no" => found.ordinal = found.ordinal.or(Some(index)),
            "title" | "name" => found.title = found.title.or(Some(index)),
            _ => {}
        }
    }

    if found.depends_on.is_none() && found.enables.is_none() {
        return None;
    }
    found.section = section?;
    Some(found)
}

fn parse_ordinal(raw: &str, row: usize) -> Result<u32, MatrixError> {
    raw.trim_end_matches('.')
        .parse()
        .map_err(|_| row_error(row, format!("ordinal '{raw}' is not a number")))
}

fn row_error(row: usize, message: String) -> MatrixError {
    MatrixError::Parse {
        format: InputFormat::Markdown,
        message: format!("row {row}: {message}"),
    }
}

fn split_list(cell: Option<&str>) -> Vec<String> {
    let Some(cell) = cell else {
        return Vec::new();
    };

    cell.split(',')
        .map(|item| item.trim().trim_matches('`').trim())
        .filter(|item| !is_empty_marker(item))
        .map(str::to_string)
        .collect()
}

fn is_empty_marker(item: &str) -> bool {
    item.is_empty()
        || matches!(item, "-" | "—" | "–")
        || item.eq_ignore_ascii_case("none")
        || item.eq_ignore_ascii_case("n/a")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dependency_table() {
        let text = "\
# Section Dependencies Matrix

| # | Section | Title | Depends On | Enables |
|---|---------|-------|------------|---------|
| 1 | `networking` | Networking | — | `routing`, `auth` |
| 2 | `routing` | Routing | networking | - |
| 3 | `auth` | Authentication | networking | None |
";
        let matrix = parse(text).unwrap();
        assert_eq!(matrix.entries.len(), 3);

        let net = &matrix.entries[0];
        assert_eq!(net.id, "networking");
        assert_eq!(net.title.as_deref(), Some("Networking"));
        assert_eq!(net.ordinal, Some(1));
        assert!(net.depends_on.is_empty());
        assert_eq!(net.enables, vec!["routing".to_string(), "auth".to_string()]);

        let auth = &matrix.entries[2];
        assert_eq!(auth.depends_on, vec!["networking".to_string()]);
        assert!(auth.enables.is_empty());
    }

    #[test]
    fn row_position_is_default_ordinal() {
        let text = "\
| Section | Requires |
|---|---|
| a | |
| b | a |
";
        let matrix = parse(text).unwrap();
        assert_eq!(matrix.entries.len(), 2);
        assert!(matrix.entries.iter().all(|e| e.ordinal.is_none()));
        assert!(matrix.entries[0].title.is_none());

        let graph = matrix.build_graph().unwrap();
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn skips_unrelated_tables() {
        let text = "\
| Term | Meaning |
|---|---|
| DAG | graph |

| Section | Enables |
|---|---|
| a | b |
| b | |
";
        let matrix = parse(text).unwrap();
        assert_eq!(matrix.entries.len(), 2);
        assert_eq!(matrix.entries[0].enables, vec!["b".to_string()]);
    }

    #[test]
    fn no_table_is_an_error() {
        let err = parse("# Just prose\n\nNo tables here.\n").unwrap_err();
        assert!(matches!(err, MatrixError::NoTable));
    }

    #[test]
    fn bad_ordinal_is_parse_error() {
        let text = "\
| # | Section | Enables |
|---|---|---|
| one | a | |
";
        let err = parse(text).unwrap_err();
        assert!(err.to_string().contains("ordinal 'one'"));
    }

    #[test]
    fn row_without_section_id_is_rejected() {
        let text = "\
| Section | Depends On |
|---|---|
| a | |
|  | a |
| b | a |
";
        let err = parse(text).unwrap_err();
        assert!(matches!(err, MatrixError::Parse { .. }));
        assert!(err.to_string().contains("row 2: empty section id"));
    }

    #[test]
    fn blank_rows_are_skipped() {
        let text = "\
| Section | Depends On |
|---|---|
| a | |
|  |  |
| b | a |
";
        let matrix = parse(text).unwrap();
        assert_eq!(matrix.entries.len(), 2);
        assert_eq!(matrix.entries[1].depends_on, vec!["a".to_string()]);
    }

    #[test]
    fn blank_ordinal_is_rejected_when_column_exists() {
        let text = "\
| # | Section | Depends On |
|---|---|---|
| 2 | b | |
|  | a | |
";
        let err = parse(text).unwrap_err();
        assert!(err.to_string().contains("row 2: section 'a' has no ordinal"));
    }

    #[test]
    fn ordinal_with_trailing_dot() {
        let text = "\
| No. | Section | Depends On |
|---|---|---|
| 4. | a | |
";
        let matrix = parse(text).unwrap();
        assert_eq!(matrix.entries[0].ordinal, Some(4));
    }

    #[test]
    fn header_matching_ignores_case_and_punctuation() {
        let cols = columns(&[
            "SECTION".to_string(),
            "Depends-On".to_string(),
            "Order".to_string(),
        ])
        .unwrap();
        assert_eq!(cols.section, 0);
        assert_eq!(cols.depends_on, Some(1));
        assert_eq!(cols.ordinal, Some(2));
        assert!(cols.enables.is_none());
    }
}
