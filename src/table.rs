//! Fixed-width console rendering of a CSV file.
//!
//! Cells are split on every literal `,` with no quote awareness, so a quoted
//! field containing a comma spans several columns. Quotes written by the CSV
//! writer are shown as-is.

use std::{fs, io::Write, path::Path};

use log::debug;

use crate::BatchError;

pub const NOT_FOUND_NOTICE: &str = "CSV file not found.";
pub const EMPTY_NOTICE: &str = "CSV file is empty.";

const CELL_SEPARATOR: char = ',';
const COLUMN_GAP: usize = 2;

/// What [`write_csv_as_table`] ended up printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    /// A header, a separator and `rows` data rows were printed.
    Rendered { rows: usize },
    NotFound,
    Empty,
}

fn split_cells(line: &str) -> Vec<&str> {
    line.split(CELL_SEPARATOR).collect()
}

fn display_width(cell: &str) -> usize {
    cell.chars().count()
}

/// Widest cell of each header column, header included.
///
/// Cells beyond the header's column count do not widen any column.
fn column_widths(headers: &[&str], rows: &[Vec<&str>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| display_width(cell))
                .fold(display_width(header), usize::max)
        })
        .collect()
}

fn push_row<'a>(out: &mut String, cells: impl IntoIterator<Item = &'a str>, widths: &[usize]) {
    for (index, cell) in cells.into_iter().enumerate() {
        let width = widths
            .get(index)
            .copied()
            .unwrap_or_else(|| display_width(cell));
        out.push_str(&format!("{:<pad$}", cell, pad = width + COLUMN_GAP));
    }
    out.push('\n');
}

/// Renders CSV text as an aligned table.
///
/// Returns an empty string when `content` has no lines. Rows shorter than the
/// header print only the cells they have; cells past the header's last
/// column are padded to their own width.
///
/// # Examples
///
/// ```
/// use vcf_to_csv::table::render_table;
///
/// let table = render_table("name,phone\nAda,5551234\n");
/// assert_eq!(table, "name  phone    \n----  -------  \nAda   5551234  \n");
/// ```
pub fn render_table(content: &str) -> String {
    let mut lines = content.lines();
    let Some(header_line) = lines.next() else {
        return String::new();
    };

    let headers = split_cells(header_line);
    let rows: Vec<Vec<&str>> = lines.map(split_cells).collect();
    let widths = column_widths(&headers, &rows);

    let mut out = String::new();
    push_row(&mut out, headers.iter().copied(), &widths);

    let dashes: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    push_row(&mut out, dashes.iter().map(String::as_str), &widths);

    for row in &rows {
        push_row(&mut out, row.iter().copied(), &widths);
    }

    out
}

/// Reads the CSV file at `path` and writes it to `out` as an aligned table.
///
/// A missing or empty file is reported with a one-line notice instead.
///
/// # Errors
/// Returns `BatchError::Io` if the file exists but cannot be read, or if
/// writing to `out` fails.
pub fn write_csv_as_table<P, W>(path: P, out: &mut W) -> Result<TableStatus, BatchError>
where
    P: AsRef<Path>,
    W: Write,
{
    let path = path.as_ref();

    if !path.exists() {
        writeln!(out, "{}", NOT_FOUND_NOTICE)?;
        return Ok(TableStatus::NotFound);
    }

    let content = fs::read_to_string(path)?;
    if content.is_empty() {
        writeln!(out, "{}", EMPTY_NOTICE)?;
        return Ok(TableStatus::Empty);
    }

    let table = render_table(&content);
    out.write_all(table.as_bytes())?;
    out.flush()?;

    let rows = content.lines().count().saturating_sub(1);
    debug!("Rendered {} rows from {}", rows, path.display());
    Ok(TableStatus::Rendered { rows })
}

#[cfg(test)]
mod tests {
    use std::{env::temp_dir, fs};

    use anyhow::Result;
    use rand::distr::{Alphanumeric, SampleString};

    use super::{
        render_table, write_csv_as_table, TableStatus, EMPTY_NOTICE, NOT_FOUND_NOTICE,
    };

    fn temp_csv() -> std::path::PathBuf {
        temp_dir().join(format!(
            "{}.csv",
            Alphanumeric.sample_string(&mut rand::rng(), 16)
        ))
    }

    #[test]
    fn header_only_should_print_header_and_separator() {
        let table = render_table("FullName,PhoneNumbers,Emails\n");

        assert_eq!(
            table,
            "FullName  PhoneNumbers  Emails  \n--------  ------------  ------  \n"
        );
    }

    #[test]
    fn widths_should_follow_the_widest_cell() {
        let table = render_table("a,bb\n\"longer\",\"x\"\n\"y\",\"\"\n");

        assert_eq!(
            table,
            "a         bb   \n--------  ---  \n\"longer\"  \"x\"  \n\"y\"       \"\"   \n"
        );
    }

    #[test]
    fn widths_should_count_chars_not_bytes() {
        let table = render_table("n\n\"Zoë\"\n");
        assert_eq!(table, "n      \n-----  \n\"Zoë\"  \n");
    }

    #[test]
    fn quoted_commas_should_be_split_naively() {
        let table = render_table("FullName,PhoneNumbers,Emails\n\"Doe, Jane\",\"1\",\"\"\n");
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "\"Doe       Jane\"        \"1\"     \"\"  ");
    }

    #[test]
    fn short_rows_should_print_only_their_cells() {
        let table = render_table("a,b,c\n\n1,2,3\n");
        assert_eq!(table, "a  b  c  \n-  -  -  \n   \n1  2  3  \n");
    }

    #[test]
    fn empty_content_should_render_nothing() {
        assert_eq!(render_table(""), "");
    }

    #[test]
    fn missing_file_should_print_only_notice() -> Result<()> {
        let mut out = Vec::new();

        let status = write_csv_as_table(temp_csv(), &mut out)?;

        assert_eq!(status, TableStatus::NotFound);
        assert_eq!(String::from_utf8(out)?, format!("{}\n", NOT_FOUND_NOTICE));
        Ok(())
    }

    #[test]
    fn empty_file_should_print_only_notice() -> Result<()> {
        let path = temp_csv();
        fs::write(&path, "")?;
        let mut out = Vec::new();

        let status = write_csv_as_table(&path, &mut out)?;

        assert_eq!(status, TableStatus::Empty);
        assert_eq!(String::from_utf8(out)?, format!("{}\n", EMPTY_NOTICE));
        fs::remove_file(&path).ok();
        Ok(())
    }

    #[test]
    fn existing_file_should_be_rendered() -> Result<()> {
        let path = temp_csv();
        fs::write(&path, "FullName,PhoneNumbers,Emails\n\"Ada\",\"1\",\"\"\n")?;
        let mut out = Vec::new();

        let status = write_csv_as_table(&path, &mut out)?;

        assert_eq!(status, TableStatus::Rendered { rows: 1 });
        assert_eq!(
            String::from_utf8(out)?,
            "FullName  PhoneNumbers  Emails  \n--------  ------------  ------  \n\"Ada\"     \"1\"           \"\"      \n"
        );
        fs::remove_file(&path).ok();
        Ok(())
    }
}
