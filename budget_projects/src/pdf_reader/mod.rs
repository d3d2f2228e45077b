mod content_extractor;
mod table_finder;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use lopdf::Document;
use tracing::{debug, info};

use crate::pdf_reader::content_extractor::extract_page_layouts;
use crate::pdf_reader::table_finder::find_tables;

/// A table as found on a page: rows of cells, `None` for empty or merged cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub rows: Vec<Vec<Option<String>>>,
}

/// One data row keyed by its column header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRow {
    cells: HashMap<String, Option<String>>,
}

impl TableRow {
    /// The cell under `header`, `None` when the column is missing or the cell is blank.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells
            .get(header)
            .and_then(Option::as_deref)
            .filter(|cell| !cell.trim().is_empty())
    }
}

impl<H: Into<String>, C: Into<String>> FromIterator<(H, Option<C>)> for TableRow {
    fn from_iter<T: IntoIterator<Item = (H, Option<C>)>>(iter: T) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(header, cell)| (header.into(), cell.map(Into::into)))
                .collect(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum TableExtractionError {
    #[error("Failed to open PDF {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: lopdf::Error,
    },
    #[error("Failed to read the content of PDF {}: {reason}", .path.display())]
    Content { path: PathBuf, reason: String },
}

#[derive(Debug, Clone, Default)]
pub struct PdfReader {
    headers: Option<Vec<String>>,
}

impl PdfReader {
    /// Reads each table's first row as its header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `headers` for every table, so every row is a data row.
    pub fn with_headers<H: Into<String>>(headers: impl IntoIterator<Item = H>) -> Self {
        Self {
            headers: Some(headers.into_iter().map(Into::into).collect()),
        }
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    pub fn extract_tables(&self, path: &Path) -> Result<Vec<Table>, TableExtractionError> {
        let document = Document::load(path).map_err(|source| TableExtractionError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let layouts = extract_page_layouts(&document).map_err(|error| {
            TableExtractionError::Content {
                path: path.to_path_buf(),
                reason: format!("{error:?}"),
            }
        })?;

        let mut tables = vec![];
        for (page_number, layout) in (1u32..).zip(layouts) {
            let page_tables = find_tables(&layout);
            info!(page_number, tables = page_tables.len(), "Processing page");
            tables.extend(page_tables);
        }
        Ok(tables)
    }

    pub fn extract_rows(&self, path: &Path) -> Result<Vec<TableRow>, TableExtractionError> {
        let tables = self.extract_tables(path)?;
        Ok(self.rows_from_tables(tables))
    }

    pub fn rows_from_tables(&self, tables: Vec<Table>) -> Vec<TableRow> {
        tables
            .into_iter()
            .filter(|table| !table.rows.is_empty())
            .flat_map(|table| {
                let mut rows = table.rows.into_iter();
                let headers: Vec<Option<String>> = match &self.headers {
                    Some(headers) => headers.iter().cloned().map(Some).collect(),
                    None => rows.next().unwrap_or_default(),
                };
                debug!(
                    "Table headers: {}",
                    headers.iter().map(|h| format!("{h:?}")).join(", ")
                );
                rows.filter(|row| row.len() >= 2 && row.iter().any(Option::is_some))
                    .map(|row| zip_row(&headers, row))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

fn zip_row(headers: &[Option<String>], row: Vec<Option<String>>) -> TableRow {
    headers
        .iter()
        .zip(row)
        .filter_map(|(header, cell)| header.clone().map(|header| (header, cell)))
        .collect()
}


#[cfg(test)]
mod tests {
    use super::sample_pdf::ruled_table;
    use super::{PdfReader, Table, TableRow};

    fn cells(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|value| value.map(str::to_string)).collect()
    }

    #[test]
    fn test_first_row_is_the_header() {
        let table = Table {
            rows: vec![
                cells(&[Some("Tytuł"), Some("Koszt projektu"), None]),
                cells(&[Some("Ławki"), Some("5 000 zł"), Some("przypis")]),
                cells(&[Some("Pusty")]),
                cells(&[None, None, None]),
            ],
        };

        let rows = PdfReader::new().rows_from_tables(vec![table]);

        assert_eq!(
            rows,
            vec![TableRow::from_iter([
                ("Tytuł", Some("Ławki")),
                ("Koszt projektu", Some("5 000 zł")),
            ])]
        );
    }

    #[test]
    fn test_fixed_headers_make_every_row_data() {
        let tables = vec![
            Table {
                rows: vec![cells(&[Some("1"), Some("Skwer")])],
            },
            Table {
                rows: vec![cells(&[Some("2"), Some("Boisko")])],
            },
        ];

        let rows = PdfReader::with_headers(["Lp.", "Tytuł"]).rows_from_tables(tables);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("Tytuł"), Some("Boisko"));
        assert_eq!(rows[0].get("Lp."), Some("1"));
    }

    #[test]
    fn test_blank_cells_read_as_missing() {
        let row = TableRow::from_iter([("Tytuł", Some("  ")), ("Koszt", None)]);

        assert_eq!(row.get("Tytuł"), None);
        assert_eq!(row.get("Koszt"), None);
        assert_eq!(row.get("Brak"), None);
    }

    #[test]
    fn test_table_is_read_from_a_ruled_pdf() {
        let rows: [(&str, [&[u8]; 3]); 3] = [
            ("F1", [b"Tytu\xb3 projektu", b"Koszt", b"Uwagi"]),
            ("F2", [b"\x01awki przy szkole", b"5 000 z\x02", b""]),
            ("F2", [b"Boisko", b"12 000 z\x02", b"TAK"]),
        ];
        let pdf = ruled_table(&rows);

        let tables = PdfReader::new().extract_tables(pdf.path()).unwrap();

        assert_eq!(
            tables,
            vec![Table {
                rows: vec![
                    cells(&[Some("Tytuł projektu"), Some("Koszt"), Some("Uwagi")]),
                    cells(&[Some("Ławki przy szkole"), Some("5 000 zł"), None]),
                    cells(&[Some("Boisko"), Some("12 000 zł"), Some("TAK")]),
                ],
            }]
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = PdfReader::new().extract_tables(std::path::Path::new("does/not/exist.pdf"));
        assert!(result.is_err());
    }
}
