//! CSV loading.
//!
//! Both inputs are UTF-8 CSV files with a header row. Each data row becomes a
//! [`Row`]: a map from header name to cell text. Loading is forgiving at the
//! row level and strict at the file level:
//!
//! - A missing or unreadable primary listing is fatal ([`LoadError::InputMissing`]).
//! - A missing image-mapping file is not an error; [`load_optional_rows`]
//!   returns no rows.
//! - Blank lines, rows with fewer cells than the header, and rows that fail to
//!   decode are skipped with a `debug` event.

use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Input file missing or unreadable: {0}")]
    InputMissing(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// One data row keyed by header name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: HashMap<String, String>,
}

impl Row {
    /// Cell text for `column`, or `""` when the column is absent.
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Load every well-formed data row from a required CSV file.
pub fn load_rows(path: &Path) -> Result<Vec<Row>, LoadError> {
    let file = File::open(path).map_err(|_| LoadError::InputMissing(path.to_path_buf()))?;
    read_rows(file, path)
}

/// Load rows from an optional CSV file; a missing file yields no rows.
pub fn load_optional_rows(path: &Path) -> Result<Vec<Row>, LoadError> {
    match File::open(path) {
        Ok(file) => read_rows(file, path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!(
                path = %path.display(),
                "optional input not found, continuing without it"
            );
            Ok(Vec::new())
        }
        Err(e) => Err(LoadError::Io(e)),
    }
}

/// Parse CSV from any reader. `origin` is only used in diagnostics.
pub fn read_rows<R: io::Read>(reader: R, origin: &Path) -> Result<Vec<Row>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = match csv_reader.headers() {
        Ok(h) => h
            .iter()
            .map(|name| name.trim_start_matches('\u{feff}').to_string())
            .collect(),
        Err(e) => {
            return Err(LoadError::Csv {
                path: origin.to_path_buf(),
                source: e,
            });
        }
    };

    let mut rows: Vec<Row> = Vec::new();
    for (index, result) in csv_reader.records().enumerate() {
        let row_number = index + 1;
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => {
                return Err(LoadError::Csv {
                    path: origin.to_path_buf(),
                    source: e,
                });
            }
            Err(e) => {
                tracing::debug!(
                    path = %origin.display(),
                    row_number,
                    error = %e,
                    "skipping undecodable row"
                );
                continue;
            }
        };

        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        if record.len() < headers.len() {
            tracing::debug!(
                path = %origin.display(),
                row_number,
                cells = record.len(),
                expected = headers.len(),
                "skipping short row"
            );
            continue;
        }

        rows.push(
            headers
                .iter()
                .zip(record.iter())
                .map(|(h, cell)| (h.as_str(), cell))
                .collect(),
        );
    }

    Ok(rows)
}
