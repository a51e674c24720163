//! File source loading
//!
//! File sources are CSV with a header row. Every cell goes through
//! [`Value::parse_cell`], so a column may mix inferred kinds; the declared
//! feature/label type is applied later, at materialization.

use crate::error::Result;
use crate::table::Table;
use featurebox_core::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads CSV files into tables
#[derive(Debug, Clone)]
pub struct CsvReader {
    delimiter: u8,
}

impl Default for CsvReader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Read a CSV file from disk
    pub fn read_path(&self, name: &str, path: &Path) -> Result<Table> {
        debug!(path = %path.display(), "Reading CSV source");
        let file = std::fs::File::open(path)?;
        self.read(name, file)
    }

    /// Read CSV from any reader
    pub fn read<R: Read>(&self, name: &str, input: R) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_reader(input);

        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut table = Table::new(name, columns);

        for record in reader.records() {
            let record = record?;
            table.push_row(record.iter().map(Value::parse_cell).collect())?;
        }

        debug!(source = name, rows = table.len(), "Loaded CSV source");
        Ok(table)
    }
}

/// Resolve a source path against the data directory. Absolute paths are kept.
pub fn resolve_path(data_dir: Option<&Path>, path: &Path) -> PathBuf {
    match data_dir {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    }
}
