use crate::file::csv::{error::FileError, settings::CsvSettings};
use model::{
    core::value::Value,
    records::table::{Column, Table},
};
use std::{
    fs::File,
    path::{Path, PathBuf},
    time::Instant,
};
use tracing::{debug, info};

/// Reads a delimited text file with a header row into a table of raw strings.
///
/// Header names are kept verbatim. Empty cells become `Value::Null`; every
/// other cell is a `Value::String`, and typing is left to later stages.
pub struct CsvDataSource {
    path: PathBuf,
    settings: CsvSettings,
}

impl CsvDataSource {
    pub fn new<P: AsRef<Path>>(path: P, settings: CsvSettings) -> Self {
        CsvDataSource {
            path: path.as_ref().to_path_buf(),
            settings,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_table(&self, name: &str) -> Result<Table, FileError> {
        let start = Instant::now();
        let path_str = self.path.display().to_string();

        let file = File::open(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FileError::NotFound(path_str.clone()),
            _ => FileError::IoError(e),
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.settings.delimiter)
            .has_headers(true)
            .flexible(!self.settings.strict_width)
            .from_reader(file);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
            return Err(FileError::MissingHeader(path_str));
        }

        let mut columns: Vec<Column> = headers.iter().map(|h| Column::new(h, Vec::new())).collect();

        for (line, record) in reader.records().enumerate() {
            let record = record.map_err(|e| FileError::ReadError {
                path: path_str.clone(),
                reason: format!("record {}: {e}", line + 1),
            })?;

            for (idx, col) in columns.iter_mut().enumerate() {
                let cell = record.get(idx).unwrap_or("");
                col.values.push(parse_cell(cell));
            }
        }

        let table = Table::from_columns(name, columns)?;
        info!(
            "Read {} rows x {} columns from {}",
            table.row_count(),
            table.columns().len(),
            path_str
        );
        debug!("CSV read took {} ms", start.elapsed().as_millis());
        Ok(table)
    }
}

fn parse_cell(cell: &str) -> Value {
    if cell.trim().is_empty() {
        Value::Null
    } else {
        Value::String(cell.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_table_keeps_raw_headers_and_nulls_empty_cells() {
        let file = write_csv(" Customer ID ,Name\n1,Alice\n2,\n");
        let table = CsvDataSource::new(file.path(), CsvSettings::default())
            .read_table("customers")
            .unwrap();

        assert_eq!(table.name(), "customers");
        assert_eq!(table.column_names(), vec![" Customer ID ", "Name"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.value(0, "Name"), Some(&Value::from("Alice")));
        assert_eq!(table.value(1, "Name"), Some(&Value::Null));
    }

    #[test]
    fn test_read_table_custom_delimiter() {
        let file = write_csv("a;b\n1;2\n");
        let table = CsvDataSource::new(file.path(), CsvSettings::with_delimiter(b';'))
            .read_table("t")
            .unwrap();
        assert_eq!(table.value(0, "b"), Some(&Value::from("2")));
    }

    #[test]
    fn test_ragged_row_is_an_error() {
        let file = write_csv("a,b\n1,2,3\n");
        let err = CsvDataSource::new(file.path(), CsvSettings::default())
            .read_table("t")
            .unwrap_err();
        assert!(matches!(err, FileError::ReadError { .. }));
    }

    #[test]
    fn test_flexible_width_pads_with_nulls() {
        let file = write_csv("a,b\n1\n");
        let settings = CsvSettings {
            strict_width: false,
            ..Default::default()
        };
        let table = CsvDataSource::new(file.path(), settings)
            .read_table("t")
            .unwrap();
        assert_eq!(table.value(0, "b"), Some(&Value::Null));
    }

    #[test]
    fn test_missing_file() {
        let err = CsvDataSource::new("/definitely/not/here.csv", CsvSettings::default())
            .read_table("t")
            .unwrap_err();
        assert!(matches!(err, FileError::NotFound(_)));
    }
}
