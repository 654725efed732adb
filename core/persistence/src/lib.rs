//! FILENAME: core/persistence/src/lib.rs
//! Dataset loading for the customer analytics dashboard.
//!
//! The dataset is read once at startup from a CSV or XLSX file. Any schema
//! mismatch (missing column, unparseable numeric value) aborts the load.

mod columns;
mod csv_reader;
mod error;
mod xlsx_reader;

pub use columns::{normalize_header, ColumnMap};
pub use csv_reader::{load_csv, read_csv};
pub use error::DataLoadError;
pub use xlsx_reader::load_xlsx;

use engine::Table;
use std::path::Path;

// ============================================================================
// SOURCE FORMAT
// ============================================================================

/// Supported on-disk formats, detected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Xlsx,
}

impl SourceFormat {
    /// Detects the format from the path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, DataLoadError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(SourceFormat::Csv),
            Some("xlsx") => Ok(SourceFormat::Xlsx),
            Some(other) => Err(DataLoadError::UnsupportedFormat(other.to_string())),
            None => Err(DataLoadError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Loads the transaction table from `path`.
/// This is the single entry point used at startup.
pub fn load_dataset(path: &Path) -> Result<Table, DataLoadError> {
    let format = SourceFormat::from_path(path)?;

    let table = match format {
        SourceFormat::Csv => load_csv(path)?,
        SourceFormat::Xlsx => load_xlsx(path)?,
    };

    log::info!(
        "Loaded {} transactions ({:?}) from {}",
        table.len(),
        format,
        path.display()
    );

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_detection() {
        assert_eq!(
            SourceFormat::from_path(&PathBuf::from("data/customers.csv")).unwrap(),
            SourceFormat::Csv
        );
        assert_eq!(
            SourceFormat::from_path(&PathBuf::from("data/customers.XLSX")).unwrap(),
            SourceFormat::Xlsx
        );
    }

    #[test]
    fn test_unsupported_format() {
        let err = SourceFormat::from_path(&PathBuf::from("data/customers.parquet")).unwrap_err();
        assert!(matches!(err, DataLoadError::UnsupportedFormat(ref ext) if ext == "parquet"));

        let err = SourceFormat::from_path(&PathBuf::from("data/customers")).unwrap_err();
        assert!(matches!(err, DataLoadError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_dataset(&PathBuf::from("/nonexistent/customers.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::Io(_)));
    }
}
